use thiserror::Error;

/// Reasons a solve can fail. Every failure is terminal for the current solve.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SolverError {
    #[error("Objective is unbounded: no leaving row for the entering column")]
    Unbounded,
    #[error("Method cannot be used on provided inputs (objective {objective})")]
    Infeasible { objective: f64 },
    #[error("The interior-point method is not applicable: inner simplex solve is unbounded")]
    NotApplicable,
    #[error("Dimension mismatch in {what}: expected {expected}, found {found}")]
    DimensionMismatch {
        what: String,
        expected: usize,
        found: usize,
    },
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),
    #[error("Numerical breakdown in iteration {iteration}: non-finite values in the interior-point state")]
    NumericalBreakdown { iteration: usize },
    #[error("No convergence after {iterations} iterations")]
    IterationLimit { iterations: usize },
}
