use crate::error::SolverError;

/// A linear program in the form: maximize cᵀx subject to Ax <= b, x >= 0
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct LpProblem {
    /// Objective function coefficients (c)
    pub objective: Vec<f64>,
    /// Constraint matrix (A), one row per constraint
    pub constraints: Vec<Vec<f64>>,
    /// Right-hand side values (b)
    pub rhs: Vec<f64>,
}

impl LpProblem {
    pub fn new(objective: Vec<f64>, constraints: Vec<Vec<f64>>, rhs: Vec<f64>) -> Self {
        Self {
            objective,
            constraints,
            rhs,
        }
    }

    pub fn num_variables(&self) -> usize {
        self.objective.len()
    }

    pub fn num_constraints(&self) -> usize {
        self.rhs.len()
    }

    /// Check that A is m×n with n = |c| and m = |b|
    pub fn validate(&self) -> Result<(), SolverError> {
        let n = self.num_variables();
        let m = self.num_constraints();

        if self.constraints.len() != m {
            return Err(SolverError::DimensionMismatch {
                what: "constraint rows vs right-hand side".to_string(),
                expected: m,
                found: self.constraints.len(),
            });
        }

        for (i, row) in self.constraints.iter().enumerate() {
            if row.len() != n {
                return Err(SolverError::DimensionMismatch {
                    what: format!("constraint row {}", i),
                    expected: n,
                    found: row.len(),
                });
            }
        }

        Ok(())
    }

    /// First right-hand side that is not strictly positive (NaN included)
    pub fn first_non_positive_rhs(&self) -> Option<(usize, f64)> {
        self.rhs
            .iter()
            .copied()
            .enumerate()
            .find(|&(_, b)| b.is_nan() || b <= 0.0)
    }

    /// Σ c[j]·x[j]
    pub fn objective_value(&self, values: &[f64]) -> f64 {
        self.objective
            .iter()
            .zip(values)
            .map(|(c, x)| c * x)
            .sum()
    }

    /// Largest amount by which `values` breaks Ax <= b or x >= 0 (0 when feasible)
    pub fn max_violation(&self, values: &[f64]) -> f64 {
        let mut worst: f64 = 0.0;

        for (row, &rhs) in self.constraints.iter().zip(&self.rhs) {
            let lhs: f64 = row.iter().zip(values).map(|(a, x)| a * x).sum();
            worst = worst.max(lhs - rhs);
        }

        for &x in values {
            worst = worst.max(-x);
        }

        worst
    }
}
