use tracing::debug;

use crate::error::SolverError;
use crate::problem::LpProblem;
use crate::simplex::SimplexSolver;
use crate::solution::InteriorPointSolution;

/// Primal barrier interior-point solver for `maximize cᵀx s.t. Ax <= b, x >= 0`.
///
/// Each outer iteration folds the current slack weights `s` and barrier
/// parameter `t` into an augmented LP with `n + m + 1` variables and `m + 1`
/// constraints, solves it with [`SimplexSolver`], and applies a
/// complementarity-gap correction to `x` and `s`. The loop ends once no
/// correction is positive.
///
/// The update rule is undamped: with a tolerance close to machine precision
/// the loop may oscillate until the iteration cap is reached.
#[derive(Debug, Clone, Copy)]
pub struct InteriorPointSolver {
    /// Barrier shrink factor, in (0, 1)
    alpha: f64,
    /// Tolerance for floating point comparisons and guarded divisions
    tolerance: f64,
    /// Maximum outer iterations before giving up
    max_iterations: usize,
}

impl InteriorPointSolver {
    pub fn new(alpha: f64) -> Self {
        Self {
            alpha,
            tolerance: 1e-4,
            max_iterations: 10000,
        }
    }

    pub fn with_tolerance(mut self, tol: f64) -> Self {
        self.tolerance = tol;
        self
    }

    pub fn with_max_iterations(mut self, max: usize) -> Self {
        self.max_iterations = max;
        self
    }

    pub fn solve(&self, problem: &LpProblem) -> Result<InteriorPointSolution, SolverError> {
        self.check_inputs(problem)?;

        let n = problem.num_variables();
        let m = problem.num_constraints();
        let eps = self.tolerance;
        let simplex = SimplexSolver::new().with_tolerance(eps);

        let mut x = vec![1.0; n];
        let mut s = vec![1.0; m];
        let mut t = 1.0;

        for iteration in 1..=self.max_iterations {
            let augmented = augmented_problem(problem, &s, t);
            let y = match simplex.solve(&augmented) {
                Ok(result) => result.into_values(),
                Err(SolverError::Unbounded) => return Err(SolverError::NotApplicable),
                Err(e) => return Err(e),
            };

            let mu = duality_measure(&s, &problem.rhs);
            let t_new = self.alpha * t;
            let sigma = (t / t_new) * mu;
            // Non-finite values make every gap test false, which would read as convergence
            if !sigma.is_finite() || !all_finite(&y) {
                return Err(SolverError::NumericalBreakdown { iteration });
            }

            let converged = correct(&mut x, &mut s, &y, &problem.rhs, sigma, eps);
            debug!(iteration, t, mu, sigma, converged, "interior-point iteration");
            if !all_finite(&x) || !all_finite(&s) {
                return Err(SolverError::NumericalBreakdown { iteration });
            }

            t = t_new;
            if converged {
                debug!(iteration, barrier = t, "interior-point converged");
                return Ok(InteriorPointSolution::new(x, iteration, t));
            }
        }

        Err(SolverError::IterationLimit {
            iterations: self.max_iterations,
        })
    }

    fn check_inputs(&self, problem: &LpProblem) -> Result<(), SolverError> {
        problem.validate()?;

        if problem.num_variables() == 0 || problem.num_constraints() == 0 {
            return Err(SolverError::InvalidParameter(
                "interior-point method needs at least one variable and one constraint".to_string(),
            ));
        }
        // The correction pass reads y[n + i] for every i < n
        if problem.num_variables() > problem.num_constraints() + 1 {
            return Err(SolverError::InvalidParameter(format!(
                "interior-point method needs at most m + 1 variables, got n = {} with m = {}",
                problem.num_variables(),
                problem.num_constraints()
            )));
        }
        if self.alpha.is_nan() || self.alpha <= 0.0 || self.alpha >= 1.0 {
            return Err(SolverError::InvalidParameter(format!(
                "alpha must lie in (0, 1), got {}",
                self.alpha
            )));
        }
        if self.tolerance.is_nan() || self.tolerance <= 0.0 {
            return Err(SolverError::InvalidParameter(format!(
                "tolerance must be positive, got {}",
                self.tolerance
            )));
        }
        if let Some((i, b)) = problem.first_non_positive_rhs() {
            return Err(SolverError::InvalidParameter(format!(
                "right-hand side {} must be positive, got {}",
                i, b
            )));
        }

        Ok(())
    }
}

/// Build the LP solved on every outer iteration.
///
/// Columns: original `x` (n), coupling block (m), barrier column (1).
/// Rows `0..m` hold `A` with `s[i]` in the barrier column; row `m` places the
/// last column of `A` across the coupling block. RHS is `b` followed by 0 and
/// the objective is `c`, zeros, then `-t`.
fn augmented_problem(problem: &LpProblem, s: &[f64], t: f64) -> LpProblem {
    let n = problem.num_variables();
    let m = problem.num_constraints();

    let mut constraints = Vec::with_capacity(m + 1);
    for (row, &si) in problem.constraints.iter().zip(s) {
        let mut augmented = Vec::with_capacity(n + m + 1);
        augmented.extend_from_slice(row);
        augmented.extend(std::iter::repeat_n(0.0, m));
        augmented.push(si);
        constraints.push(augmented);
    }

    let mut coupling = vec![0.0; n];
    coupling.extend(problem.constraints.iter().map(|row| row[n - 1]));
    coupling.push(0.0);
    constraints.push(coupling);

    let mut rhs = problem.rhs.clone();
    rhs.push(0.0);

    let mut objective = problem.objective.clone();
    objective.extend(std::iter::repeat_n(0.0, m));
    objective.push(-t);

    LpProblem::new(objective, constraints, rhs)
}

/// μ = (1/m)·Σ s[i]/b[i]
fn duality_measure(s: &[f64], rhs: &[f64]) -> f64 {
    let total: f64 = s.iter().zip(rhs).map(|(si, bi)| si / bi).sum();
    total / s.len() as f64
}

fn all_finite(values: &[f64]) -> bool {
    values.iter().all(|v| v.is_finite())
}

/// Complementarity-gap correction. Returns true when nothing was updated.
fn correct(x: &mut [f64], s: &mut [f64], y: &[f64], rhs: &[f64], sigma: f64, eps: f64) -> bool {
    let n = x.len();
    let mut converged = true;

    for i in 0..n {
        let xi = y[i];
        let si = y[n + i];
        let delta = sigma - si * xi;
        if delta > 0.0 {
            converged = false;
            x[i] = xi + delta / (si + eps);
        }
    }

    for (i, (s_i, &b)) in s.iter_mut().zip(rhs).enumerate() {
        let si = y[n + i];
        let delta = sigma - si * b;
        if delta > 0.0 {
            converged = false;
            *s_i = si + delta / (b + eps);
        }
    }

    converged
}
