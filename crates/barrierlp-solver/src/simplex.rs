use tracing::trace;

use crate::error::SolverError;
use crate::problem::LpProblem;
use crate::solution::SimplexResult;

/// Dense tableau simplex solver for `maximize cᵀx s.t. Ax <= b, x >= 0`.
///
/// The all-slack basis is used as the starting point, so every `b[i]` is
/// expected to be non-negative. A negative right-hand side typically surfaces
/// as [`SolverError::Infeasible`].
#[derive(Debug, Clone, Copy)]
pub struct SimplexSolver {
    /// Maximum pivots before giving up
    max_iterations: usize,
    /// Tolerance for floating point comparisons
    tolerance: f64,
}

impl Default for SimplexSolver {
    fn default() -> Self {
        Self {
            max_iterations: 10000,
            tolerance: 1e-4,
        }
    }
}

impl SimplexSolver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_max_iterations(mut self, max: usize) -> Self {
        self.max_iterations = max;
        self
    }

    pub fn with_tolerance(mut self, tol: f64) -> Self {
        self.tolerance = tol;
        self
    }

    /// Solve the LP problem, returning the optimal objective and variable values
    pub fn solve(&self, problem: &LpProblem) -> Result<SimplexResult, SolverError> {
        problem.validate()?;
        if self.tolerance.is_nan() || self.tolerance <= 0.0 {
            return Err(SolverError::InvalidParameter(format!(
                "tolerance must be positive, got {}",
                self.tolerance
            )));
        }

        let mut tableau = Tableau::new(problem);
        self.optimize(&mut tableau)?;

        let values = tableau.extract_values();
        let objective_value = problem.objective_value(&values);
        if objective_value < -self.tolerance {
            return Err(SolverError::Infeasible {
                objective: objective_value,
            });
        }

        Ok(SimplexResult::new(objective_value, values))
    }

    fn optimize(&self, tableau: &mut Tableau) -> Result<(), SolverError> {
        for iteration in 0..=self.max_iterations {
            let Some(pivot_col) = self.find_pivot_column(tableau) else {
                return Ok(());
            };
            if iteration == self.max_iterations {
                break;
            }
            let Some(pivot_row) = self.find_pivot_row(tableau, pivot_col) else {
                return Err(SolverError::Unbounded);
            };
            trace!(iteration, pivot_col, pivot_row, "pivot");
            tableau.pivot(pivot_row, pivot_col);
        }

        Err(SolverError::IterationLimit {
            iterations: self.max_iterations,
        })
    }

    /// Most negative reduced cost, lowest index on ties. `None` once optimal.
    fn find_pivot_column(&self, tableau: &Tableau) -> Option<usize> {
        let obj_row = &tableau.data[tableau.n_rows];
        let n_cols = tableau.n_vars + tableau.n_rows;
        if n_cols == 0 {
            return None;
        }

        let mut min_col = 0;
        for j in 1..n_cols {
            if obj_row[j] < obj_row[min_col] {
                min_col = j;
            }
        }

        if obj_row[min_col] >= -self.tolerance {
            None
        } else {
            Some(min_col)
        }
    }

    /// Minimum ratio test over rows with a positive entry in `col`
    fn find_pivot_row(&self, tableau: &Tableau, col: usize) -> Option<usize> {
        let rhs_col = tableau.rhs_col();

        let mut min_row: Option<usize> = None;
        for i in 0..tableau.n_rows {
            let val = tableau.data[i][col];
            if val <= self.tolerance {
                continue;
            }
            let smaller = match min_row {
                None => true,
                Some(r) => {
                    tableau.data[i][rhs_col] / val < tableau.data[r][rhs_col] / tableau.data[r][col]
                }
            };
            if smaller {
                min_row = Some(i);
            }
        }

        min_row
    }
}

/// `[A | I | b]` over `[-c | 0 | 0]`, owned by a single solve
struct Tableau {
    data: Vec<Vec<f64>>,
    basic_vars: Vec<usize>,
    n_vars: usize,
    n_rows: usize,
}

impl Tableau {
    fn new(problem: &LpProblem) -> Self {
        let n_vars = problem.num_variables();
        let n_rows = problem.num_constraints();
        let total_cols = n_vars + n_rows + 1;

        let mut data = vec![vec![0.0; total_cols]; n_rows + 1];
        let mut basic_vars = Vec::with_capacity(n_rows);

        for (i, row) in problem.constraints.iter().enumerate() {
            data[i][..n_vars].copy_from_slice(row);
            data[i][n_vars + i] = 1.0;
            data[i][total_cols - 1] = problem.rhs[i];
            basic_vars.push(n_vars + i);
        }

        for (j, &coef) in problem.objective.iter().enumerate() {
            data[n_rows][j] = -coef;
        }

        Self {
            data,
            basic_vars,
            n_vars,
            n_rows,
        }
    }

    fn rhs_col(&self) -> usize {
        self.n_vars + self.n_rows
    }

    fn pivot(&mut self, row: usize, col: usize) {
        let n_cols = self.rhs_col() + 1;

        // Scale pivot row
        let pivot_val = self.data[row][col];
        for j in 0..n_cols {
            self.data[row][j] /= pivot_val;
        }

        // Eliminate column in other rows, objective row included
        let pivot_row = self.data[row].clone();
        for (i, target) in self.data.iter_mut().enumerate() {
            if i == row {
                continue;
            }
            let factor = target[col];
            for j in 0..n_cols {
                target[j] -= pivot_row[j] * factor;
            }
        }

        self.basic_vars[row] = col;
    }

    /// Structural variables in the basis take their row's RHS; everything else is 0
    fn extract_values(&self) -> Vec<f64> {
        let rhs_col = self.rhs_col();
        let mut values = vec![0.0; self.n_vars];
        for (i, &basic) in self.basic_vars.iter().enumerate() {
            if basic < self.n_vars {
                values[basic] = self.data[i][rhs_col];
            }
        }
        values
    }
}
