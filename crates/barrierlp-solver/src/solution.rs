use std::fmt;

/// The result of a simplex solve: the optimal objective value and variable values
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct SimplexResult {
    objective: f64,
    values: Vec<f64>,
}

impl SimplexResult {
    pub fn new(objective: f64, values: Vec<f64>) -> Self {
        Self { objective, values }
    }

    /// Optimal objective value
    pub fn objective(&self) -> f64 {
        self.objective
    }

    /// Optimal values for each variable
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    pub fn into_values(self) -> Vec<f64> {
        self.values
    }
}

impl fmt::Display for SimplexResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "x* = {:?}\nobj = {:?}", self.values, self.objective)
    }
}

/// The answer of the interior-point method.
///
/// The objective is not stored here; value it with
/// [`LpProblem::objective_value`](crate::LpProblem::objective_value).
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct InteriorPointSolution {
    values: Vec<f64>,
    iterations: usize,
    barrier: f64,
}

impl InteriorPointSolution {
    pub(crate) fn new(values: Vec<f64>, iterations: usize, barrier: f64) -> Self {
        Self {
            values,
            iterations,
            barrier,
        }
    }

    /// Primal solution estimate
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    pub fn into_values(self) -> Vec<f64> {
        self.values
    }

    /// Number of outer iterations performed
    pub fn iterations(&self) -> usize {
        self.iterations
    }

    /// Barrier parameter after the last shrink (alpha^iterations)
    pub fn barrier(&self) -> f64 {
        self.barrier
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accessors() {
        let result = SimplexResult::new(11.0, vec![3.0, 1.0]);
        assert_eq!(result.objective(), 11.0);
        assert_eq!(result.values(), &[3.0, 1.0]);
        assert_eq!(result.into_values(), vec![3.0, 1.0]);
    }

    #[test]
    fn test_display() {
        let result = SimplexResult::new(11.0, vec![3.0, 1.0]);
        assert_eq!(result.to_string(), "x* = [3.0, 1.0]\nobj = 11.0");
    }
}
