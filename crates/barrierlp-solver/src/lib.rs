mod error;
mod interior_point;
mod problem;
mod simplex;
mod solution;

pub use error::SolverError;
pub use interior_point::InteriorPointSolver;
pub use problem::LpProblem;
pub use simplex::SimplexSolver;
pub use solution::{InteriorPointSolution, SimplexResult};
