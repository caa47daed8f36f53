//! Solver trait shared by the four methods.
//!
//! Each method also exposes plain functions over `DMatrix`/`DVector`; the
//! trait wraps them behind one signature so a driver can run any of them
//! against a validated [`Problem`].

use nalgebra::DVector;
use slae_model::Problem;

use crate::error::SolveError;
use crate::trace::TraceSink;

/// Convergence and diagnostic info for one solve.
#[derive(Debug, Clone, PartialEq)]
pub struct SolveInfo {
    /// Number of sweeps (1 for direct methods)
    pub iterations: usize,
    /// Euclidean norm of `b - A·x` at the returned solution
    pub residual_norm: Option<f64>,
    /// Largest per-component change in the last sweep (iterative methods only)
    pub last_change: Option<f64>,
    /// Human-readable solver name (e.g., "gauss", "gauss-seidel")
    pub solver_name: String,
}

impl SolveInfo {
    pub fn direct(solver_name: &str, problem: &Problem, x: &DVector<f64>) -> Self {
        Self {
            iterations: 1,
            residual_norm: Some(problem.residual(x).norm()),
            last_change: None,
            solver_name: solver_name.to_string(),
        }
    }
}

/// A linear solver for `A·x = b`.
///
/// Implementations never mutate the problem: anything they change is a
/// private copy.
pub trait LinearSolver: Send + Sync {
    /// Human-readable name of this solver.
    fn name(&self) -> &str;

    /// Solve the system and return the solution with diagnostics.
    fn solve_linear(
        &self,
        problem: &Problem,
        sink: &dyn TraceSink,
    ) -> Result<(DVector<f64>, SolveInfo), SolveError>;
}
