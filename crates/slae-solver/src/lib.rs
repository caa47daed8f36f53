//! Dense solvers for square linear systems `A·x = b`.
//!
//! Four methods are provided: Gaussian elimination with partial pivoting,
//! Cholesky decomposition, Jacobi iteration and Gauss-Seidel iteration.
//! Each narrates its intermediate state to an injected [`TraceSink`], and
//! the [`SolverSuite`] runs a configured list of them against one
//! [`slae_model::Problem`].

pub mod error;
pub mod methods;
pub mod suite;
pub mod trace;

pub use error::{PreconditionFailure, Result, SolveError};
pub use methods::{
    CholeskySolver, FactorMatrix, GaussSeidelSolver, GaussSolver, IterativeConfig,
    IterativeSolution, JacobiSolver, LinearSolver, Method, SolveInfo, is_valid_for_cholesky,
};
pub use suite::{MethodOutcome, SolverSuite, SuiteConfig, SuiteResults};
pub use trace::{NullSink, RecordingSink, TraceEvent, TraceLevel, TraceSink, TracingSink};
