//! Error types for slae-solver

use slae_model::ModelError;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, SolveError>;

/// Why a matrix was refused by the Cholesky validity checker.
#[derive(Error, Debug, Clone, Copy, PartialEq)]
pub enum PreconditionFailure {
    #[error("matrix is empty")]
    Empty,

    #[error("matrix is not square ({rows}x{cols})")]
    NotSquare { rows: usize, cols: usize },

    #[error("matrix is not symmetric: a[{row}][{col}] differs from a[{col}][{row}]")]
    NotSymmetric { row: usize, col: usize },

    #[error("matrix is not positive-definite: leading minor of order {order} is {minor}")]
    NotPositiveDefinite { order: usize, minor: f64 },
}

#[derive(Error, Debug)]
pub enum SolveError {
    #[error("invalid system: {0}")]
    Shape(#[from] ModelError),

    #[error("Cholesky precondition failed: {0}")]
    InvalidPrecondition(#[from] PreconditionFailure),

    #[error("matrix is singular: zero pivot in column {column}")]
    SingularMatrix { column: usize },

    #[error("zero diagonal entry in row {row}")]
    ZeroDiagonal { row: usize },

    #[error("convergence threshold must be positive and finite, got {0}")]
    InvalidThreshold(f64),

    #[error("no convergence after {iterations} iterations (last max change {last_change:.3e})")]
    NonConvergence { iterations: usize, last_change: f64 },
}
