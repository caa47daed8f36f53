//! Error types for slae-model

use thiserror::Error;

pub type Result<T> = std::result::Result<T, ModelError>;

/// Shape and configuration errors, raised before any solver runs.
#[derive(Error, Debug)]
pub enum ModelError {
    #[error("coefficient matrix is empty")]
    Empty,

    #[error("coefficient matrix is not square: {rows}x{cols}")]
    NotSquare { rows: usize, cols: usize },

    #[error("row {row} has {got} entries, expected {expected}")]
    RaggedRow {
        row: usize,
        expected: usize,
        got: usize,
    },

    #[error("right-hand side has {got} entries, expected {expected}")]
    DimensionMismatch { expected: usize, got: usize },

    #[error("convergence threshold `{name}` must be positive and finite, got {value}")]
    InvalidThreshold { name: &'static str, value: f64 },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
