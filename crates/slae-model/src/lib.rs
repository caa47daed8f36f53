//! Data model and problem configuration for the dense SLAE solvers.
//!
//! A [`Problem`] is a validated square system `A·x = b`. It is built once and
//! then only lent out by reference; every solver copies what it needs before
//! mutating anything. [`ProblemConfig`] pairs a problem with the two
//! convergence thresholds used by the iterative methods.
//!
//! Matrices and vectors are plain `nalgebra::DMatrix<f64>` and
//! `DVector<f64>`; solutions come back as `DVector<f64>`.

mod config;
mod error;
mod problem;

pub use config::{LOOSE_EPSILON, ProblemConfig, TIGHT_EPSILON, Thresholds};
pub use error::{ModelError, Result};
pub use problem::{Problem, check_shape};
