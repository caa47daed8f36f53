//! Shared pieces of the stationary iterative methods.
//!
//! Both Jacobi and Gauss-Seidel start from the zero vector and stop when no
//! component moved by more than `epsilon` during the last sweep:
//! `|old[i] - new[i]| <= epsilon` for every `i`.

use nalgebra::{DMatrix, DVector};
use serde::{Deserialize, Serialize};
use slae_model::{Problem, check_shape};

use super::traits::SolveInfo;
use crate::error::{Result, SolveError};
use crate::trace::TraceSink;

/// Sweep cap used when none is configured.
pub const DEFAULT_MAX_ITERATIONS: usize = 10_000;

/// Iterative solver configuration
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct IterativeConfig {
    /// Maximum number of sweeps before giving up
    pub max_iterations: usize,
}

impl Default for IterativeConfig {
    fn default() -> Self {
        Self {
            max_iterations: DEFAULT_MAX_ITERATIONS,
        }
    }
}

/// Result of a converged iterative solve.
#[derive(Debug, Clone, PartialEq)]
pub struct IterativeSolution {
    pub x: DVector<f64>,
    /// Sweeps performed, including the one that met the predicate
    pub iterations: usize,
    /// Largest per-component change in the final sweep
    pub last_change: f64,
}

impl IterativeSolution {
    /// Split into the solution and the diagnostics for `problem`.
    pub fn into_info(self, solver_name: &str, problem: &Problem) -> (DVector<f64>, SolveInfo) {
        let info = SolveInfo {
            iterations: self.iterations,
            residual_norm: Some(problem.residual(&self.x).norm()),
            last_change: Some(self.last_change),
            solver_name: solver_name.to_string(),
        };
        (self.x, info)
    }
}

/// True when every component moved by at most `epsilon`.
pub fn has_converged(old: &DVector<f64>, new: &DVector<f64>, epsilon: f64) -> bool {
    old.iter()
        .zip(new.iter())
        .all(|(o, n)| (o - n).abs() <= epsilon)
}

/// Largest `|old[i] - new[i]|`; NaN if any component is NaN.
pub fn max_change(old: &DVector<f64>, new: &DVector<f64>) -> f64 {
    old.iter()
        .zip(new.iter())
        .map(|(o, n)| (o - n).abs())
        .fold(0.0, |acc: f64, d| {
            if d.is_nan() || acc.is_nan() {
                f64::NAN
            } else {
                acc.max(d)
            }
        })
}

/// Reject bad shapes, thresholds and zero diagonal entries up front.
pub(crate) fn validate_inputs(a: &DMatrix<f64>, b: &DVector<f64>, epsilon: f64) -> Result<()> {
    check_shape(a, b)?;
    if !(epsilon.is_finite() && epsilon > 0.0) {
        return Err(SolveError::InvalidThreshold(epsilon));
    }
    if let Some(row) = (0..b.len()).find(|&i| a[(i, i)] == 0.0) {
        return Err(SolveError::ZeroDiagonal { row });
    }
    Ok(())
}

pub(crate) fn non_convergence(
    method: &str,
    config: &IterativeConfig,
    last_change: f64,
    sink: &dyn TraceSink,
) -> SolveError {
    sink.error(&format!(
        "{method} did not converge within {} iterations (last max change {last_change:.3e})",
        config.max_iterations
    ));
    SolveError::NonConvergence {
        iterations: config.max_iterations,
        last_change,
    }
}
