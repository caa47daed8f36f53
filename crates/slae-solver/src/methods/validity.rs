//! Preconditions for the Cholesky decomposition.
//!
//! Checks run in order and stop at the first failure:
//! 1. the matrix is non-empty and square,
//! 2. it is symmetric within [`SYMMETRY_TOLERANCE`],
//! 3. every leading principal minor is strictly positive.

use nalgebra::DMatrix;

use crate::error::PreconditionFailure;
use crate::trace::TraceSink;

/// Largest `|a[i][j] - a[j][i]|` still treated as symmetric.
pub const SYMMETRY_TOLERANCE: f64 = 1e-10;

/// Boolean form of [`check_cholesky_preconditions`].
pub fn is_valid_for_cholesky(a: &DMatrix<f64>, sink: &dyn TraceSink) -> bool {
    check_cholesky_preconditions(a, sink).is_ok()
}

/// Run the validity checks and name the first one that fails.
pub fn check_cholesky_preconditions(
    a: &DMatrix<f64>,
    sink: &dyn TraceSink,
) -> Result<(), PreconditionFailure> {
    let result = evaluate(a, sink);
    match &result {
        Ok(()) => sink.info("Matrix is positive-definite and symmetric about the main diagonal"),
        Err(failure) => sink.warn(&format!(
            "{failure}. The Cholesky method is not applicable"
        )),
    }
    result
}

fn evaluate(a: &DMatrix<f64>, sink: &dyn TraceSink) -> Result<(), PreconditionFailure> {
    let (rows, cols) = a.shape();
    if rows == 0 || cols == 0 {
        return Err(PreconditionFailure::Empty);
    }
    if rows != cols {
        return Err(PreconditionFailure::NotSquare { rows, cols });
    }
    sink.info(&format!("Matrix is square ({rows}x{cols})"));

    if let Some((row, col)) = first_asymmetry(a) {
        return Err(PreconditionFailure::NotSymmetric { row, col });
    }
    sink.info("Matrix is symmetric");

    for order in 1..=rows {
        let minor = leading_minor_determinant(a, order);
        sink.debug(&format!("Leading minor of order {order} = {minor:.4}"));
        if minor.is_nan() || minor <= 0.0 {
            return Err(PreconditionFailure::NotPositiveDefinite { order, minor });
        }
    }
    sink.info("All leading principal minors are positive");

    Ok(())
}

/// First `(row, col)` below the diagonal whose mirror differs by more than
/// [`SYMMETRY_TOLERANCE`]. Expects a square matrix.
pub fn first_asymmetry(a: &DMatrix<f64>) -> Option<(usize, usize)> {
    for i in 0..a.nrows() {
        for j in 0..i {
            if (a[(i, j)] - a[(j, i)]).abs() > SYMMETRY_TOLERANCE {
                return Some((i, j));
            }
        }
    }
    None
}

/// Determinant of the top-left `order`×`order` block.
///
/// Computed by elimination without pivoting on a temporary copy, as the
/// product of the pivots. Returns `0.0` as soon as a pivot is exactly zero.
///
/// # Panics
/// If `order` exceeds either dimension of `a`.
pub fn leading_minor_determinant(a: &DMatrix<f64>, order: usize) -> f64 {
    let mut m = a.view((0, 0), (order, order)).into_owned();
    let mut det = 1.0;

    for i in 0..order {
        let pivot = m[(i, i)];
        if pivot == 0.0 {
            return 0.0;
        }
        for j in (i + 1)..order {
            let factor = m[(j, i)] / pivot;
            for k in i..order {
                m[(j, k)] -= factor * m[(i, k)];
            }
        }
        det *= pivot;
    }
    det
}
