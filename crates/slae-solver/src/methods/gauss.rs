//! Gaussian elimination with partial pivoting.
//!
//! Forward elimination brings `A` to upper-triangular form, swapping in the
//! row with the largest magnitude in the pivot column first (the lowest row
//! index wins a tie). Back substitution then resolves the unknowns from the
//! last row up.

use nalgebra::{DMatrix, DVector};
use slae_model::{Problem, check_shape};

use super::traits::{LinearSolver, SolveInfo};
use crate::error::{Result, SolveError};
use crate::trace::{TraceLevel, TraceSink};

/// Direct solver using Gaussian elimination.
#[derive(Debug, Clone, Copy, Default)]
pub struct GaussSolver;

impl LinearSolver for GaussSolver {
    fn name(&self) -> &str {
        "gauss"
    }

    fn solve_linear(
        &self,
        problem: &Problem,
        sink: &dyn TraceSink,
    ) -> Result<(DVector<f64>, SolveInfo)> {
        let _span = tracing::info_span!("solve", method = self.name()).entered();
        let (a, b) = problem.to_owned_parts();
        let x = solve(a, b, sink)?;
        let info = SolveInfo::direct(self.name(), problem, &x);
        Ok((x, info))
    }
}

/// Row in `column..n` holding the largest `|a[row][column]|`.
///
/// Only a strictly larger magnitude replaces the current candidate, so ties
/// go to the lowest row index.
pub fn select_pivot_row(a: &DMatrix<f64>, column: usize) -> usize {
    let mut best = column;
    for row in (column + 1)..a.nrows() {
        if a[(row, column)].abs() > a[(best, column)].abs() {
            best = row;
        }
    }
    best
}

/// Solve `A·x = b`, consuming (and overwriting) `a` and `b`.
///
/// # Errors
/// - [`SolveError::Shape`] if `a` is not square or `b` does not match it
/// - [`SolveError::SingularMatrix`] if the selected pivot is exactly zero
pub fn solve(mut a: DMatrix<f64>, mut b: DVector<f64>, sink: &dyn TraceSink) -> Result<DVector<f64>> {
    check_shape(&a, &b)?;
    let n = b.len();
    let detailed = sink.enabled(TraceLevel::Debug);

    sink.info("Gaussian elimination: forward pass");
    for el in 0..n {
        let pivot_row = select_pivot_row(&a, el);
        sink.info(&format!(
            "Selected row {} with the largest element for column {}",
            pivot_row + 1,
            el + 1
        ));

        if pivot_row != el {
            a.swap_rows(el, pivot_row);
            b.swap_rows(el, pivot_row);
        }

        let pivot = a[(el, el)];
        if pivot == 0.0 {
            sink.error(&format!(
                "Zero pivot in column {}: the matrix is singular",
                el + 1
            ));
            return Err(SolveError::SingularMatrix { column: el });
        }

        for row in (el + 1)..n {
            let factor = a[(row, el)] / pivot;
            b[row] -= factor * b[el];
            if detailed {
                sink.debug(&format!("Updated b[{}] = {:.4}", row + 1, b[row]));
            }
            for col in el..n {
                a[(row, col)] -= factor * a[(el, col)];
                if detailed {
                    sink.debug(&format!(
                        "Updated A[{}][{}] = {:.4}",
                        row + 1,
                        col + 1,
                        a[(row, col)]
                    ));
                }
            }
        }

        sink.matrix("A", &a);
        sink.vector(&b);
    }

    sink.info("Forward pass complete, starting back substitution");
    let mut x = DVector::zeros(n);
    for i in (0..n).rev() {
        let mut sum = 0.0;
        for j in (i + 1)..n {
            sum += a[(i, j)] * x[j];
        }
        x[i] = (b[i] - sum) / a[(i, i)];
        sink.debug(&format!("Computed x[{}] = {:.4}", i + 1, x[i]));
    }
    sink.info("Back substitution complete");

    Ok(x)
}
