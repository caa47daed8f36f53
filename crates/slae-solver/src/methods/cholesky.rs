//! Cholesky decomposition `A = H·Hᵗ` for symmetric positive-definite systems.
//!
//! The solve runs in two triangular passes:
//! 1. forward substitution `H·y = b`,
//! 2. back substitution `Hᵗ·x = y`.
//!
//! A matrix that fails the validity checks is refused with
//! [`SolveError::InvalidPrecondition`]; no factor is produced for it.

use nalgebra::{DMatrix, DVector};
use slae_model::{ModelError, Problem};

use super::traits::{LinearSolver, SolveInfo};
use super::validity::check_cholesky_preconditions;
use crate::error::{PreconditionFailure, Result};
use crate::trace::{TraceLevel, TraceSink};

/// Direct solver using the Cholesky decomposition.
#[derive(Debug, Clone, Copy, Default)]
pub struct CholeskySolver;

impl LinearSolver for CholeskySolver {
    fn name(&self) -> &str {
        "cholesky"
    }

    fn solve_linear(
        &self,
        problem: &Problem,
        sink: &dyn TraceSink,
    ) -> Result<(DVector<f64>, SolveInfo)> {
        let _span = tracing::info_span!("solve", method = self.name()).entered();
        let x = solve(problem.matrix(), problem.rhs(), sink)?;
        let info = SolveInfo::direct(self.name(), problem, &x);
        Ok((x, info))
    }
}

/// Lower-triangular factor `H` with `A = H·Hᵗ`.
///
/// Entries above the diagonal are zero and never read.
#[derive(Debug, Clone, PartialEq)]
pub struct FactorMatrix {
    lower: DMatrix<f64>,
}

impl FactorMatrix {
    pub fn lower(&self) -> &DMatrix<f64> {
        &self.lower
    }

    pub fn transpose(&self) -> DMatrix<f64> {
        self.lower.transpose()
    }

    pub fn dimension(&self) -> usize {
        self.lower.nrows()
    }

    /// `H·Hᵗ`, which equals the decomposed matrix up to rounding.
    pub fn reconstruct(&self) -> DMatrix<f64> {
        &self.lower * self.lower.transpose()
    }

    /// Solve `H·Hᵗ·x = b` by forward then back substitution.
    pub fn solve(&self, b: &DVector<f64>, sink: &dyn TraceSink) -> Result<DVector<f64>> {
        let n = self.dimension();
        if b.len() != n {
            return Err(ModelError::DimensionMismatch {
                expected: n,
                got: b.len(),
            }
            .into());
        }
        let h = &self.lower;

        sink.info("Solving H*y = b");
        let mut y = DVector::zeros(n);
        for i in 0..n {
            let mut sum = 0.0;
            for j in 0..i {
                sum += h[(i, j)] * y[j];
            }
            y[i] = (b[i] - sum) / h[(i, i)];
            sink.info(&format!("y[{}] = {:.4}", i + 1, y[i]));
        }

        sink.info("Solution for y complete, solving H^T*x = y");
        let mut x = DVector::zeros(n);
        for i in (0..n).rev() {
            let mut sum = 0.0;
            for j in (i + 1)..n {
                sum += h[(j, i)] * x[j];
            }
            x[i] = (y[i] - sum) / h[(i, i)];
            sink.debug(&format!("x[{}] = {:.4}", i + 1, x[i]));
        }

        Ok(x)
    }
}

/// Factor `a` after it passes the validity checks.
pub fn decompose(
    a: &DMatrix<f64>,
    sink: &dyn TraceSink,
) -> std::result::Result<FactorMatrix, PreconditionFailure> {
    check_cholesky_preconditions(a, sink)?;

    let n = a.nrows();
    let detailed = sink.enabled(TraceLevel::Debug);
    let mut h = DMatrix::zeros(n, n);

    sink.info("Starting Cholesky decomposition");
    for i in 0..n {
        for j in 0..=i {
            let mut sum = 0.0;
            for k in 0..j {
                sum += h[(i, k)] * h[(j, k)];
                if detailed {
                    sink.debug(&format!(
                        "sum += {:.3} * {:.3} (h[{}][{}], h[{}][{}])",
                        h[(i, k)],
                        h[(j, k)],
                        i + 1,
                        k + 1,
                        j + 1,
                        k + 1
                    ));
                }
            }

            h[(i, j)] = if i == j {
                // Rounding here can differ from the minor scan in validity.rs.
                let pivot = a[(i, i)] - sum;
                if !(pivot.is_finite() && pivot > 0.0) {
                    let failure = PreconditionFailure::NotPositiveDefinite {
                        order: i + 1,
                        minor: pivot,
                    };
                    sink.warn(&format!("{failure}. The Cholesky method is not applicable"));
                    return Err(failure);
                }
                pivot.sqrt()
            } else {
                (a[(i, j)] - sum) / h[(j, j)]
            };

            if detailed {
                sink.debug(&format!("H[{}][{}] = {:.4}", i + 1, j + 1, h[(i, j)]));
            }
        }
    }
    sink.info("Cholesky decomposition complete");

    Ok(FactorMatrix { lower: h })
}

/// Decompose `a`, report `H` and `Hᵗ`, then solve for `b`.
pub fn solve(a: &DMatrix<f64>, b: &DVector<f64>, sink: &dyn TraceSink) -> Result<DVector<f64>> {
    let factor = decompose(a, sink)?;
    sink.matrix("H", factor.lower());
    sink.transposed_matrix("H^T", factor.lower());
    factor.solve(b, sink)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SolveError;
    use crate::trace::{NullSink, RecordingSink, TraceEvent};

    #[test]
    fn factors_two_by_two_spd_matrix() {
        let a = DMatrix::from_row_slice(2, 2, &[4.0, 1.0, 1.0, 3.0]);
        let factor = decompose(&a, &NullSink).unwrap();
        let h = factor.lower();
        assert!((h[(0, 0)] - 2.0).abs() < 1e-12);
        assert_eq!(h[(0, 1)], 0.0);
        assert!((h[(1, 0)] - 0.5).abs() < 1e-12);
        assert!((h[(1, 1)] - 2.75f64.sqrt()).abs() < 1e-12);
        assert!((factor.reconstruct() - a).abs().max() < 1e-12);
    }

    #[test]
    fn solves_two_by_two_spd_system() {
        let a = DMatrix::from_row_slice(2, 2, &[4.0, 1.0, 1.0, 3.0]);
        let b = DVector::from_vec(vec![1.0, 2.0]);
        let x = solve(&a, &b, &NullSink).unwrap();
        assert!((x[0] - 1.0 / 11.0).abs() < 1e-12);
        assert!((x[1] - 7.0 / 11.0).abs() < 1e-12);
    }

    #[test]
    fn matches_nalgebra_cholesky_factor() {
        let a = DMatrix::from_row_slice(
            3,
            3,
            &[25.0, 15.0, -5.0, 15.0, 18.0, 0.0, -5.0, 0.0, 11.0],
        );
        let ours = decompose(&a, &NullSink).unwrap();
        let reference = nalgebra::Cholesky::new(a.clone()).expect("SPD matrix").l();
        assert!((ours.lower() - reference).abs().max() < 1e-12);
        // Known factor: [[5,0,0],[3,3,0],[-1,1,3]]
        assert!((ours.lower()[(2, 2)] - 3.0).abs() < 1e-12);
    }

    #[test]
    fn rejects_asymmetric_matrix_before_decomposing() {
        let a = DMatrix::from_row_slice(2, 2, &[1.0, 2.0, 3.0, 4.0]);
        let b = DVector::from_vec(vec![1.0, 1.0]);
        let sink = RecordingSink::new();
        let err = solve(&a, &b, &sink).unwrap_err();
        assert!(matches!(
            err,
            SolveError::InvalidPrecondition(PreconditionFailure::NotSymmetric { .. })
        ));
        assert!(!sink.contains("Starting Cholesky decomposition"));
        assert!(
            !sink
                .events()
                .iter()
                .any(|e| matches!(e, TraceEvent::Matrix { .. }))
        );
    }

    #[test]
    fn near_singular_matrix_never_yields_nan_factor() {
        // d sits a few ULPs above c²/a: the minor scan may accept it while
        // a[1][1] - h[1][0]² rounds to a non-positive value.
        let a = DMatrix::from_row_slice(
            2,
            2,
            &[0.42857142857142855, 3.0, 3.0, 21.000000000000004],
        );
        let sink = RecordingSink::new();
        let err = decompose(&a, &sink).unwrap_err();
        assert!(matches!(
            err,
            PreconditionFailure::NotPositiveDefinite { order: 2, .. }
        ));
        assert!(sink.contains("The Cholesky method is not applicable"));

        let problem = Problem::new(a, DVector::from_vec(vec![1.0, 1.0])).unwrap();
        let err = CholeskySolver.solve_linear(&problem, &NullSink).unwrap_err();
        assert!(matches!(
            err,
            SolveError::InvalidPrecondition(PreconditionFailure::NotPositiveDefinite { .. })
        ));
    }

    #[test]
    fn transpose_is_upper_triangular_mirror_of_factor() {
        let a = DMatrix::from_row_slice(2, 2, &[4.0, 1.0, 1.0, 3.0]);
        let factor = decompose(&a, &NullSink).unwrap();
        let upper = factor.transpose();
        assert_eq!(upper[(1, 0)], 0.0);
        assert_eq!(upper[(0, 1)], factor.lower()[(1, 0)]);
        assert!((factor.lower() * &upper - a).abs().max() < 1e-12);
    }

    #[test]
    fn rejects_rhs_of_wrong_length() {
        let a = DMatrix::from_row_slice(2, 2, &[4.0, 1.0, 1.0, 3.0]);
        let factor = decompose(&a, &NullSink).unwrap();
        let err = factor
            .solve(&DVector::from_vec(vec![1.0]), &NullSink)
            .unwrap_err();
        assert!(matches!(err, SolveError::Shape(_)));
    }

    #[test]
    fn factor_is_reusable_for_several_right_hand_sides() {
        let a = DMatrix::from_row_slice(2, 2, &[4.0, 1.0, 1.0, 3.0]);
        let factor = decompose(&a, &NullSink).unwrap();
        for b in [vec![1.0, 2.0], vec![5.0, 4.0], vec![0.0, 0.0]] {
            let b = DVector::from_vec(b);
            let x = factor.solve(&b, &NullSink).unwrap();
            assert!((&a * &x - &b).norm() < 1e-12);
        }
    }

    #[test]
    fn reports_factor_and_its_transpose() {
        let a = DMatrix::from_row_slice(2, 2, &[4.0, 1.0, 1.0, 3.0]);
        let b = DVector::from_vec(vec![1.0, 2.0]);
        let sink = RecordingSink::new();
        solve(&a, &b, &sink).unwrap();

        let events = sink.events();
        assert!(events.iter().any(|e| matches!(e, TraceEvent::Matrix { label, .. } if label == "H")));
        assert!(events.iter().any(
            |e| matches!(e, TraceEvent::TransposedMatrix { label, .. } if label == "H^T")
        ));
        assert!(sink.contains("H[2][2] = 1.6583"));
        assert!(sink.contains("y[1] = 0.5000"));
        assert!(sink.contains("sum += 0.500 * 0.500 (h[2][1], h[2][1])"));
    }
}
