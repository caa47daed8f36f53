use nalgebra::{DMatrix, DVector};
use serde::{Deserialize, Serialize};

use crate::error::{ModelError, Result};

/// A square linear system `A·x = b` with `n >= 1`.
///
/// The fields are private: once constructed, a problem is never mutated.
/// Solvers call [`Problem::to_owned_parts`] to get their own working copy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawProblem", into = "RawProblem")]
pub struct Problem {
    matrix: DMatrix<f64>,
    rhs: DVector<f64>,
}

/// Row-major wire form used by serde.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct RawProblem {
    matrix: Vec<Vec<f64>>,
    rhs: Vec<f64>,
}

impl Problem {
    pub fn new(matrix: DMatrix<f64>, rhs: DVector<f64>) -> Result<Self> {
        check_shape(&matrix, &rhs)?;
        Ok(Self { matrix, rhs })
    }

    /// Caller guarantees the shape; only used for compile-time constants.
    pub(crate) fn new_unchecked(matrix: DMatrix<f64>, rhs: DVector<f64>) -> Self {
        debug_assert!(check_shape(&matrix, &rhs).is_ok());
        Self { matrix, rhs }
    }

    /// Build a problem from row slices, rejecting ragged rows.
    pub fn from_rows<R: AsRef<[f64]>>(rows: &[R], rhs: &[f64]) -> Result<Self> {
        if rows.is_empty() {
            return Err(ModelError::Empty);
        }
        let cols = rows[0].as_ref().len();
        for (row, values) in rows.iter().enumerate() {
            let got = values.as_ref().len();
            if got != cols {
                return Err(ModelError::RaggedRow {
                    row,
                    expected: cols,
                    got,
                });
            }
        }

        let matrix = DMatrix::from_fn(rows.len(), cols, |i, j| rows[i].as_ref()[j]);
        let rhs = DVector::from_column_slice(rhs);
        Self::new(matrix, rhs)
    }

    /// Number of unknowns.
    pub fn dimension(&self) -> usize {
        self.rhs.len()
    }

    pub fn matrix(&self) -> &DMatrix<f64> {
        &self.matrix
    }

    pub fn rhs(&self) -> &DVector<f64> {
        &self.rhs
    }

    /// Deep copies of `A` and `b` for a solver to work on.
    pub fn to_owned_parts(&self) -> (DMatrix<f64>, DVector<f64>) {
        (self.matrix.clone(), self.rhs.clone())
    }

    /// Residual `b - A·x` for a candidate solution.
    pub fn residual(&self, x: &DVector<f64>) -> DVector<f64> {
        &self.rhs - &self.matrix * x
    }

    /// True when every row satisfies `|a_ii| > Σ_{j≠i} |a_ij|`.
    pub fn is_strictly_diagonally_dominant(&self) -> bool {
        let n = self.dimension();
        (0..n).all(|i| {
            let off_diagonal: f64 = (0..n)
                .filter(|&j| j != i)
                .map(|j| self.matrix[(i, j)].abs())
                .sum();
            self.matrix[(i, i)].abs() > off_diagonal
        })
    }
}

/// Check that `A` is non-empty and square and that `b` matches its size.
pub fn check_shape(matrix: &DMatrix<f64>, rhs: &DVector<f64>) -> Result<()> {
    let (rows, cols) = matrix.shape();
    if rows == 0 || cols == 0 {
        return Err(ModelError::Empty);
    }
    if rows != cols {
        return Err(ModelError::NotSquare { rows, cols });
    }
    if rhs.len() != rows {
        return Err(ModelError::DimensionMismatch {
            expected: rows,
            got: rhs.len(),
        });
    }
    Ok(())
}

impl TryFrom<RawProblem> for Problem {
    type Error = ModelError;

    fn try_from(raw: RawProblem) -> Result<Self> {
        Problem::from_rows(&raw.matrix, &raw.rhs)
    }
}

impl From<Problem> for RawProblem {
    fn from(problem: Problem) -> Self {
        let matrix = problem
            .matrix
            .row_iter()
            .map(|row| row.iter().copied().collect())
            .collect();
        RawProblem {
            matrix,
            rhs: problem.rhs.iter().copied().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_rows_builds_row_major_matrix() {
        let problem = Problem::from_rows(&[[4.0, 1.0], [2.0, 3.0]], &[1.0, 2.0])
            .expect("square system should be accepted");
        assert_eq!(problem.dimension(), 2);
        assert_eq!(problem.matrix()[(0, 1)], 1.0);
        assert_eq!(problem.matrix()[(1, 0)], 2.0);
        assert_eq!(problem.rhs()[1], 2.0);
    }

    #[test]
    fn rejects_empty_matrix() {
        let rows: [[f64; 0]; 0] = [];
        let err = Problem::from_rows(&rows, &[]).expect_err("empty should fail");
        assert!(matches!(err, ModelError::Empty));
    }

    #[test]
    fn rejects_non_square_matrix() {
        let err = Problem::from_rows(&[[1.0, 2.0, 3.0], [4.0, 5.0, 6.0]], &[1.0, 2.0])
            .expect_err("2x3 should fail");
        assert!(matches!(err, ModelError::NotSquare { rows: 2, cols: 3 }));
    }

    #[test]
    fn rejects_ragged_rows() {
        let rows = vec![vec![1.0, 2.0], vec![3.0]];
        let err = Problem::from_rows(&rows, &[1.0, 2.0]).expect_err("ragged should fail");
        assert!(matches!(
            err,
            ModelError::RaggedRow {
                row: 1,
                expected: 2,
                got: 1
            }
        ));
    }

    #[test]
    fn rejects_rhs_length_mismatch() {
        let err = Problem::from_rows(&[[1.0, 0.0], [0.0, 1.0]], &[1.0, 2.0, 3.0])
            .expect_err("mismatched rhs should fail");
        assert!(matches!(
            err,
            ModelError::DimensionMismatch {
                expected: 2,
                got: 3
            }
        ));
    }

    #[test]
    fn owned_parts_are_independent_copies() {
        let problem = Problem::from_rows(&[[2.0]], &[4.0]).expect("1x1 system");
        let (mut a, mut b) = problem.to_owned_parts();
        a[(0, 0)] = 99.0;
        b[0] = -1.0;
        assert_eq!(problem.matrix()[(0, 0)], 2.0);
        assert_eq!(problem.rhs()[0], 4.0);
    }

    #[test]
    fn residual_vanishes_at_exact_solution() {
        let problem = Problem::from_rows(&[[4.0, 1.0], [2.0, 3.0]], &[1.0, 2.0]).expect("system");
        let r = problem.residual(&DVector::from_vec(vec![0.1, 0.6]));
        assert!(r.norm() < 1e-12);
    }

    #[test]
    fn diagonal_dominance_check() {
        let dominant = Problem::from_rows(&[[10.0, 1.0], [1.0, 10.0]], &[11.0, 11.0]).expect("system");
        let weak = Problem::from_rows(&[[1.0, 2.0], [3.0, 4.0]], &[1.0, 1.0]).expect("system");
        assert!(dominant.is_strictly_diagonally_dominant());
        assert!(!weak.is_strictly_diagonally_dominant());
    }

    #[test]
    fn json_roundtrip_keeps_row_major_layout() {
        let problem = Problem::from_rows(&[[4.0, 1.0], [2.0, 3.0]], &[1.0, 2.0]).expect("system");
        let json = serde_json::to_string(&problem).expect("serialize");
        assert_eq!(json, r#"{"matrix":[[4.0,1.0],[2.0,3.0]],"rhs":[1.0,2.0]}"#);
        let back: Problem = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(back, problem);
    }

    #[test]
    fn json_with_bad_shape_is_rejected() {
        let result: std::result::Result<Problem, _> =
            serde_json::from_str(r#"{"matrix":[[1.0,2.0]],"rhs":[1.0]}"#);
        assert!(result.is_err());
    }
}
