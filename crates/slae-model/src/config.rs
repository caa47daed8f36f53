//! Problem configuration provider.

use nalgebra::{DMatrix, DVector};
use serde::{Deserialize, Serialize};

use crate::error::{ModelError, Result};
use crate::problem::Problem;

/// Tight convergence threshold (10^-5).
pub const TIGHT_EPSILON: f64 = 1e-5;
/// Loose convergence threshold (10^-3).
pub const LOOSE_EPSILON: f64 = 1e-3;

/// The two named convergence thresholds consumed by the iterative solvers.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Thresholds {
    pub tight: f64,
    pub loose: f64,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            tight: TIGHT_EPSILON,
            loose: LOOSE_EPSILON,
        }
    }
}

impl Thresholds {
    pub fn new(tight: f64, loose: f64) -> Result<Self> {
        let thresholds = Self { tight, loose };
        thresholds.validate()?;
        Ok(thresholds)
    }

    pub fn validate(&self) -> Result<()> {
        for (name, value) in self.labelled() {
            if !(value.is_finite() && value > 0.0) {
                return Err(ModelError::InvalidThreshold { name, value });
            }
        }
        Ok(())
    }

    /// Thresholds in the order the driver runs them: loose first, then tight.
    pub fn labelled(&self) -> [(&'static str, f64); 2] {
        [("loose", self.loose), ("tight", self.tight)]
    }
}

/// A problem instance together with its convergence thresholds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProblemConfig {
    pub problem: Problem,
    #[serde(default)]
    pub thresholds: Thresholds,
}

impl Default for ProblemConfig {
    fn default() -> Self {
        Self::builtin()
    }
}

impl ProblemConfig {
    pub fn new(problem: Problem, thresholds: Thresholds) -> Result<Self> {
        thresholds.validate()?;
        Ok(Self {
            problem,
            thresholds,
        })
    }

    /// The built-in problem instance run by the `slae-solver` binary.
    ///
    /// The matrix is symmetric, positive-definite and strictly diagonally
    /// dominant, so all four methods apply. Exact solution: `[1, 2, -1, 1]`.
    pub fn builtin() -> Self {
        #[rustfmt::skip]
        let matrix = DMatrix::from_row_slice(4, 4, &[
            10.0, -1.0,  2.0,  0.0,
            -1.0, 11.0, -1.0,  3.0,
             2.0, -1.0, 10.0, -1.0,
             0.0,  3.0, -1.0,  8.0,
        ]);
        let rhs = DVector::from_column_slice(&[6.0, 25.0, -11.0, 15.0]);
        let problem = Problem::new_unchecked(matrix, rhs);
        Self {
            problem,
            thresholds: Thresholds::default(),
        }
    }

    pub fn from_json_str(raw: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(raw)?;
        config.thresholds.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_thresholds_match_named_constants() {
        let thresholds = Thresholds::default();
        assert_eq!(thresholds.tight, 1e-5);
        assert_eq!(thresholds.loose, 1e-3);
        assert_eq!(thresholds.labelled()[0], ("loose", 1e-3));
        assert_eq!(thresholds.labelled()[1], ("tight", 1e-5));
    }

    #[test]
    fn rejects_non_positive_threshold() {
        let err = Thresholds::new(0.0, 1e-3).expect_err("zero threshold should fail");
        assert!(matches!(err, ModelError::InvalidThreshold { name: "tight", .. }));

        let err = Thresholds::new(1e-5, f64::NAN).expect_err("NaN threshold should fail");
        assert!(matches!(err, ModelError::InvalidThreshold { name: "loose", .. }));
    }

    #[test]
    fn builtin_problem_is_diagonally_dominant() {
        let config = ProblemConfig::default();
        assert_eq!(config.problem.dimension(), 4);
        assert!(config.problem.is_strictly_diagonally_dominant());
        assert_eq!(config.problem.matrix(), &config.problem.matrix().transpose());
    }

    #[test]
    fn builtin_exact_solution_has_zero_residual() {
        let config = ProblemConfig::builtin();
        let x = DVector::from_vec(vec![1.0, 2.0, -1.0, 1.0]);
        assert!(config.problem.residual(&x).norm() < 1e-12);
    }

    #[test]
    fn loads_config_from_json_with_default_thresholds() {
        let raw = r#"{"problem":{"matrix":[[4.0,1.0],[1.0,3.0]],"rhs":[1.0,2.0]}}"#;
        let config = ProblemConfig::from_json_str(raw).expect("config should load");
        assert_eq!(config.problem.dimension(), 2);
        assert_eq!(config.thresholds, Thresholds::default());
    }

    #[test]
    fn json_config_with_invalid_threshold_fails() {
        let raw = r#"{"problem":{"matrix":[[1.0]],"rhs":[1.0]},"thresholds":{"tight":-1.0,"loose":1e-3}}"#;
        let err = ProblemConfig::from_json_str(raw).expect_err("negative threshold should fail");
        assert!(matches!(err, ModelError::InvalidThreshold { .. }));
    }

    #[test]
    fn json_config_with_bad_shape_fails() {
        let raw = r#"{"problem":{"matrix":[[1.0,2.0],[3.0,4.0]],"rhs":[1.0]}}"#;
        let err = ProblemConfig::from_json_str(raw).expect_err("shape mismatch should fail");
        assert!(matches!(err, ModelError::Json(_)));
    }
}
