//! The four solution methods and the trait they share.
//!
//! # Methods
//!
//! - **Gauss**: elimination with partial pivoting, direct.
//! - **Cholesky**: `A = H·Hᵗ` factorization, direct, symmetric
//!   positive-definite matrices only (see [`validity`]).
//! - **Jacobi**: stationary iteration on the previous iterate.
//! - **Gauss-Seidel**: stationary iteration reusing fresh components.
//!
//! # Architecture
//!
//! ```text
//!        ProblemConfig (slae-model)
//!                │
//!                ▼
//!   LinearSolver trait (Method::solver)
//!    ┌──────┬────┴─────┬──────────────┐
//!    ▼      ▼          ▼              ▼
//!  Gauss Cholesky    Jacobi     Gauss-Seidel
//!           │            └──────┬──────┘
//!           ▼                   ▼
//!       validity            iterative
//! ```

pub mod cholesky;
pub mod gauss;
pub mod gauss_seidel;
pub mod iterative;
pub mod jacobi;
pub mod traits;
pub mod validity;

use serde::{Deserialize, Serialize};

pub use cholesky::{CholeskySolver, FactorMatrix};
pub use gauss::GaussSolver;
pub use gauss_seidel::GaussSeidelSolver;
pub use iterative::{IterativeConfig, IterativeSolution};
pub use jacobi::JacobiSolver;
pub use traits::*;
pub use validity::is_valid_for_cholesky;

/// A method to run, with its threshold where it needs one.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "method", rename_all = "kebab-case")]
pub enum Method {
    Gauss,
    Cholesky,
    Jacobi { epsilon: f64 },
    GaussSeidel { epsilon: f64 },
}

impl Method {
    pub fn name(&self) -> &'static str {
        match self {
            Method::Gauss => "gauss",
            Method::Cholesky => "cholesky",
            Method::Jacobi { .. } => "jacobi",
            Method::GaussSeidel { .. } => "gauss-seidel",
        }
    }

    /// Heading used when the method starts in the trace.
    pub fn title(&self) -> &'static str {
        match self {
            Method::Gauss => "GAUSSIAN ELIMINATION",
            Method::Cholesky => "CHOLESKY DECOMPOSITION",
            Method::Jacobi { .. } => "JACOBI ITERATION",
            Method::GaussSeidel { .. } => "GAUSS-SEIDEL ITERATION",
        }
    }

    pub fn epsilon(&self) -> Option<f64> {
        match self {
            Method::Gauss | Method::Cholesky => None,
            Method::Jacobi { epsilon } | Method::GaussSeidel { epsilon } => Some(*epsilon),
        }
    }

    /// Build the solver for this method.
    pub fn solver(&self, config: IterativeConfig) -> Box<dyn LinearSolver> {
        match *self {
            Method::Gauss => Box::new(GaussSolver),
            Method::Cholesky => Box::new(CholeskySolver),
            Method::Jacobi { epsilon } => Box::new(JacobiSolver::with_config(epsilon, config)),
            Method::GaussSeidel { epsilon } => {
                Box::new(GaussSeidelSolver::with_config(epsilon, config))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn solver_names_match_method_names() {
        let config = IterativeConfig::default();
        for method in [
            Method::Gauss,
            Method::Cholesky,
            Method::Jacobi { epsilon: 1e-3 },
            Method::GaussSeidel { epsilon: 1e-5 },
        ] {
            assert_eq!(method.solver(config).name(), method.name());
        }
    }

    #[test]
    fn only_iterative_methods_carry_epsilon() {
        assert_eq!(Method::Gauss.epsilon(), None);
        assert_eq!(Method::Cholesky.epsilon(), None);
        assert_eq!(Method::Jacobi { epsilon: 1e-3 }.epsilon(), Some(1e-3));
    }

    #[test]
    fn method_serializes_with_kebab_case_tag() {
        let json = serde_json::to_string(&Method::GaussSeidel { epsilon: 0.5 }).unwrap();
        assert_eq!(json, r#"{"method":"gauss-seidel","epsilon":0.5}"#);

        let back: Method = serde_json::from_str(r#"{"method":"cholesky"}"#).unwrap();
        assert_eq!(back, Method::Cholesky);
    }
}
