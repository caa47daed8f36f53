//! Gauss-Seidel iteration.
//!
//! Same update and stopping rule as Jacobi, but the sweep writes into a
//! single current iterate, so components already updated in this sweep are
//! used immediately for the rows that follow.

use nalgebra::{DMatrix, DVector};
use slae_model::Problem;

use super::iterative::{
    IterativeConfig, IterativeSolution, has_converged, max_change, non_convergence,
    validate_inputs,
};
use super::traits::{LinearSolver, SolveInfo};
use crate::error::Result;
use crate::trace::{TraceLevel, TraceSink};

/// Gauss-Seidel solver for a fixed convergence threshold.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GaussSeidelSolver {
    pub epsilon: f64,
    pub config: IterativeConfig,
}

impl GaussSeidelSolver {
    pub fn new(epsilon: f64) -> Self {
        Self {
            epsilon,
            config: IterativeConfig::default(),
        }
    }

    pub fn with_config(epsilon: f64, config: IterativeConfig) -> Self {
        Self { epsilon, config }
    }
}

impl LinearSolver for GaussSeidelSolver {
    fn name(&self) -> &str {
        "gauss-seidel"
    }

    fn solve_linear(
        &self,
        problem: &Problem,
        sink: &dyn TraceSink,
    ) -> Result<(DVector<f64>, SolveInfo)> {
        let _span =
            tracing::info_span!("solve", method = self.name(), epsilon = self.epsilon).entered();
        let solution = solve(problem.matrix(), problem.rhs(), self.epsilon, &self.config, sink)?;
        Ok(solution.into_info(self.name(), problem))
    }
}

pub fn solve(
    a: &DMatrix<f64>,
    b: &DVector<f64>,
    epsilon: f64,
    config: &IterativeConfig,
    sink: &dyn TraceSink,
) -> Result<IterativeSolution> {
    validate_inputs(a, b, epsilon)?;
    let n = b.len();
    let detailed = sink.enabled(TraceLevel::Debug);

    let mut previous = DVector::zeros(n);
    let mut x = DVector::zeros(n);
    let mut last_change = f64::INFINITY;

    for iteration in 1..=config.max_iterations {
        let _span = tracing::debug_span!("gauss_seidel_sweep", iteration).entered();
        sink.info(&format!("Iteration: {iteration}"));

        for i in 0..n {
            let mut sum = 0.0;
            for j in 0..n {
                if i != j {
                    // x[j] already holds this sweep's value for j < i.
                    sum += a[(i, j)] * x[j];
                    if detailed {
                        sink.debug(&format!(
                            "sum += A[{}][{}] * x[{}] -> sum += {:.4} * {:.4} = {:.4}",
                            i + 1,
                            j + 1,
                            j + 1,
                            a[(i, j)],
                            x[j],
                            sum
                        ));
                    }
                }
            }
            x[i] = (b[i] - sum) / a[(i, i)];
            if detailed {
                sink.debug(&format!(
                    "x[{i1}] = (b[{i1}] - sum)/A[{i1}][{i1}] -> x[{i1}] = ({:.4} - {:.4}) / {:.4} = {:.4}",
                    b[i],
                    sum,
                    a[(i, i)],
                    x[i],
                    i1 = i + 1
                ));
            }
        }

        last_change = max_change(&previous, &x);
        if has_converged(&previous, &x, epsilon) {
            sink.info(&format!(
                "Gauss-Seidel converged after {iteration} iterations (epsilon = {epsilon:e})"
            ));
            return Ok(IterativeSolution {
                x,
                iterations: iteration,
                last_change,
            });
        }
        previous.copy_from(&x);
    }

    Err(non_convergence("Gauss-Seidel", config, last_change, sink))
}
