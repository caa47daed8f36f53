//! Jacobi iteration.
//!
//! Every component of the new iterate is computed from the previous iterate
//! only: `new[i] = (b[i] - Σ_{j≠i} a[i][j]·old[j]) / a[i][i]`.

use nalgebra::{DMatrix, DVector};
use slae_model::Problem;

use super::iterative::{
    IterativeConfig, IterativeSolution, has_converged, max_change, non_convergence,
    validate_inputs,
};
use super::traits::{LinearSolver, SolveInfo};
use crate::error::Result;
use crate::trace::{TraceLevel, TraceSink};

/// Jacobi solver for a fixed convergence threshold.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct JacobiSolver {
    pub epsilon: f64,
    pub config: IterativeConfig,
}

impl JacobiSolver {
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

impl LinearSolver for JacobiSolver {
    fn name(&self) -> &str {
        "jacobi"
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

/// Iterate from the zero vector until no component moves by more than
/// `epsilon`, or fail once `config.max_iterations` sweeps are spent.
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

    let mut old = DVector::zeros(n);
    let mut new = DVector::zeros(n);
    let mut last_change = f64::INFINITY;

    for iteration in 1..=config.max_iterations {
        let _span = tracing::debug_span!("jacobi_sweep", iteration).entered();
        sink.info(&format!("Iteration: {iteration}"));

        for i in 0..n {
            let mut sum = 0.0;
            for j in 0..n {
                if i != j {
                    sum += a[(i, j)] * old[j];
                    if detailed {
                        sink.debug(&format!(
                            "sum += A[{}][{}] * xOld[{}] -> sum += {:.4} * {:.4} = {:.4}",
                            i + 1,
                            j + 1,
                            j + 1,
                            a[(i, j)],
                            old[j],
                            sum
                        ));
                    }
                }
            }
            new[i] = (b[i] - sum) / a[(i, i)];
            if detailed {
                sink.debug(&format!(
                    "x[{i1}] = (b[{i1}] - sum)/A[{i1}][{i1}] -> x[{i1}] = ({:.4} - {:.4}) / {:.4} = {:.4}",
                    b[i],
                    sum,
                    a[(i, i)],
                    new[i],
                    i1 = i + 1
                ));
            }
        }

        last_change = max_change(&old, &new);
        if has_converged(&old, &new, epsilon) {
            sink.info(&format!(
                "Jacobi converged after {iteration} iterations (epsilon = {epsilon:e})"
            ));
            return Ok(IterativeSolution {
                x: new,
                iterations: iteration,
                last_change,
            });
        }
        old.copy_from(&new);
    }

    Err(non_convergence("Jacobi", config, last_change, sink))
}
