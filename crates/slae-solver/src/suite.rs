//! Suite runner: applies a list of methods to one problem and collects the
//! outcome of each.
//!
//! A failing method never stops the suite; its error is kept alongside the
//! successes so the caller can report every method.

use nalgebra::DVector;
use rayon::prelude::*;
use slae_io::{MethodReport, RunReport};
use slae_model::{Problem, Thresholds};

use crate::error::SolveError;
use crate::methods::{IterativeConfig, Method, SolveInfo};
use crate::trace::TraceSink;

/// Suite configuration
#[derive(Debug, Clone, PartialEq)]
pub struct SuiteConfig {
    /// Methods to run, in order
    pub methods: Vec<Method>,
    /// Settings shared by the iterative methods
    pub iterative: IterativeConfig,
}

impl SuiteConfig {
    /// Gauss, Cholesky, Jacobi at the loose threshold, then Gauss-Seidel at
    /// the loose and the tight threshold.
    pub fn standard(thresholds: &Thresholds) -> Self {
        Self {
            methods: vec![
                Method::Gauss,
                Method::Cholesky,
                Method::Jacobi {
                    epsilon: thresholds.loose,
                },
                Method::GaussSeidel {
                    epsilon: thresholds.loose,
                },
                Method::GaussSeidel {
                    epsilon: thresholds.tight,
                },
            ],
            iterative: IterativeConfig::default(),
        }
    }
}

impl Default for SuiteConfig {
    fn default() -> Self {
        Self::standard(&Thresholds::default())
    }
}

/// What one method produced.
#[derive(Debug)]
pub struct MethodOutcome {
    pub method: Method,
    pub result: Result<(DVector<f64>, SolveInfo), SolveError>,
}

impl MethodOutcome {
    pub fn solution(&self) -> Option<&DVector<f64>> {
        self.result.as_ref().ok().map(|(x, _)| x)
    }

    pub fn is_success(&self) -> bool {
        self.result.is_ok()
    }

    pub fn to_report(&self) -> MethodReport {
        let name = self.method.name();
        let epsilon = self.method.epsilon();
        match &self.result {
            Ok((x, info)) => {
                // Direct methods have no sweep count worth reporting.
                let iterations = epsilon.map(|_| info.iterations);
                MethodReport::success(name, epsilon, iterations, x.iter().copied().collect())
            }
            Err(err) => MethodReport::failure(name, epsilon, err.to_string()),
        }
    }
}

/// Outcomes of a suite run, in configured method order.
#[derive(Debug)]
pub struct SuiteResults {
    pub dimension: usize,
    pub outcomes: Vec<MethodOutcome>,
}

impl SuiteResults {
    pub fn all_succeeded(&self) -> bool {
        self.outcomes.iter().all(MethodOutcome::is_success)
    }

    /// First outcome for the method with this name.
    pub fn outcome(&self, name: &str) -> Option<&MethodOutcome> {
        self.outcomes.iter().find(|o| o.method.name() == name)
    }

    pub fn report(&self) -> RunReport {
        let mut report = RunReport::new(self.dimension);
        for outcome in &self.outcomes {
            report.push(outcome.to_report());
        }
        report
    }
}

/// Runs every configured method against a problem.
pub struct SolverSuite {
    config: SuiteConfig,
}

impl SolverSuite {
    pub fn new(config: SuiteConfig) -> Self {
        Self { config }
    }

    pub fn standard(thresholds: &Thresholds) -> Self {
        Self::new(SuiteConfig::standard(thresholds))
    }

    pub fn config(&self) -> &SuiteConfig {
        &self.config
    }

    /// Run the methods one after another, narrating each to `sink`.
    pub fn run(&self, problem: &Problem, sink: &dyn TraceSink) -> SuiteResults {
        let outcomes = self
            .config
            .methods
            .iter()
            .map(|method| self.run_one(*method, problem, sink))
            .collect();
        SuiteResults {
            dimension: problem.dimension(),
            outcomes,
        }
    }

    /// Run the methods on the rayon pool. Outcomes keep configured order;
    /// trace output from different methods may interleave.
    pub fn run_parallel(&self, problem: &Problem, sink: &dyn TraceSink) -> SuiteResults {
        let outcomes = self
            .config
            .methods
            .par_iter()
            .map(|method| self.run_one(*method, problem, sink))
            .collect();
        SuiteResults {
            dimension: problem.dimension(),
            outcomes,
        }
    }

    fn run_one(&self, method: Method, problem: &Problem, sink: &dyn TraceSink) -> MethodOutcome {
        match method.epsilon() {
            Some(epsilon) => sink.info(&format!("{} (epsilon = {epsilon:e})", method.title())),
            None => sink.info(method.title()),
        }

        let solver = method.solver(self.config.iterative);
        let result = solver.solve_linear(problem, sink);
        match &result {
            Ok((x, info)) => {
                sink.solution(x);
                sink.info(&format!(
                    "{} finished after {} iteration(s), residual norm {:.3e}",
                    method.name(),
                    info.iterations,
                    info.residual_norm.unwrap_or_default()
                ));
            }
            Err(err) => sink.error(&format!("{} failed: {err}", method.name())),
        }

        MethodOutcome { method, result }
    }
}
