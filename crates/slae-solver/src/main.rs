use std::process::ExitCode;

use slae_io::{RunReport, render_report_json, render_report_table};
use slae_model::ProblemConfig;
use slae_solver::{SolverSuite, TraceSink, TracingSink};
use tracing_subscriber::EnvFilter;

fn usage() {
    eprintln!("usage:");
    eprintln!("  slae-solver");
    eprintln!();
    eprintln!("Solves the built-in system with every method. Set RUST_LOG=debug");
    eprintln!("for per-term arithmetic.");
}

/// Show the system, run the standard suite and summarise it.
fn run(config: &ProblemConfig, sink: &dyn TraceSink) -> RunReport {
    let problem = &config.problem;
    sink.matrix("A", problem.matrix());
    sink.vector(problem.rhs());

    let results = SolverSuite::standard(&config.thresholds).run(problem, sink);
    results.report()
}

fn main() -> ExitCode {
    if std::env::args().len() > 1 {
        usage();
        return ExitCode::from(2);
    }

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let config = ProblemConfig::default();
    let report = run(&config, &TracingSink::new());

    tracing::info!("\n{}", render_report_table(&report));
    match render_report_json(&report) {
        Ok(json) => tracing::debug!("{json}"),
        Err(err) => tracing::warn!("failed to render report as JSON: {err}"),
    }

    if report.failures() == 0 {
        ExitCode::SUCCESS
    } else {
        tracing::error!(failures = report.failures(), "some methods failed");
        ExitCode::from(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use slae_io::MethodStatus;
    use slae_model::{Problem, Thresholds};
    use slae_solver::{RecordingSink, TraceEvent};

    #[test]
    fn builtin_run_reports_every_method_successful() {
        let sink = RecordingSink::new();
        let report = run(&ProblemConfig::default(), &sink);

        assert_eq!(report.dimension, 4);
        assert_eq!(report.methods.len(), 5);
        assert_eq!(report.failures(), 0);
        assert!(matches!(
            sink.events().first(),
            Some(TraceEvent::Matrix { label, .. }) if label == "A"
        ));
    }

    #[test]
    fn non_symmetric_problem_reports_cholesky_failure() {
        let problem = Problem::from_rows(&[[4.0, 1.0], [2.0, 3.0]], &[1.0, 2.0]).unwrap();
        let config = ProblemConfig::new(problem, Thresholds::default()).unwrap();
        let report = run(&config, &RecordingSink::new());

        assert_eq!(report.failures(), 1);
        let cholesky = &report.methods[1];
        assert_eq!(cholesky.method, "cholesky");
        assert_eq!(cholesky.status, MethodStatus::Failed);
        assert!(cholesky.message.contains("not symmetric"));
    }

    #[test]
    fn report_table_lists_methods() {
        let report = run(&ProblemConfig::default(), &RecordingSink::new());
        let table = render_report_table(&report);
        assert!(table.contains("SLAE RUN REPORT (n = 4)"));
        assert!(table.contains("gauss-seidel"));
        assert!(!table.contains("FAILED"));
    }
}
