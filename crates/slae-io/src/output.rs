use std::fmt::Write;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MethodStatus {
    Success,
    Failed,
}

impl MethodStatus {
    fn as_str(self) -> &'static str {
        match self {
            MethodStatus::Success => "SUCCESS",
            MethodStatus::Failed => "FAILED",
        }
    }
}

/// Outcome of one solver run within a [`RunReport`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MethodReport {
    pub method: String,
    pub epsilon: Option<f64>,
    pub status: MethodStatus,
    pub iterations: Option<usize>,
    pub solution: Vec<f64>,
    pub message: String,
}

impl MethodReport {
    pub fn success(
        method: impl Into<String>,
        epsilon: Option<f64>,
        iterations: Option<usize>,
        solution: Vec<f64>,
    ) -> Self {
        Self {
            method: method.into(),
            epsilon,
            status: MethodStatus::Success,
            iterations,
            solution,
            message: String::new(),
        }
    }

    pub fn failure(method: impl Into<String>, epsilon: Option<f64>, message: impl Into<String>) -> Self {
        Self {
            method: method.into(),
            epsilon,
            status: MethodStatus::Failed,
            iterations: None,
            solution: Vec::new(),
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunReport {
    pub dimension: usize,
    pub methods: Vec<MethodReport>,
}

impl RunReport {
    pub fn new(dimension: usize) -> Self {
        Self {
            dimension,
            methods: Vec::new(),
        }
    }

    pub fn push(&mut self, report: MethodReport) {
        self.methods.push(report);
    }

    pub fn failures(&self) -> usize {
        self.methods
            .iter()
            .filter(|m| m.status == MethodStatus::Failed)
            .count()
    }
}

pub fn render_report_json(report: &RunReport) -> serde_json::Result<String> {
    serde_json::to_string_pretty(report)
}

/// Aligned text summary, one row per method.
pub fn render_report_table(report: &RunReport) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "SLAE RUN REPORT (n = {})", report.dimension);
    let _ = writeln!(
        out,
        "{:<14} {:>9} {:>8} {:>10}  SOLUTION",
        "METHOD", "EPSILON", "STATUS", "ITERATIONS"
    );
    for m in &report.methods {
        let epsilon = m
            .epsilon
            .map(|e| format!("{e:.0e}"))
            .unwrap_or_else(|| "-".to_string());
        let iterations = m
            .iterations
            .map(|i| i.to_string())
            .unwrap_or_else(|| "-".to_string());
        let detail = if m.status == MethodStatus::Success {
            let cells: Vec<String> = m.solution.iter().map(|v| format!("{v:.4}")).collect();
            format!("[{}]", cells.join(", "))
        } else {
            m.message.clone()
        };
        let _ = writeln!(
            out,
            "{:<14} {:>9} {:>8} {:>10}  {}",
            m.method,
            epsilon,
            m.status.as_str(),
            iterations,
            detail
        );
    }
    out
}
