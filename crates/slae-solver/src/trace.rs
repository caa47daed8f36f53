//! Trace sink: where solvers narrate their intermediate state.
//!
//! Solvers receive a `&dyn TraceSink` and report to it at their decision
//! points. They never read anything back, so the numerical result does not
//! depend on which sink is plugged in.
//!
//! - [`TracingSink`] renders through `slae-io` and emits `tracing` events.
//! - [`NullSink`] discards everything.
//! - [`RecordingSink`] keeps every event in memory, for tests and embedders.

use std::sync::{Mutex, MutexGuard};

use nalgebra::{DMatrix, DVector};
use slae_io::{render_matrix, render_solution, render_transposed_matrix, render_vector};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum TraceLevel {
    Debug,
    Info,
    Warn,
    Error,
}

pub trait TraceSink: Send + Sync {
    fn message(&self, level: TraceLevel, text: &str);

    fn matrix(&self, label: &str, matrix: &DMatrix<f64>);

    fn transposed_matrix(&self, label: &str, matrix: &DMatrix<f64>);

    fn vector(&self, vector: &DVector<f64>);

    fn solution(&self, solution: &DVector<f64>);

    /// Whether messages at `level` are kept. Solvers use this to skip
    /// formatting per-term arithmetic nobody will read.
    fn enabled(&self, _level: TraceLevel) -> bool {
        true
    }

    fn debug(&self, text: &str) {
        self.message(TraceLevel::Debug, text);
    }

    fn info(&self, text: &str) {
        self.message(TraceLevel::Info, text);
    }

    fn warn(&self, text: &str) {
        self.message(TraceLevel::Warn, text);
    }

    fn error(&self, text: &str) {
        self.message(TraceLevel::Error, text);
    }
}

/// Sink backed by the global `tracing` subscriber.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl TracingSink {
    pub fn new() -> Self {
        Self
    }
}

impl TraceSink for TracingSink {
    fn message(&self, level: TraceLevel, text: &str) {
        match level {
            TraceLevel::Debug => tracing::debug!(target: "slae::trace", "{text}"),
            TraceLevel::Info => tracing::info!(target: "slae::trace", "{text}"),
            TraceLevel::Warn => tracing::warn!(target: "slae::trace", "{text}"),
            TraceLevel::Error => tracing::error!(target: "slae::trace", "{text}"),
        }
    }

    fn matrix(&self, label: &str, matrix: &DMatrix<f64>) {
        tracing::info!(target: "slae::trace", "{}", render_matrix(label, matrix));
    }

    fn transposed_matrix(&self, label: &str, matrix: &DMatrix<f64>) {
        tracing::info!(target: "slae::trace", "{}", render_transposed_matrix(label, matrix));
    }

    fn vector(&self, vector: &DVector<f64>) {
        tracing::info!(target: "slae::trace", "Current vector b: {}", render_vector(vector));
    }

    fn solution(&self, solution: &DVector<f64>) {
        tracing::info!(target: "slae::trace", "Solution of the system:");
        for line in render_solution(solution) {
            tracing::info!(target: "slae::trace", "{line}");
        }
    }

    fn enabled(&self, level: TraceLevel) -> bool {
        match level {
            TraceLevel::Debug => tracing::enabled!(target: "slae::trace", tracing::Level::DEBUG),
            TraceLevel::Info => tracing::enabled!(target: "slae::trace", tracing::Level::INFO),
            TraceLevel::Warn => tracing::enabled!(target: "slae::trace", tracing::Level::WARN),
            TraceLevel::Error => tracing::enabled!(target: "slae::trace", tracing::Level::ERROR),
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct NullSink;

impl TraceSink for NullSink {
    fn message(&self, _level: TraceLevel, _text: &str) {}

    fn matrix(&self, _label: &str, _matrix: &DMatrix<f64>) {}

    fn transposed_matrix(&self, _label: &str, _matrix: &DMatrix<f64>) {}

    fn vector(&self, _vector: &DVector<f64>) {}

    fn solution(&self, _solution: &DVector<f64>) {}

    fn enabled(&self, _level: TraceLevel) -> bool {
        false
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum TraceEvent {
    Message { level: TraceLevel, text: String },
    Matrix { label: String, matrix: DMatrix<f64> },
    TransposedMatrix { label: String, matrix: DMatrix<f64> },
    Vector(DVector<f64>),
    Solution(DVector<f64>),
}

/// In-memory sink. Safe to share between threads.
#[derive(Debug)]
pub struct RecordingSink {
    min_level: TraceLevel,
    events: Mutex<Vec<TraceEvent>>,
}

impl Default for RecordingSink {
    fn default() -> Self {
        Self::new()
    }
}

impl RecordingSink {
    /// Records everything, including per-term debug arithmetic.
    pub fn new() -> Self {
        Self::with_level(TraceLevel::Debug)
    }

    /// Records messages at `min_level` and above.
    pub fn with_level(min_level: TraceLevel) -> Self {
        Self {
            min_level,
            events: Mutex::new(Vec::new()),
        }
    }

    pub fn events(&self) -> Vec<TraceEvent> {
        self.lock().clone()
    }

    /// Text of every recorded message, in order.
    pub fn messages(&self) -> Vec<String> {
        self.lock()
            .iter()
            .filter_map(|event| match event {
                TraceEvent::Message { text, .. } => Some(text.clone()),
                _ => None,
            })
            .collect()
    }

    pub fn messages_at(&self, level: TraceLevel) -> Vec<String> {
        self.lock()
            .iter()
            .filter_map(|event| match event {
                TraceEvent::Message { level: l, text } if *l == level => Some(text.clone()),
                _ => None,
            })
            .collect()
    }

    pub fn contains(&self, needle: &str) -> bool {
        self.lock().iter().any(|event| match event {
            TraceEvent::Message { text, .. } => text.contains(needle),
            _ => false,
        })
    }

    pub fn clear(&self) {
        self.lock().clear();
    }

    fn lock(&self) -> MutexGuard<'_, Vec<TraceEvent>> {
        self.events
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn push(&self, event: TraceEvent) {
        self.lock().push(event);
    }
}

impl TraceSink for RecordingSink {
    fn message(&self, level: TraceLevel, text: &str) {
        if level >= self.min_level {
            self.push(TraceEvent::Message {
                level,
                text: text.to_string(),
            });
        }
    }

    fn matrix(&self, label: &str, matrix: &DMatrix<f64>) {
        self.push(TraceEvent::Matrix {
            label: label.to_string(),
            matrix: matrix.clone(),
        });
    }

    fn transposed_matrix(&self, label: &str, matrix: &DMatrix<f64>) {
        self.push(TraceEvent::TransposedMatrix {
            label: label.to_string(),
            matrix: matrix.clone(),
        });
    }

    fn vector(&self, vector: &DVector<f64>) {
        self.push(TraceEvent::Vector(vector.clone()));
    }

    fn solution(&self, solution: &DVector<f64>) {
        self.push(TraceEvent::Solution(solution.clone()));
    }

    fn enabled(&self, level: TraceLevel) -> bool {
        level >= self.min_level
    }
}
