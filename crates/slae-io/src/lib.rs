//! Rendering support for the SLAE solvers.
//!
//! This crate provides:
//! - **Matrix / vector rendering** for the solver trace (fixed `%8.4f`-style
//!   columns, 1-based unknown labels in solutions)
//! - **Run reports** summarising every method of a run, as an aligned text
//!   table or as JSON

mod output;
pub mod render;

pub use output::{MethodReport, MethodStatus, RunReport, render_report_json, render_report_table};
pub use render::{render_matrix, render_solution, render_transposed_matrix, render_vector};
