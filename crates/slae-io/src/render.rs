//! Text rendering of matrices, vectors and solutions.

use std::fmt::Write;

use nalgebra::{DMatrix, DVector};

/// Render `matrix` row by row under a `Matrix <label>:` heading.
pub fn render_matrix(label: &str, matrix: &DMatrix<f64>) -> String {
    render_grid(
        &format!("Matrix {label}"),
        matrix.nrows(),
        matrix.ncols(),
        |i, j| matrix[(i, j)],
    )
}

/// Render the transpose of `matrix` without materialising it.
pub fn render_transposed_matrix(label: &str, matrix: &DMatrix<f64>) -> String {
    render_grid(
        &format!("Transposed matrix {label}"),
        matrix.ncols(),
        matrix.nrows(),
        |i, j| matrix[(j, i)],
    )
}

fn render_grid(description: &str, rows: usize, cols: usize, element: impl Fn(usize, usize) -> f64) -> String {
    let mut out = String::with_capacity(description.len() + rows * (cols * 9 + 3));
    out.push_str(description);
    out.push_str(":\n");
    for i in 0..rows {
        out.push_str("| ");
        for j in 0..cols {
            let _ = write!(out, "{:8.4} ", element(i, j));
        }
        out.push('\n');
    }
    out
}

/// Render a vector as `| v0 | v1 | ... |` with four decimals.
pub fn render_vector(vector: &DVector<f64>) -> String {
    let cells: Vec<String> = vector.iter().map(|v| format!("{v:.4}")).collect();
    format!("| {} |", cells.join(" | "))
}

/// One line per unknown, labelled from 1: `x[1] = 0.0909`.
pub fn render_solution(solution: &DVector<f64>) -> Vec<String> {
    solution
        .iter()
        .enumerate()
        .map(|(i, v)| format!("x[{}] = {v:.4}", i + 1))
        .collect()
}
