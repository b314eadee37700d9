//! Result formatting for the terminal and JSON.

use nalgebra::{DMatrix, DVector};
use serde::Serialize;
use slaekit_solver::{MethodOutcome, SolveHistory};

/// One iteration as written to JSON.
#[derive(Debug, Serialize)]
pub struct IterationRow {
    pub iteration: usize,
    pub solution: Vec<f64>,
    pub error: f64,
    pub elapsed_ms: f64,
}

/// Full solve report.
#[derive(Debug, Serialize)]
pub struct SolveReport {
    pub method: String,
    pub iterations: usize,
    pub solution: Vec<f64>,
    pub final_error: f64,
    pub residual_norm: f64,
    pub elapsed_ms: f64,
    pub warnings: Vec<String>,
    pub history: Vec<IterationRow>,
}

impl SolveReport {
    pub fn new(
        history: &SolveHistory,
        a: &DMatrix<f64>,
        b: &DVector<f64>,
        warnings: Vec<String>,
    ) -> Self {
        Self {
            method: history.method().to_string(),
            iterations: history.iterations(),
            solution: history.solution().iter().copied().collect(),
            final_error: history.final_error(),
            residual_norm: history.residual_norm(a, b),
            elapsed_ms: history.elapsed_ms(),
            warnings,
            history: history
                .records()
                .iter()
                .map(|r| IterationRow {
                    iteration: r.index,
                    solution: r.solution.iter().copied().collect(),
                    error: r.error,
                    elapsed_ms: r.elapsed_ms,
                })
                .collect(),
        }
    }
}

/// Per-method line of a comparison.
#[derive(Debug, Serialize)]
pub struct ComparisonRow {
    pub method: String,
    pub converged: bool,
    pub iterations: Option<usize>,
    pub final_error: Option<f64>,
    pub residual_norm: Option<f64>,
    pub elapsed_ms: Option<f64>,
    pub failure: Option<String>,
}

impl ComparisonRow {
    pub fn new(outcome: &MethodOutcome, a: &DMatrix<f64>, b: &DVector<f64>) -> Self {
        match &outcome.result {
            Ok(history) => Self {
                method: outcome.method.to_string(),
                converged: true,
                iterations: Some(history.iterations()),
                final_error: Some(history.final_error()),
                residual_norm: Some(history.residual_norm(a, b)),
                elapsed_ms: Some(history.elapsed_ms()),
                failure: None,
            },
            Err(e) => Self {
                method: outcome.method.to_string(),
                converged: false,
                iterations: None,
                final_error: None,
                residual_norm: None,
                elapsed_ms: None,
                failure: Some(e.to_string()),
            },
        }
    }
}

fn format_vector(v: &[f64]) -> String {
    let parts: Vec<String> = v.iter().map(|x| format!("{:.6}", x)).collect();
    format!("[{}]", parts.join(", "))
}

/// Print a solve report as a table.
pub fn print_solve_report(report: &SolveReport) {
    println!("{} iteration history", report.method);
    println!("{}", "=".repeat(report.method.len() + 18));
    println!();
    println!("{:>6}  {:>14}  {:>12}  Solution", "Iter", "Error", "Time (ms)");
    for row in &report.history {
        println!(
            "{:>6}  {:>14.6e}  {:>12.4}  {}",
            row.iteration,
            row.error,
            row.elapsed_ms,
            format_vector(&row.solution)
        );
    }
    println!();
    println!(
        "Converged in {} iterations ({:.4} ms).",
        report.iterations, report.elapsed_ms
    );
    for (i, x) in report.solution.iter().enumerate() {
        println!("  x{} = {:.10}", i + 1, x);
    }
    println!("Residual norm ||b - Ax|| = {:.6e}", report.residual_norm);
}

/// Print a method comparison as a table.
pub fn print_comparison(rows: &[ComparisonRow]) {
    println!("Method comparison");
    println!("=================");
    println!();
    println!(
        "{:<18} {:>6} {:>14} {:>14} {:>12}",
        "Method", "Iter", "Error", "Residual", "Time (ms)"
    );
    for row in rows {
        match (row.iterations, row.final_error, row.residual_norm, row.elapsed_ms) {
            (Some(iter), Some(err), Some(res), Some(ms)) => println!(
                "{:<18} {:>6} {:>14.6e} {:>14.6e} {:>12.4}",
                row.method, iter, err, res, ms
            ),
            _ => println!(
                "{:<18} failed: {}",
                row.method,
                row.failure.as_deref().unwrap_or("unknown error")
            ),
        }
    }
}
