//! Iteration engine shared by the three methods.
//!
//! Each solve goes through the same stages:
//!
//! 1. Validate the config, the dimensions and every entry.
//! 2. Check the method's convergence gate.
//! 3. Iterate from the zero vector until the max-norm difference of two
//!    consecutive iterates is within tolerance, a NaN/infinity shows up, or
//!    the iteration cap is reached.
//!
//! # Module Structure
//!
//! - [`jacobi`] - Jacobi iteration
//! - [`gauss_seidel`] - Gauss-Seidel iteration
//! - [`gradient`] - Steepest descent

pub mod gauss_seidel;
pub mod gradient;
pub mod jacobi;

pub use gauss_seidel::solve_gauss_seidel;
pub use gradient::solve_gradient_descent;
pub use jacobi::solve_jacobi;

use std::time::Instant;

use nalgebra::{DMatrix, DVector};

use crate::dispatch::{Method, SolverConfig};
use crate::error::{Error, Result};
use crate::residual::{euclidean_norm, max_abs_diff, residual};

/// Snapshot taken after one completed iteration.
#[derive(Debug, Clone)]
pub struct IterationRecord {
    /// 0-based iteration index.
    pub index: usize,
    /// Copy of the iterate produced by this iteration.
    pub solution: DVector<f64>,
    /// Max-norm difference from the previous iterate.
    pub error: f64,
    /// Wall-clock milliseconds since the solve started.
    pub elapsed_ms: f64,
}

/// Ordered iteration records of one successful solve.
///
/// Never empty; the last record holds the accepted solution.
#[derive(Debug, Clone)]
pub struct SolveHistory {
    method: Method,
    records: Vec<IterationRecord>,
}

impl SolveHistory {
    pub(crate) fn new(method: Method, records: Vec<IterationRecord>) -> Self {
        debug_assert!(!records.is_empty());
        Self { method, records }
    }

    /// Method that produced this history.
    pub fn method(&self) -> Method {
        self.method
    }

    /// All records, first iteration first.
    pub fn records(&self) -> &[IterationRecord] {
        &self.records
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Always false for a history returned by a solver.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Number of iterations performed (same as [`len`](Self::len)).
    pub fn iterations(&self) -> usize {
        self.records.len()
    }

    /// Final record.
    pub fn last(&self) -> &IterationRecord {
        &self.records[self.records.len() - 1]
    }

    /// Accepted solution.
    pub fn solution(&self) -> &DVector<f64> {
        &self.last().solution
    }

    /// Error estimate of the final iteration.
    pub fn final_error(&self) -> f64 {
        self.last().error
    }

    /// Total wall-clock time in milliseconds.
    pub fn elapsed_ms(&self) -> f64 {
        self.last().elapsed_ms
    }

    /// Error estimate per iteration.
    pub fn errors(&self) -> Vec<f64> {
        self.records.iter().map(|r| r.error).collect()
    }

    /// ||b - A*x|| for the accepted solution.
    pub fn residual_norm(&self, a: &DMatrix<f64>, b: &DVector<f64>) -> f64 {
        euclidean_norm(&residual(a, self.solution(), b))
    }

    /// Consume the history and return its records.
    pub fn into_records(self) -> Vec<IterationRecord> {
        self.records
    }
}

/// What one kernel step produced.
pub(crate) enum Step {
    /// A new candidate iterate.
    Advance(DVector<f64>),
    /// The current iterate already solves the system.
    Stationary,
}

/// Drive a kernel from the zero vector until the stopping rule fires.
///
/// `step` receives the iteration index and the current iterate.
pub(crate) fn run_iterations<F>(
    method: Method,
    n: usize,
    config: &SolverConfig,
    mut step: F,
) -> Result<SolveHistory>
where
    F: FnMut(usize, &DVector<f64>) -> Result<Step>,
{
    let start = Instant::now();
    let mut current = DVector::zeros(n);
    let mut records = Vec::new();
    let mut error = f64::INFINITY;

    log::debug!(
        "{}: solving order {} system (tol = {:e}, max_iter = {})",
        method,
        n,
        config.tolerance,
        config.max_iterations
    );

    for iteration in 0..config.max_iterations {
        let next = match step(iteration, &current)? {
            Step::Advance(next) => next,
            Step::Stationary => {
                records.push(IterationRecord {
                    index: iteration,
                    solution: current.clone(),
                    error: 0.0,
                    elapsed_ms: elapsed_ms(start),
                });
                log::debug!("{}: exact solution reached at iteration {}", method, iteration);
                return Ok(SolveHistory::new(method, records));
            }
        };

        if let Some(component) = next.iter().position(|v| !v.is_finite()) {
            log::warn!(
                "{}: non-finite value in component {} at iteration {}",
                method,
                component,
                iteration
            );
            return Err(Error::NumericalOverflow {
                method,
                iteration,
                component,
            });
        }

        error = max_abs_diff(&current, &next);
        records.push(IterationRecord {
            index: iteration,
            solution: next.clone(),
            error,
            elapsed_ms: elapsed_ms(start),
        });
        log::trace!("{}: iteration {} error {:e}", method, iteration, error);
        current = next;

        if error <= config.tolerance {
            log::debug!(
                "{}: converged in {} iterations (error {:e})",
                method,
                records.len(),
                error
            );
            return Ok(SolveHistory::new(method, records));
        }
    }

    log::warn!(
        "{}: no convergence after {} iterations (error {:e})",
        method,
        config.max_iterations,
        error
    );
    Err(Error::DidNotConverge {
        method,
        iterations: config.max_iterations,
        error,
    })
}

fn elapsed_ms(start: Instant) -> f64 {
    start.elapsed().as_secs_f64() * 1e3
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::dvector;

    #[test]
    fn records_are_indexed_and_timed_in_order() {
        let config = SolverConfig::default().with_tolerance(0.1);
        // Halve the distance to [1, 1] each step
        let history = run_iterations(Method::Jacobi, 2, &config, |_, x| {
            Ok(Step::Advance(x.map(|v| v + (1.0 - v) / 2.0)))
        })
        .unwrap();

        assert!(history.len() > 1);
        for (i, record) in history.records().iter().enumerate() {
            assert_eq!(record.index, i);
            assert_eq!(record.solution.len(), 2);
            assert!(record.error >= 0.0);
        }
        for pair in history.records().windows(2) {
            assert!(pair[1].elapsed_ms >= pair[0].elapsed_ms);
            assert!(pair[1].error < pair[0].error);
        }
        assert!(history.final_error() <= 0.1);
    }

    #[test]
    fn stationary_step_records_current_iterate() {
        let config = SolverConfig::default();
        let history =
            run_iterations(Method::Gradient, 3, &config, |_, _| Ok(Step::Stationary)).unwrap();

        assert_eq!(history.len(), 1);
        assert_eq!(history.last().index, 0);
        assert_eq!(history.final_error(), 0.0);
        assert_eq!(history.solution(), &DVector::zeros(3));
    }

    #[test]
    fn overflow_aborts_with_component() {
        let config = SolverConfig::default();
        let result = run_iterations(Method::Jacobi, 2, &config, |_, _| {
            Ok(Step::Advance(dvector![1.0, f64::INFINITY]))
        });
        assert!(matches!(
            result,
            Err(Error::NumericalOverflow {
                iteration: 0,
                component: 1,
                ..
            })
        ));
    }

    #[test]
    fn cap_reports_last_error() {
        let config = SolverConfig::default().with_max_iterations(3);
        // Grows by one every step, never converges
        let result = run_iterations(Method::GaussSeidel, 1, &config, |_, x| {
            Ok(Step::Advance(x.map(|v| v + 1.0)))
        });
        match result {
            Err(Error::DidNotConverge {
                method,
                iterations,
                error,
            }) => {
                assert_eq!(method, Method::GaussSeidel);
                assert_eq!(iterations, 3);
                assert!((error - 1.0).abs() < 1e-15);
            }
            other => panic!("expected DidNotConverge, got {:?}", other),
        }
    }

    #[test]
    fn snapshots_do_not_alias_working_buffer() {
        let config = SolverConfig::default().with_max_iterations(2).with_tolerance(0.5);
        let history = run_iterations(Method::Jacobi, 2, &config, |i, x| {
            Ok(Step::Advance(x.map(|v| v + 1.0 / (i + 1) as f64)))
        })
        .unwrap();
        assert_eq!(history.records()[0].solution, dvector![1.0, 1.0]);
        assert_eq!(history.records()[1].solution, dvector![1.5, 1.5]);
    }
}
