//! Method selection and the top-level solve entry point.
//!
//! The three methods are a closed set; [`solve`] dispatches to independent
//! kernel functions that share only the iteration contract in
//! [`crate::iterative`].

use std::fmt;

use nalgebra::{DMatrix, DVector};

use crate::error::{Error, Result};
use crate::iterative::{SolveHistory, solve_gauss_seidel, solve_gradient_descent, solve_jacobi};

/// Default stopping tolerance on the max-norm iterate difference.
pub const DEFAULT_TOLERANCE: f64 = 1e-6;

/// Default iteration cap.
pub const DEFAULT_MAX_ITERATIONS: usize = 1000;

/// Iterative method used to solve Ax = b.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    /// Jacobi iteration (previous sweep values only).
    Jacobi,
    /// Gauss-Seidel iteration (in-place sweep).
    GaussSeidel,
    /// Steepest (gradient) descent with exact line search.
    Gradient,
}

impl Method {
    /// All methods, in presentation order.
    pub const ALL: [Method; 3] = [Method::Jacobi, Method::GaussSeidel, Method::Gradient];

    /// Parse from a string.
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_lowercase().replace('_', "-").as_str() {
            "jacobi" => Some(Self::Jacobi),
            "gauss-seidel" | "gaussseidel" | "seidel" | "gs" => Some(Self::GaussSeidel),
            "gradient" | "gradient-descent" | "steepest-descent" | "steepest" | "sd" => {
                Some(Self::Gradient)
            }
            _ => None,
        }
    }

    /// Human-readable name.
    pub fn name(&self) -> &'static str {
        match self {
            Method::Jacobi => "Jacobi",
            Method::GaussSeidel => "Gauss-Seidel",
            Method::Gradient => "Steepest descent",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Stopping rule shared by all methods.
#[derive(Debug, Clone)]
pub struct SolverConfig {
    /// Stop once the max-norm difference of consecutive iterates is at most this.
    pub tolerance: f64,
    /// Fail with [`Error::DidNotConverge`] after this many iterations.
    pub max_iterations: usize,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            tolerance: DEFAULT_TOLERANCE,
            max_iterations: DEFAULT_MAX_ITERATIONS,
        }
    }
}

impl SolverConfig {
    /// Set the tolerance.
    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    /// Set the iteration cap.
    pub fn with_max_iterations(mut self, max_iterations: usize) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    /// Reject a non-positive or non-finite tolerance and a zero iteration cap.
    pub fn validate(&self) -> Result<()> {
        if !self.tolerance.is_finite() || self.tolerance <= 0.0 {
            return Err(Error::InvalidConfig(format!(
                "tolerance must be a positive finite number, got {}",
                self.tolerance
            )));
        }
        if self.max_iterations == 0 {
            return Err(Error::InvalidConfig(
                "max_iterations must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

/// Solve Ax = b with the chosen method.
pub fn solve(
    method: Method,
    a: &DMatrix<f64>,
    b: &DVector<f64>,
    config: &SolverConfig,
) -> Result<SolveHistory> {
    match method {
        Method::Jacobi => solve_jacobi(a, b, config),
        Method::GaussSeidel => solve_gauss_seidel(a, b, config),
        Method::Gradient => solve_gradient_descent(a, b, config),
    }
}

/// Outcome of one method in [`compare_methods`].
#[derive(Debug)]
pub struct MethodOutcome {
    /// Method that was run.
    pub method: Method,
    /// Its history or failure.
    pub result: Result<SolveHistory>,
}

/// Run every method on the same system.
///
/// Failures are reported per method rather than aborting the comparison.
pub fn compare_methods(
    a: &DMatrix<f64>,
    b: &DVector<f64>,
    config: &SolverConfig,
) -> Vec<MethodOutcome> {
    Method::ALL
        .iter()
        .map(|&method| MethodOutcome {
            method,
            result: solve(method, a, b, config),
        })
        .collect()
}
