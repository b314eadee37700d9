//! Caller-owned solve context.
//!
//! Holds what a front end needs between user actions: the selected method,
//! the stopping rule and the last successful history. The solver functions
//! themselves keep no state between calls.

use nalgebra::{DMatrix, DVector};

use crate::dispatch::{Method, SolverConfig, solve};
use crate::error::Result;
use crate::iterative::SolveHistory;
use crate::stability::stability_warning;

/// Selected method, configuration and last result.
#[derive(Debug, Clone)]
pub struct SolveSession {
    method: Method,
    config: SolverConfig,
    last: Option<SolveHistory>,
}

impl SolveSession {
    /// Create a session for `method` with the default configuration.
    pub fn new(method: Method) -> Self {
        Self {
            method,
            config: SolverConfig::default(),
            last: None,
        }
    }

    /// Replace the configuration.
    pub fn with_config(mut self, config: SolverConfig) -> Self {
        self.config = config;
        self
    }

    /// Currently selected method.
    pub fn method(&self) -> Method {
        self.method
    }

    /// Select another method. The last history is kept until the next solve.
    pub fn set_method(&mut self, method: Method) {
        self.method = method;
    }

    /// Current configuration.
    pub fn config(&self) -> &SolverConfig {
        &self.config
    }

    /// Mutable access to the configuration.
    pub fn config_mut(&mut self) -> &mut SolverConfig {
        &mut self.config
    }

    /// Advisory warnings for `a` under the selected method.
    pub fn stability_warning(&self, a: &DMatrix<f64>) -> String {
        stability_warning(a, self.method)
    }

    /// Solve with the selected method and keep the history.
    ///
    /// A failed solve clears the previous history so stale results are never
    /// shown next to a new error.
    pub fn solve(&mut self, a: &DMatrix<f64>, b: &DVector<f64>) -> Result<&SolveHistory> {
        self.last = None;
        let history = solve(self.method, a, b, &self.config)?;
        Ok(self.last.insert(history))
    }

    /// History of the last successful solve, if any.
    pub fn last_history(&self) -> Option<&SolveHistory> {
        self.last.as_ref()
    }

    /// Take ownership of the last history.
    pub fn take_history(&mut self) -> Option<SolveHistory> {
        self.last.take()
    }

    /// Forget the last history.
    pub fn clear(&mut self) {
        self.last = None;
    }
}
