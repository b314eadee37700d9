//! Error types for the iterative solvers.

use std::fmt;

use thiserror::Error;

use crate::dispatch::Method;

/// First offending entry found while validating a system.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InvalidEntry {
    /// A coefficient is NaN or infinite.
    NonFiniteCoefficient { row: usize, col: usize },
    /// A right-hand side entry is NaN or infinite.
    NonFiniteRhs { index: usize },
    /// A diagonal coefficient is too close to zero to divide by.
    ZeroDiagonal { index: usize, value: f64 },
}

impl fmt::Display for InvalidEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InvalidEntry::NonFiniteCoefficient { row, col } => {
                write!(f, "coefficient A[{}][{}] is not a finite number", row, col)
            }
            InvalidEntry::NonFiniteRhs { index } => {
                write!(f, "right-hand side b[{}] is not a finite number", index)
            }
            InvalidEntry::ZeroDiagonal { index, value } => {
                write!(f, "diagonal entry A[{0}][{0}] = {1:e} is zero", index, value)
            }
        }
    }
}

/// Sufficient convergence condition that a matrix failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConvergenceGate {
    /// Some row is not strictly diagonally dominant.
    NotDiagonallyDominant,
    /// The matrix is not symmetric.
    NotSymmetric,
    /// Leading principal minor of the given order is not strictly positive.
    NotPositiveDefinite { order: usize },
}

impl fmt::Display for ConvergenceGate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConvergenceGate::NotDiagonallyDominant => {
                write!(f, "matrix is not strictly diagonally dominant")
            }
            ConvergenceGate::NotSymmetric => write!(f, "matrix is not symmetric"),
            ConvergenceGate::NotPositiveDefinite { order } => write!(
                f,
                "matrix is not positive definite (leading minor of order {} is not positive)",
                order
            ),
        }
    }
}

/// Errors that can occur while solving a system.
#[derive(Debug, Error)]
pub enum Error {
    /// Matrix is not square or the right-hand side has the wrong length.
    #[error("Dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },

    /// System order outside the supported range.
    #[error("Unsupported system order {order} (supported: {min}..={max})", min = crate::MIN_ORDER, max = crate::MAX_ORDER)]
    UnsupportedOrder { order: usize },

    /// Tolerance or iteration cap is unusable.
    #[error("Invalid solver configuration: {0}")]
    InvalidConfig(String),

    /// NaN, infinity or a zero diagonal in the input.
    #[error("Invalid matrix: {0}")]
    InvalidMatrix(InvalidEntry),

    /// The method's sufficient convergence condition does not hold.
    #[error("{method} cannot be applied: {gate}")]
    ConvergenceGateFailed {
        method: Method,
        gate: ConvergenceGate,
    },

    /// A NaN or infinity appeared in a new iterate.
    #[error("{method}: numerical overflow in component {component} at iteration {iteration}")]
    NumericalOverflow {
        method: Method,
        iteration: usize,
        component: usize,
    },

    /// Steepest descent step denominator r·Ar vanished.
    #[error("Steepest descent: division by near-zero r·Ar = {value:e} at iteration {iteration}")]
    NearSingularStep { iteration: usize, value: f64 },

    /// Iteration cap reached before the tolerance was met.
    #[error("{method} did not converge after {iterations} iterations (error {error:e})")]
    DidNotConverge {
        method: Method,
        iterations: usize,
        error: f64,
    },
}

/// Result type for solver operations.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_failure() {
        let err = Error::InvalidMatrix(InvalidEntry::ZeroDiagonal {
            index: 0,
            value: 0.0,
        });
        assert!(err.to_string().contains("A[0][0]"));

        let err = Error::ConvergenceGateFailed {
            method: Method::GaussSeidel,
            gate: ConvergenceGate::NotDiagonallyDominant,
        };
        assert_eq!(
            err.to_string(),
            "Gauss-Seidel cannot be applied: matrix is not strictly diagonally dominant"
        );

        let err = Error::DidNotConverge {
            method: Method::Jacobi,
            iterations: 5,
            error: 0.25,
        };
        assert!(err.to_string().contains("after 5 iterations"));
    }

    #[test]
    fn unsupported_order_reports_range() {
        let err = Error::UnsupportedOrder { order: 11 };
        assert_eq!(
            err.to_string(),
            "Unsupported system order 11 (supported: 2..=10)"
        );
    }
}
