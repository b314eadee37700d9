//! Iterative solvers for small dense linear systems Ax = b.
//!
//! Three classical methods are provided, all starting from the zero vector and
//! sharing one stopping rule (max-norm difference of consecutive iterates):
//!
//! - [`Method::Jacobi`] and [`Method::GaussSeidel`], gated on strict diagonal
//!   dominance.
//! - [`Method::Gradient`] (steepest descent), gated on the matrix being
//!   symmetric positive definite.
//!
//! Every solve returns the full [`SolveHistory`] so callers can inspect the
//! convergence trajectory, not just the final point.
//!
//! ```
//! use nalgebra::{dmatrix, dvector};
//! use slaekit_solver::{Method, SolverConfig, solve};
//!
//! let a = dmatrix![4.0, 1.0; 2.0, 3.0];
//! let b = dvector![1.0, 2.0];
//!
//! let history = solve(Method::GaussSeidel, &a, &b, &SolverConfig::default()).unwrap();
//! let x = history.solution();
//! assert!((x[0] - 0.1).abs() < 1e-5);
//! assert!((x[1] - 0.6).abs() < 1e-5);
//! ```

pub mod determinant;
pub mod diagnostics;
pub mod dispatch;
pub mod error;
pub mod iterative;
pub mod residual;
pub mod session;
pub mod stability;

/// Smallest supported system order.
pub const MIN_ORDER: usize = 2;
/// Largest supported system order.
pub const MAX_ORDER: usize = 10;

pub use determinant::{determinant, minor};
pub use diagnostics::{
    find_invalid_entry, is_diagonally_dominant, is_symmetric, is_symmetric_positive_definite,
    leading_principal_minors, validate,
};
pub use dispatch::{Method, MethodOutcome, SolverConfig, compare_methods, solve};
pub use error::{ConvergenceGate, Error, InvalidEntry, Result};
pub use iterative::{
    IterationRecord, SolveHistory, solve_gauss_seidel, solve_gradient_descent, solve_jacobi,
};
pub use residual::{dot, euclidean_norm, mat_vec, max_abs_diff, residual};
pub use session::SolveSession;
pub use stability::{StabilityWarning, stability_warning, stability_warnings};
