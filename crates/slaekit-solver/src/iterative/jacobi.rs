//! Jacobi iteration.

use nalgebra::{DMatrix, DVector};

use super::{SolveHistory, Step, run_iterations};
use crate::diagnostics::{is_diagonally_dominant, validate_system};
use crate::dispatch::{Method, SolverConfig};
use crate::error::{ConvergenceGate, Error, Result};

/// Solve Ax = b by Jacobi iteration.
///
/// Every component of the new iterate uses only the previous iterate:
///
/// ```text
/// x_new[i] = (b[i] - sum_{j != i} A[i][j] * x_old[j]) / A[i][i]
/// ```
///
/// Requires `a` to be strictly diagonally dominant.
pub fn solve_jacobi(
    a: &DMatrix<f64>,
    b: &DVector<f64>,
    config: &SolverConfig,
) -> Result<SolveHistory> {
    config.validate()?;
    validate_system(a, b)?;
    if !is_diagonally_dominant(a) {
        log::warn!("Jacobi: matrix is not diagonally dominant, refusing to iterate");
        return Err(Error::ConvergenceGateFailed {
            method: Method::Jacobi,
            gate: ConvergenceGate::NotDiagonallyDominant,
        });
    }

    let n = b.len();
    run_iterations(Method::Jacobi, n, config, |_, x_old| {
        let x_new = DVector::from_fn(n, |i, _| {
            let sigma: f64 = (0..n)
                .filter(|&j| j != i)
                .map(|j| a[(i, j)] * x_old[j])
                .sum();
            (b[i] - sigma) / a[(i, i)]
        });
        Ok(Step::Advance(x_new))
    })
}
