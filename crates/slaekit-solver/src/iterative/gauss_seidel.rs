//! Gauss-Seidel iteration.

use nalgebra::{DMatrix, DVector};

use super::{SolveHistory, Step, run_iterations};
use crate::diagnostics::{is_diagonally_dominant, validate_system};
use crate::dispatch::{Method, SolverConfig};
use crate::error::{ConvergenceGate, Error, Result};

/// Solve Ax = b by Gauss-Seidel iteration.
///
/// The sweep runs in place: components before `i` already hold this sweep's
/// values, components after `i` still hold the previous sweep's.
///
/// Requires `a` to be strictly diagonally dominant.
pub fn solve_gauss_seidel(
    a: &DMatrix<f64>,
    b: &DVector<f64>,
    config: &SolverConfig,
) -> Result<SolveHistory> {
    config.validate()?;
    validate_system(a, b)?;
    if !is_diagonally_dominant(a) {
        log::warn!("Gauss-Seidel: matrix is not diagonally dominant, refusing to iterate");
        return Err(Error::ConvergenceGateFailed {
            method: Method::GaussSeidel,
            gate: ConvergenceGate::NotDiagonallyDominant,
        });
    }

    let n = b.len();
    run_iterations(Method::GaussSeidel, n, config, |_, x_old| {
        let mut x_new = x_old.clone();
        for i in 0..n {
            let mut sigma = 0.0;
            for j in 0..n {
                if j != i {
                    sigma += a[(i, j)] * x_new[j];
                }
            }
            x_new[i] = (b[i] - sigma) / a[(i, i)];
        }
        Ok(Step::Advance(x_new))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::{dmatrix, dvector};

    #[test]
    fn sweep_uses_updated_components() {
        let a = dmatrix![4.0, 1.0; 2.0, 3.0];
        let b = dvector![1.0, 2.0];
        let history = solve_gauss_seidel(&a, &b, &SolverConfig::default()).unwrap();

        // x1[0] = 1/4, then x1[1] = (2 - 2 * 1/4) / 3 = 0.5
        let first = &history.records()[0].solution;
        assert!((first[0] - 0.25).abs() < 1e-15);
        assert!((first[1] - 0.5).abs() < 1e-15);
    }

    #[test]
    fn converges_to_direct_solution() {
        let a = dmatrix![
            10.0, -1.0, 2.0, 0.0;
            -1.0, 11.0, -1.0, 3.0;
            2.0, -1.0, 10.0, -1.0;
            0.0, 3.0, -1.0, 8.0
        ];
        let b = dvector![6.0, 25.0, -11.0, 15.0];
        let history = solve_gauss_seidel(&a, &b, &SolverConfig::default()).unwrap();

        // Known solution [1, 2, -1, 1]
        let x = history.solution();
        let expected = [1.0, 2.0, -1.0, 1.0];
        for i in 0..4 {
            assert!((x[i] - expected[i]).abs() < 1e-5, "x[{}] = {}", i, x[i]);
        }
    }

    #[test]
    fn rejects_zero_diagonal_before_gate() {
        let a = dmatrix![0.0, 1.0; 1.0, 5.0];
        let b = dvector![1.0, 1.0];
        assert!(matches!(
            solve_gauss_seidel(&a, &b, &SolverConfig::default()),
            Err(Error::InvalidMatrix(_))
        ));
    }
}
