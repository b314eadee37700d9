//! Advisory stability warnings.
//!
//! These never block a solve. They are meant for a presentation layer that
//! asks a human whether to continue before calling [`crate::solve`], which
//! still enforces its own hard convergence gates.

use std::fmt;

use nalgebra::DMatrix;

use crate::diagnostics::{is_diagonally_dominant, is_symmetric};
use crate::dispatch::Method;

/// Diagonal entries below this magnitude trigger a warning.
pub const SMALL_DIAGONAL_THRESHOLD: f64 = 1e-6;

/// Ratio of largest to smallest non-zero |entry| above which we warn.
pub const MAGNITUDE_RATIO_THRESHOLD: f64 = 1e5;

/// One potential numerical problem with a coefficient matrix.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum StabilityWarning {
    /// The matrix has a different number of rows and columns.
    NotSquare { rows: usize, cols: usize },
    /// The smallest |diagonal| entry is tiny.
    SmallDiagonal { min_abs: f64 },
    /// Jacobi / Gauss-Seidel convergence is not guaranteed.
    NotDiagonallyDominant { method: Method },
    /// Steepest descent convergence is not guaranteed.
    NotSymmetric,
    /// Entries span many orders of magnitude.
    MagnitudeSpread { ratio: f64 },
}

impl fmt::Display for StabilityWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StabilityWarning::NotSquare { rows, cols } => {
                write!(f, "Matrix is not square ({}x{})", rows, cols)
            }
            StabilityWarning::SmallDiagonal { min_abs } => write!(
                f,
                "Smallest diagonal entry magnitude {:e} is close to zero; results may be unstable",
                min_abs
            ),
            StabilityWarning::NotDiagonallyDominant { method } => write!(
                f,
                "Matrix is not diagonally dominant; {} may not converge",
                method
            ),
            StabilityWarning::NotSymmetric => write!(
                f,
                "Matrix is not symmetric; steepest descent may not converge"
            ),
            StabilityWarning::MagnitudeSpread { ratio } => write!(
                f,
                "Coefficient magnitudes differ by a factor of {:.3e}; the system may be ill-conditioned",
                ratio
            ),
        }
    }
}

/// Collect every warning that applies to `a` when solved with `method`.
pub fn stability_warnings(a: &DMatrix<f64>, method: Method) -> Vec<StabilityWarning> {
    let mut warnings = Vec::new();

    if a.nrows() != a.ncols() {
        warnings.push(StabilityWarning::NotSquare {
            rows: a.nrows(),
            cols: a.ncols(),
        });
        return warnings;
    }
    if a.is_empty() {
        return warnings;
    }

    let min_diag = a.diagonal().iter().map(|d| d.abs()).fold(f64::INFINITY, f64::min);
    if min_diag < SMALL_DIAGONAL_THRESHOLD {
        warnings.push(StabilityWarning::SmallDiagonal { min_abs: min_diag });
    }

    match method {
        Method::Jacobi | Method::GaussSeidel => {
            if !is_diagonally_dominant(a) {
                warnings.push(StabilityWarning::NotDiagonallyDominant { method });
            }
        }
        Method::Gradient => {
            if !is_symmetric(a) {
                warnings.push(StabilityWarning::NotSymmetric);
            }
        }
    }

    if let Some(ratio) = magnitude_ratio(a).filter(|&r| r > MAGNITUDE_RATIO_THRESHOLD) {
        warnings.push(StabilityWarning::MagnitudeSpread { ratio });
    }

    warnings
}

/// Newline-joined warning text; empty when there are no concerns.
pub fn stability_warning(a: &DMatrix<f64>, method: Method) -> String {
    stability_warnings(a, method)
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("\n")
}

/// max |a_ij| / min |a_ij| over non-zero entries.
fn magnitude_ratio(a: &DMatrix<f64>) -> Option<f64> {
    let (min, max) = a
        .iter()
        .map(|v| v.abs())
        .filter(|&v| v > 0.0)
        .fold((f64::INFINITY, 0.0_f64), |(lo, hi), v| (lo.min(v), hi.max(v)));
    (max > 0.0).then(|| max / min)
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::dmatrix;

    #[test]
    fn well_behaved_matrix_has_no_warnings() {
        let a = dmatrix![2.0, 1.0; 1.0, 2.0];
        for method in Method::ALL {
            assert_eq!(stability_warning(&a, method), "");
        }
    }

    #[test]
    fn dominance_only_matters_for_stationary_methods() {
        // Symmetric, not diagonally dominant
        let a = dmatrix![1.0, 2.0; 2.0, 1.0];
        assert_eq!(
            stability_warnings(&a, Method::Jacobi),
            vec![StabilityWarning::NotDiagonallyDominant {
                method: Method::Jacobi
            }]
        );
        assert!(stability_warnings(&a, Method::Gradient).is_empty());
    }

    #[test]
    fn symmetry_only_matters_for_gradient() {
        let a = dmatrix![4.0, 1.0; 2.0, 3.0];
        assert!(stability_warnings(&a, Method::GaussSeidel).is_empty());
        assert_eq!(
            stability_warnings(&a, Method::Gradient),
            vec![StabilityWarning::NotSymmetric]
        );
    }

    #[test]
    fn small_diagonal_and_spread_are_reported_together() {
        let a = dmatrix![1e-7, 0.0; 0.0, 1.0];
        let warnings = stability_warnings(&a, Method::Gradient);
        assert_eq!(warnings.len(), 2);
        assert!(matches!(warnings[0], StabilityWarning::SmallDiagonal { .. }));
        assert!(matches!(warnings[1], StabilityWarning::MagnitudeSpread { .. }));

        let text = stability_warning(&a, Method::Gradient);
        assert_eq!(text.lines().count(), 2);
    }

    #[test]
    fn magnitude_spread_ignores_zeros() {
        let a = dmatrix![1e6, 0.0; 0.0, 1e6];
        assert_eq!(magnitude_ratio(&a), Some(1.0));

        let a = dmatrix![1e6, 1.0; 1.0, 1e6];
        let warnings = stability_warnings(&a, Method::Jacobi);
        assert_eq!(warnings.len(), 1);
        assert!(matches!(
            warnings[0],
            StabilityWarning::MagnitudeSpread { ratio } if (ratio - 1e6).abs() < 1e-3
        ));
    }

    #[test]
    fn non_square_input_is_reported_not_rejected() {
        let a = DMatrix::<f64>::zeros(2, 3);
        assert_eq!(
            stability_warnings(&a, Method::Jacobi),
            vec![StabilityWarning::NotSquare { rows: 2, cols: 3 }]
        );
    }
}
