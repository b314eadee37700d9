//! Pre-solve matrix checks.
//!
//! [`validate`] is a hard precondition for every solver. The dominance and
//! positive-definiteness checks are sufficient (not necessary) convergence
//! conditions used as gates by the solver entry points.

use nalgebra::{DMatrix, DVector};

use crate::determinant::determinant;
use crate::error::{Error, InvalidEntry, Result};
use crate::{MAX_ORDER, MIN_ORDER};

/// Diagonal entries with smaller magnitude are treated as zero.
pub const ZERO_DIAGONAL_EPS: f64 = 1e-14;

/// Largest allowed |A[i][j] - A[j][i]| for a symmetric matrix.
pub const SYMMETRY_TOL: f64 = 1e-10;

/// Check that A is square, b matches it and the order is supported.
pub fn check_dimensions(a: &DMatrix<f64>, b: &DVector<f64>) -> Result<()> {
    if a.nrows() != a.ncols() {
        return Err(Error::DimensionMismatch {
            expected: a.nrows(),
            actual: a.ncols(),
        });
    }
    if a.nrows() != b.len() {
        return Err(Error::DimensionMismatch {
            expected: a.nrows(),
            actual: b.len(),
        });
    }
    if !(MIN_ORDER..=MAX_ORDER).contains(&a.nrows()) {
        return Err(Error::UnsupportedOrder { order: a.nrows() });
    }
    Ok(())
}

/// Find the first NaN/infinite value or near-zero diagonal entry.
///
/// Coefficients are scanned row by row, then the right-hand side, then the
/// diagonal.
pub fn find_invalid_entry(a: &DMatrix<f64>, b: &DVector<f64>) -> Option<InvalidEntry> {
    for row in 0..a.nrows() {
        for col in 0..a.ncols() {
            if !a[(row, col)].is_finite() {
                return Some(InvalidEntry::NonFiniteCoefficient { row, col });
            }
        }
    }
    if let Some(index) = b.iter().position(|v| !v.is_finite()) {
        return Some(InvalidEntry::NonFiniteRhs { index });
    }
    let n = a.nrows().min(a.ncols());
    (0..n)
        .find(|&i| a[(i, i)].abs() < ZERO_DIAGONAL_EPS)
        .map(|index| InvalidEntry::ZeroDiagonal {
            index,
            value: a[(index, index)],
        })
}

/// Returns false if A or b holds NaN/infinity or A has a zero diagonal entry.
pub fn validate(a: &DMatrix<f64>, b: &DVector<f64>) -> bool {
    find_invalid_entry(a, b).is_none()
}

/// Full entry check used by the solvers: dimensions, then values.
pub fn validate_system(a: &DMatrix<f64>, b: &DVector<f64>) -> Result<()> {
    check_dimensions(a, b)?;
    match find_invalid_entry(a, b) {
        Some(entry) => Err(Error::InvalidMatrix(entry)),
        None => Ok(()),
    }
}

/// Strict row diagonal dominance: |A[i][i]| > sum_{j != i} |A[i][j]|.
pub fn is_diagonally_dominant(a: &DMatrix<f64>) -> bool {
    let n = a.nrows().min(a.ncols());
    (0..n).all(|i| {
        let off_diagonal: f64 = (0..a.ncols())
            .filter(|&j| j != i)
            .map(|j| a[(i, j)].abs())
            .sum();
        a[(i, i)].abs() > off_diagonal
    })
}

/// Symmetry within [`SYMMETRY_TOL`].
pub fn is_symmetric(a: &DMatrix<f64>) -> bool {
    if a.nrows() != a.ncols() {
        return false;
    }
    let n = a.nrows();
    (0..n).all(|i| ((i + 1)..n).all(|j| (a[(i, j)] - a[(j, i)]).abs() <= SYMMETRY_TOL))
}

/// Determinants of the top-left k x k sub-matrices, k = 1..=n.
pub fn leading_principal_minors(a: &DMatrix<f64>) -> Vec<f64> {
    let n = a.nrows().min(a.ncols());
    (1..=n)
        .map(|k| determinant(&a.view((0, 0), (k, k)).into_owned()))
        .collect()
}

/// Order of the first leading principal minor that is not strictly positive.
pub(crate) fn first_non_positive_minor(a: &DMatrix<f64>) -> Option<usize> {
    leading_principal_minors(a)
        .iter()
        .position(|&d| d <= 0.0)
        .map(|idx| idx + 1)
}

/// Symmetric positive-definite check via Sylvester's criterion.
pub fn is_symmetric_positive_definite(a: &DMatrix<f64>) -> bool {
    is_symmetric(a) && first_non_positive_minor(a).is_none()
}
