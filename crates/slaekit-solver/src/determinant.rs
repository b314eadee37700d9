//! Recursive cofactor determinant.
//!
//! Cost is factorial in the order, which is fine for n <= 10 and the handful
//! of calls made by the positive-definiteness check.

use nalgebra::DMatrix;

/// Determinant by cofactor expansion along the first row.
///
/// An empty matrix has determinant 1.
///
/// # Panics
///
/// Panics if `m` is not square.
pub fn determinant(m: &DMatrix<f64>) -> f64 {
    assert!(
        m.is_square(),
        "determinant: matrix is {}x{}, not square",
        m.nrows(),
        m.ncols()
    );
    let n = m.nrows();
    match n {
        0 => 1.0,
        1 => m[(0, 0)],
        2 => m[(0, 0)] * m[(1, 1)] - m[(0, 1)] * m[(1, 0)],
        _ => (0..n)
            .map(|j| {
                let sign = if j % 2 == 0 { 1.0 } else { -1.0 };
                sign * m[(0, j)] * determinant(&minor(m, 0, j))
            })
            .sum(),
    }
}

/// Copy of `m` with `row` and `col` removed.
///
/// # Panics
///
/// Panics if `row` or `col` is out of bounds.
pub fn minor(m: &DMatrix<f64>, row: usize, col: usize) -> DMatrix<f64> {
    assert!(
        row < m.nrows() && col < m.ncols(),
        "minor: ({}, {}) out of bounds for {}x{} matrix",
        row,
        col,
        m.nrows(),
        m.ncols()
    );
    DMatrix::from_fn(m.nrows() - 1, m.ncols() - 1, |i, j| {
        let src_i = if i < row { i } else { i + 1 };
        let src_j = if j < col { j } else { j + 1 };
        m[(src_i, src_j)]
    })
}
