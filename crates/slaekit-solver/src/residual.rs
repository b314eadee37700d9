//! Error and residual helpers.
//!
//! [`max_abs_diff`] is the single convergence metric used by every method.

use nalgebra::{DMatrix, DVector};

/// Max-norm of the difference between two iterates.
pub fn max_abs_diff(prev: &DVector<f64>, next: &DVector<f64>) -> f64 {
    prev.iter()
        .zip(next.iter())
        .map(|(&p, &n)| (n - p).abs())
        .fold(0.0, f64::max)
}

/// Compute the residual r = b - A*x.
///
/// # Panics
///
/// Panics if `a` is not `b.len() x x.len()`.
pub fn residual(a: &DMatrix<f64>, x: &DVector<f64>, b: &DVector<f64>) -> DVector<f64> {
    assert_eq!(
        a.shape(),
        (b.len(), x.len()),
        "residual: A must be {}x{}",
        b.len(),
        x.len()
    );
    b - a * x
}

/// Euclidean (2-) norm of a vector.
pub fn euclidean_norm(v: &DVector<f64>) -> f64 {
    v.norm()
}

/// Dense matrix-vector product A*x.
///
/// # Panics
///
/// Panics if `a.ncols() != x.len()`.
pub fn mat_vec(a: &DMatrix<f64>, x: &DVector<f64>) -> DVector<f64> {
    a * x
}

/// Dot product u·v.
///
/// # Panics
///
/// Panics if the lengths differ.
pub fn dot(u: &DVector<f64>, v: &DVector<f64>) -> f64 {
    u.dot(v)
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::{dmatrix, dvector};

    #[test]
    fn max_abs_diff_of_identical_vectors_is_zero() {
        let x = dvector![1.5, -2.0, 3.25];
        assert_eq!(max_abs_diff(&x, &x), 0.0);
    }

    #[test]
    fn max_abs_diff_picks_largest_component() {
        let prev = dvector![1.0, 2.0, 3.0];
        let next = dvector![1.5, 0.0, 3.1];
        assert!((max_abs_diff(&prev, &next) - 2.0).abs() < 1e-15);
    }

    #[test]
    fn residual_of_exact_solution_vanishes() {
        // 2x + y = 3
        // x + 2y = 3
        let a = dmatrix![2.0, 1.0; 1.0, 2.0];
        let b = dvector![3.0, 3.0];
        let x = dvector![1.0, 1.0];

        let r = residual(&a, &x, &b);
        assert_eq!(r, dvector![0.0, 0.0]);
    }

    #[test]
    fn residual_at_origin_is_rhs() {
        let a = dmatrix![4.0, 1.0; 2.0, 3.0];
        let b = dvector![1.0, 2.0];
        let r = residual(&a, &DVector::zeros(2), &b);
        assert_eq!(r, b);
    }

    #[test]
    fn euclidean_norm_values() {
        assert_eq!(euclidean_norm(&DVector::zeros(4)), 0.0);
        assert!((euclidean_norm(&dvector![3.0, 4.0]) - 5.0).abs() < 1e-15);
    }

    #[test]
    #[should_panic(expected = "residual: A must be 2x1")]
    fn residual_rejects_short_iterate() {
        let a = dmatrix![4.0, 1.0; 2.0, 3.0];
        residual(&a, &dvector![1.0], &dvector![1.0, 2.0]);
    }

    #[test]
    fn mat_vec_and_dot() {
        let a = dmatrix![1.0, 2.0; 3.0, 4.0];
        let x = dvector![1.0, -1.0];
        assert_eq!(mat_vec(&a, &x), dvector![-1.0, -1.0]);
        assert_eq!(dot(&x, &dvector![2.0, 5.0]), -3.0);
    }
}
