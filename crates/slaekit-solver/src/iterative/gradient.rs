//! Steepest (gradient) descent.

use nalgebra::{DMatrix, DVector};

use super::{SolveHistory, Step, run_iterations};
use crate::diagnostics::{first_non_positive_minor, is_symmetric, validate_system};
use crate::dispatch::{Method, SolverConfig};
use crate::error::{ConvergenceGate, Error, Result};
use crate::residual::{dot, mat_vec, residual};

/// Below this, r·r means the current iterate is exact and r·Ar means breakdown.
pub const BREAKDOWN_EPS: f64 = 1e-14;

/// Solve Ax = b by steepest descent with exact line search.
///
/// Each step moves along the residual r = b - A*x by
/// `alpha = (r·r) / (r·Ar)`. Requires `a` to be symmetric positive definite.
///
/// If r·r vanishes the current iterate is recorded once more with zero error
/// and returned. If r·Ar vanishes the solve fails with
/// [`Error::NearSingularStep`].
pub fn solve_gradient_descent(
    a: &DMatrix<f64>,
    b: &DVector<f64>,
    config: &SolverConfig,
) -> Result<SolveHistory> {
    config.validate()?;
    validate_system(a, b)?;
    check_spd_gate(a)?;

    run_iterations(Method::Gradient, b.len(), config, |iteration, x| {
        let r = residual(a, x, b);
        let rr = dot(&r, &r);
        if rr.abs() < BREAKDOWN_EPS {
            return Ok(Step::Stationary);
        }

        let ar = mat_vec(a, &r);
        let r_ar = dot(&r, &ar);
        if r_ar.abs() < BREAKDOWN_EPS {
            log::warn!(
                "Steepest descent: r·Ar = {:e} at iteration {}",
                r_ar,
                iteration
            );
            return Err(Error::NearSingularStep {
                iteration,
                value: r_ar,
            });
        }

        let alpha = rr / r_ar;
        Ok(Step::Advance(x + r * alpha))
    })
}

fn check_spd_gate(a: &DMatrix<f64>) -> Result<()> {
    let gate = if !is_symmetric(a) {
        Some(ConvergenceGate::NotSymmetric)
    } else {
        first_non_positive_minor(a).map(|order| ConvergenceGate::NotPositiveDefinite { order })
    };
    match gate {
        Some(gate) => {
            log::warn!("Steepest descent: {}, refusing to iterate", gate);
            Err(Error::ConvergenceGateFailed {
                method: Method::Gradient,
                gate,
            })
        }
        None => Ok(()),
    }
}
