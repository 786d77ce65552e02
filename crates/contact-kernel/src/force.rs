//! Normal contact force magnitude derived from a barrier potential.
//!
//! For a contact at squared distance `d²` the barrier is evaluated at the
//! shifted argument `d² - dmin²` with activation `2·dmin·dhat + dhat²`, so the
//! force turns on when the distance drops below `dmin + dhat`.

use nalgebra::DVector;

use crate::barrier::Barrier;
use crate::error::{ContactError, ContactResult};

fn barrier_arguments(distance_squared: f64, dhat: f64, dmin: f64) -> (f64, f64) {
    (distance_squared - dmin * dmin, 2.0 * dmin * dhat + dhat * dhat)
}

/// `-κ · b'(d² - dmin², 2·dmin·dhat + dhat²) · 2·d`.
pub fn normal_force_magnitude(
    barrier: &impl Barrier,
    distance_squared: f64,
    dhat: f64,
    barrier_stiffness: f64,
    dmin: f64,
) -> f64 {
    let (arg_d, arg_dhat) = barrier_arguments(distance_squared, dhat, dmin);
    let grad_b = barrier.first_derivative(arg_d, arg_dhat);
    -barrier_stiffness * grad_b * 2.0 * distance_squared.sqrt()
}

/// Gradient of [`normal_force_magnitude`] given the gradient of `d²`.
///
/// `-κ · (b''·2·d + b'/d) · ∇d²`. Fails with
/// [`ContactError::DegenerateGeometry`] at zero distance.
pub fn normal_force_magnitude_gradient(
    barrier: &impl Barrier,
    distance_squared: f64,
    distance_squared_gradient: &DVector<f64>,
    dhat: f64,
    barrier_stiffness: f64,
    dmin: f64,
) -> ContactResult<DVector<f64>> {
    let distance = distance_squared.sqrt();
    if distance.is_nan() || distance <= 0.0 {
        return Err(ContactError::DegenerateGeometry(format!(
            "normal force gradient needs a positive distance, got d² = {distance_squared}"
        )));
    }
    let (arg_d, arg_dhat) = barrier_arguments(distance_squared, dhat, dmin);
    let scale = -barrier_stiffness
        * (barrier.second_derivative(arg_d, arg_dhat) * 2.0 * distance
            + barrier.first_derivative(arg_d, arg_dhat) / distance);
    Ok(distance_squared_gradient * scale)
}
