//! Edge-edge mollifier.
//!
//! The edge-edge distance is not smooth where the two edges become parallel.
//! Its contact contribution is therefore scaled by `m(x)`, where `x` is the
//! squared norm of the cross product of the edge directions and `m` rises from
//! 0 at `x = 0` to 1 at the rest-geometry threshold `eps_x`.

use nalgebra::{DMatrix, DVector, Matrix3, RealField, Vector3};

use super::{pull_back_gradient, pull_back_hessian, stack, two, vertex_map};

// u = ea1 - ea0, v = eb1 - eb0.
const EDGE_DIRECTIONS_MAP: [&[i8]; 2] = [&[-1, 1, 0, 0], &[0, 0, -1, 1]];

/// Scale of [`edge_edge_mollifier_threshold`] relative to the rest lengths.
pub const MOLLIFIER_THRESHOLD_SCALE: f64 = 1.0e-3;

// ── Cross squared norm ──────────────────────────────────────────────────────

/// `|(ea1 - ea0) × (eb1 - eb0)|²`, zero exactly when the edges are parallel.
pub fn edge_edge_cross_squarednorm<T: RealField + Copy>(
    ea0: &Vector3<T>,
    ea1: &Vector3<T>,
    eb0: &Vector3<T>,
    eb1: &Vector3<T>,
) -> T {
    (ea1 - ea0).cross(&(eb1 - eb0)).norm_squared()
}

/// Gradient of [`edge_edge_cross_squarednorm`] with respect to `[ea0, ea1, eb0, eb1]`.
pub fn edge_edge_cross_squarednorm_gradient<T: RealField + Copy>(
    ea0: &Vector3<T>,
    ea1: &Vector3<T>,
    eb0: &Vector3<T>,
    eb1: &Vector3<T>,
) -> DVector<T> {
    let u = ea1 - ea0;
    let v = eb1 - eb0;
    let g_n = u.cross(&v) * two::<T>();
    let g_u = v.cross(&g_n);
    let g_v = g_n.cross(&u);
    let local = stack(&[g_u.as_slice(), g_v.as_slice()]);
    pull_back_gradient(&vertex_map(&EDGE_DIRECTIONS_MAP, 3), &local)
}

/// Hessian of [`edge_edge_cross_squarednorm`] with respect to `[ea0, ea1, eb0, eb1]`.
pub fn edge_edge_cross_squarednorm_hessian<T: RealField + Copy>(
    ea0: &Vector3<T>,
    ea1: &Vector3<T>,
    eb0: &Vector3<T>,
    eb1: &Vector3<T>,
) -> DMatrix<T> {
    let u = ea1 - ea0;
    let v = eb1 - eb0;
    let g_n = u.cross(&v) * two::<T>();

    // (u, v) -> n = u × v, and |n|² has Hessian 2I in n.
    let mut jac = DMatrix::zeros(3, 6);
    jac.fixed_view_mut::<3, 3>(0, 0).copy_from(&(-v.cross_matrix()));
    jac.fixed_view_mut::<3, 3>(0, 3).copy_from(&u.cross_matrix());
    let h_nn = DMatrix::from_diagonal_element(3, 3, two::<T>());
    let mut h = pull_back_hessian(&jac, &h_nn);

    let g_n_cross: Matrix3<T> = g_n.cross_matrix();
    let mut uv = h.fixed_view_mut::<3, 3>(0, 3);
    uv -= g_n_cross;
    let mut vu = h.fixed_view_mut::<3, 3>(3, 0);
    vu += g_n_cross;

    pull_back_hessian(&vertex_map(&EDGE_DIRECTIONS_MAP, 3), &h)
}

// ── Mollifier in x ──────────────────────────────────────────────────────────

/// `(2 - x/eps_x)(x/eps_x)` below the threshold, 1 at or above it.
pub fn edge_edge_mollifier<T: RealField + Copy>(x: T, eps_x: T) -> T {
    if x < eps_x {
        let x_div = x / eps_x;
        (two::<T>() - x_div) * x_div
    } else {
        T::one()
    }
}

/// Derivative of [`edge_edge_mollifier`] with respect to `x`.
pub fn edge_edge_mollifier_gradient<T: RealField + Copy>(x: T, eps_x: T) -> T {
    if x < eps_x {
        two::<T>() / eps_x * (T::one() - x / eps_x)
    } else {
        T::zero()
    }
}

/// Second derivative of [`edge_edge_mollifier`] with respect to `x`.
pub fn edge_edge_mollifier_hessian<T: RealField + Copy>(x: T, eps_x: T) -> T {
    if x < eps_x {
        -two::<T>() / (eps_x * eps_x)
    } else {
        T::zero()
    }
}

/// Activation threshold from the rest positions of both edges:
/// `1e-3 · |ea0 - ea1|² · |eb0 - eb1|²`.
///
/// Computed once per edge pair so that `eps_x` does not move with the
/// deformed configuration.
pub fn edge_edge_mollifier_threshold<T: RealField + Copy>(
    ea0_rest: &Vector3<T>,
    ea1_rest: &Vector3<T>,
    eb0_rest: &Vector3<T>,
    eb1_rest: &Vector3<T>,
) -> T {
    nalgebra::convert::<f64, T>(MOLLIFIER_THRESHOLD_SCALE)
        * (ea0_rest - ea1_rest).norm_squared()
        * (eb0_rest - eb1_rest).norm_squared()
}

// ── Mollifier in positions ──────────────────────────────────────────────────

/// [`edge_edge_mollifier`] evaluated at the cross squared norm of the edges.
pub fn edge_edge_mollifier_from_positions<T: RealField + Copy>(
    ea0: &Vector3<T>,
    ea1: &Vector3<T>,
    eb0: &Vector3<T>,
    eb1: &Vector3<T>,
    eps_x: T,
) -> T {
    edge_edge_mollifier(edge_edge_cross_squarednorm(ea0, ea1, eb0, eb1), eps_x)
}

/// Gradient of [`edge_edge_mollifier_from_positions`] with respect to `[ea0, ea1, eb0, eb1]`.
pub fn edge_edge_mollifier_from_positions_gradient<T: RealField + Copy>(
    ea0: &Vector3<T>,
    ea1: &Vector3<T>,
    eb0: &Vector3<T>,
    eb1: &Vector3<T>,
    eps_x: T,
) -> DVector<T> {
    let x = edge_edge_cross_squarednorm(ea0, ea1, eb0, eb1);
    if x >= eps_x {
        return DVector::zeros(12);
    }
    edge_edge_cross_squarednorm_gradient(ea0, ea1, eb0, eb1)
        * edge_edge_mollifier_gradient(x, eps_x)
}

/// Hessian of [`edge_edge_mollifier_from_positions`] with respect to `[ea0, ea1, eb0, eb1]`.
pub fn edge_edge_mollifier_from_positions_hessian<T: RealField + Copy>(
    ea0: &Vector3<T>,
    ea1: &Vector3<T>,
    eb0: &Vector3<T>,
    eb1: &Vector3<T>,
    eps_x: T,
) -> DMatrix<T> {
    let x = edge_edge_cross_squarednorm(ea0, ea1, eb0, eb1);
    if x >= eps_x {
        return DMatrix::zeros(12, 12);
    }
    let grad = edge_edge_cross_squarednorm_gradient(ea0, ea1, eb0, eb1);
    let hess = edge_edge_cross_squarednorm_hessian(ea0, ea1, eb0, eb1);
    &grad * grad.transpose() * edge_edge_mollifier_hessian(x, eps_x)
        + hess * edge_edge_mollifier_gradient(x, eps_x)
}
