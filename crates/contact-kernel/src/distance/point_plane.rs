use nalgebra::{DMatrix, DVector, Matrix3, RealField, Vector3};

use super::{pull_back_gradient, pull_back_hessian, stack, two, vertex_map};

// Point-plane and line-line distances share one local form. With local
// variables (r, a, b) and n = a × b:
//
//     f(r, a, b) = (r·n)² / (n·n)
//
// Point-plane uses r = p - t0, a = t1 - t0, b = t2 - t0.
// Line-line uses r = ea0 - eb0, a = ea1 - ea0, b = eb1 - eb0.

const POINT_PLANE_MAP: [&[i8]; 3] = [&[1, -1, 0, 0], &[0, -1, 1, 0], &[0, -1, 0, 1]];

/// Gradient of `(r·n)²/(n·n)` with respect to `(r, a, b)`.
pub(crate) fn projected_normal_gradient<T: RealField + Copy>(
    r: &Vector3<T>,
    a: &Vector3<T>,
    b: &Vector3<T>,
) -> DVector<T> {
    let n = a.cross(b);
    let q = n.norm_squared();
    let s = r.dot(&n);
    let two = two::<T>();

    let g_r = n * (two * s / q);
    let g_n = r * (two * s / q) - n * (two * s * s / (q * q));
    let g_a = b.cross(&g_n);
    let g_b = g_n.cross(a);
    stack(&[g_r.as_slice(), g_a.as_slice(), g_b.as_slice()])
}

/// Hessian of `(r·n)²/(n·n)` with respect to `(r, a, b)`.
pub(crate) fn projected_normal_hessian<T: RealField + Copy>(
    r: &Vector3<T>,
    a: &Vector3<T>,
    b: &Vector3<T>,
) -> DMatrix<T> {
    let n = a.cross(b);
    let q = n.norm_squared();
    let s = r.dot(&n);
    let two = two::<T>();
    let four = two + two;
    let eight = four + four;
    let id = Matrix3::<T>::identity();
    let nn = n * n.transpose();
    let nr = n * r.transpose();
    let rr = r * r.transpose();

    // Derivatives in (r, n).
    let g_n = r * (two * s / q) - n * (two * s * s / (q * q));
    let h_rr = nn * (two / q);
    let h_rn = (nr + id * s) * (two / q) - nn * (four * s / (q * q));
    let h_nn = rr * (two / q) - (nr + nr.transpose()) * (four * s / (q * q))
        - id * (two * s * s / (q * q))
        + nn * (eight * s * s / (q * q * q));

    let mut h_local = DMatrix::zeros(6, 6);
    h_local.fixed_view_mut::<3, 3>(0, 0).copy_from(&h_rr);
    h_local.fixed_view_mut::<3, 3>(0, 3).copy_from(&h_rn);
    h_local.fixed_view_mut::<3, 3>(3, 0).copy_from(&h_rn.transpose());
    h_local.fixed_view_mut::<3, 3>(3, 3).copy_from(&h_nn);

    // (r, a, b) -> (r, n): dn/da = -[b]x, dn/db = [a]x.
    let mut jac = DMatrix::zeros(6, 9);
    jac.fixed_view_mut::<3, 3>(0, 0).copy_from(&id);
    jac.fixed_view_mut::<3, 3>(3, 3).copy_from(&(-b.cross_matrix()));
    jac.fixed_view_mut::<3, 3>(3, 6).copy_from(&a.cross_matrix());

    let mut h = pull_back_hessian(&jac, &h_local);

    // n is bilinear in (a, b): d²n_k/da_i db_j = ε_kij.
    let g_n_cross = g_n.cross_matrix();
    let mut ab = h.fixed_view_mut::<3, 3>(3, 6);
    ab -= g_n_cross;
    let mut ba = h.fixed_view_mut::<3, 3>(6, 3);
    ba += g_n_cross;
    h
}

/// Squared distance from `p` to the plane through the triangle `(t0, t1, t2)`.
///
/// The triangle must have non-zero area.
pub fn point_plane_distance<T: RealField + Copy>(
    p: &Vector3<T>,
    t0: &Vector3<T>,
    t1: &Vector3<T>,
    t2: &Vector3<T>,
) -> T {
    let n = (t1 - t0).cross(&(t2 - t0));
    let s = (p - t0).dot(&n);
    s * s / n.norm_squared()
}

/// Gradient of [`point_plane_distance`] with respect to `[p, t0, t1, t2]`.
pub fn point_plane_distance_gradient<T: RealField + Copy>(
    p: &Vector3<T>,
    t0: &Vector3<T>,
    t1: &Vector3<T>,
    t2: &Vector3<T>,
) -> DVector<T> {
    let local = projected_normal_gradient(&(p - t0), &(t1 - t0), &(t2 - t0));
    pull_back_gradient(&vertex_map(&POINT_PLANE_MAP, 3), &local)
}

/// Hessian of [`point_plane_distance`] with respect to `[p, t0, t1, t2]`.
pub fn point_plane_distance_hessian<T: RealField + Copy>(
    p: &Vector3<T>,
    t0: &Vector3<T>,
    t1: &Vector3<T>,
    t2: &Vector3<T>,
) -> DMatrix<T> {
    let local = projected_normal_hessian(&(p - t0), &(t1 - t0), &(t2 - t0));
    pull_back_hessian(&vertex_map(&POINT_PLANE_MAP, 3), &local)
}
