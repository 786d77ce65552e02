use nalgebra::{DMatrix, DVector, RealField, SMatrix, SVector};

use super::{pull_back_gradient, pull_back_hessian, stack, two, vertex_map};

// Local variables: r = p - e0, e = e1 - e0. With s = r·e, q = e·e and t = s/q
// the squared distance is f = |r - t e|².

const POINT_LINE_MAP: [&[i8]; 2] = [&[1, -1, 0], &[0, -1, 1]];

/// Squared distance from `p` to the infinite line through `e0` and `e1`.
///
/// The line must be non-degenerate (`e0 != e1`).
pub fn point_line_distance<T: RealField + Copy, const D: usize>(
    p: &SVector<T, D>,
    e0: &SVector<T, D>,
    e1: &SVector<T, D>,
) -> T {
    let r = p - e0;
    let e = e1 - e0;
    let t = r.dot(&e) / e.norm_squared();
    (r - e * t).norm_squared()
}

/// Gradient of [`point_line_distance`] with respect to `[p, e0, e1]`.
pub fn point_line_distance_gradient<T: RealField + Copy, const D: usize>(
    p: &SVector<T, D>,
    e0: &SVector<T, D>,
    e1: &SVector<T, D>,
) -> DVector<T> {
    let r = p - e0;
    let e = e1 - e0;
    let t = r.dot(&e) / e.norm_squared();
    let w = r - e * t;

    let g_r = w * two::<T>();
    let g_e = w * (-two::<T>() * t);
    let local = stack(&[g_r.as_slice(), g_e.as_slice()]);
    pull_back_gradient(&vertex_map(&POINT_LINE_MAP, D), &local)
}

/// Hessian of [`point_line_distance`] with respect to `[p, e0, e1]`.
pub fn point_line_distance_hessian<T: RealField + Copy, const D: usize>(
    p: &SVector<T, D>,
    e0: &SVector<T, D>,
    e1: &SVector<T, D>,
) -> DMatrix<T> {
    let r = p - e0;
    let e = e1 - e0;
    let q = e.norm_squared();
    let t = r.dot(&e) / q;

    let two = two::<T>();
    let four = two + two;
    let eight = four + four;
    let id = SMatrix::<T, D, D>::identity();
    let ee = e * e.transpose();
    let er = e * r.transpose();
    let rr = r * r.transpose();

    let h_rr = id * two - ee * (two / q);
    let h_re = er * (-two / q) - id * (two * t) + ee * (four * t / q);
    let h_ee = rr * (-two / q) + (er + er.transpose()) * (four * t / q) + id * (two * t * t)
        - ee * (eight * t * t / q);

    let mut local = DMatrix::zeros(2 * D, 2 * D);
    local.fixed_view_mut::<D, D>(0, 0).copy_from(&h_rr);
    local.fixed_view_mut::<D, D>(0, D).copy_from(&h_re);
    local.fixed_view_mut::<D, D>(D, 0).copy_from(&h_re.transpose());
    local.fixed_view_mut::<D, D>(D, D).copy_from(&h_ee);

    pull_back_hessian(&vertex_map(&POINT_LINE_MAP, D), &local)
}
