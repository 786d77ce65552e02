use nalgebra::{DMatrix, DVector, RealField, Vector3};

use super::point_plane::{projected_normal_gradient, projected_normal_hessian};
use super::{pull_back_gradient, pull_back_hessian, vertex_map};

// r = ea0 - eb0, a = ea1 - ea0, b = eb1 - eb0.
const LINE_LINE_MAP: [&[i8]; 3] = [&[1, 0, -1, 0], &[-1, 1, 0, 0], &[0, 0, -1, 1]];

/// Squared distance between the infinite lines through `(ea0, ea1)` and `(eb0, eb1)`.
///
/// Undefined for parallel lines; callers classify those away first
/// (see [`edge_edge_distance_type`](super::edge_edge_distance_type)).
pub fn line_line_distance<T: RealField + Copy>(
    ea0: &Vector3<T>,
    ea1: &Vector3<T>,
    eb0: &Vector3<T>,
    eb1: &Vector3<T>,
) -> T {
    let n = (ea1 - ea0).cross(&(eb1 - eb0));
    let s = (ea0 - eb0).dot(&n);
    s * s / n.norm_squared()
}

/// Gradient of [`line_line_distance`] with respect to `[ea0, ea1, eb0, eb1]`.
pub fn line_line_distance_gradient<T: RealField + Copy>(
    ea0: &Vector3<T>,
    ea1: &Vector3<T>,
    eb0: &Vector3<T>,
    eb1: &Vector3<T>,
) -> DVector<T> {
    let local = projected_normal_gradient(&(ea0 - eb0), &(ea1 - ea0), &(eb1 - eb0));
    pull_back_gradient(&vertex_map(&LINE_LINE_MAP, 3), &local)
}

/// Hessian of [`line_line_distance`] with respect to `[ea0, ea1, eb0, eb1]`.
pub fn line_line_distance_hessian<T: RealField + Copy>(
    ea0: &Vector3<T>,
    ea1: &Vector3<T>,
    eb0: &Vector3<T>,
    eb1: &Vector3<T>,
) -> DMatrix<T> {
    let local = projected_normal_hessian(&(ea0 - eb0), &(ea1 - ea0), &(eb1 - eb0));
    pull_back_hessian(&vertex_map(&LINE_LINE_MAP, 3), &local)
}
