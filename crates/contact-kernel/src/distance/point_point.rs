use nalgebra::{DMatrix, DVector, RealField, SMatrix, SVector};

use super::{stack, two};

/// Squared distance between two points.
pub fn point_point_distance<T: RealField + Copy, const D: usize>(
    p0: &SVector<T, D>,
    p1: &SVector<T, D>,
) -> T {
    (p0 - p1).norm_squared()
}

/// Gradient of [`point_point_distance`] with respect to `[p0, p1]`.
pub fn point_point_distance_gradient<T: RealField + Copy, const D: usize>(
    p0: &SVector<T, D>,
    p1: &SVector<T, D>,
) -> DVector<T> {
    let g = (p0 - p1) * two::<T>();
    let neg = -g;
    stack(&[g.as_slice(), neg.as_slice()])
}

/// Hessian of [`point_point_distance`] with respect to `[p0, p1]`.
///
/// Constant: `2 [[I, -I], [-I, I]]`.
pub fn point_point_distance_hessian<T: RealField + Copy, const D: usize>(
    _p0: &SVector<T, D>,
    _p1: &SVector<T, D>,
) -> DMatrix<T> {
    let block = SMatrix::<T, D, D>::identity() * two::<T>();
    let mut h = DMatrix::zeros(2 * D, 2 * D);
    h.fixed_view_mut::<D, D>(0, 0).copy_from(&block);
    h.fixed_view_mut::<D, D>(D, D).copy_from(&block);
    h.fixed_view_mut::<D, D>(0, D).copy_from(&(-block));
    h.fixed_view_mut::<D, D>(D, 0).copy_from(&(-block));
    h
}
