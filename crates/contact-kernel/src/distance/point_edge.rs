use nalgebra::{DMatrix, DVector, RealField, SVector};

use super::point_line::{
    point_line_distance, point_line_distance_gradient, point_line_distance_hessian,
};
use super::point_point::{
    point_point_distance, point_point_distance_gradient, point_point_distance_hessian,
};
use super::types::{point_edge_distance_type, PointEdgeDistanceType};
use super::{pull_back_gradient, pull_back_hessian, selection_map};

/// Squared distance from `p` to the segment `(e0, e1)`, in 2D or 3D.
pub fn point_edge_distance<T: RealField + Copy, const D: usize>(
    p: &SVector<T, D>,
    e0: &SVector<T, D>,
    e1: &SVector<T, D>,
) -> T {
    point_edge_distance_with_type(p, e0, e1, point_edge_distance_type(p, e0, e1))
}

/// Squared point-edge distance for a known closest region.
pub fn point_edge_distance_with_type<T: RealField + Copy, const D: usize>(
    p: &SVector<T, D>,
    e0: &SVector<T, D>,
    e1: &SVector<T, D>,
    dtype: PointEdgeDistanceType,
) -> T {
    match dtype {
        PointEdgeDistanceType::Endpoint0 => point_point_distance(p, e0),
        PointEdgeDistanceType::Endpoint1 => point_point_distance(p, e1),
        PointEdgeDistanceType::Interior => point_line_distance(p, e0, e1),
    }
}

/// Gradient of [`point_edge_distance`] with respect to `[p, e0, e1]`.
pub fn point_edge_distance_gradient<T: RealField + Copy, const D: usize>(
    p: &SVector<T, D>,
    e0: &SVector<T, D>,
    e1: &SVector<T, D>,
) -> DVector<T> {
    match point_edge_distance_type(p, e0, e1) {
        PointEdgeDistanceType::Endpoint0 => pull_back_gradient(
            &selection_map(&[0, 1], 3, D),
            &point_point_distance_gradient(p, e0),
        ),
        PointEdgeDistanceType::Endpoint1 => pull_back_gradient(
            &selection_map(&[0, 2], 3, D),
            &point_point_distance_gradient(p, e1),
        ),
        PointEdgeDistanceType::Interior => point_line_distance_gradient(p, e0, e1),
    }
}

/// Hessian of [`point_edge_distance`] with respect to `[p, e0, e1]`.
pub fn point_edge_distance_hessian<T: RealField + Copy, const D: usize>(
    p: &SVector<T, D>,
    e0: &SVector<T, D>,
    e1: &SVector<T, D>,
) -> DMatrix<T> {
    match point_edge_distance_type(p, e0, e1) {
        PointEdgeDistanceType::Endpoint0 => pull_back_hessian(
            &selection_map(&[0, 1], 3, D),
            &point_point_distance_hessian(p, e0),
        ),
        PointEdgeDistanceType::Endpoint1 => pull_back_hessian(
            &selection_map(&[0, 2], 3, D),
            &point_point_distance_hessian(p, e1),
        ),
        PointEdgeDistanceType::Interior => point_line_distance_hessian(p, e0, e1),
    }
}
