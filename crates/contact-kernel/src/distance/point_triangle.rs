use nalgebra::{DMatrix, DVector, RealField, Vector3};

use super::point_line::{
    point_line_distance, point_line_distance_gradient, point_line_distance_hessian,
};
use super::point_plane::{
    point_plane_distance, point_plane_distance_gradient, point_plane_distance_hessian,
};
use super::point_point::{
    point_point_distance, point_point_distance_gradient, point_point_distance_hessian,
};
use super::types::{point_triangle_distance_type, PointTriangleDistanceType};
use super::{pull_back_gradient, pull_back_hessian, selection_map};

/// Stencil vertices `[p, t0, t1, t2]` used by each region's sub-kernel.
fn region_vertices(dtype: PointTriangleDistanceType) -> &'static [usize] {
    match dtype {
        PointTriangleDistanceType::Vertex0 => &[0, 1],
        PointTriangleDistanceType::Vertex1 => &[0, 2],
        PointTriangleDistanceType::Vertex2 => &[0, 3],
        PointTriangleDistanceType::Edge0 => &[0, 1, 2],
        PointTriangleDistanceType::Edge1 => &[0, 2, 3],
        PointTriangleDistanceType::Edge2 => &[0, 3, 1],
        PointTriangleDistanceType::Interior => &[0, 1, 2, 3],
    }
}

/// Squared distance from `p` to the triangle `(t0, t1, t2)`.
pub fn point_triangle_distance<T: RealField + Copy>(
    p: &Vector3<T>,
    t0: &Vector3<T>,
    t1: &Vector3<T>,
    t2: &Vector3<T>,
) -> T {
    point_triangle_distance_with_type(p, t0, t1, t2, point_triangle_distance_type(p, t0, t1, t2))
}

/// Squared point-triangle distance for a known closest region.
pub fn point_triangle_distance_with_type<T: RealField + Copy>(
    p: &Vector3<T>,
    t0: &Vector3<T>,
    t1: &Vector3<T>,
    t2: &Vector3<T>,
    dtype: PointTriangleDistanceType,
) -> T {
    match dtype {
        PointTriangleDistanceType::Vertex0 => point_point_distance(p, t0),
        PointTriangleDistanceType::Vertex1 => point_point_distance(p, t1),
        PointTriangleDistanceType::Vertex2 => point_point_distance(p, t2),
        PointTriangleDistanceType::Edge0 => point_line_distance(p, t0, t1),
        PointTriangleDistanceType::Edge1 => point_line_distance(p, t1, t2),
        PointTriangleDistanceType::Edge2 => point_line_distance(p, t2, t0),
        PointTriangleDistanceType::Interior => point_plane_distance(p, t0, t1, t2),
    }
}

/// Gradient of [`point_triangle_distance`] with respect to `[p, t0, t1, t2]`.
pub fn point_triangle_distance_gradient<T: RealField + Copy>(
    p: &Vector3<T>,
    t0: &Vector3<T>,
    t1: &Vector3<T>,
    t2: &Vector3<T>,
) -> DVector<T> {
    let dtype = point_triangle_distance_type(p, t0, t1, t2);
    let local = match dtype {
        PointTriangleDistanceType::Vertex0 => point_point_distance_gradient(p, t0),
        PointTriangleDistanceType::Vertex1 => point_point_distance_gradient(p, t1),
        PointTriangleDistanceType::Vertex2 => point_point_distance_gradient(p, t2),
        PointTriangleDistanceType::Edge0 => point_line_distance_gradient(p, t0, t1),
        PointTriangleDistanceType::Edge1 => point_line_distance_gradient(p, t1, t2),
        PointTriangleDistanceType::Edge2 => point_line_distance_gradient(p, t2, t0),
        PointTriangleDistanceType::Interior => return point_plane_distance_gradient(p, t0, t1, t2),
    };
    pull_back_gradient(&selection_map(region_vertices(dtype), 4, 3), &local)
}

/// Hessian of [`point_triangle_distance`] with respect to `[p, t0, t1, t2]`.
pub fn point_triangle_distance_hessian<T: RealField + Copy>(
    p: &Vector3<T>,
    t0: &Vector3<T>,
    t1: &Vector3<T>,
    t2: &Vector3<T>,
) -> DMatrix<T> {
    let dtype = point_triangle_distance_type(p, t0, t1, t2);
    let local = match dtype {
        PointTriangleDistanceType::Vertex0 => point_point_distance_hessian(p, t0),
        PointTriangleDistanceType::Vertex1 => point_point_distance_hessian(p, t1),
        PointTriangleDistanceType::Vertex2 => point_point_distance_hessian(p, t2),
        PointTriangleDistanceType::Edge0 => point_line_distance_hessian(p, t0, t1),
        PointTriangleDistanceType::Edge1 => point_line_distance_hessian(p, t1, t2),
        PointTriangleDistanceType::Edge2 => point_line_distance_hessian(p, t2, t0),
        PointTriangleDistanceType::Interior => return point_plane_distance_hessian(p, t0, t1, t2),
    };
    pull_back_hessian(&selection_map(region_vertices(dtype), 4, 3), &local)
}
