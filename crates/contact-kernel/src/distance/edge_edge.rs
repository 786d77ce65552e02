use nalgebra::{DMatrix, DVector, RealField, Vector3};

use super::line_line::{line_line_distance, line_line_distance_gradient, line_line_distance_hessian};
use super::point_line::{
    point_line_distance, point_line_distance_gradient, point_line_distance_hessian,
};
use super::point_point::{
    point_point_distance, point_point_distance_gradient, point_point_distance_hessian,
};
use super::types::{edge_edge_distance_type, EdgeEdgeDistanceType};
use super::{pull_back_gradient, pull_back_hessian, selection_map};

/// Stencil vertices `[ea0, ea1, eb0, eb1]` used by each region's sub-kernel,
/// in the sub-kernel's argument order.
fn region_vertices(dtype: EdgeEdgeDistanceType) -> &'static [usize] {
    use EdgeEdgeDistanceType::*;
    match dtype {
        Ea0Eb0 => &[0, 2],
        Ea0Eb1 => &[0, 3],
        Ea1Eb0 => &[1, 2],
        Ea1Eb1 => &[1, 3],
        EaEb0 => &[2, 0, 1],
        EaEb1 => &[3, 0, 1],
        Ea0Eb => &[0, 2, 3],
        Ea1Eb => &[1, 2, 3],
        EaEb => &[0, 1, 2, 3],
    }
}

/// Squared distance between the segments `(ea0, ea1)` and `(eb0, eb1)`.
pub fn edge_edge_distance<T: RealField + Copy>(
    ea0: &Vector3<T>,
    ea1: &Vector3<T>,
    eb0: &Vector3<T>,
    eb1: &Vector3<T>,
) -> T {
    edge_edge_distance_with_type(ea0, ea1, eb0, eb1, edge_edge_distance_type(ea0, ea1, eb0, eb1))
}

/// Squared edge-edge distance for a known closest region.
pub fn edge_edge_distance_with_type<T: RealField + Copy>(
    ea0: &Vector3<T>,
    ea1: &Vector3<T>,
    eb0: &Vector3<T>,
    eb1: &Vector3<T>,
    dtype: EdgeEdgeDistanceType,
) -> T {
    use EdgeEdgeDistanceType::*;
    match dtype {
        Ea0Eb0 => point_point_distance(ea0, eb0),
        Ea0Eb1 => point_point_distance(ea0, eb1),
        Ea1Eb0 => point_point_distance(ea1, eb0),
        Ea1Eb1 => point_point_distance(ea1, eb1),
        EaEb0 => point_line_distance(eb0, ea0, ea1),
        EaEb1 => point_line_distance(eb1, ea0, ea1),
        Ea0Eb => point_line_distance(ea0, eb0, eb1),
        Ea1Eb => point_line_distance(ea1, eb0, eb1),
        EaEb => line_line_distance(ea0, ea1, eb0, eb1),
    }
}

/// Gradient of [`edge_edge_distance`] with respect to `[ea0, ea1, eb0, eb1]`.
pub fn edge_edge_distance_gradient<T: RealField + Copy>(
    ea0: &Vector3<T>,
    ea1: &Vector3<T>,
    eb0: &Vector3<T>,
    eb1: &Vector3<T>,
) -> DVector<T> {
    use EdgeEdgeDistanceType::*;
    let dtype = edge_edge_distance_type(ea0, ea1, eb0, eb1);
    let local = match dtype {
        Ea0Eb0 => point_point_distance_gradient(ea0, eb0),
        Ea0Eb1 => point_point_distance_gradient(ea0, eb1),
        Ea1Eb0 => point_point_distance_gradient(ea1, eb0),
        Ea1Eb1 => point_point_distance_gradient(ea1, eb1),
        EaEb0 => point_line_distance_gradient(eb0, ea0, ea1),
        EaEb1 => point_line_distance_gradient(eb1, ea0, ea1),
        Ea0Eb => point_line_distance_gradient(ea0, eb0, eb1),
        Ea1Eb => point_line_distance_gradient(ea1, eb0, eb1),
        EaEb => return line_line_distance_gradient(ea0, ea1, eb0, eb1),
    };
    pull_back_gradient(&selection_map(region_vertices(dtype), 4, 3), &local)
}

/// Hessian of [`edge_edge_distance`] with respect to `[ea0, ea1, eb0, eb1]`.
pub fn edge_edge_distance_hessian<T: RealField + Copy>(
    ea0: &Vector3<T>,
    ea1: &Vector3<T>,
    eb0: &Vector3<T>,
    eb1: &Vector3<T>,
) -> DMatrix<T> {
    use EdgeEdgeDistanceType::*;
    let dtype = edge_edge_distance_type(ea0, ea1, eb0, eb1);
    let local = match dtype {
        Ea0Eb0 => point_point_distance_hessian(ea0, eb0),
        Ea0Eb1 => point_point_distance_hessian(ea0, eb1),
        Ea1Eb0 => point_point_distance_hessian(ea1, eb0),
        Ea1Eb1 => point_point_distance_hessian(ea1, eb1),
        EaEb0 => point_line_distance_hessian(eb0, ea0, ea1),
        EaEb1 => point_line_distance_hessian(eb1, ea0, ea1),
        Ea0Eb => point_line_distance_hessian(ea0, eb0, eb1),
        Ea1Eb => point_line_distance_hessian(ea1, eb0, eb1),
        EaEb => return line_line_distance_hessian(ea0, ea1, eb0, eb1),
    };
    pull_back_hessian(&selection_map(region_vertices(dtype), 4, 3), &local)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::distance::point_edge::point_edge_distance;
    use crate::distance::test_util::*;
    use approx::assert_relative_eq;

    fn split4(x: &DVector<f64>) -> [Vector3<f64>; 4] {
        std::array::from_fn(|i| Vector3::new(x[3 * i], x[3 * i + 1], x[3 * i + 2]))
    }

    /// Dense samples along edge a, each measured exactly against edge b.
    fn sampled(
        ea0: &Vector3<f64>,
        ea1: &Vector3<f64>,
        eb0: &Vector3<f64>,
        eb1: &Vector3<f64>,
    ) -> f64 {
        let n = 2000;
        (0..=n)
            .map(|i| point_edge_distance(&ea0.lerp(ea1, i as f64 / n as f64), eb0, eb1))
            .fold(f64::INFINITY, f64::min)
    }

    #[test]
    fn test_edge_edge_distance_skew_cross() {
        let d = edge_edge_distance(
            &Vector3::new(-1.0, 0.0, 0.0),
            &Vector3::new(1.0, 0.0, 0.0),
            &Vector3::new(0.0, -1.0, 0.5),
            &Vector3::new(0.0, 1.0, 0.5),
        );
        assert_relative_eq!(d, 0.25);
    }

    #[test]
    fn test_edge_edge_distance_parallel_edges() {
        let d = edge_edge_distance(
            &Vector3::new(0.0, 0.0, 0.0),
            &Vector3::new(1.0, 0.0, 0.0),
            &Vector3::new(0.5, 0.3, 0.0),
            &Vector3::new(2.0, 0.3, 0.0),
        );
        assert_relative_eq!(d, 0.09, epsilon = 1e-12);
    }

    #[test]
    fn test_edge_edge_distance_agrees_with_sampling() {
        let cases = [
            [[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [2.0, 1.0, 0.0], [2.0, 2.0, 1.0]],
            [[0.0, 0.0, 0.0], [1.0, 0.2, 0.1], [0.3, -0.5, 0.4], [0.6, 0.9, 0.2]],
            [[-0.4, 0.1, 0.0], [0.5, 0.7, -0.3], [1.0, 1.0, 1.0], [1.5, -0.5, 0.8]],
        ];
        for [a0, a1, b0, b1] in cases {
            let [a0, a1, b0, b1] = [a0, a1, b0, b1].map(Vector3::from);
            let exact = edge_edge_distance(&a0, &a1, &b0, &b1);
            let sampled = sampled(&a0, &a1, &b0, &b1);
            assert!(exact <= sampled + 1e-12);
            assert!(sampled - exact < 1e-5, "exact {exact}, sampled {sampled}");
        }
    }

    #[test]
    fn test_edge_edge_derivatives_match_fd() {
        let x = DVector::from_vec(vec![
            -0.5, 0.1, 0.2, 0.8, -0.2, 0.1, 0.1, -0.7, 0.9, -0.2, 0.6, 0.7, //
        ]);
        let [ea0, ea1, eb0, eb1] = split4(&x);

        let fd = fd_gradient(&x, |x| {
            let [a0, a1, b0, b1] = split4(x);
            edge_edge_distance(&a0, &a1, &b0, &b1)
        });
        assert_relative_eq!(
            edge_edge_distance_gradient(&ea0, &ea1, &eb0, &eb1),
            fd,
            epsilon = 1e-6
        );

        let fd_h = fd_jacobian(&x, |x| {
            let [a0, a1, b0, b1] = split4(x);
            edge_edge_distance_gradient(&a0, &a1, &b0, &b1)
        });
        assert!(scaled_error(&edge_edge_distance_hessian(&ea0, &ea1, &eb0, &eb1), &fd_h) < 1e-5);
    }
}
