//! Closest-point region classification.
//!
//! Each classifier decides which pair of sub-primitives realises the minimum
//! distance, so the distance kernels can delegate to a point-point,
//! point-line, point-plane or line-line formula.

use nalgebra::{RealField, SVector, Vector3};
use serde::{Deserialize, Serialize};

/// Relative threshold on `|ea × eb|²` below which two edges count as parallel.
pub const PARALLEL_THRESHOLD: f64 = 1.0e-20;

/// Closest region of an edge to a point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PointEdgeDistanceType {
    /// The point is closest to `e0`.
    Endpoint0,
    /// The point is closest to `e1`.
    Endpoint1,
    /// The point projects onto the edge interior.
    Interior,
}

/// Closest region of a triangle to a point.
///
/// Edge `i` runs from vertex `i` to vertex `(i + 1) % 3`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PointTriangleDistanceType {
    Vertex0,
    Vertex1,
    Vertex2,
    Edge0,
    Edge1,
    Edge2,
    Interior,
}

/// Closest pair of sub-primitives between edge `a` and edge `b`.
///
/// `Ea0Eb1` is the endpoint pair `(ea0, eb1)`, `EaEb0` is the interior of
/// edge `a` against `eb0`, and so on; `EaEb` is the interior of both.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EdgeEdgeDistanceType {
    Ea0Eb0,
    Ea0Eb1,
    Ea1Eb0,
    Ea1Eb1,
    EaEb0,
    EaEb1,
    Ea0Eb,
    Ea1Eb,
    EaEb,
}

/// Classify the closest region of the edge `(e0, e1)` to `p`.
pub fn point_edge_distance_type<T: RealField + Copy, const D: usize>(
    p: &SVector<T, D>,
    e0: &SVector<T, D>,
    e1: &SVector<T, D>,
) -> PointEdgeDistanceType {
    let e = e1 - e0;
    let len_sq = e.norm_squared();
    if len_sq == T::zero() {
        return PointEdgeDistanceType::Endpoint0;
    }
    let t = (p - e0).dot(&e) / len_sq;
    if t < T::zero() {
        PointEdgeDistanceType::Endpoint0
    } else if t > T::one() {
        PointEdgeDistanceType::Endpoint1
    } else {
        PointEdgeDistanceType::Interior
    }
}

/// Classify the closest region of the triangle `(t0, t1, t2)` to `p`.
///
/// Voronoi-region sign tests on the barycentric numerators.
pub fn point_triangle_distance_type<T: RealField + Copy>(
    p: &Vector3<T>,
    t0: &Vector3<T>,
    t1: &Vector3<T>,
    t2: &Vector3<T>,
) -> PointTriangleDistanceType {
    let zero = T::zero();
    let ab = t1 - t0;
    let ac = t2 - t0;

    let ap = p - t0;
    let d1 = ab.dot(&ap);
    let d2 = ac.dot(&ap);
    if d1 <= zero && d2 <= zero {
        return PointTriangleDistanceType::Vertex0;
    }

    let bp = p - t1;
    let d3 = ab.dot(&bp);
    let d4 = ac.dot(&bp);
    if d3 >= zero && d4 <= d3 {
        return PointTriangleDistanceType::Vertex1;
    }

    let vc = d1 * d4 - d3 * d2;
    if vc <= zero && d1 >= zero && d3 <= zero {
        return PointTriangleDistanceType::Edge0;
    }

    let cp = p - t2;
    let d5 = ab.dot(&cp);
    let d6 = ac.dot(&cp);
    if d6 >= zero && d5 <= d6 {
        return PointTriangleDistanceType::Vertex2;
    }

    let vb = d5 * d2 - d1 * d6;
    if vb <= zero && d2 >= zero && d6 <= zero {
        return PointTriangleDistanceType::Edge2;
    }

    let va = d3 * d6 - d5 * d4;
    if va <= zero && (d4 - d3) >= zero && (d5 - d6) >= zero {
        return PointTriangleDistanceType::Edge1;
    }

    PointTriangleDistanceType::Interior
}

/// Classify the closest sub-primitive pair between edges `(ea0, ea1)` and `(eb0, eb1)`.
///
/// Closest points between segments, with zero-length edges reduced to points
/// and (nearly) parallel edges routed to [`edge_edge_parallel_distance_type`].
pub fn edge_edge_distance_type<T: RealField + Copy>(
    ea0: &Vector3<T>,
    ea1: &Vector3<T>,
    eb0: &Vector3<T>,
    eb1: &Vector3<T>,
) -> EdgeEdgeDistanceType {
    use EdgeEdgeDistanceType::*;

    let zero = T::zero();
    let u = ea1 - ea0;
    let v = eb1 - eb0;
    let w = ea0 - eb0;

    let a = u.norm_squared();
    let b = u.dot(&v);
    let c = v.norm_squared();
    let d = u.dot(&w);
    let e = v.dot(&w);
    let big_d = a * c - b * b;

    if a == zero && c == zero {
        return Ea0Eb0;
    } else if a == zero {
        return Ea0Eb;
    } else if c == zero {
        return EaEb0;
    }

    let parallel_tolerance =
        nalgebra::convert::<f64, T>(PARALLEL_THRESHOLD) * (a * c).max(T::one());
    if u.cross(&v).norm_squared() < parallel_tolerance {
        return edge_edge_parallel_distance_type(ea0, ea1, eb0, eb1);
    }

    // s = sN / D on edge a, t = tN / tD on edge b.
    let s_num = b * e - c * d;
    let (t_num, t_den, default_case) = if s_num <= zero {
        (e, c, Ea0Eb)
    } else if s_num >= big_d {
        (e + b, c, Ea1Eb)
    } else {
        (a * e - b * d, big_d, EaEb)
    };

    if t_num <= zero {
        // Clamp t = 0 and re-solve s against eb0.
        if -d <= zero {
            Ea0Eb0
        } else if -d >= a {
            Ea1Eb0
        } else {
            EaEb0
        }
    } else if t_num >= t_den {
        // Clamp t = 1 and re-solve s against eb1.
        if b - d <= zero {
            Ea0Eb1
        } else if b - d >= a {
            Ea1Eb1
        } else {
            EaEb1
        }
    } else {
        default_case
    }
}

/// Classification for parallel edges, by projecting `eb0` and `eb1` onto edge `a`.
pub fn edge_edge_parallel_distance_type<T: RealField + Copy>(
    ea0: &Vector3<T>,
    ea1: &Vector3<T>,
    eb0: &Vector3<T>,
    eb1: &Vector3<T>,
) -> EdgeEdgeDistanceType {
    use EdgeEdgeDistanceType::*;

    let zero = T::zero();
    let one = T::one();
    let ea = ea1 - ea0;
    let len_sq = ea.norm_squared();
    let alpha = (eb0 - ea0).dot(&ea) / len_sq;
    let beta = (eb1 - ea0).dot(&ea) / len_sq;
    let beta_on_a = zero <= beta && beta <= one;

    if alpha < zero {
        if beta_on_a {
            EaEb1
        } else if beta <= alpha {
            Ea0Eb0
        } else if beta <= zero {
            Ea0Eb1
        } else {
            // eb spans all of ea.
            Ea0Eb
        }
    } else if alpha > one {
        if beta_on_a {
            EaEb1
        } else if beta >= alpha {
            Ea1Eb0
        } else if beta >= one {
            Ea1Eb1
        } else {
            Ea1Eb
        }
    } else {
        EaEb0
    }
}
