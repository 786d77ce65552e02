//! Closed-form squared distances between points, edges and triangles.
//!
//! Every kernel comes in three flavours: the squared distance, its gradient
//! and its Hessian with respect to the stacked vertex positions, in argument
//! order. The "line" and "plane" kernels measure distance to the infinite
//! carrier; the "edge" and "triangle" kernels first classify the closest-point
//! region and then delegate to the matching carrier kernel.
//!
//! All kernels are generic over the scalar type so they can be evaluated with
//! `f32`, `f64`, or any other `nalgebra::RealField`.

pub mod edge_edge;
pub mod line_line;
pub mod mollifier;
pub mod point_edge;
pub mod point_line;
pub mod point_plane;
pub mod point_point;
pub mod point_triangle;
pub mod types;

pub use edge_edge::*;
pub use line_line::*;
pub use mollifier::*;
pub use point_edge::*;
pub use point_line::*;
pub use point_plane::*;
pub use point_point::*;
pub use point_triangle::*;
pub use types::*;

use nalgebra::{DMatrix, DVector, RealField};

// ── Chain-rule helpers ──────────────────────────────────────────────────────

/// Linear map from stacked vertex positions to a kernel's local variables.
///
/// Row `i` of `coefficients` builds local vector `i` as a signed sum of the
/// vertices (`1`, `-1` or `0` per vertex). Each entry expands to a `dim × dim`
/// identity block.
pub(crate) fn vertex_map<T: RealField + Copy>(coefficients: &[&[i8]], dim: usize) -> DMatrix<T> {
    let rows = coefficients.len();
    let cols = coefficients.first().map_or(0, |row| row.len());
    let mut map = DMatrix::zeros(rows * dim, cols * dim);
    for (i, row) in coefficients.iter().enumerate() {
        for (j, &c) in row.iter().enumerate() {
            let value = match c {
                1 => T::one(),
                -1 => -T::one(),
                _ => continue,
            };
            for d in 0..dim {
                map[(i * dim + d, j * dim + d)] = value;
            }
        }
    }
    map
}

/// Map that picks `selected` vertices (in order) out of `num_vertices`.
pub(crate) fn selection_map<T: RealField + Copy>(
    selected: &[usize],
    num_vertices: usize,
    dim: usize,
) -> DMatrix<T> {
    let mut map = DMatrix::zeros(selected.len() * dim, num_vertices * dim);
    for (i, &v) in selected.iter().enumerate() {
        for d in 0..dim {
            map[(i * dim + d, v * dim + d)] = T::one();
        }
    }
    map
}

/// Gradient with respect to the vertices from a gradient in local variables.
pub(crate) fn pull_back_gradient<T: RealField + Copy>(
    map: &DMatrix<T>,
    local: &DVector<T>,
) -> DVector<T> {
    map.transpose() * local
}

/// Hessian with respect to the vertices from a Hessian in local variables.
///
/// Exact because every map used here is linear in the vertex positions.
pub(crate) fn pull_back_hessian<T: RealField + Copy>(
    map: &DMatrix<T>,
    local: &DMatrix<T>,
) -> DMatrix<T> {
    map.transpose() * local * map
}

/// Concatenate vector slices into one column.
pub(crate) fn stack<T: RealField + Copy>(parts: &[&[T]]) -> DVector<T> {
    let len = parts.iter().map(|p| p.len()).sum();
    DVector::from_iterator(len, parts.iter().flat_map(|p| p.iter().copied()))
}

#[inline]
pub(crate) fn two<T: RealField + Copy>() -> T {
    T::one() + T::one()
}
