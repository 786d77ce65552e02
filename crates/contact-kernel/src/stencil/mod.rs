//! Collision stencils: the primitive pairs a contact is built on.
//!
//! A stencil names up to four mesh vertices through vertex, edge or face ids.
//! It resolves them against a vertex buffer (one row per vertex, two or three
//! columns), flattens their coordinates into a DOF vector, and evaluates the
//! squared distance of the pair with its derivatives over that vector.
//!
//! The four pair kinds form a closed set. Each implements [`CollisionStencil`]
//! and [`Candidate`] wraps them for code that handles any of them.

pub mod edge_edge;
pub mod edge_vertex;
pub mod face_vertex;
pub mod vertex_vertex;

pub use edge_edge::EdgeEdgeStencil;
pub use edge_vertex::EdgeVertexStencil;
pub use face_vertex::FaceVertexStencil;
pub use vertex_vertex::VertexVertexStencil;

use nalgebra::{DMatrix, DVector, SVector, Vector3};
use serde::{Deserialize, Serialize};

use crate::error::{ContactError, ContactResult};

/// Vertex ids of a stencil; slots past [`CollisionStencil::num_vertices`] are `None`.
pub type VertexIds = [Option<usize>; 4];

/// Positions of a stencil's vertices; slots past `num_vertices` are `None`.
pub type StencilVertices = [Option<DVector<f64>>; 4];

/// Uniform interface over the primitive pairs.
///
/// Derivatives are taken with respect to the DOF vector returned by
/// [`dof`](Self::dof), i.e. the active vertices' coordinates concatenated in
/// [`vertex_ids`](Self::vertex_ids) order.
pub trait CollisionStencil {
    /// Number of active vertices (2, 3 or 4).
    fn num_vertices(&self) -> usize;

    /// Resolve the stencil's vertex ids through the mesh connectivity.
    fn vertex_ids(&self, edges: &[[usize; 2]], faces: &[[usize; 3]]) -> ContactResult<VertexIds>;

    /// Positions of the stencil's vertices, read from `vertices` (one row per vertex).
    fn vertices(
        &self,
        vertices: &DMatrix<f64>,
        edges: &[[usize; 2]],
        faces: &[[usize; 3]],
    ) -> ContactResult<StencilVertices> {
        let ids = self.vertex_ids(edges, faces)?;
        let mut out = StencilVertices::default();
        for (slot, id) in out.iter_mut().zip(ids) {
            let Some(id) = id else { continue };
            if id >= vertices.nrows() {
                return Err(ContactError::InvalidArgument(format!(
                    "vertex {id} out of range ({} vertices)",
                    vertices.nrows()
                )));
            }
            *slot = Some(vertices.row(id).transpose());
        }
        Ok(out)
    }

    /// The stencil's DOF vector: `num_vertices() × dim` coordinates.
    fn dof(
        &self,
        vertices: &DMatrix<f64>,
        edges: &[[usize; 2]],
        faces: &[[usize; 3]],
    ) -> ContactResult<DVector<f64>> {
        let dim = vertices.ncols();
        if dim != 2 && dim != 3 {
            return Err(ContactError::InvalidArgument(format!(
                "vertex buffer must have 2 or 3 columns, got {dim}"
            )));
        }
        let rows = self.vertices(vertices, edges, faces)?;
        let coords: Vec<f64> = rows.iter().flatten().flat_map(|v| v.iter().copied()).collect();
        Ok(DVector::from_vec(coords))
    }

    /// Squared distance between the stencil's primitives.
    fn compute_distance(&self, positions: &DVector<f64>) -> ContactResult<f64>;

    /// Gradient of [`compute_distance`](Self::compute_distance) over the DOF vector.
    fn compute_distance_gradient(&self, positions: &DVector<f64>) -> ContactResult<DVector<f64>>;

    /// Hessian of [`compute_distance`](Self::compute_distance) over the DOF vector.
    fn compute_distance_hessian(&self, positions: &DVector<f64>) -> ContactResult<DMatrix<f64>>;
}

// ── Candidate ───────────────────────────────────────────────────────────────

/// Any of the four stencil kinds, as produced by a broad phase.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Candidate {
    VertexVertex(VertexVertexStencil),
    EdgeVertex(EdgeVertexStencil),
    FaceVertex(FaceVertexStencil),
    EdgeEdge(EdgeEdgeStencil),
}

impl Candidate {
    fn stencil(&self) -> &dyn CollisionStencil {
        match self {
            Candidate::VertexVertex(s) => s,
            Candidate::EdgeVertex(s) => s,
            Candidate::FaceVertex(s) => s,
            Candidate::EdgeEdge(s) => s,
        }
    }
}

impl CollisionStencil for Candidate {
    fn num_vertices(&self) -> usize {
        self.stencil().num_vertices()
    }

    fn vertex_ids(&self, edges: &[[usize; 2]], faces: &[[usize; 3]]) -> ContactResult<VertexIds> {
        self.stencil().vertex_ids(edges, faces)
    }

    fn compute_distance(&self, positions: &DVector<f64>) -> ContactResult<f64> {
        self.stencil().compute_distance(positions)
    }

    fn compute_distance_gradient(&self, positions: &DVector<f64>) -> ContactResult<DVector<f64>> {
        self.stencil().compute_distance_gradient(positions)
    }

    fn compute_distance_hessian(&self, positions: &DVector<f64>) -> ContactResult<DMatrix<f64>> {
        self.stencil().compute_distance_hessian(positions)
    }
}

impl From<VertexVertexStencil> for Candidate {
    fn from(s: VertexVertexStencil) -> Self {
        Candidate::VertexVertex(s)
    }
}

impl From<EdgeVertexStencil> for Candidate {
    fn from(s: EdgeVertexStencil) -> Self {
        Candidate::EdgeVertex(s)
    }
}

impl From<FaceVertexStencil> for Candidate {
    fn from(s: FaceVertexStencil) -> Self {
        Candidate::FaceVertex(s)
    }
}

impl From<EdgeEdgeStencil> for Candidate {
    fn from(s: EdgeEdgeStencil) -> Self {
        Candidate::EdgeEdge(s)
    }
}

// ── DOF helpers ─────────────────────────────────────────────────────────────

/// Spatial dimension implied by a DOF vector of `num_vertices` points.
pub(crate) fn dof_dim(positions: &DVector<f64>, num_vertices: usize) -> ContactResult<usize> {
    let len = positions.len();
    if len == 2 * num_vertices {
        Ok(2)
    } else if len == 3 * num_vertices {
        Ok(3)
    } else {
        Err(ContactError::InvalidArgument(format!(
            "expected {} or {} coordinates for {num_vertices} vertices, got {len}",
            2 * num_vertices,
            3 * num_vertices
        )))
    }
}

/// Like [`dof_dim`] for stencils that only exist in 3D.
pub(crate) fn require_3d(positions: &DVector<f64>, num_vertices: usize) -> ContactResult<()> {
    if positions.len() == 3 * num_vertices {
        Ok(())
    } else {
        Err(ContactError::InvalidArgument(format!(
            "expected {} coordinates for {num_vertices} vertices in 3D, got {}",
            3 * num_vertices,
            positions.len()
        )))
    }
}

/// Split a DOF vector into `N` points of dimension `D`. The length must already be checked.
pub(crate) fn split_points<const D: usize, const N: usize>(
    positions: &DVector<f64>,
) -> [SVector<f64, D>; N] {
    std::array::from_fn(|i| SVector::from_column_slice(&positions.as_slice()[i * D..(i + 1) * D]))
}

pub(crate) fn ensure_edge<const D: usize>(
    e0: &SVector<f64, D>,
    e1: &SVector<f64, D>,
) -> ContactResult<()> {
    if (e1 - e0).norm_squared() == 0.0 {
        return Err(ContactError::DegenerateGeometry("zero-length edge".into()));
    }
    Ok(())
}

pub(crate) fn ensure_triangle(
    t0: &Vector3<f64>,
    t1: &Vector3<f64>,
    t2: &Vector3<f64>,
) -> ContactResult<()> {
    if (t1 - t0).cross(&(t2 - t0)).norm_squared() == 0.0 {
        return Err(ContactError::DegenerateGeometry("zero-area triangle".into()));
    }
    Ok(())
}

pub(crate) fn edge_at(edges: &[[usize; 2]], id: usize) -> ContactResult<[usize; 2]> {
    edges.get(id).copied().ok_or_else(|| {
        ContactError::InvalidArgument(format!("edge {id} out of range ({} edges)", edges.len()))
    })
}

pub(crate) fn face_at(faces: &[[usize; 3]], id: usize) -> ContactResult<[usize; 3]> {
    faces.get(id).copied().ok_or_else(|| {
        ContactError::InvalidArgument(format!("face {id} out of range ({} faces)", faces.len()))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn square() -> (DMatrix<f64>, Vec<[usize; 2]>, Vec<[usize; 3]>) {
        let vertices = DMatrix::from_row_slice(
            5,
            3,
            &[
                0.0, 0.0, 0.0, //
                1.0, 0.0, 0.0, //
                1.0, 1.0, 0.0, //
                0.0, 1.0, 0.0, //
                0.3, 0.4, 0.5, //
            ],
        );
        let edges = vec![[0, 1], [1, 2], [2, 3], [3, 0], [0, 2]];
        let faces = vec![[0, 1, 2], [0, 2, 3]];
        (vertices, edges, faces)
    }

    #[test]
    fn test_vertex_ids_per_kind() {
        let (_, edges, faces) = square();
        let vv = Candidate::from(VertexVertexStencil::new(4, 1));
        let ev = Candidate::from(EdgeVertexStencil::new(2, 4));
        let fv = Candidate::from(FaceVertexStencil::new(1, 4));
        let ee = Candidate::from(EdgeEdgeStencil::new(0, 2, 1e-3));

        assert_eq!(vv.vertex_ids(&edges, &faces).unwrap(), [Some(4), Some(1), None, None]);
        assert_eq!(ev.vertex_ids(&edges, &faces).unwrap(), [Some(4), Some(2), Some(3), None]);
        assert_eq!(fv.vertex_ids(&edges, &faces).unwrap(), [Some(4), Some(0), Some(2), Some(3)]);
        assert_eq!(ee.vertex_ids(&edges, &faces).unwrap(), [Some(0), Some(1), Some(2), Some(3)]);

        for (c, n) in [(vv, 2), (ev, 3), (fv, 4), (ee, 4)] {
            assert_eq!(c.num_vertices(), n);
            let active = c.vertex_ids(&edges, &faces).unwrap().iter().flatten().count();
            assert_eq!(active, n);
        }
    }

    #[test]
    fn test_out_of_range_ids_rejected() {
        let (vertices, edges, faces) = square();
        let err = EdgeVertexStencil::new(9, 0).vertex_ids(&edges, &faces).unwrap_err();
        assert!(matches!(err, ContactError::InvalidArgument(_)));
        let err = FaceVertexStencil::new(2, 0).vertex_ids(&edges, &faces).unwrap_err();
        assert!(matches!(err, ContactError::InvalidArgument(_)));
        let err = VertexVertexStencil::new(0, 5).dof(&vertices, &edges, &faces).unwrap_err();
        assert!(matches!(err, ContactError::InvalidArgument(_)));
    }

    #[test]
    fn test_vertices_leave_unused_slots_empty() {
        let (vertices, edges, faces) = square();
        let slots = EdgeVertexStencil::new(0, 4).vertices(&vertices, &edges, &faces).unwrap();
        assert_eq!(slots[0].as_ref().unwrap().as_slice(), &[0.3, 0.4, 0.5]);
        assert_eq!(slots[2].as_ref().unwrap().as_slice(), &[1.0, 0.0, 0.0]);
        assert!(slots[3].is_none());
    }

    #[test]
    fn test_dof_concatenates_in_vertex_id_order() {
        let (vertices, edges, faces) = square();
        let dof = FaceVertexStencil::new(0, 4).dof(&vertices, &edges, &faces).unwrap();
        assert_eq!(
            dof.as_slice(),
            &[0.3, 0.4, 0.5, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 1.0, 1.0, 0.0]
        );
    }

    #[test]
    fn test_dof_rejects_bad_dimension() {
        let vertices = DMatrix::from_row_slice(2, 4, &[0.0; 8]);
        let err = VertexVertexStencil::new(0, 1).dof(&vertices, &[], &[]).unwrap_err();
        assert!(matches!(err, ContactError::InvalidArgument(_)));
    }

    #[test]
    fn test_candidate_dispatch_matches_stencil() {
        let (vertices, edges, faces) = square();
        let stencil = FaceVertexStencil::new(1, 4);
        let candidate = Candidate::from(stencil);
        let dof = candidate.dof(&vertices, &edges, &faces).unwrap();
        assert_relative_eq!(
            candidate.compute_distance(&dof).unwrap(),
            stencil.compute_distance(&dof).unwrap()
        );
        assert_relative_eq!(candidate.compute_distance(&dof).unwrap(), 0.25);
        assert_eq!(
            candidate.compute_distance_gradient(&dof).unwrap(),
            stencil.compute_distance_gradient(&dof).unwrap()
        );
    }

    #[test]
    fn test_dof_dim_rejects_wrong_lengths() {
        let positions = DVector::zeros(7);
        assert!(matches!(dof_dim(&positions, 3), Err(ContactError::InvalidArgument(_))));
        assert_eq!(dof_dim(&DVector::zeros(6), 3).unwrap(), 2);
        assert_eq!(dof_dim(&DVector::zeros(9), 3).unwrap(), 3);
        assert!(require_3d(&DVector::zeros(8), 4).is_err());
    }

    #[test]
    fn test_candidate_serde_roundtrip() {
        let c = Candidate::from(EdgeEdgeStencil::new(3, 7, 2.5e-4));
        let json = serde_json::to_string(&c).unwrap();
        let back: Candidate = serde_json::from_str(&json).unwrap();
        assert_eq!(c, back);
    }
}
