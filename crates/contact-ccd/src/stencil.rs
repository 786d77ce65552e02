//! CCD over collision stencils.

use nalgebra::{DMatrix, DVector, SVector};
use tracing::instrument;

use contact_kernel::{Candidate, CollisionStencil, ContactError, ContactResult};

use crate::config::CcdConfig;
use crate::queries::{
    edge_edge_ccd, point_edge_ccd_2d, point_edge_ccd_3d, point_point_ccd, point_triangle_ccd,
};

fn points<const D: usize, const N: usize>(dof: &DVector<f64>) -> [SVector<f64, D>; N] {
    std::array::from_fn(|i| SVector::from_column_slice(&dof.as_slice()[i * D..(i + 1) * D]))
}

fn require_3d(dim: usize, kind: &str) -> ContactResult<()> {
    if dim == 3 {
        Ok(())
    } else {
        Err(ContactError::InvalidArgument(format!("{kind} CCD needs 3D vertices, got {dim}D")))
    }
}

/// Time of impact of `candidate` as the mesh moves from `vertices_t0` to `vertices_t1`.
///
/// Both buffers hold one row per vertex with the same shape; the query
/// dimension is their column count.
#[instrument(skip_all, fields(candidate = ?candidate))]
pub fn stencil_ccd(
    candidate: &Candidate,
    vertices_t0: &DMatrix<f64>,
    vertices_t1: &DMatrix<f64>,
    edges: &[[usize; 2]],
    faces: &[[usize; 3]],
    config: &CcdConfig,
) -> ContactResult<Option<f64>> {
    if vertices_t0.shape() != vertices_t1.shape() {
        return Err(ContactError::InvalidArgument(format!(
            "start and end vertex buffers differ in shape: {:?} vs {:?}",
            vertices_t0.shape(),
            vertices_t1.shape()
        )));
    }
    let dim = vertices_t0.ncols();
    let x0 = candidate.dof(vertices_t0, edges, faces)?;
    let x1 = candidate.dof(vertices_t1, edges, faces)?;

    match (candidate, dim) {
        (Candidate::VertexVertex(_), 2) => {
            let [p0, q0] = points::<2, 2>(&x0);
            let [p1, q1] = points::<2, 2>(&x1);
            point_point_ccd(&p0, &q0, &p1, &q1, config)
        }
        (Candidate::VertexVertex(_), _) => {
            let [p0, q0] = points::<3, 2>(&x0);
            let [p1, q1] = points::<3, 2>(&x1);
            point_point_ccd(&p0, &q0, &p1, &q1, config)
        }
        (Candidate::EdgeVertex(_), 2) => {
            let [p0, a0, b0] = points::<2, 3>(&x0);
            let [p1, a1, b1] = points::<2, 3>(&x1);
            point_edge_ccd_2d(&p0, &a0, &b0, &p1, &a1, &b1, config)
        }
        (Candidate::EdgeVertex(_), _) => {
            let [p0, a0, b0] = points::<3, 3>(&x0);
            let [p1, a1, b1] = points::<3, 3>(&x1);
            point_edge_ccd_3d(&p0, &a0, &b0, &p1, &a1, &b1, config)
        }
        (Candidate::FaceVertex(_), _) => {
            require_3d(dim, "face-vertex")?;
            let [p0, a0, b0, c0] = points::<3, 4>(&x0);
            let [p1, a1, b1, c1] = points::<3, 4>(&x1);
            point_triangle_ccd(&p0, &a0, &b0, &c0, &p1, &a1, &b1, &c1, config)
        }
        (Candidate::EdgeEdge(_), _) => {
            require_3d(dim, "edge-edge")?;
            let [a0, b0, c0, d0] = points::<3, 4>(&x0);
            let [a1, b1, c1, d1] = points::<3, 4>(&x1);
            edge_edge_ccd(&a0, &b0, &c0, &d0, &a1, &b1, &c1, &d1, config)
        }
    }
}
