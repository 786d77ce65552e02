use nalgebra::{DMatrix, DVector, SVector};
use serde::{Deserialize, Serialize};

use super::{dof_dim, edge_at, ensure_edge, split_points, CollisionStencil, VertexIds};
use crate::distance::{
    point_edge_distance, point_edge_distance_gradient, point_edge_distance_hessian,
};
use crate::error::ContactResult;

/// A vertex against an edge. DOF order `[v, e0, e1]`, in 2D or 3D.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EdgeVertexStencil {
    pub edge_id: usize,
    pub vertex_id: usize,
}

impl EdgeVertexStencil {
    pub fn new(edge_id: usize, vertex_id: usize) -> Self {
        Self { edge_id, vertex_id }
    }
}

fn points<const D: usize>(positions: &DVector<f64>) -> ContactResult<[SVector<f64, D>; 3]> {
    let pts = split_points::<D, 3>(positions);
    ensure_edge(&pts[1], &pts[2])?;
    Ok(pts)
}

impl CollisionStencil for EdgeVertexStencil {
    fn num_vertices(&self) -> usize {
        3
    }

    fn vertex_ids(&self, edges: &[[usize; 2]], _faces: &[[usize; 3]]) -> ContactResult<VertexIds> {
        let [e0, e1] = edge_at(edges, self.edge_id)?;
        Ok([Some(self.vertex_id), Some(e0), Some(e1), None])
    }

    fn compute_distance(&self, positions: &DVector<f64>) -> ContactResult<f64> {
        Ok(match dof_dim(positions, 3)? {
            2 => {
                let [p, e0, e1] = points::<2>(positions)?;
                point_edge_distance(&p, &e0, &e1)
            }
            _ => {
                let [p, e0, e1] = points::<3>(positions)?;
                point_edge_distance(&p, &e0, &e1)
            }
        })
    }

    fn compute_distance_gradient(&self, positions: &DVector<f64>) -> ContactResult<DVector<f64>> {
        Ok(match dof_dim(positions, 3)? {
            2 => {
                let [p, e0, e1] = points::<2>(positions)?;
                point_edge_distance_gradient(&p, &e0, &e1)
            }
            _ => {
                let [p, e0, e1] = points::<3>(positions)?;
                point_edge_distance_gradient(&p, &e0, &e1)
            }
        })
    }

    fn compute_distance_hessian(&self, positions: &DVector<f64>) -> ContactResult<DMatrix<f64>> {
        Ok(match dof_dim(positions, 3)? {
            2 => {
                let [p, e0, e1] = points::<2>(positions)?;
                point_edge_distance_hessian(&p, &e0, &e1)
            }
            _ => {
                let [p, e0, e1] = points::<3>(positions)?;
                point_edge_distance_hessian(&p, &e0, &e1)
            }
        })
    }
}
