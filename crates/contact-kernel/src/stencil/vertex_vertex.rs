use nalgebra::{DMatrix, DVector};
use serde::{Deserialize, Serialize};

use super::{dof_dim, split_points, CollisionStencil, VertexIds};
use crate::distance::{
    point_point_distance, point_point_distance_gradient, point_point_distance_hessian,
};
use crate::error::ContactResult;

/// Two mesh vertices. DOF order `[v0, v1]`, in 2D or 3D.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct VertexVertexStencil {
    pub vertex0_id: usize,
    pub vertex1_id: usize,
}

impl VertexVertexStencil {
    pub fn new(vertex0_id: usize, vertex1_id: usize) -> Self {
        Self { vertex0_id, vertex1_id }
    }
}

impl CollisionStencil for VertexVertexStencil {
    fn num_vertices(&self) -> usize {
        2
    }

    fn vertex_ids(&self, _edges: &[[usize; 2]], _faces: &[[usize; 3]]) -> ContactResult<VertexIds> {
        Ok([Some(self.vertex0_id), Some(self.vertex1_id), None, None])
    }

    fn compute_distance(&self, positions: &DVector<f64>) -> ContactResult<f64> {
        Ok(match dof_dim(positions, 2)? {
            2 => {
                let [p0, p1] = split_points::<2, 2>(positions);
                point_point_distance(&p0, &p1)
            }
            _ => {
                let [p0, p1] = split_points::<3, 2>(positions);
                point_point_distance(&p0, &p1)
            }
        })
    }

    fn compute_distance_gradient(&self, positions: &DVector<f64>) -> ContactResult<DVector<f64>> {
        Ok(match dof_dim(positions, 2)? {
            2 => {
                let [p0, p1] = split_points::<2, 2>(positions);
                point_point_distance_gradient(&p0, &p1)
            }
            _ => {
                let [p0, p1] = split_points::<3, 2>(positions);
                point_point_distance_gradient(&p0, &p1)
            }
        })
    }

    fn compute_distance_hessian(&self, positions: &DVector<f64>) -> ContactResult<DMatrix<f64>> {
        Ok(match dof_dim(positions, 2)? {
            2 => {
                let [p0, p1] = split_points::<2, 2>(positions);
                point_point_distance_hessian(&p0, &p1)
            }
            _ => {
                let [p0, p1] = split_points::<3, 2>(positions);
                point_point_distance_hessian(&p0, &p1)
            }
        })
    }
}
