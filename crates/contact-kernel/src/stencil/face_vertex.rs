use nalgebra::{DMatrix, DVector, Vector3};
use serde::{Deserialize, Serialize};

use super::{ensure_triangle, face_at, require_3d, split_points, CollisionStencil, VertexIds};
use crate::distance::{
    point_triangle_distance, point_triangle_distance_gradient, point_triangle_distance_hessian,
};
use crate::error::ContactResult;

/// A vertex against a triangle. DOF order `[v, f0, f1, f2]`, 3D only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FaceVertexStencil {
    pub face_id: usize,
    pub vertex_id: usize,
}

impl FaceVertexStencil {
    pub fn new(face_id: usize, vertex_id: usize) -> Self {
        Self { face_id, vertex_id }
    }

    fn points(&self, positions: &DVector<f64>) -> ContactResult<[Vector3<f64>; 4]> {
        require_3d(positions, 4)?;
        let pts = split_points::<3, 4>(positions);
        ensure_triangle(&pts[1], &pts[2], &pts[3])?;
        Ok(pts)
    }
}

impl CollisionStencil for FaceVertexStencil {
    fn num_vertices(&self) -> usize {
        4
    }

    fn vertex_ids(&self, _edges: &[[usize; 2]], faces: &[[usize; 3]]) -> ContactResult<VertexIds> {
        let [f0, f1, f2] = face_at(faces, self.face_id)?;
        Ok([Some(self.vertex_id), Some(f0), Some(f1), Some(f2)])
    }

    fn compute_distance(&self, positions: &DVector<f64>) -> ContactResult<f64> {
        let [p, t0, t1, t2] = self.points(positions)?;
        Ok(point_triangle_distance(&p, &t0, &t1, &t2))
    }

    fn compute_distance_gradient(&self, positions: &DVector<f64>) -> ContactResult<DVector<f64>> {
        let [p, t0, t1, t2] = self.points(positions)?;
        Ok(point_triangle_distance_gradient(&p, &t0, &t1, &t2))
    }

    fn compute_distance_hessian(&self, positions: &DVector<f64>) -> ContactResult<DMatrix<f64>> {
        let [p, t0, t1, t2] = self.points(positions)?;
        Ok(point_triangle_distance_hessian(&p, &t0, &t1, &t2))
    }
}
