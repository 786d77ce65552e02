use nalgebra::{DMatrix, DVector, Vector3};
use serde::{Deserialize, Serialize};

use super::{edge_at, ensure_edge, require_3d, split_points, CollisionStencil, VertexIds};
use crate::distance::{
    edge_edge_distance, edge_edge_distance_gradient, edge_edge_distance_hessian,
    edge_edge_mollifier_from_positions, edge_edge_mollifier_from_positions_gradient,
    edge_edge_mollifier_from_positions_hessian, edge_edge_mollifier_threshold,
};
use crate::error::{ContactError, ContactResult};

/// Two edges. DOF order `[ea0, ea1, eb0, eb1]`, 3D only.
///
/// `eps_x` is the mollifier threshold of the pair, fixed from the rest
/// geometry (see [`EdgeEdgeStencil::from_rest_positions`]).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EdgeEdgeStencil {
    pub edge0_id: usize,
    pub edge1_id: usize,
    pub eps_x: f64,
}

impl EdgeEdgeStencil {
    pub fn new(edge0_id: usize, edge1_id: usize, eps_x: f64) -> Self {
        Self { edge0_id, edge1_id, eps_x }
    }

    /// Build the stencil with `eps_x` taken from the rest positions of both edges.
    pub fn from_rest_positions(
        edge0_id: usize,
        edge1_id: usize,
        rest_vertices: &DMatrix<f64>,
        edges: &[[usize; 2]],
    ) -> ContactResult<Self> {
        let unset = Self::new(edge0_id, edge1_id, 0.0);
        if rest_vertices.ncols() != 3 {
            return Err(ContactError::InvalidArgument(format!(
                "edge-edge stencils need 3D rest positions, got {} columns",
                rest_vertices.ncols()
            )));
        }
        let rest = unset.dof(rest_vertices, edges, &[])?;
        let [ea0, ea1, eb0, eb1] = split_points::<3, 4>(&rest);
        let eps_x = edge_edge_mollifier_threshold(&ea0, &ea1, &eb0, &eb1);
        Ok(Self::new(edge0_id, edge1_id, eps_x))
    }

    fn points(&self, positions: &DVector<f64>) -> ContactResult<[Vector3<f64>; 4]> {
        require_3d(positions, 4)?;
        let pts = split_points::<3, 4>(positions);
        ensure_edge(&pts[0], &pts[1])?;
        ensure_edge(&pts[2], &pts[3])?;
        Ok(pts)
    }

    /// Mollifier coefficient at `positions`: 0 for parallel edges, 1 once
    /// the cross squared norm reaches `eps_x`.
    pub fn mollifier(&self, positions: &DVector<f64>) -> ContactResult<f64> {
        let [ea0, ea1, eb0, eb1] = self.points(positions)?;
        Ok(edge_edge_mollifier_from_positions(&ea0, &ea1, &eb0, &eb1, self.eps_x))
    }

    pub fn mollifier_gradient(&self, positions: &DVector<f64>) -> ContactResult<DVector<f64>> {
        let [ea0, ea1, eb0, eb1] = self.points(positions)?;
        Ok(edge_edge_mollifier_from_positions_gradient(&ea0, &ea1, &eb0, &eb1, self.eps_x))
    }

    pub fn mollifier_hessian(&self, positions: &DVector<f64>) -> ContactResult<DMatrix<f64>> {
        let [ea0, ea1, eb0, eb1] = self.points(positions)?;
        Ok(edge_edge_mollifier_from_positions_hessian(&ea0, &ea1, &eb0, &eb1, self.eps_x))
    }
}

impl CollisionStencil for EdgeEdgeStencil {
    fn num_vertices(&self) -> usize {
        4
    }

    fn vertex_ids(&self, edges: &[[usize; 2]], _faces: &[[usize; 3]]) -> ContactResult<VertexIds> {
        let [ea0, ea1] = edge_at(edges, self.edge0_id)?;
        let [eb0, eb1] = edge_at(edges, self.edge1_id)?;
        Ok([Some(ea0), Some(ea1), Some(eb0), Some(eb1)])
    }

    fn compute_distance(&self, positions: &DVector<f64>) -> ContactResult<f64> {
        let [ea0, ea1, eb0, eb1] = self.points(positions)?;
        Ok(edge_edge_distance(&ea0, &ea1, &eb0, &eb1))
    }

    fn compute_distance_gradient(&self, positions: &DVector<f64>) -> ContactResult<DVector<f64>> {
        let [ea0, ea1, eb0, eb1] = self.points(positions)?;
        Ok(edge_edge_distance_gradient(&ea0, &ea1, &eb0, &eb1))
    }

    fn compute_distance_hessian(&self, positions: &DVector<f64>) -> ContactResult<DMatrix<f64>> {
        let [ea0, ea1, eb0, eb1] = self.points(positions)?;
        Ok(edge_edge_distance_hessian(&ea0, &ea1, &eb0, &eb1))
    }
}
