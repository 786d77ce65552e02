//! Differentiable proximity kernels for barrier-based contact.
//!
//! - [`distance`]: squared distances between points, edges and triangles with
//!   gradients and Hessians, closest-region classification, and the edge-edge
//!   mollifier.
//! - [`stencil`]: the vertex-vertex, edge-vertex, face-vertex and edge-edge
//!   pairs, evaluated over a flat DOF vector.
//! - [`barrier`] and [`force`]: the barrier potential and the normal force
//!   magnitude it induces.
//!
//! Continuous collision detection lives in the `contact-ccd` crate.

pub mod barrier;
pub mod distance;
pub mod error;
pub mod force;
pub mod stencil;

pub use barrier::{Barrier, ClampedLogBarrier};
pub use error::{ContactError, ContactResult};
pub use force::{normal_force_magnitude, normal_force_magnitude_gradient};
pub use stencil::{
    Candidate, CollisionStencil, EdgeEdgeStencil, EdgeVertexStencil, FaceVertexStencil,
    VertexIds, VertexVertexStencil,
};
