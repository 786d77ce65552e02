//! Continuous collision detection for linearly moving points, edges and triangles.
//!
//! Queries certify a time of impact by conservative advancement: the pair is
//! moved forward in steps that provably cannot skip the first contact, so a
//! `None` result guarantees the primitives stay at least `min_distance` apart
//! (to within `tolerance`) over the whole window.

pub mod config;
mod engine;
pub mod queries;
pub mod stencil;

pub use config::{
    CcdConfig, ExhaustionPolicy, DEFAULT_CCD_CONSERVATIVE_RESCALING, DEFAULT_CCD_MAX_ITERATIONS,
    DEFAULT_CCD_TOLERANCE,
};
pub use queries::{
    edge_edge_ccd, point_edge_ccd, point_edge_ccd_2d, point_edge_ccd_3d, point_point_ccd,
    point_triangle_ccd,
};
pub use stencil::stencil_ccd;
