//! Scenario tests for the CCD queries.

use approx::assert_relative_eq;
use nalgebra::{DMatrix, Vector3};

use contact_ccd::{
    edge_edge_ccd, point_edge_ccd_3d, point_point_ccd, point_triangle_ccd, stencil_ccd, CcdConfig,
};
use contact_kernel::distance::{
    edge_edge_cross_squarednorm, edge_edge_mollifier, point_point_distance,
};
use contact_kernel::{Candidate, EdgeEdgeStencil, FaceVertexStencil};

fn lerp(a: &Vector3<f64>, b: &Vector3<f64>, t: f64) -> Vector3<f64> {
    a + (b - a) * t
}

// ---------------------------------------------------------------------------
// Point-point
// ---------------------------------------------------------------------------

#[test]
fn test_point_point_approach_meets() {
    let p0_t0 = Vector3::new(0.0, 0.0, 0.0);
    let p0_t1 = Vector3::new(0.0, 0.0, 0.5);
    let p1_t0 = Vector3::new(0.0, 0.0, 2.0);
    let p1_t1 = Vector3::new(0.0, 0.0, 0.0);
    let config = CcdConfig::default();

    let toi = point_point_ccd(&p0_t0, &p1_t0, &p0_t1, &p1_t1, &config).unwrap().unwrap();
    assert!(toi <= 0.8);
    assert_relative_eq!(toi, 0.8, epsilon = 1e-5);

    let gap = point_point_distance(&lerp(&p0_t0, &p0_t1, toi), &lerp(&p1_t0, &p1_t1, toi)).sqrt();
    assert!(gap <= config.tolerance + 1e-12, "points still {gap} apart");
}

#[test]
fn test_point_point_parallel_motion_never_hits() {
    let shift = Vector3::new(3.0, -1.0, 0.5);
    let p0 = Vector3::new(0.0, 0.0, 0.0);
    let p1 = Vector3::new(1.0, 0.0, 0.0);
    let toi =
        point_point_ccd(&p0, &p1, &(p0 + shift), &(p1 + shift), &CcdConfig::default()).unwrap();
    assert_eq!(toi, None);
}

#[test]
fn test_point_point_swap_symmetric() {
    let a0 = Vector3::new(0.1, 0.2, 0.3);
    let a1 = Vector3::new(1.0, 1.0, 0.9);
    let b0 = Vector3::new(1.2, 0.8, 1.1);
    let b1 = Vector3::new(0.0, 0.3, 0.2);
    // Closest approach is about 0.077.
    let config = CcdConfig::with_min_distance(0.1);
    let ab = point_point_ccd(&a0, &b0, &a1, &b1, &config).unwrap();
    let ba = point_point_ccd(&b0, &a0, &b1, &a1, &config).unwrap();
    assert_eq!(ab, ba);
    assert!(ab.is_some());
}

// ---------------------------------------------------------------------------
// Point-edge and point-triangle
// ---------------------------------------------------------------------------

#[test]
fn test_point_through_stationary_edge() {
    let e0 = Vector3::new(-1.0, 0.0, 0.0);
    let e1 = Vector3::new(1.0, 0.0, 0.0);
    let p_t0 = Vector3::new(0.2, 1.0, 0.0);
    let p_t1 = Vector3::new(0.2, -1.0, 0.0);
    let toi = point_edge_ccd_3d(&p_t0, &e0, &e1, &p_t1, &e0, &e1, &CcdConfig::default())
        .unwrap()
        .unwrap();
    assert!(toi <= 0.5);
    assert_relative_eq!(toi, 0.5, epsilon = 1e-5);
}

#[test]
fn test_point_crosses_edge_head_on() {
    let e0 = Vector3::new(-1.0, 0.0, 0.0);
    let e1 = Vector3::new(1.0, 0.0, 0.0);
    let p_t0 = Vector3::new(0.0, 0.0, 1.0);
    let p_t1 = Vector3::new(0.0, 0.0, -1.0);
    let config = CcdConfig::default();
    let toi = point_edge_ccd_3d(&p_t0, &e0, &e1, &p_t1, &e0, &e1, &config).unwrap().unwrap();
    assert!(toi <= 0.5);
    assert_relative_eq!(toi, 0.5, epsilon = 1e-5);

    let again = CcdConfig { tmax: toi, ..config };
    let requery = point_edge_ccd_3d(&p_t0, &e0, &e1, &p_t1, &e0, &e1, &again).unwrap();
    assert_eq!(requery, Some(toi));
}

#[test]
fn test_point_falls_onto_triangle() {
    let t0 = Vector3::new(0.0, 0.0, 0.0);
    let t1 = Vector3::new(1.0, 0.0, 0.0);
    let t2 = Vector3::new(0.0, 1.0, 0.0);
    let p_t0 = Vector3::new(0.25, 0.25, 1.0);
    let p_t1 = Vector3::new(0.25, 0.25, -1.0);

    let toi = point_triangle_ccd(&p_t0, &t0, &t1, &t2, &p_t1, &t0, &t1, &t2, &CcdConfig::default())
        .unwrap()
        .unwrap();
    assert_relative_eq!(toi, 0.5, epsilon = 1e-5);

    // Keeping a gap of 0.1 stops the point 0.05 earlier.
    let config = CcdConfig::with_min_distance(0.1);
    let toi = point_triangle_ccd(&p_t0, &t0, &t1, &t2, &p_t1, &t0, &t1, &t2, &config)
        .unwrap()
        .unwrap();
    assert!(toi <= 0.45);
    assert_relative_eq!(toi, 0.45, epsilon = 1e-5);
}

#[test]
fn test_point_passes_beside_triangle() {
    let t0 = Vector3::new(0.0, 0.0, 0.0);
    let t1 = Vector3::new(1.0, 0.0, 0.0);
    let t2 = Vector3::new(0.0, 1.0, 0.0);
    let p_t0 = Vector3::new(2.0, 2.0, 1.0);
    let p_t1 = Vector3::new(2.0, 2.0, -1.0);
    let toi = point_triangle_ccd(&p_t0, &t0, &t1, &t2, &p_t1, &t0, &t1, &t2, &CcdConfig::default())
        .unwrap();
    assert_eq!(toi, None);
}

#[test]
fn test_initial_contact_reports_zero() {
    let e0 = Vector3::new(-1.0, 0.0, 0.0);
    let e1 = Vector3::new(1.0, 0.0, 0.0);
    let p = Vector3::new(0.0, 0.01, 0.0);
    let config = CcdConfig::with_min_distance(0.05);
    let toi = point_edge_ccd_3d(&p, &e0, &e1, &(p + Vector3::y()), &e0, &e1, &config).unwrap();
    assert_eq!(toi, Some(0.0));
}

// ---------------------------------------------------------------------------
// Edge-edge
// ---------------------------------------------------------------------------

fn crossing_edges() -> [Vector3<f64>; 8] {
    [
        Vector3::new(-1.0, 0.0, 0.0),
        Vector3::new(1.0, 0.0, 0.0),
        Vector3::new(0.0, -1.0, 1.0),
        Vector3::new(0.0, 1.0, 1.0),
        Vector3::new(-1.0, 0.0, 0.0),
        Vector3::new(1.0, 0.0, 0.0),
        Vector3::new(0.0, -1.0, -1.0),
        Vector3::new(0.0, 1.0, -1.0),
    ]
}

#[test]
fn test_edge_edge_crossing_and_swap_symmetry() {
    let [a0, a1, b0, b1, a0e, a1e, b0e, b1e] = crossing_edges();
    let config = CcdConfig::default();
    let ab = edge_edge_ccd(&a0, &a1, &b0, &b1, &a0e, &a1e, &b0e, &b1e, &config)
        .unwrap()
        .unwrap();
    let ba = edge_edge_ccd(&b0, &b1, &a0, &a1, &b0e, &b1e, &a0e, &a1e, &config)
        .unwrap()
        .unwrap();
    assert_relative_eq!(ab, 0.5, epsilon = 1e-5);
    assert!((ab - ba).abs() < 1e-9);
}

#[test]
fn test_edge_edge_requery_at_toi_is_idempotent() {
    let [a0, a1, b0, b1, a0e, a1e, b0e, b1e] = crossing_edges();
    let toi = edge_edge_ccd(&a0, &a1, &b0, &b1, &a0e, &a1e, &b0e, &b1e, &CcdConfig::default())
        .unwrap()
        .unwrap();
    assert!((0.0..=1.0).contains(&toi));

    let config = CcdConfig { tmax: toi, ..Default::default() };
    let again = edge_edge_ccd(&a0, &a1, &b0, &b1, &a0e, &a1e, &b0e, &b1e, &config).unwrap();
    assert_eq!(again, Some(toi));
}

#[test]
fn test_parallel_edges_never_meet() {
    let a0 = Vector3::new(0.0, 0.0, 0.0);
    let a1 = Vector3::new(1.0, 0.0, 0.0);
    let b0_t0 = Vector3::new(0.0, 1.0, 0.0);
    let b1_t0 = Vector3::new(1.0, 1.0, 0.0);
    let b0_t1 = Vector3::new(0.0, 0.5, 0.0);
    let b1_t1 = Vector3::new(1.0, 0.5, 0.0);

    let config = CcdConfig::default();
    let toi = edge_edge_ccd(&a0, &a1, &b0_t0, &b1_t0, &a0, &a1, &b0_t1, &b1_t1, &config).unwrap();
    assert_eq!(toi, None);

    let eps_x = 1e-3;
    for i in 0..=10 {
        let t = i as f64 / 10.0;
        let (b0, b1) = (lerp(&b0_t0, &b0_t1, t), lerp(&b1_t0, &b1_t1, t));
        let x = edge_edge_cross_squarednorm(&a0, &a1, &b0, &b1);
        assert_eq!(x, 0.0);
        assert_eq!(edge_edge_mollifier(x, eps_x), 0.0);
    }
}

// ---------------------------------------------------------------------------
// Stencil-level queries
// ---------------------------------------------------------------------------

#[test]
fn test_stencil_ccd_face_vertex_matches_direct_query() {
    let rows = |z: f64| {
        DMatrix::from_row_slice(
            4,
            3,
            &[
                0.0, 0.0, 0.0, //
                1.0, 0.0, 0.0, //
                0.0, 1.0, 0.0, //
                0.25, 0.25, z, //
            ],
        )
    };
    let (t0, t1) = (rows(1.0), rows(-1.0));
    let faces = [[0, 1, 2]];
    let candidate = Candidate::from(FaceVertexStencil::new(0, 3));
    let toi = stencil_ccd(&candidate, &t0, &t1, &[], &faces, &CcdConfig::default())
        .unwrap()
        .unwrap();
    assert_relative_eq!(toi, 0.5, epsilon = 1e-5);
}

#[test]
fn test_stencil_ccd_edge_edge() {
    let [a0, a1, b0, b1, a0e, a1e, b0e, b1e] = crossing_edges();
    let buffer = |vs: [Vector3<f64>; 4]| {
        DMatrix::from_row_iterator(4, 3, vs.iter().flat_map(|v| v.iter().copied()))
    };
    let t0 = buffer([a0, a1, b0, b1]);
    let t1 = buffer([a0e, a1e, b0e, b1e]);
    let edges = [[0, 1], [2, 3]];
    let stencil = EdgeEdgeStencil::from_rest_positions(0, 1, &t0, &edges).unwrap();
    let toi = stencil_ccd(&stencil.into(), &t0, &t1, &edges, &[], &CcdConfig::default())
        .unwrap()
        .unwrap();
    assert_relative_eq!(toi, 0.5, epsilon = 1e-5);
}
