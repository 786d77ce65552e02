//! CCD queries for each primitive pair.
//!
//! All queries take the start positions followed by the end positions and
//! return `Ok(Some(toi))` with `toi ∈ [0, tmax]` when the primitives come
//! within `min_distance`, `Ok(None)` when they stay clear over `[0, tmax]`.

use nalgebra::{DVector, SVector, Vector2, Vector3};
use tracing::instrument;

use contact_kernel::distance::{
    edge_edge_distance, point_edge_distance, point_point_distance, point_triangle_distance,
};
use contact_kernel::{ContactError, ContactResult};

use crate::config::CcdConfig;
use crate::engine::{check_edge, check_triangle, conservative_advancement, Trajectory};

/// Two points, in any dimension.
#[instrument(skip_all, fields(tmax = config.tmax, min_distance = config.min_distance))]
pub fn point_point_ccd<const D: usize>(
    p0_t0: &SVector<f64, D>,
    p1_t0: &SVector<f64, D>,
    p0_t1: &SVector<f64, D>,
    p1_t1: &SVector<f64, D>,
    config: &CcdConfig,
) -> ContactResult<Option<f64>> {
    let trajectory = Trajectory::new([*p0_t0, *p1_t0], [*p0_t1, *p1_t1], 1);
    conservative_advancement(&trajectory, |[p0, p1]| point_point_distance(p0, p1), config)
}

fn point_edge_ccd_impl<const D: usize>(
    p_t0: &SVector<f64, D>,
    e0_t0: &SVector<f64, D>,
    e1_t0: &SVector<f64, D>,
    p_t1: &SVector<f64, D>,
    e0_t1: &SVector<f64, D>,
    e1_t1: &SVector<f64, D>,
    config: &CcdConfig,
) -> ContactResult<Option<f64>> {
    check_edge(e0_t0, e1_t0, "t0")?;
    check_edge(e0_t1, e1_t1, "t1")?;
    let trajectory = Trajectory::new([*p_t0, *e0_t0, *e1_t0], [*p_t1, *e0_t1, *e1_t1], 1);
    conservative_advancement(&trajectory, |[p, e0, e1]| point_edge_distance(p, e0, e1), config)
}

/// A point against an edge in 2D.
#[instrument(skip_all, fields(tmax = config.tmax, min_distance = config.min_distance))]
pub fn point_edge_ccd_2d(
    p_t0: &Vector2<f64>,
    e0_t0: &Vector2<f64>,
    e1_t0: &Vector2<f64>,
    p_t1: &Vector2<f64>,
    e0_t1: &Vector2<f64>,
    e1_t1: &Vector2<f64>,
    config: &CcdConfig,
) -> ContactResult<Option<f64>> {
    point_edge_ccd_impl(p_t0, e0_t0, e1_t0, p_t1, e0_t1, e1_t1, config)
}

/// A point against an edge in 3D.
#[instrument(skip_all, fields(tmax = config.tmax, min_distance = config.min_distance))]
pub fn point_edge_ccd_3d(
    p_t0: &Vector3<f64>,
    e0_t0: &Vector3<f64>,
    e1_t0: &Vector3<f64>,
    p_t1: &Vector3<f64>,
    e0_t1: &Vector3<f64>,
    e1_t1: &Vector3<f64>,
    config: &CcdConfig,
) -> ContactResult<Option<f64>> {
    point_edge_ccd_impl(p_t0, e0_t0, e1_t0, p_t1, e0_t1, e1_t1, config)
}

/// A point against an edge, with the dimension (2 or 3) read from the inputs.
pub fn point_edge_ccd(
    p_t0: &DVector<f64>,
    e0_t0: &DVector<f64>,
    e1_t0: &DVector<f64>,
    p_t1: &DVector<f64>,
    e0_t1: &DVector<f64>,
    e1_t1: &DVector<f64>,
    config: &CcdConfig,
) -> ContactResult<Option<f64>> {
    let all = [p_t0, e0_t0, e1_t0, p_t1, e0_t1, e1_t1];
    let dim = p_t0.len();
    if all.iter().any(|v| v.len() != dim) {
        return Err(ContactError::InvalidArgument(
            "point-edge CCD inputs must share one dimension".into(),
        ));
    }
    match dim {
        2 => {
            let [p0, a0, b0, p1, a1, b1] = all.map(|v| Vector2::from_column_slice(v.as_slice()));
            point_edge_ccd_2d(&p0, &a0, &b0, &p1, &a1, &b1, config)
        }
        3 => {
            let [p0, a0, b0, p1, a1, b1] = all.map(|v| Vector3::from_column_slice(v.as_slice()));
            point_edge_ccd_3d(&p0, &a0, &b0, &p1, &a1, &b1, config)
        }
        _ => Err(ContactError::InvalidArgument(format!(
            "point-edge CCD supports 2D and 3D, got dimension {dim}"
        ))),
    }
}

/// A point against a triangle in 3D.
#[allow(clippy::too_many_arguments)]
#[instrument(skip_all, fields(tmax = config.tmax, min_distance = config.min_distance))]
pub fn point_triangle_ccd(
    p_t0: &Vector3<f64>,
    t0_t0: &Vector3<f64>,
    t1_t0: &Vector3<f64>,
    t2_t0: &Vector3<f64>,
    p_t1: &Vector3<f64>,
    t0_t1: &Vector3<f64>,
    t1_t1: &Vector3<f64>,
    t2_t1: &Vector3<f64>,
    config: &CcdConfig,
) -> ContactResult<Option<f64>> {
    check_triangle(t0_t0, t1_t0, t2_t0, "t0")?;
    check_triangle(t0_t1, t1_t1, t2_t1, "t1")?;
    let trajectory = Trajectory::new(
        [*p_t0, *t0_t0, *t1_t0, *t2_t0],
        [*p_t1, *t0_t1, *t1_t1, *t2_t1],
        1,
    );
    conservative_advancement(
        &trajectory,
        |[p, t0, t1, t2]| point_triangle_distance(p, t0, t1, t2),
        config,
    )
}

/// Two edges in 3D.
#[allow(clippy::too_many_arguments)]
#[instrument(skip_all, fields(tmax = config.tmax, min_distance = config.min_distance))]
pub fn edge_edge_ccd(
    ea0_t0: &Vector3<f64>,
    ea1_t0: &Vector3<f64>,
    eb0_t0: &Vector3<f64>,
    eb1_t0: &Vector3<f64>,
    ea0_t1: &Vector3<f64>,
    ea1_t1: &Vector3<f64>,
    eb0_t1: &Vector3<f64>,
    eb1_t1: &Vector3<f64>,
    config: &CcdConfig,
) -> ContactResult<Option<f64>> {
    check_edge(ea0_t0, ea1_t0, "t0")?;
    check_edge(eb0_t0, eb1_t0, "t0")?;
    check_edge(ea0_t1, ea1_t1, "t1")?;
    check_edge(eb0_t1, eb1_t1, "t1")?;
    let trajectory = Trajectory::new(
        [*ea0_t0, *ea1_t0, *eb0_t0, *eb1_t0],
        [*ea0_t1, *ea1_t1, *eb0_t1, *eb1_t1],
        2,
    );
    conservative_advancement(
        &trajectory,
        |[ea0, ea1, eb0, eb1]| edge_edge_distance(ea0, ea1, eb0, eb1),
        config,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_point_edge_dispatch_by_dimension() {
        let config = CcdConfig::default();
        let v = |s: &[f64]| DVector::from_column_slice(s);
        let toi = point_edge_ccd(
            &v(&[0.0, 1.0]),
            &v(&[-1.0, 0.0]),
            &v(&[1.0, 0.0]),
            &v(&[0.0, -1.0]),
            &v(&[-1.0, 0.0]),
            &v(&[1.0, 0.0]),
            &config,
        )
        .unwrap()
        .unwrap();
        assert_relative_eq!(toi, 0.5, epsilon = 1e-5);

        let err = point_edge_ccd(
            &v(&[0.0, 1.0]),
            &v(&[-1.0, 0.0, 0.0]),
            &v(&[1.0, 0.0]),
            &v(&[0.0, -1.0]),
            &v(&[-1.0, 0.0]),
            &v(&[1.0, 0.0]),
            &config,
        )
        .unwrap_err();
        assert!(matches!(err, ContactError::InvalidArgument(_)));

        let four = v(&[0.0; 4]);
        let err = point_edge_ccd(&four, &four, &four, &four, &four, &four, &config).unwrap_err();
        assert!(matches!(err, ContactError::InvalidArgument(_)));
    }

    #[test]
    fn test_nan_positions_are_degenerate() {
        let config = CcdConfig::default();
        let o = Vector3::zeros();
        let nan = Vector3::new(f64::NAN, 0.0, 0.0);
        let err = point_point_ccd(&o, &nan, &o, &nan, &config).unwrap_err();
        assert!(matches!(err, ContactError::DegenerateGeometry(_)));

        let (e0, e1) = (Vector3::new(-1.0, 0.0, 0.0), Vector3::new(1.0, 0.0, 0.0));
        let err = point_edge_ccd_3d(&nan, &e0, &e1, &nan, &e0, &e1, &config).unwrap_err();
        assert!(matches!(err, ContactError::DegenerateGeometry(_)));

        // Finite start, NaN end.
        let p = Vector3::new(0.0, 1.0, 0.0);
        let err = point_edge_ccd_3d(&p, &e0, &e1, &nan, &e0, &e1, &config).unwrap_err();
        assert!(matches!(err, ContactError::DegenerateGeometry(_)));
    }

    #[test]
    fn test_degenerate_primitives_rejected() {
        let config = CcdConfig::default();
        let o = Vector3::zeros();
        let x = Vector3::x();
        let y = Vector3::y();
        let err = point_edge_ccd_3d(&y, &o, &o, &y, &o, &x, &config).unwrap_err();
        assert!(matches!(err, ContactError::DegenerateGeometry(_)));

        let err = point_triangle_ccd(&y, &o, &x, &(x * 2.0), &y, &o, &x, &y, &config).unwrap_err();
        assert!(matches!(err, ContactError::DegenerateGeometry(_)));

        let err = edge_edge_ccd(&o, &x, &y, &y, &o, &x, &y, &(x + y), &config).unwrap_err();
        assert!(matches!(err, ContactError::DegenerateGeometry(_)));
    }
}
