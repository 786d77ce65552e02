//! Conservative advancement.
//!
//! Every vertex moves linearly from its start to its end position over
//! `t ∈ [0, 1]`. With `L` an upper bound on `|d'(t)|`, the distance cannot
//! drop by more than `L·Δt` over a step `Δt`, so advancing by
//! `s·(d - min_distance)/L` with `s ≤ 1` never steps past the first time the
//! distance reaches `min_distance`. The loop stops once the remaining gap is
//! within tolerance (a hit) or the window is left behind (no hit).

use nalgebra::SVector;
use tracing::{debug, warn};

use contact_kernel::{ContactError, ContactResult};

use crate::config::{CcdConfig, ExhaustionPolicy};

/// Start and end positions of the `N` vertices of a primitive pair.
///
/// Vertices `[0, split)` belong to the first primitive, `[split, N)` to the second.
#[derive(Debug, Clone)]
pub(crate) struct Trajectory<const D: usize, const N: usize> {
    pub start: [SVector<f64, D>; N],
    pub end: [SVector<f64, D>; N],
    pub split: usize,
}

impl<const D: usize, const N: usize> Trajectory<D, N> {
    pub fn new(start: [SVector<f64, D>; N], end: [SVector<f64, D>; N], split: usize) -> Self {
        Self { start, end, split }
    }

    /// Vertex positions at time `t`.
    pub fn at(&self, t: f64) -> [SVector<f64, D>; N] {
        std::array::from_fn(|i| self.start[i] + (self.end[i] - self.start[i]) * t)
    }

    /// Upper bound on the rate of change of the distance between the two primitives.
    ///
    /// The distance is invariant under a common translation, so displacements
    /// are measured relative to their mean. Every point of a primitive moves
    /// with a convex combination of its vertices' displacements, hence no faster
    /// than the largest of them.
    pub fn distance_rate_bound(&self) -> f64 {
        let disp: [SVector<f64, D>; N] = std::array::from_fn(|i| self.end[i] - self.start[i]);
        let mean = disp.iter().sum::<SVector<f64, D>>() / N as f64;
        let max_norm = |range: std::ops::Range<usize>| {
            range.map(|i| (disp[i] - mean).norm()).fold(0.0, f64::max)
        };
        max_norm(0..self.split) + max_norm(self.split..N)
    }
}

/// Earliest time in `[0, config.tmax]` at which `distance_squared` comes within
/// `config.tolerance` of `config.min_distance`, or `None` if it stays clear.
pub(crate) fn conservative_advancement<const D: usize, const N: usize>(
    trajectory: &Trajectory<D, N>,
    distance_squared: impl Fn(&[SVector<f64, D>; N]) -> f64,
    config: &CcdConfig,
) -> ContactResult<Option<f64>> {
    config.validate()?;

    let rate = trajectory.distance_rate_bound();
    if !rate.is_finite() {
        return Err(ContactError::DegenerateGeometry(format!(
            "non-finite vertex displacement (rate bound {rate})"
        )));
    }
    let min_d = config.min_distance;
    let mut toi = 0.0;

    for iteration in 0..config.max_iterations {
        let d_sq = distance_squared(&trajectory.at(toi));
        if !d_sq.is_finite() {
            return Err(ContactError::DegenerateGeometry(format!(
                "non-finite distance {d_sq} at t = {toi}"
            )));
        }
        let d = d_sq.sqrt();
        // d - min_d, without cancellation when both are tiny.
        let gap = if d + min_d > 0.0 { (d_sq - min_d * min_d) / (d + min_d) } else { 0.0 };

        if gap <= config.tolerance {
            if iteration == 0 {
                warn!(distance = d, min_distance = min_d, "primitives start within min_distance");
            }
            debug!(toi, iterations = iteration, "ccd hit");
            return Ok(Some(toi.min(config.tmax)));
        }

        if rate <= 0.0 {
            debug!(distance = d, "no relative motion");
            return Ok(None);
        }

        toi += config.conservative_rescaling * gap / rate;
        if toi > config.tmax {
            debug!(iterations = iteration + 1, "no hit in window");
            return Ok(None);
        }
    }

    match config.on_budget_exhausted {
        ExhaustionPolicy::TreatAsHit => {
            warn!(toi, iterations = config.max_iterations, "ccd budget exhausted, reporting a hit");
            Ok(Some(toi.min(config.tmax)))
        }
        ExhaustionPolicy::Error => Err(ContactError::IterationBudgetExhausted {
            iterations: config.max_iterations,
            toi,
        }),
    }
}

// ── Degeneracy checks ───────────────────────────────────────────────────────

pub(crate) fn check_edge<const D: usize>(
    e0: &SVector<f64, D>,
    e1: &SVector<f64, D>,
    when: &str,
) -> ContactResult<()> {
    if (e1 - e0).norm_squared() == 0.0 {
        return Err(ContactError::DegenerateGeometry(format!("zero-length edge at {when}")));
    }
    Ok(())
}

pub(crate) fn check_triangle(
    t0: &SVector<f64, 3>,
    t1: &SVector<f64, 3>,
    t2: &SVector<f64, 3>,
    when: &str,
) -> ContactResult<()> {
    if (t1 - t0).cross(&(t2 - t0)).norm_squared() == 0.0 {
        return Err(ContactError::DegenerateGeometry(format!("zero-area triangle at {when}")));
    }
    Ok(())
}
