//! Configuration for continuous collision detection queries.

use contact_kernel::{ContactError, ContactResult};
use serde::{Deserialize, Serialize};

/// Default absolute tolerance on the remaining gap `distance - min_distance`.
pub const DEFAULT_CCD_TOLERANCE: f64 = 1e-6;
/// Default bound on conservative-advancement steps.
pub const DEFAULT_CCD_MAX_ITERATIONS: usize = 10_000_000;
/// Default fraction of the certified safe step actually taken.
pub const DEFAULT_CCD_CONSERVATIVE_RESCALING: f64 = 0.8;

/// What a query reports when it runs out of iterations before converging.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ExhaustionPolicy {
    /// Report a hit at the last certified time. The caller's step is then
    /// truncated there, which keeps the trajectory intersection-free.
    #[default]
    TreatAsHit,
    /// Fail with [`ContactError::IterationBudgetExhausted`].
    Error,
}

/// Parameters shared by every CCD query.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CcdConfig {
    /// Separation that counts as contact (a distance, not squared).
    pub min_distance: f64,
    /// Upper end of the query window, in `[0, 1]`.
    pub tmax: f64,
    /// A gap of at most this much above `min_distance` counts as a hit.
    pub tolerance: f64,
    /// Advancement steps before `on_budget_exhausted` applies.
    pub max_iterations: usize,
    /// Scale in `(0, 1]` applied to each advancement step.
    pub conservative_rescaling: f64,
    /// Outcome when `max_iterations` runs out.
    pub on_budget_exhausted: ExhaustionPolicy,
}

impl Default for CcdConfig {
    fn default() -> Self {
        Self {
            min_distance: 0.0,
            tmax: 1.0,
            tolerance: DEFAULT_CCD_TOLERANCE,
            max_iterations: DEFAULT_CCD_MAX_ITERATIONS,
            conservative_rescaling: DEFAULT_CCD_CONSERVATIVE_RESCALING,
            on_budget_exhausted: ExhaustionPolicy::TreatAsHit,
        }
    }
}

impl CcdConfig {
    /// Defaults with a minimum separation to keep.
    pub fn with_min_distance(min_distance: f64) -> Self {
        Self {
            min_distance,
            ..Self::default()
        }
    }

    /// Defaults, but budget exhaustion is an error instead of a hit.
    pub fn strict() -> Self {
        Self {
            on_budget_exhausted: ExhaustionPolicy::Error,
            ..Self::default()
        }
    }

    /// Check every field's range.
    pub fn validate(&self) -> ContactResult<()> {
        if !self.tmax.is_finite() || !(0.0..=1.0).contains(&self.tmax) {
            return Err(invalid(format!("tmax must lie in [0, 1], got {}", self.tmax)));
        }
        if self.tolerance.is_nan() || self.tolerance < 0.0 {
            return Err(invalid(format!("tolerance must be non-negative, got {}", self.tolerance)));
        }
        if !self.min_distance.is_finite() || self.min_distance < 0.0 {
            return Err(invalid(format!(
                "min_distance must be finite and non-negative, got {}",
                self.min_distance
            )));
        }
        if self.conservative_rescaling.is_nan()
            || self.conservative_rescaling <= 0.0
            || self.conservative_rescaling > 1.0
        {
            return Err(invalid(format!(
                "conservative_rescaling must lie in (0, 1], got {}",
                self.conservative_rescaling
            )));
        }
        if self.max_iterations == 0 {
            return Err(invalid("max_iterations must be positive".to_string()));
        }
        Ok(())
    }
}

fn invalid(msg: String) -> ContactError {
    ContactError::InvalidArgument(msg)
}
