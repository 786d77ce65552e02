//! Barrier functions over squared distance.

use serde::{Deserialize, Serialize};

/// A barrier `b(d; dhat)` that diverges as `d → 0` and vanishes for `d ≥ dhat`.
///
/// `d` and `dhat` are whatever distance measure the caller uses; the force
/// model in [`crate::force`] passes squared distances.
pub trait Barrier {
    fn value(&self, d: f64, dhat: f64) -> f64;

    /// `db/dd`.
    fn first_derivative(&self, d: f64, dhat: f64) -> f64;

    /// `d²b/dd²`.
    fn second_derivative(&self, d: f64, dhat: f64) -> f64;
}

/// `b(d) = -(d - dhat)² ln(d / dhat)` on `(0, dhat)`, zero beyond `dhat`.
///
/// C² at `dhat`. Infinite for `d ≤ 0`, where both derivatives are reported as 0.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClampedLogBarrier;

impl Barrier for ClampedLogBarrier {
    fn value(&self, d: f64, dhat: f64) -> f64 {
        if d <= 0.0 {
            f64::INFINITY
        } else if d >= dhat {
            0.0
        } else {
            let d_minus_dhat = d - dhat;
            -d_minus_dhat * d_minus_dhat * (d / dhat).ln()
        }
    }

    fn first_derivative(&self, d: f64, dhat: f64) -> f64 {
        if d <= 0.0 || d >= dhat {
            return 0.0;
        }
        (dhat - d) * (2.0 * (d / dhat).ln() - dhat / d + 1.0)
    }

    fn second_derivative(&self, d: f64, dhat: f64) -> f64 {
        if d <= 0.0 || d >= dhat {
            return 0.0;
        }
        let dhat_d = dhat / d;
        (dhat_d + 2.0) * dhat_d - 2.0 * (d / dhat).ln() - 3.0
    }
}
