//! Error types shared by the contact crates.

use thiserror::Error;

/// Errors surfaced by stencil evaluation, force evaluation and CCD queries.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ContactError {
    /// A malformed argument: wrong DOF length, out-of-range index, bad config value.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// Zero-length edge, zero-area triangle, or zero distance where a derivative needs it.
    #[error("degenerate geometry: {0}")]
    DegenerateGeometry(String),

    /// Conservative advancement ran out of iterations before converging.
    #[error(
        "CCD did not converge after {iterations} iterations (certified toi lower bound: {toi})"
    )]
    IterationBudgetExhausted { iterations: usize, toi: f64 },
}

/// Convenience alias for `Result<T, ContactError>`.
pub type ContactResult<T> = Result<T, ContactError>;
