//! Error categories for the Shamir core.
//!
//! Every variant carries only categorical payload (a parameter name, a share
//! index) — never secret bytes, coefficients, or share data. Callers should
//! treat `RandomnessUnavailable` as fatal to the process rather than retry.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ShamirError {
    #[error("invalid parameters: {reason}")]
    InvalidParameters { reason: String },

    #[error("invalid secret: {reason}")]
    InvalidSecret { reason: String },

    #[error("secure randomness unavailable: {reason}")]
    RandomnessUnavailable { reason: String },

    #[error("malformed share (line {index:?}): {reason}")]
    MalformedShare {
        index: Option<usize>,
        reason: String,
    },

    #[error("inconsistent shares: index {x} decodes to two different values")]
    InconsistentShares { x: u8 },

    #[error("inconsistent share lengths: expected {expected}, got {actual}")]
    InconsistentShareLengths { expected: usize, actual: usize },

    #[error("insufficient shares: need at least 2 distinct decodable shares, got {got}")]
    InsufficientShares { got: usize },

    #[error("internal invariant violation: {0}")]
    Internal(String),
}
