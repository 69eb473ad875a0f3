//! Runtime error types.
//!
//! Only decoding and wiring can fail out here. Domain outcomes (the beast
//! wins, the flee fails) are ordinary result variants inside `sim-core` and
//! never surface as errors.

use sim_core::{InvalidEncounterId, InvalidItemId};

/// Errors produced while decoding a decision context from indexed records.
#[derive(Debug, thiserror::Error)]
pub enum RuntimeError {
    /// Entropy string was not a hex-encoded scalar of at most 256 bits.
    #[error("invalid entropy value {value:?}: {reason}")]
    BadEntropy {
        value: String,
        reason: &'static str,
    },

    /// An item record named something outside the item registry.
    #[error("unknown item {0:?}")]
    UnknownItem(String),

    /// An item record carried a raw id outside the registry.
    #[error(transparent)]
    InvalidItem(#[from] InvalidItemId),

    /// A beast record carried an id outside the roster.
    #[error(transparent)]
    InvalidBeast(#[from] InvalidEncounterId),

    /// A battle/flee/gold preview was requested with no engaged beast.
    #[error("no beast in the decision context")]
    MissingBeast,

    /// The snapshot document itself failed to parse.
    #[error("malformed snapshot: {0}")]
    Snapshot(#[from] serde_json::Error),
}
