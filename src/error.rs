//! Error taxonomy for the profiling engine.
//!
//! Fetch failures are fatal to the current cache-refresh attempt and
//! propagate uncaught; rows missing an avatar id are skipped locally and
//! never surface here; a failed profile lookup is a normal `None`, not an
//! error.

use thiserror::Error;

/// Errors raised by the engine entry point.
#[derive(Debug, Error)]
pub enum EngineError {
    /// The profiles feed could not be reached (timeout, connect, transport).
    #[error("profiles feed unavailable: {0}")]
    FeedUnavailable(#[from] reqwest::Error),

    /// The feed responded with a payload the parser does not recognize.
    #[error("profiles feed returned a malformed payload: {reason}")]
    FeedMalformed { reason: String },
}

impl EngineError {
    pub fn malformed(reason: impl Into<String>) -> Self {
        EngineError::FeedMalformed {
            reason: reason.into(),
        }
    }
}
