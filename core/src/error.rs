//! Error Types
//!
//! Transport failures are the only hard errors in this crate: they
//! abort the in-flight conversation turn and drop the client back to
//! Idle. Interpreter-level problems (unknown node types, missing
//! actions) are diagnostics, recovered locally, and never surface
//! here.

use thiserror::Error;

/// A failed exchange with the agent backend.
#[derive(Debug, Error)]
pub enum TransportError {
    /// Connection-level failure (DNS, refused, timeout, ...)
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// Backend answered with a non-success status
    #[error("server returned HTTP {0}")]
    Status(u16),

    /// Response body was not a valid talk response
    #[error("malformed response body: {0}")]
    Decode(#[source] serde_json::Error),
}
