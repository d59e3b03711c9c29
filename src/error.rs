//! Error types for route sequencing.

use thiserror::Error;

/// Result alias used throughout the engine.
pub type Result<T> = std::result::Result<T, RoutingError>;

/// Failure reported by a distance/duration oracle.
///
/// The engine propagates these unchanged; it never substitutes a default
/// distance and never retries on its own.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum OracleError {
    /// The provider answered with a non-success status.
    #[error("oracle returned status {status}: {message}")]
    Status {
        /// Provider status code (e.g. `REQUEST_DENIED`).
        status: String,
        /// Human-readable detail.
        message: String,
    },

    /// A leg the caller required has no route.
    #[error("no route from point {from} to point {to}")]
    NoRoute {
        /// Index of the origin in the requested sequence.
        from: usize,
        /// Index of the destination in the requested sequence.
        to: usize,
    },

    /// The provider response could not be decoded.
    #[error("malformed oracle response: {0}")]
    Malformed(String),

    /// The returned matrix does not match the number of requested points.
    #[error("oracle matrix is {actual}x{actual}, expected {expected}x{expected}")]
    DimensionMismatch {
        /// Number of points requested.
        expected: usize,
        /// Matrix dimension received.
        actual: usize,
    },

    /// The oracle cannot serve this request at all.
    #[error("oracle unavailable: {0}")]
    Unavailable(String),
}

/// Errors returned by engine operations.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RoutingError {
    /// Empty point set, out-of-range index, malformed coordinates.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// Upstream matrix failure.
    #[error(transparent)]
    Oracle(#[from] OracleError),
}

impl RoutingError {
    pub(crate) fn invalid(msg: impl Into<String>) -> Self {
        RoutingError::InvalidInput(msg.into())
    }
}
