//! Error types and handling
//!
//! Common error types used across the relay subsystem.

use thiserror::Error;

/// Relay-wide error type
///
/// Failures in this crate are contained: the hosting server logs them and
/// keeps its audio and chat pipelines running. Nothing here is fatal upstream.
#[derive(Error, Debug)]
pub enum RelayError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Resource creation error: {0}")]
    ResourceCreation(String),

    #[error("Encoder error: {0}")]
    Encoder(String),
}

/// Result type alias using RelayError
pub type RelayResult<T> = Result<T, RelayError>;
