//! Error type shared by every service adapter.

use thiserror::Error;

/// Failures normalized at the adapter boundary.
///
/// Variants carry enough shape for the router to choose between a
/// feature-specific reply (`NotFound`, `Disabled`) and a generic one;
/// nothing here ever propagates to a front door as a fault.
#[derive(Debug, Error)]
pub enum ServiceError {
    /// Transport-level failure (connect, timeout, body read).
    #[error("request failed: {0}")]
    Request(String),

    /// The upstream answered with a non-success HTTP status.
    #[error("unexpected status: {0}")]
    Status(u16),

    /// The upstream answered, but not in the expected shape.
    #[error("malformed response: {0}")]
    Malformed(String),

    /// The upstream reported that the requested entity does not exist.
    #[error("not found")]
    NotFound,

    /// The feature is switched off by configuration (no API key).
    #[error("{0} is not configured")]
    Disabled(&'static str),

    /// Local rendering failed (PDF generation).
    #[error("render failed: {0}")]
    Render(String),
}

impl From<reqwest::Error> for ServiceError {
    fn from(e: reqwest::Error) -> Self {
        ServiceError::Request(e.to_string())
    }
}
