//! Crate-level error type for fallible loading paths.
//!
//! Navigation itself never fails with an `Err`: recoverable problems are
//! reported as [`crate::nav::NavFault`] values inside operation outcomes.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    /// JSON for a config or universe model failed to parse.
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    /// A parsed value is out of its accepted range.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}
