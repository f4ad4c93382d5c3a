//! Crate-level error taxonomy.
//!
//! Two failure families matter here: validation failures (bad caller input,
//! unknown model ids, malformed sample files) surface immediately and are
//! never retried; external completion failures are handled *inside* the
//! retry loop as ordinary values (see [`crate::llm`]) and degrade to a
//! fallback sentinel rather than propagating. Nothing in this enum is used
//! for the "LLM call failed" case.

use thiserror::Error;

/// Errors surfaced by the library to callers.
#[derive(Debug, Error)]
pub enum Error {
    /// Caller-supplied input failed validation (empty query, missing file,
    /// malformed sample shape).
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// A model id was not found in the static registry.
    #[error("unknown model id: {0}")]
    UnknownModel(String),

    /// Filesystem failure while reading samples or writing reports.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// A sample file failed to parse as the expected JSON shape.
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;
