//! Loading evaluation samples from JSON.
//!
//! Expected shape: an array of objects with `content_id`, `title`, and
//! `content_summary`; pre-computed `lexical_summary` / `vector_summary`
//! fields are optional and only present when an upstream stage already
//! summarized.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// One document to evaluate.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EvalSample {
    /// Stable document identifier.
    pub content_id: String,
    /// Human-readable title.
    pub title: String,
    /// The original (full) text.
    pub content_summary: String,
    /// Pre-computed lexical-style summary, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lexical_summary: Option<String>,
    /// Pre-computed vector-style summary, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vector_summary: Option<String>,
}

/// Parse samples from a JSON string. The root must be an array; missing
/// required fields fail with the offending index in the serde error path.
pub fn parse_samples(json: &str) -> Result<Vec<EvalSample>> {
    Ok(serde_json::from_str(json)?)
}

/// Load samples from a JSON file.
pub fn load_samples(path: impl AsRef<Path>) -> Result<Vec<EvalSample>> {
    let path = path.as_ref();
    if !path.exists() {
        return Err(Error::InvalidInput(format!(
            "file not found: {}",
            path.display()
        )));
    }
    let raw = std::fs::read_to_string(path)?;
    parse_samples(&raw)
}
