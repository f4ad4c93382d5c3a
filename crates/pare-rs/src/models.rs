//! Static registry of summary model configurations.
//!
//! Each config names a shortening style and the token-limit bounds a caller
//! may request. The registry is a const table — lookups are by id and fail
//! with [`Error::UnknownModel`] for absent ids. Invariant per entry:
//! `min_limit <= default_limit <= max_limit`.

use serde::Serialize;

use crate::error::{Error, Result};
use crate::summarize::ShortenStyle;

/// Immutable configuration for one summary model.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct ModelConfig {
    /// Registry key.
    pub id: &'static str,
    /// Human-readable label.
    pub label: &'static str,
    /// Which shortening style the model applies.
    pub kind: ShortenStyle,
    /// Smallest token limit a caller may request.
    pub min_limit: usize,
    /// Largest token limit a caller may request.
    pub max_limit: usize,
    /// Limit used when the caller supplies none.
    pub default_limit: usize,
}

/// All registered summary models.
pub const SUMMARY_MODELS: &[ModelConfig] = &[
    ModelConfig {
        id: "lexical_v1",
        label: "Lexical v1 (keyword preserving)",
        kind: ShortenStyle::Lexical,
        min_limit: 16,
        max_limit: 512,
        default_limit: 128,
    },
    ModelConfig {
        id: "vector_v1",
        label: "Vector v1 (semantic compression)",
        kind: ShortenStyle::Vector,
        min_limit: 16,
        max_limit: 512,
        default_limit: 128,
    },
];

/// Look up a model config by id.
pub fn model_config(id: &str) -> Result<&'static ModelConfig> {
    SUMMARY_MODELS
        .iter()
        .find(|cfg| cfg.id == id)
        .ok_or_else(|| Error::UnknownModel(id.to_string()))
}

/// Clamp a user-supplied limit into the config's bounds.
///
/// `None` yields the config's default. Out-of-range values (including
/// negatives) are clamped, not rejected.
pub fn clamp_limit(value: Option<i64>, cfg: &ModelConfig) -> usize {
    match value {
        None => cfg.default_limit,
        Some(v) => {
            let clamped = v.clamp(cfg.min_limit as i64, cfg.max_limit as i64);
            clamped as usize
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn registry_invariants_hold() {
        for cfg in SUMMARY_MODELS {
            assert!(cfg.min_limit <= cfg.default_limit, "{}", cfg.id);
            assert!(cfg.default_limit <= cfg.max_limit, "{}", cfg.id);
        }
    }

    #[test]
    fn lookup_finds_registered_ids() {
        assert_eq!(model_config("lexical_v1").unwrap().kind, ShortenStyle::Lexical);
        assert_eq!(model_config("vector_v1").unwrap().kind, ShortenStyle::Vector);
    }

    #[test]
    fn lookup_rejects_unknown_ids() {
        let err = model_config("lexical_v9").unwrap_err();
        assert!(matches!(err, Error::UnknownModel(id) if id == "lexical_v9"));
    }

    #[test]
    fn clamp_none_yields_default() {
        let cfg = model_config("lexical_v1").unwrap();
        assert_eq!(clamp_limit(None, cfg), 128);
    }

    #[test]
    fn clamp_bounds_out_of_range_values() {
        let cfg = model_config("lexical_v1").unwrap();
        assert_eq!(clamp_limit(Some(-10), cfg), 16);
        assert_eq!(clamp_limit(Some(9999), cfg), 512);
        assert_eq!(clamp_limit(Some(64), cfg), 64);
    }
}
