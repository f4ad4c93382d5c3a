//! Token-budget text shortening and retrieval evaluation.
//!
//! `pare-rs` keeps generated or retrieved text under a token budget while
//! preserving as much keyword and semantic content as possible, fuses two
//! independently-ranked result lists into one ranking, and measures how well
//! an abbreviated text preserves the original's keywords.
//!
//! The deterministic core is [`enforce_token_limit`](summarize::enforce_token_limit):
//! count, then at most two [`ShortenStrategy`](summarize::ShortenStrategy)
//! passes (standard, then aggressive), then stop — a possibly over-budget
//! result beats an unbounded loop. When shortening is delegated to an
//! external generative model instead, [`llm::summarize_with_retry`] wraps
//! the call with bounded retries and a fixed fallback sentinel, and callers
//! stack [`summarize::trim_to_limit`] on the response as the final clamp.
//!
//! # Getting started
//!
//! ```
//! use pare_rs::models::{clamp_limit, model_config};
//! use pare_rs::summarize::build_pipeline;
//!
//! let cfg = model_config("lexical_v1").unwrap();
//! let limit = clamp_limit(Some(64), cfg);
//! let result = build_pipeline("First point. Second point. Third point.", cfg, limit);
//! assert!(result.within_budget);
//! assert_eq!(result.steps[0].summary, "First point. Second point. Third point.");
//! ```
//!
//! # Where to find things
//!
//! - **Count tokens:** [`token::TokenCounter`], with
//!   [`token::WhitespaceCounter`] as the naive default and
//!   [`token::CharsPerToken`] as a calibrated estimator. Closures implement
//!   the trait too.
//! - **Shorten deterministically:** [`summarize::ShortenStrategy`] selected
//!   by [`summarize::ShortenStyle`] (`Lexical` keeps the front, `Vector`
//!   keeps the tail), driven by [`summarize::enforce_token_limit`] or the
//!   traced [`summarize::build_pipeline`].
//! - **Clamp untrusted text hard:** [`summarize::sentence_trim`] and the
//!   stacked [`summarize::trim_to_limit`].
//! - **Delegate to a model:** the [`llm::SummaryClient`] seam,
//!   [`llm::summarize_with_retry`], [`llm::clean_summary`], and the
//!   [`llm::ChatCompletionsClient`] HTTP adapter.
//! - **Fuse rankings:** [`search::hybrid_merge`] over
//!   [`search::ScoredItem`] lists.
//! - **Cache embeddings:** [`search::EmbeddingCache`] and
//!   [`search::query_embedding`].
//! - **Score and report:** [`eval::keyword_coverage`], [`eval::build_rows`],
//!   [`eval::to_csv`] / [`eval::to_markdown`].
//!
//! # Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`token`] | Pluggable token counting |
//! | [`summarize`] | Shortening strategies, budget enforcement, fallback trimming |
//! | [`llm`] | Retrying delegation to an external generative model |
//! | [`search`] | Hybrid rank fusion and the embedding cache discipline |
//! | [`eval`] | Keyword coverage metric and batch report rendering |
//! | [`models`] | Static summary-model registry and limit clamping |

pub mod error;
pub mod eval;
pub mod llm;
pub mod models;
pub mod prelude;
pub mod search;
pub mod summarize;
pub mod token;

pub use error::{Error, Result};
pub use models::{ModelConfig, SUMMARY_MODELS, clamp_limit, model_config};
pub use summarize::{
    PipelineResult, ShortenStep, ShortenStrategy, ShortenStyle, Shortener, build_pipeline,
    enforce_token_limit, enforce_with_trace,
};
pub use token::{TokenCounter, WhitespaceCounter};
