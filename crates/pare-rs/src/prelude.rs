//! Convenience re-exports for common `pare-rs` types.
//!
//! Meant to be glob-imported when wiring the pipeline:
//!
//! ```
//! use pare_rs::prelude::*;
//! ```
//!
//! This pulls in what most callers need: the counters, the shortening
//! pipeline, the retrying model client, rank fusion, and the report
//! builders. Specialized pieces (the sentence splitter, the HTTP adapter's
//! wire types, the estimating counter) are intentionally excluded — import
//! those from their modules directly when needed.

// ── Errors ──────────────────────────────────────────────────────────
pub use crate::error::{Error, Result};

// ── Counting and shortening ─────────────────────────────────────────
pub use crate::summarize::{
    PipelineResult, ShortenStep, ShortenStrategy, ShortenStyle, Shortener, build_pipeline,
    enforce_token_limit, enforce_with_trace, sentence_trim, trim_to_limit,
};
pub use crate::token::{TokenCounter, WhitespaceCounter};

// ── Model registry ──────────────────────────────────────────────────
pub use crate::models::{ModelConfig, SUMMARY_MODELS, clamp_limit, model_config};

// ── External model delegation ───────────────────────────────────────
pub use crate::llm::{
    ChatCompletionsClient, FnClient, RetryOutcome, SUMMARY_FALLBACK, SummarizeOptions,
    SummaryClient, clean_summary, summarize_with_retry,
};

// ── Search ──────────────────────────────────────────────────────────
pub use crate::search::{
    EmbeddingCache, FusedItem, FusionConfig, MemoryEmbeddingCache, ScoredItem, hybrid_merge,
    query_embedding,
};

// ── Evaluation ──────────────────────────────────────────────────────
pub use crate::eval::{
    EvalFlag, EvalRow, EvalSample, SummarizedDoc, build_rows, keyword_coverage, load_samples,
    to_csv, to_markdown,
};
