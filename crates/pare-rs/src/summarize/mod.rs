//! Token-budget enforcement: keep text under a token limit while preserving
//! as much content as possible.
//!
//! The enforcer drives a [`Shortener`] through at most two passes — one
//! standard, one aggressive — and then stops. Returning a possibly
//! over-budget result after pass two is deliberate: it guarantees
//! termination and forward progress over strict compliance. Callers that
//! need a hard ceiling stack [`fallback::trim_to_limit`] on top.
//!
//! [`build_pipeline`] is the traced entry point: it records every
//! intermediate `(summary, tokens)` observation so evaluation tooling can
//! inspect what each pass did.

pub mod fallback;
pub mod sentence;
pub mod strategy;

use serde::Serialize;
use tracing::debug;

use crate::models::ModelConfig;
use crate::token::{TokenCounter, WhitespaceCounter};

pub use fallback::{sentence_trim, trim_to_limit};
pub use sentence::split_sentences;
pub use strategy::{RATIO_AGGRESSIVE, RATIO_STANDARD, ShortenStrategy, ShortenStyle, Shortener};

/// One observation in the trace of a shortening run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ShortenStep {
    /// The text as of this step.
    pub summary: String,
    /// Its token count.
    pub tokens: usize,
}

/// The result of one traced shortening run.
///
/// Immutable once constructed; `steps` always starts with the unmodified
/// input.
#[derive(Debug, Clone, Serialize)]
pub struct PipelineResult {
    /// The final (best-effort) summary.
    pub final_summary: String,
    /// Token count of the final summary.
    pub final_tokens: usize,
    /// Every intermediate `(summary, tokens)` pair, input first.
    pub steps: Vec<ShortenStep>,
    /// Id of the model config that drove the run.
    pub model_id: String,
    /// The token budget that was enforced.
    pub limit: usize,
    /// Whether the final summary actually fits the budget. The enforcer
    /// returns best-effort text either way; this flag surfaces the outcome.
    pub within_budget: bool,
}

/// Ensure `text` does not exceed `limit` tokens using up to two shortening
/// passes.
///
/// - Within budget already: returned unchanged, `shortener` never called.
/// - Over budget: one standard pass; if that fits, return it.
/// - Still over: one aggressive pass on the standard pass's output, returned
///   **even if still over budget** — never more than two calls, never a loop.
pub fn enforce_token_limit<S, C>(text: &str, limit: usize, shortener: &S, counter: &C) -> String
where
    S: Shortener + ?Sized,
    C: TokenCounter + ?Sized,
{
    let (result, _) = enforce_with_trace(text, limit, shortener, counter);
    result
}

/// [`enforce_token_limit`] with a full trace of every intermediate step.
///
/// The first step is always the unmodified input.
pub fn enforce_with_trace<S, C>(
    text: &str,
    limit: usize,
    shortener: &S,
    counter: &C,
) -> (String, Vec<ShortenStep>)
where
    S: Shortener + ?Sized,
    C: TokenCounter + ?Sized,
{
    let mut steps = Vec::with_capacity(3);
    let record = |steps: &mut Vec<ShortenStep>, current: &str| {
        let tokens = counter.count(current);
        steps.push(ShortenStep {
            summary: current.to_string(),
            tokens,
        });
        tokens
    };

    let mut current = text.to_string();
    if record(&mut steps, &current) <= limit {
        return (current, steps);
    }

    current = shortener.shorten(&current, false);
    if record(&mut steps, &current) <= limit {
        return (current, steps);
    }

    current = shortener.shorten(&current, true);
    let tokens = record(&mut steps, &current);
    if tokens > limit {
        debug!(tokens, limit, "still over budget after aggressive pass");
    }
    (current, steps)
}

/// Run the traced shortening pipeline for a registered model config.
///
/// Uses the default whitespace counter; see [`build_pipeline_with_counter`]
/// to budget against a different tokenizer.
pub fn build_pipeline(text: &str, cfg: &ModelConfig, limit: usize) -> PipelineResult {
    build_pipeline_with_counter(text, cfg, limit, &WhitespaceCounter)
}

/// [`build_pipeline`] with an explicit token counter.
pub fn build_pipeline_with_counter<C>(
    text: &str,
    cfg: &ModelConfig,
    limit: usize,
    counter: &C,
) -> PipelineResult
where
    C: TokenCounter + Clone,
{
    let strategy = ShortenStrategy::with_counter(cfg.kind, counter.clone());
    let (final_summary, steps) = enforce_with_trace(text, limit, &strategy, counter);
    let final_tokens = counter.count(&final_summary);
    PipelineResult {
        within_budget: final_tokens <= limit,
        final_summary,
        final_tokens,
        steps,
        model_id: cfg.id.to_string(),
        limit,
    }
}
