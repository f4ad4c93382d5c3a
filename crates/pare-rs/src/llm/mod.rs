//! Retrying delegation of summarization to an external generative model.
//!
//! The external model is the least trustworthy component in the pipeline, so
//! it gets three defensive layers: a bounded retry loop that degrades to a
//! fixed fallback sentinel instead of propagating failure, echo stripping
//! via [`clean_summary`], and the stacked budget enforcement callers apply
//! afterwards ([`crate::summarize::enforce_token_limit`] then
//! [`crate::summarize::trim_to_limit`]).
//!
//! Failure inside the retry loop is a normal value, never control flow: the
//! loop returns `(text, RetryOutcome)` where the text is either the model's
//! answer or the sentinel. Report consumers recognize the sentinel and flag
//! the row `LLM_FAIL` rather than mistaking it for a real summary.

pub mod client;

use std::future::Future;
use std::pin::Pin;

use tracing::warn;

use crate::summarize::ShortenStyle;

pub use client::ChatCompletionsClient;

/// Sentinel returned when every attempt against the external model fails.
///
/// Deliberately shaped like a structured marker, not free text, so report
/// consumers can detect it exactly.
pub const SUMMARY_FALLBACK: &str = "SUMMARY_FAIL";

/// Marker separating instructions from payload in the summary prompt.
/// [`clean_summary`] keys off the same constant when the model echoes the
/// prompt back.
pub const SUMMARY_MARKER: &str = "[SUMMARY]";

const PROMPT_RULES: &str = "\
You are a summarizer. Produce a one-paragraph summary and follow every rule.
Rules:
- The final token count must stay at or under the limit; rewrite whole sentences.
- Never cut words mid-token; no bullets, lists, or templates.
- Keep natural sentence form. lexical: preserve key terms and noun phrases. vector: reconstruct around core meaning.
- Summarize naturally first; if over the limit, compress further; if still over, keep only the essential sentences.";

/// Boxed completion future, so [`SummaryClient`] stays dyn-compatible.
pub type CompletionFuture<'a> = Pin<Box<dyn Future<Output = Result<String, String>> + Send + 'a>>;

/// A single-shot completion endpoint: prompt in, text out, may fail.
///
/// Errors are plain strings — the retry loop records them, it never
/// inspects them.
pub trait SummaryClient: Send + Sync {
    /// Send `prompt` to `model` and return the completion text.
    fn complete<'a>(&'a self, prompt: &'a str, model: &'a str) -> CompletionFuture<'a>;
}

/// Closure-backed [`SummaryClient`] for tests and embedding.
///
/// # Example
///
/// ```
/// use pare_rs::llm::FnClient;
///
/// let client = FnClient::new(|_prompt, _model| Ok("a short summary".to_string()));
/// ```
pub struct FnClient<F>
where
    F: Fn(&str, &str) -> Result<String, String> + Send + Sync,
{
    f: F,
}

impl<F> FnClient<F>
where
    F: Fn(&str, &str) -> Result<String, String> + Send + Sync,
{
    /// Wrap a synchronous closure as a client.
    pub fn new(f: F) -> Self {
        Self { f }
    }
}

impl<F> SummaryClient for FnClient<F>
where
    F: Fn(&str, &str) -> Result<String, String> + Send + Sync,
{
    fn complete<'a>(&'a self, prompt: &'a str, model: &'a str) -> CompletionFuture<'a> {
        let result = (self.f)(prompt, model);
        Box::pin(async move { result })
    }
}

/// Options for one retrying summarization call.
#[derive(Debug, Clone)]
pub struct SummarizeOptions {
    /// Model identifier passed through to the client.
    pub model: String,
    /// Style tag embedded in the prompt.
    pub style: ShortenStyle,
    /// Attempt budget; values below 1 still get one attempt.
    pub retries: u32,
    /// Value returned when every attempt fails.
    pub fallback: String,
}

impl SummarizeOptions {
    /// Create options with the default retry budget (3) and fallback
    /// sentinel.
    pub fn new(model: impl Into<String>, style: ShortenStyle) -> Self {
        Self {
            model: model.into(),
            style,
            retries: 3,
            fallback: SUMMARY_FALLBACK.to_string(),
        }
    }

    /// Override the attempt budget.
    pub fn with_retries(mut self, retries: u32) -> Self {
        self.retries = retries;
        self
    }

    /// Override the fallback sentinel.
    pub fn with_fallback(mut self, fallback: impl Into<String>) -> Self {
        self.fallback = fallback.into();
        self
    }
}

/// Attempt metadata for one retrying summarization call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetryOutcome {
    /// Number of client calls actually made.
    pub attempts: u32,
    /// Message of the most recent failure, if any attempt failed.
    pub last_error: Option<String>,
}

impl RetryOutcome {
    /// Whether the call ended on the fallback path (all attempts failed).
    pub fn exhausted(&self, result: &str, fallback: &str) -> bool {
        self.last_error.is_some() && result == fallback
    }
}

/// Build the fixed-format instruction payload for one summary request.
///
/// Embeds the numeric limit, the style tag, and the raw text under the
/// [`SUMMARY_MARKER`].
pub fn build_summary_prompt(text: &str, limit: usize, style: ShortenStyle) -> String {
    format!(
        "{PROMPT_RULES}\n- limit: {limit}\n- mode: {style}\n{SUMMARY_MARKER}\n{text}"
    )
}

/// Call the external model up to `max(1, retries)` times, degrading to the
/// fallback sentinel when every attempt fails.
///
/// Retries are sequential; there is no backoff or timeout at this layer — a
/// cooperating HTTP client is the right place to enforce call deadlines,
/// and a timeout there counts as one failed attempt here.
pub async fn summarize_with_retry<C>(
    text: &str,
    limit: usize,
    opts: &SummarizeOptions,
    client: &C,
) -> (String, RetryOutcome)
where
    C: SummaryClient + ?Sized,
{
    let prompt = build_summary_prompt(text, limit, opts.style);
    let mut outcome = RetryOutcome {
        attempts: 0,
        last_error: None,
    };

    for _ in 0..opts.retries.max(1) {
        outcome.attempts += 1;
        match client.complete(&prompt, &opts.model).await {
            Ok(result) => return (result, outcome),
            Err(err) => {
                warn!(
                    attempt = outcome.attempts,
                    model = %opts.model,
                    error = %err,
                    "summary attempt failed"
                );
                outcome.last_error = Some(err);
            }
        }
    }

    (opts.fallback.clone(), outcome)
}

/// Strip instruction text an external model may have echoed back.
///
/// Keeps only what follows the first [`SUMMARY_MARKER`] when present, drops
/// any line that matches the instruction block verbatim, and trims.
pub fn clean_summary(text: &str) -> String {
    if text.is_empty() {
        return String::new();
    }
    let body = match text.split_once(SUMMARY_MARKER) {
        Some((_, after)) => after,
        None => text,
    };
    body.lines()
        .filter(|line| !PROMPT_RULES.lines().any(|rule| rule.trim() == line.trim()))
        .collect::<Vec<_>>()
        .join("\n")
        .trim()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicU32, Ordering};

    fn opts(retries: u32) -> SummarizeOptions {
        SummarizeOptions::new("test-model", ShortenStyle::Lexical).with_retries(retries)
    }

    #[tokio::test]
    async fn success_on_first_attempt() {
        let client = FnClient::new(|_, _| Ok("the summary".to_string()));
        let (result, meta) = summarize_with_retry("text", 64, &opts(3), &client).await;
        assert_eq!(result, "the summary");
        assert_eq!(meta.attempts, 1);
        assert!(meta.last_error.is_none());
    }

    #[tokio::test]
    async fn always_failing_client_degrades_to_fallback() {
        let calls = AtomicU32::new(0);
        let client = FnClient::new(|_, _| {
            calls.fetch_add(1, Ordering::SeqCst);
            Err("boom".to_string())
        });
        let (result, meta) = summarize_with_retry("text", 64, &opts(2), &client).await;
        assert_eq!(result, SUMMARY_FALLBACK);
        assert_eq!(meta.attempts, 2);
        assert_eq!(calls.load(Ordering::SeqCst), 2);
        assert_eq!(meta.last_error.as_deref(), Some("boom"));
        assert!(meta.exhausted(&result, SUMMARY_FALLBACK));
    }

    #[tokio::test]
    async fn fail_once_then_succeed_takes_two_attempts() {
        let script = Mutex::new(vec![
            Err("transient".to_string()),
            Ok("recovered".to_string()),
        ]);
        let client = FnClient::new(move |_, _| script.lock().unwrap().remove(0));
        let (result, meta) = summarize_with_retry("text", 64, &opts(3), &client).await;
        assert_eq!(result, "recovered");
        assert_eq!(meta.attempts, 2);
        assert_eq!(meta.last_error.as_deref(), Some("transient"));
        assert!(!meta.exhausted(&result, SUMMARY_FALLBACK));
    }

    #[tokio::test]
    async fn zero_retries_still_makes_one_attempt() {
        let client = FnClient::new(|_, _| Err("down".to_string()));
        let (result, meta) = summarize_with_retry("text", 64, &opts(0), &client).await;
        assert_eq!(result, SUMMARY_FALLBACK);
        assert_eq!(meta.attempts, 1);
    }

    #[tokio::test]
    async fn custom_fallback_is_returned_verbatim() {
        let client = FnClient::new(|_, _| Err("down".to_string()));
        let opts = opts(1).with_fallback("NOPE");
        let (result, _) = summarize_with_retry("text", 64, &opts, &client).await;
        assert_eq!(result, "NOPE");
    }

    #[test]
    fn prompt_embeds_limit_style_and_text() {
        let prompt = build_summary_prompt("the raw text", 96, ShortenStyle::Vector);
        assert!(prompt.contains("- limit: 96"));
        assert!(prompt.contains("- mode: vector"));
        assert!(prompt.ends_with("[SUMMARY]\nthe raw text"));
    }

    #[test]
    fn clean_summary_strips_echoed_prompt() {
        let echoed = build_summary_prompt("the actual summary text.", 64, ShortenStyle::Lexical);
        assert_eq!(clean_summary(&echoed), "the actual summary text.");
    }

    #[test]
    fn clean_summary_strips_stray_rule_lines() {
        let text = "You are a summarizer. Produce a one-paragraph summary and follow every rule.\n\
                    The real content.";
        assert_eq!(clean_summary(text), "The real content.");
    }

    #[test]
    fn clean_summary_passes_plain_text_through() {
        assert_eq!(clean_summary("just a summary."), "just a summary.");
        assert_eq!(clean_summary(""), "");
    }
}
