//! Deterministic sentence-selection shortening strategies.
//!
//! Two styles share one mechanism: pick whole sentences until a target token
//! budget is reached. `Lexical` keeps the front of the text, where
//! keyword-dense content usually sits, for exact-match search. `Vector`
//! keeps the tail, assumed semantically conclusive, for embedding-style
//! retrieval. The split is a policy choice selected by the caller, not a
//! structural difference.
//!
//! Shortening is a pure function of `(text, aggressive)` — the same input
//! always yields the same output, which caching and tests rely on.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::summarize::sentence::split_sentences;
use crate::token::{TokenCounter, WhitespaceCounter};

/// Fraction of the source's tokens targeted by the standard pass.
pub const RATIO_STANDARD: f64 = 0.85;

/// Fraction targeted by the aggressive (second, more lossy) pass.
pub const RATIO_AGGRESSIVE: f64 = 0.65;

/// Which end of the text a strategy preserves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShortenStyle {
    /// Keep early sentences; biased toward literal keyword preservation.
    Lexical,
    /// Keep trailing sentences; biased toward conclusory content.
    Vector,
}

impl ShortenStyle {
    /// The style's wire/report tag.
    pub fn as_str(&self) -> &'static str {
        match self {
            ShortenStyle::Lexical => "lexical",
            ShortenStyle::Vector => "vector",
        }
    }
}

impl std::fmt::Display for ShortenStyle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ShortenStyle {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "lexical" => Ok(ShortenStyle::Lexical),
            "vector" => Ok(ShortenStyle::Vector),
            other => Err(format!("unknown shorten style: {other}")),
        }
    }
}

/// The seam the budget enforcer consumes: anything that can shorten text.
///
/// Implemented by [`ShortenStrategy`] and by plain closures, so tests can
/// inject probes that count calls or return fixed outputs.
pub trait Shortener {
    /// Shorten `text`. The `aggressive` flag selects the lossier target
    /// ratio on the second pass.
    fn shorten(&self, text: &str, aggressive: bool) -> String;
}

impl<F> Shortener for F
where
    F: Fn(&str, bool) -> String,
{
    fn shorten(&self, text: &str, aggressive: bool) -> String {
        self(text, aggressive)
    }
}

/// A shortening style paired with the token counter it budgets against.
///
/// # Example
///
/// ```
/// use pare_rs::{ShortenStrategy, ShortenStyle, Shortener};
///
/// let strategy = ShortenStrategy::new(ShortenStyle::Lexical);
/// let out = strategy.shorten("First point. Second point. Third point.", false);
/// assert!(out.starts_with("First point."));
/// ```
#[derive(Debug, Clone)]
pub struct ShortenStrategy<C: TokenCounter = WhitespaceCounter> {
    style: ShortenStyle,
    counter: C,
}

impl ShortenStrategy<WhitespaceCounter> {
    /// Create a strategy using the default whitespace counter.
    pub fn new(style: ShortenStyle) -> Self {
        Self {
            style,
            counter: WhitespaceCounter,
        }
    }
}

impl<C: TokenCounter> ShortenStrategy<C> {
    /// Create a strategy with an explicit token counter.
    pub fn with_counter(style: ShortenStyle, counter: C) -> Self {
        Self { style, counter }
    }

    /// The style this strategy applies.
    pub fn style(&self) -> ShortenStyle {
        self.style
    }

    fn target_tokens(&self, text: &str, aggressive: bool) -> usize {
        let ratio = if aggressive {
            RATIO_AGGRESSIVE
        } else {
            RATIO_STANDARD
        };
        ((self.counter.count(text) as f64 * ratio).round() as usize).max(1)
    }
}

impl<C: TokenCounter> Shortener for ShortenStrategy<C> {
    fn shorten(&self, text: &str, aggressive: bool) -> String {
        if text.trim().is_empty() {
            return String::new();
        }
        let sentences = split_sentences(text);
        if sentences.is_empty() {
            return String::new();
        }

        let target = self.target_tokens(text, aggressive);
        let mut accepted: Vec<String> = Vec::new();
        let mut total = 0usize;

        match self.style {
            ShortenStyle::Lexical => {
                for sentence in sentences {
                    let tokens = self.counter.count(&sentence);
                    // The first sentence is always kept, even over target.
                    if total + tokens <= target || accepted.is_empty() {
                        total += tokens;
                        accepted.push(sentence);
                    } else {
                        break;
                    }
                }
            }
            ShortenStyle::Vector => {
                for sentence in sentences.into_iter().rev() {
                    let tokens = self.counter.count(&sentence);
                    if total + tokens <= target || accepted.is_empty() {
                        total += tokens;
                        accepted.insert(0, sentence);
                    } else {
                        break;
                    }
                }
            }
        }

        accepted.join(" ").trim().to_string()
    }
}
