//! Pluggable token counting.
//!
//! The rest of the crate never assumes a particular tokenizer. Everything
//! that needs a count takes a [`TokenCounter`], so callers can swap the
//! naive whitespace counter for a real sub-word tokenizer without touching
//! the shortening or evaluation logic. Closures implement the trait too,
//! which keeps tests honest about call counts.

/// Default characters per token for the estimating counter (conservative
/// for English text; most tokenizers average 3-4 chars per token).
pub const DEFAULT_CHARS_PER_TOKEN: f64 = 3.5;

/// Maps text to an integer token count.
pub trait TokenCounter {
    /// Count the tokens in `text`. Empty or whitespace-only text counts 0.
    fn count(&self, text: &str) -> usize;
}

impl<F> TokenCounter for F
where
    F: Fn(&str) -> usize,
{
    fn count(&self, text: &str) -> usize {
        self(text)
    }
}

/// Naive counter: one token per whitespace-separated word.
#[derive(Debug, Clone, Copy, Default)]
pub struct WhitespaceCounter;

impl TokenCounter for WhitespaceCounter {
    fn count(&self, text: &str) -> usize {
        text.split_whitespace().count()
    }
}

/// Estimating counter: character count divided by a chars-per-token ratio.
///
/// Useful for CJK-heavy or punctuation-dense text where whitespace counting
/// badly underestimates. The ratio can be calibrated from real tokenizer
/// output.
#[derive(Debug, Clone, Copy)]
pub struct CharsPerToken {
    /// Characters per token ratio.
    pub chars_per_token: f64,
}

impl Default for CharsPerToken {
    fn default() -> Self {
        Self {
            chars_per_token: DEFAULT_CHARS_PER_TOKEN,
        }
    }
}

impl TokenCounter for CharsPerToken {
    fn count(&self, text: &str) -> usize {
        if text.is_empty() || self.chars_per_token <= 0.0 {
            return 0;
        }
        (text.chars().count() as f64 / self.chars_per_token).ceil() as usize
    }
}
