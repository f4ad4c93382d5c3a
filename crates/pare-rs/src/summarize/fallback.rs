//! Last-resort sentence trimming for text that survived two shortening
//! passes still over budget.
//!
//! Ratio-based shortening targets a fraction of the *source* length, so a
//! sufficiently long input can stay over an absolute limit after both
//! passes. [`sentence_trim`] enforces the absolute limit directly by
//! accumulating whole sentences; [`trim_to_limit`] stacks the strategy
//! passes and the trim into the post-processing used on external model
//! output — the least trustworthy source gets the most layers.

use tracing::debug;

use crate::summarize::sentence::split_sentences;
use crate::summarize::strategy::{ShortenStrategy, ShortenStyle, Shortener};
use crate::token::TokenCounter;

/// Accumulate sentences front-to-back while the running token total stays
/// within `limit`.
///
/// The first sentence is accepted unconditionally, even if it alone exceeds
/// the limit — non-empty output beats strict compliance. Input with no
/// sentences at all is returned unchanged.
pub fn sentence_trim<C>(text: &str, limit: usize, counter: &C) -> String
where
    C: TokenCounter + ?Sized,
{
    let sentences = split_sentences(text);
    if sentences.is_empty() {
        return text.to_string();
    }

    let mut accepted: Vec<String> = Vec::new();
    let mut total = 0usize;
    for sentence in sentences {
        let tokens = counter.count(&sentence);
        if total + tokens <= limit || accepted.is_empty() {
            total += tokens;
            accepted.push(sentence);
        } else {
            break;
        }
    }

    accepted.join(" ").trim().to_string()
}

/// Full budget clamp for untrusted text: standard pass, aggressive pass,
/// then the sentence trim, stopping at the first stage that fits.
///
/// Both strategy passes run against the original `text` (not each other's
/// output) so the aggressive pass gets the full source to select from.
pub fn trim_to_limit<C>(text: &str, limit: usize, style: ShortenStyle, counter: &C) -> String
where
    C: TokenCounter + Clone,
{
    let strategy = ShortenStrategy::with_counter(style, counter.clone());

    let mut candidate = strategy.shorten(text, false);
    if counter.count(&candidate) > limit {
        candidate = strategy.shorten(text, true);
    }
    if counter.count(&candidate) > limit {
        debug!(limit, %style, "strategy passes insufficient, sentence trim");
        let trimmed = sentence_trim(text, limit, counter);
        if !trimmed.is_empty() {
            candidate = trimmed;
        }
    }
    candidate
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::token::WhitespaceCounter;

    const TEXT: &str = "Alpha beta gamma delta. Echo foxtrot golf hotel. \
                        India juliet kilo lima. Mike november oscar papa.";

    #[test]
    fn trims_to_the_limit() {
        let out = sentence_trim(TEXT, 8, &WhitespaceCounter);
        assert_eq!(out, "Alpha beta gamma delta. Echo foxtrot golf hotel.");
    }

    #[test]
    fn first_sentence_survives_even_over_limit() {
        let out = sentence_trim("Alpha beta gamma delta. Echo foxtrot.", 2, &WhitespaceCounter);
        assert_eq!(out, "Alpha beta gamma delta.");
    }

    #[test]
    fn no_sentences_returns_input_unchanged() {
        assert_eq!(sentence_trim("", 5, &WhitespaceCounter), "");
        assert_eq!(sentence_trim("   ", 5, &WhitespaceCounter), "   ");
    }

    #[test]
    fn trim_to_limit_fits_when_sentences_allow() {
        let out = trim_to_limit(TEXT, 8, ShortenStyle::Lexical, &WhitespaceCounter);
        assert!(WhitespaceCounter.count(&out) <= 8);
        assert!(out.starts_with("Alpha beta"));
    }

    #[test]
    fn trim_to_limit_single_long_sentence_is_best_effort() {
        let text = "one sentence that cannot be split into anything smaller";
        let out = trim_to_limit(text, 3, ShortenStyle::Lexical, &WhitespaceCounter);
        assert_eq!(out, text);
    }
}
