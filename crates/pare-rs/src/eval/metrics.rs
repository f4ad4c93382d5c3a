//! Keyword-coverage metric: how much of the original's keyword set a
//! shortened text preserves.

use std::collections::HashSet;

/// Lowercase a raw token and strip non-word characters from both ends.
/// Tokens of length <= 1 after stripping are discarded (returned as None).
fn normalize_token(raw: &str) -> Option<String> {
    let lowered = raw.to_lowercase();
    let stripped = lowered.trim_matches(|c: char| !c.is_alphanumeric() && c != '_');
    if stripped.chars().count() <= 1 {
        None
    } else {
        Some(stripped.to_string())
    }
}

/// Extract the normalized keyword set of `text`.
///
/// Whitespace split, lowercased, punctuation-stripped at both ends; Unicode
/// alphanumerics count as word characters, so Hangul and CJK tokens survive
/// stripping.
pub fn extract_keywords(text: &str) -> HashSet<String> {
    text.split_whitespace().filter_map(normalize_token).collect()
}

/// Fraction of the original's keywords present in the candidate, in [0, 1].
///
/// Defined as exactly `0.0` when the original has no qualifying keywords —
/// never NaN, so reports stay well-formed.
pub fn keyword_coverage(original: &str, candidate: &str) -> f64 {
    let original_keywords = extract_keywords(original);
    if original_keywords.is_empty() {
        return 0.0;
    }
    let candidate_keywords = extract_keywords(candidate);
    let intersection = original_keywords
        .iter()
        .filter(|kw| candidate_keywords.contains(*kw))
        .count();
    intersection as f64 / original_keywords.len() as f64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keywords_are_lowercased_and_stripped() {
        let keywords = extract_keywords("Hello, WORLD! (rust)");
        assert!(keywords.contains("hello"));
        assert!(keywords.contains("world"));
        assert!(keywords.contains("rust"));
        assert_eq!(keywords.len(), 3);
    }

    #[test]
    fn short_tokens_are_discarded() {
        let keywords = extract_keywords("a I x! of keywords");
        assert_eq!(keywords.len(), 2);
        assert!(keywords.contains("of"));
        assert!(keywords.contains("keywords"));
    }

    #[test]
    fn hangul_tokens_survive() {
        let keywords = extract_keywords("한국어 요약기, 테스트.");
        assert!(keywords.contains("한국어"));
        assert!(keywords.contains("요약기"));
        assert!(keywords.contains("테스트"));
    }

    #[test]
    fn identical_text_has_full_coverage() {
        let text = "apple banana carrot";
        assert_eq!(keyword_coverage(text, text), 1.0);
    }

    #[test]
    fn partial_overlap_is_fractional() {
        let cov = keyword_coverage("apple banana carrot", "apple banana");
        assert!((cov - 2.0 / 3.0).abs() < 1e-9);
    }

    #[test]
    fn empty_original_is_zero_not_nan() {
        assert_eq!(keyword_coverage("", "anything"), 0.0);
        assert_eq!(keyword_coverage("! ? .", "anything"), 0.0);
    }

    #[test]
    fn disjoint_texts_have_zero_coverage() {
        assert_eq!(keyword_coverage("apple banana", "cherry durian"), 0.0);
    }
}
