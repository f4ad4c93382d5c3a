//! Weighted fusion of two independently-ranked result lists.
//!
//! Lexical (BM25-style) and vector (embedding-style) retrieval each produce
//! a scored list; fusion deduplicates by document id, linearly combines the
//! two scores, and returns the top-k. Candidates that only one side found
//! are kept with the other side's score at 0.0 — "bm25-only" and
//! "vector-only" hits are first-class, not dropped.
//!
//! The actual retrieval scoring is supplied externally; this module is pure
//! arithmetic over the lists it is handed.

use std::cmp::Ordering;
use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// One candidate in a single ranked list. Ids are unique within a list but
/// may recur across the two input lists.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredItem {
    /// Document id.
    pub id: String,
    /// Retrieval score from that list's scorer.
    pub score: f64,
}

impl ScoredItem {
    /// Convenience constructor.
    pub fn new(id: impl Into<String>, score: f64) -> Self {
        Self {
            id: id.into(),
            score,
        }
    }
}

/// One fused entry: a distinct id with both per-side scores and the
/// combined score.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FusedItem {
    /// Document id.
    pub id: String,
    /// Score contributed by the lexical (BM25-style) list; 0.0 if absent.
    pub bm25_score: f64,
    /// Score contributed by the vector list; 0.0 if absent.
    pub vector_score: f64,
    /// `bm25_weight * bm25_score + vector_weight * vector_score`.
    pub score: f64,
}

/// Weights and result budget for one merge.
#[derive(Debug, Clone, Copy)]
pub struct FusionConfig {
    /// Weight applied to lexical scores.
    pub bm25_weight: f64,
    /// Weight applied to vector scores.
    pub vector_weight: f64,
    /// Maximum entries returned.
    pub top_k: usize,
}

impl Default for FusionConfig {
    fn default() -> Self {
        Self {
            bm25_weight: 0.5,
            vector_weight: 0.5,
            top_k: 10,
        }
    }
}

/// Merge two scored lists into one ranking.
///
/// Pure function: re-running with the same inputs yields the same output.
/// Duplicate ids within one list overwrite that side's score (last wins).
/// Ties on the combined score break deterministically by first-seen order —
/// the bm25 list's order, then the vector list's — because entries keep
/// insertion order and the descending sort is stable.
pub fn hybrid_merge(
    bm25_results: &[ScoredItem],
    vector_results: &[ScoredItem],
    config: &FusionConfig,
) -> Vec<FusedItem> {
    let mut entries: Vec<FusedItem> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();

    for (items, vector_side) in [(bm25_results, false), (vector_results, true)] {
        for item in items {
            let pos = *index.entry(item.id.clone()).or_insert_with(|| {
                entries.push(FusedItem {
                    id: item.id.clone(),
                    bm25_score: 0.0,
                    vector_score: 0.0,
                    score: 0.0,
                });
                entries.len() - 1
            });
            if vector_side {
                entries[pos].vector_score = item.score;
            } else {
                entries[pos].bm25_score = item.score;
            }
        }
    }

    for entry in &mut entries {
        entry.score =
            config.bm25_weight * entry.bm25_score + config.vector_weight * entry.vector_score;
    }

    entries.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(Ordering::Equal));
    entries.truncate(config.top_k);
    entries
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(top_k: usize) -> FusionConfig {
        FusionConfig {
            top_k,
            ..FusionConfig::default()
        }
    }

    #[test]
    fn one_sided_candidate_keeps_zero_for_missing_side() {
        let merged = hybrid_merge(&[ScoredItem::new("a", 1.0)], &[], &config(10));
        assert_eq!(merged.len(), 1);
        assert_eq!(merged[0].id, "a");
        assert_eq!(merged[0].bm25_score, 1.0);
        assert_eq!(merged[0].vector_score, 0.0);
        assert_eq!(merged[0].score, 0.5);
    }

    #[test]
    fn shared_id_combines_both_sides() {
        let merged = hybrid_merge(
            &[ScoredItem::new("a", 1.0)],
            &[ScoredItem::new("a", 2.0), ScoredItem::new("b", 0.5)],
            &config(10),
        );
        assert_eq!(merged.len(), 2);
        assert_eq!(merged[0].id, "a");
        assert_eq!(merged[0].score, 1.5);
        assert_eq!(merged[1].id, "b");
        assert_eq!(merged[1].score, 0.25);
    }

    #[test]
    fn sorted_descending_and_truncated_to_top_k() {
        let bm25 = vec![
            ScoredItem::new("low", 0.1),
            ScoredItem::new("high", 2.0),
            ScoredItem::new("mid", 1.0),
        ];
        let merged = hybrid_merge(&bm25, &[], &config(2));
        assert_eq!(merged.len(), 2);
        assert_eq!(merged[0].id, "high");
        assert_eq!(merged[1].id, "mid");
    }

    #[test]
    fn ties_keep_first_seen_order() {
        let bm25 = vec![ScoredItem::new("first", 1.0), ScoredItem::new("second", 1.0)];
        let vector = vec![ScoredItem::new("third", 1.0)];
        let merged = hybrid_merge(&bm25, &vector, &FusionConfig::default());
        // first/second tie at 0.5; third also 0.5 — insertion order holds.
        let ids: Vec<&str> = merged.iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, vec!["first", "second", "third"]);
    }

    #[test]
    fn rerunning_is_idempotent() {
        let bm25 = vec![ScoredItem::new("a", 0.9), ScoredItem::new("b", 0.3)];
        let vector = vec![ScoredItem::new("b", 0.8)];
        let once = hybrid_merge(&bm25, &vector, &FusionConfig::default());
        let twice = hybrid_merge(&bm25, &vector, &FusionConfig::default());
        assert_eq!(once, twice);
    }

    #[test]
    fn fewer_candidates_than_top_k_returns_all() {
        let merged = hybrid_merge(&[ScoredItem::new("only", 1.0)], &[], &config(10));
        assert_eq!(merged.len(), 1);
    }

    #[test]
    fn custom_weights_apply() {
        let cfg = FusionConfig {
            bm25_weight: 1.0,
            vector_weight: 0.0,
            top_k: 10,
        };
        let merged = hybrid_merge(
            &[ScoredItem::new("a", 0.4)],
            &[ScoredItem::new("a", 9.9)],
            &cfg,
        );
        assert_eq!(merged[0].score, 0.4);
    }
}
