//! Batch evaluation rows and their CSV / Markdown renderings.
//!
//! Column order is part of the interface: downstream spreadsheets key on
//! it. CSV carries the full texts; the Markdown table is the compact
//! numbers-only view.

use std::fmt;
use std::path::Path;

use serde::Serialize;
use tracing::debug;

use crate::error::Result;
use crate::eval::metrics::keyword_coverage;
use crate::llm::SUMMARY_FALLBACK;
use crate::token::TokenCounter;

/// Coverage below this flags a row `LOW_COVERAGE`.
pub const LOW_COVERAGE_THRESHOLD: f64 = 0.6;

/// Fixed CSV column order.
const CSV_HEADER: &str = "content_id,title,orig_text,lexical_summary,vector_summary,\
                          orig_tok,lex_tok,vec_tok,lex_cov,flags";

/// Quality flags derived per row, never stored input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum EvalFlag {
    /// A summary equals the fallback sentinel: the external model failed
    /// every attempt.
    LlmFail,
    /// Keyword coverage fell below [`LOW_COVERAGE_THRESHOLD`].
    LowCoverage,
}

impl fmt::Display for EvalFlag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EvalFlag::LlmFail => f.write_str("LLM_FAIL"),
            EvalFlag::LowCoverage => f.write_str("LOW_COVERAGE"),
        }
    }
}

/// One evaluated document with both summaries attached.
#[derive(Debug, Clone)]
pub struct SummarizedDoc {
    /// Stable document identifier.
    pub content_id: String,
    /// Human-readable title.
    pub title: String,
    /// The original (full) text.
    pub orig_text: String,
    /// Lexical-style summary of the original.
    pub lexical_summary: String,
    /// Vector-style summary of the original.
    pub vector_summary: String,
}

/// One report row: token counts, coverage, and derived flags.
#[derive(Debug, Clone, Serialize)]
pub struct EvalRow {
    pub content_id: String,
    pub title: String,
    pub orig_text: String,
    pub lexical_summary: String,
    pub vector_summary: String,
    pub orig_tokens: usize,
    pub lexical_tokens: usize,
    pub vector_tokens: usize,
    /// Keyword coverage of the lexical summary against the original.
    pub keyword_cov: f64,
    pub flags: Vec<EvalFlag>,
}

/// Build one row per document: count tokens, score coverage, derive flags.
pub fn build_rows<C>(docs: &[SummarizedDoc], counter: &C) -> Vec<EvalRow>
where
    C: TokenCounter + ?Sized,
{
    docs.iter()
        .map(|doc| {
            let keyword_cov = keyword_coverage(&doc.orig_text, &doc.lexical_summary);

            let mut flags = Vec::new();
            if doc.lexical_summary == SUMMARY_FALLBACK || doc.vector_summary == SUMMARY_FALLBACK {
                flags.push(EvalFlag::LlmFail);
            }
            if keyword_cov < LOW_COVERAGE_THRESHOLD {
                flags.push(EvalFlag::LowCoverage);
            }

            EvalRow {
                content_id: doc.content_id.clone(),
                title: doc.title.clone(),
                orig_text: doc.orig_text.clone(),
                lexical_summary: doc.lexical_summary.clone(),
                vector_summary: doc.vector_summary.clone(),
                orig_tokens: counter.count(&doc.orig_text),
                lexical_tokens: counter.count(&doc.lexical_summary),
                vector_tokens: counter.count(&doc.vector_summary),
                keyword_cov,
                flags,
            }
        })
        .collect()
}

fn csv_field(value: &str) -> String {
    if value.contains(',') || value.contains('"') || value.contains('\n') || value.contains('\r') {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}

fn flags_field(flags: &[EvalFlag]) -> String {
    flags
        .iter()
        .map(EvalFlag::to_string)
        .collect::<Vec<_>>()
        .join(";")
}

/// Render rows as CSV with the fixed column order. Coverage is formatted to
/// three decimal places; flags are `;`-joined flag names.
pub fn to_csv(rows: &[EvalRow]) -> String {
    let mut out = String::from(CSV_HEADER);
    out.push('\n');
    for row in rows {
        let fields = [
            csv_field(&row.content_id),
            csv_field(&row.title),
            csv_field(&row.orig_text),
            csv_field(&row.lexical_summary),
            csv_field(&row.vector_summary),
            row.orig_tokens.to_string(),
            row.lexical_tokens.to_string(),
            row.vector_tokens.to_string(),
            format!("{:.3}", row.keyword_cov),
            csv_field(&flags_field(&row.flags)),
        ];
        out.push_str(&fields.join(","));
        out.push('\n');
    }
    out
}

/// Render rows as a Markdown pipe table (numbers-only compact view).
pub fn to_markdown(rows: &[EvalRow]) -> String {
    let mut out = String::new();
    out.push_str("| content_id | orig_tok | lex_tok | vec_tok | lex_cov | flags |\n");
    out.push_str("|------------|----------|---------|---------|---------|-------|\n");
    for row in rows {
        out.push_str(&format!(
            "| {} | {} | {} | {} | {:.3} | {} |\n",
            row.content_id,
            row.orig_tokens,
            row.lexical_tokens,
            row.vector_tokens,
            row.keyword_cov,
            flags_field(&row.flags),
        ));
    }
    out
}

/// Render and write the CSV report.
pub fn write_csv(rows: &[EvalRow], path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    std::fs::write(path, to_csv(rows))?;
    debug!(rows = rows.len(), path = %path.display(), "wrote csv report");
    Ok(())
}

/// Render and write the Markdown report.
pub fn write_markdown(rows: &[EvalRow], path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    std::fs::write(path, to_markdown(rows))?;
    debug!(rows = rows.len(), path = %path.display(), "wrote markdown report");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::token::WhitespaceCounter;

    fn doc(id: &str, orig: &str, lexical: &str, vector: &str) -> SummarizedDoc {
        SummarizedDoc {
            content_id: id.to_string(),
            title: format!("title {id}"),
            orig_text: orig.to_string(),
            lexical_summary: lexical.to_string(),
            vector_summary: vector.to_string(),
        }
    }

    #[test]
    fn rows_carry_counts_and_coverage() {
        let docs = vec![doc("c1", "apple banana carrot", "apple banana", "banana carrot")];
        let rows = build_rows(&docs, &WhitespaceCounter);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].orig_tokens, 3);
        assert_eq!(rows[0].lexical_tokens, 2);
        assert_eq!(rows[0].vector_tokens, 2);
        assert!((rows[0].keyword_cov - 2.0 / 3.0).abs() < 1e-9);
        assert!(rows[0].flags.is_empty());
    }

    #[test]
    fn fallback_summary_flags_llm_fail() {
        let docs = vec![doc("c1", "apple banana", SUMMARY_FALLBACK, "apple banana")];
        let rows = build_rows(&docs, &WhitespaceCounter);
        assert!(rows[0].flags.contains(&EvalFlag::LlmFail));
        // The sentinel covers none of the original keywords either.
        assert!(rows[0].flags.contains(&EvalFlag::LowCoverage));
    }

    #[test]
    fn low_coverage_is_flagged_below_threshold() {
        let docs = vec![doc("c1", "apple banana carrot durian", "apple", "apple")];
        let rows = build_rows(&docs, &WhitespaceCounter);
        assert_eq!(rows[0].flags, vec![EvalFlag::LowCoverage]);
    }

    #[test]
    fn csv_has_fixed_header_and_three_decimal_coverage() {
        let docs = vec![doc("c1", "apple banana carrot", "apple banana", "carrot")];
        let csv = to_csv(&build_rows(&docs, &WhitespaceCounter));
        let mut lines = csv.lines();
        assert_eq!(
            lines.next().unwrap(),
            "content_id,title,orig_text,lexical_summary,vector_summary,\
             orig_tok,lex_tok,vec_tok,lex_cov,flags"
        );
        assert!(lines.next().unwrap().contains("0.667"));
    }

    #[test]
    fn csv_escapes_commas_and_quotes() {
        let docs = vec![doc(
            "c1",
            "a text, with commas",
            "he said \"hi\" once",
            "plain",
        )];
        let csv = to_csv(&build_rows(&docs, &WhitespaceCounter));
        assert!(csv.contains("\"a text, with commas\""));
        assert!(csv.contains("\"he said \"\"hi\"\" once\""));
    }

    #[test]
    fn markdown_table_shape() {
        let docs = vec![doc("c1", "apple banana carrot", "apple banana", "carrot")];
        let md = to_markdown(&build_rows(&docs, &WhitespaceCounter));
        assert!(md.starts_with("| content_id | orig_tok | lex_tok | vec_tok | lex_cov | flags |"));
        assert!(md.contains("| c1 | 3 | 2 | 1 | 0.667 |"));
    }

    #[test]
    fn flags_join_with_semicolons() {
        let docs = vec![doc("c1", "apple banana carrot", SUMMARY_FALLBACK, "x")];
        let csv = to_csv(&build_rows(&docs, &WhitespaceCounter));
        assert!(csv.contains("LLM_FAIL;LOW_COVERAGE"));
    }
}
