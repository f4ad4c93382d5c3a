//! Batch evaluation: keyword-coverage scoring and report assembly.
//!
//! - [`metrics`] — normalized keyword extraction and the coverage fraction.
//! - [`loader`] — JSON sample loading with shape validation.
//! - [`report`] — per-document rows with derived quality flags, rendered as
//!   CSV or Markdown with a fixed column contract.

pub mod loader;
pub mod metrics;
pub mod report;

pub use loader::{EvalSample, load_samples, parse_samples};
pub use metrics::{extract_keywords, keyword_coverage};
pub use report::{
    EvalFlag, EvalRow, LOW_COVERAGE_THRESHOLD, SummarizedDoc, build_rows, to_csv, to_markdown,
    write_csv, write_markdown,
};
