//! Run a batch evaluation over a JSON sample file and write CSV/Markdown
//! reports.
//!
//! Reads the API key from the `OPENAI_API_KEY` environment variable when
//! `--mode llm` is selected; heuristic mode is fully offline.
//!
//! # Examples
//!
//! ```sh
//! # Deterministic pipeline, default limits
//! pare --input samples.json --output-csv eval.csv --output-md eval.md
//!
//! # External model with stacked budget enforcement
//! pare --input samples.json --output-csv eval.csv --output-md eval.md \
//!   --mode llm --model gpt-5-mini --retries 3
//!
//! # Tighter budgets
//! pare --input samples.json --output-csv eval.csv --output-md eval.md \
//!   --lexical-limit 64 --vector-limit 96
//! ```

use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use pare_rs::llm::{
    ChatCompletionsClient, SummarizeOptions, SummaryClient, clean_summary, summarize_with_retry,
};
use pare_rs::models::{ModelConfig, clamp_limit, model_config};
use pare_rs::summarize::{ShortenStrategy, build_pipeline, enforce_token_limit, trim_to_limit};
use pare_rs::eval::{EvalSample, SummarizedDoc, build_rows, load_samples, write_csv, write_markdown};
use pare_rs::token::WhitespaceCounter;

/// Run a batch evaluation and write per-document CSV and Markdown reports.
#[derive(Parser)]
#[command(name = "pare")]
struct Cli {
    /// Path to the sample JSON file (array of content_id/title/content_summary)
    #[arg(long)]
    input: String,

    /// Per-document CSV output path
    #[arg(long)]
    output_csv: String,

    /// Markdown summary output path
    #[arg(long)]
    output_md: String,

    /// Evaluation mode: deterministic pipeline or external model
    #[arg(long, default_value = "heuristic", value_parser = ["heuristic", "llm"])]
    mode: String,

    /// Registry id of the lexical summary model
    #[arg(long, default_value = "lexical_v1")]
    lexical_model: String,

    /// Registry id of the vector summary model
    #[arg(long, default_value = "vector_v1")]
    vector_model: String,

    /// Token budget for lexical summaries (clamped to the model's bounds)
    #[arg(long)]
    lexical_limit: Option<i64>,

    /// Token budget for vector summaries (clamped to the model's bounds)
    #[arg(long)]
    vector_limit: Option<i64>,

    /// External model identifier (llm mode only)
    #[arg(long, default_value = "gpt-5-mini")]
    model: String,

    /// Attempts per external summary call before falling back (llm mode only)
    #[arg(long, default_value_t = 3)]
    retries: u32,
}

/// One external-model summary with the full post-processing stack: echo
/// stripping, two-pass budget enforcement, then the sentence-trim clamp.
async fn llm_summary<C>(
    text: &str,
    limit: usize,
    cfg: &ModelConfig,
    model: &str,
    retries: u32,
    client: &C,
) -> String
where
    C: SummaryClient + ?Sized,
{
    let opts = SummarizeOptions::new(model, cfg.kind).with_retries(retries);
    let (raw, outcome) = summarize_with_retry(text, limit, &opts, client).await;
    if outcome.exhausted(&raw, &opts.fallback) {
        // The sentinel passes through untouched so the report can flag it.
        return raw;
    }

    let counter = WhitespaceCounter;
    let strategy = ShortenStrategy::new(cfg.kind);
    let cleaned = clean_summary(&raw);
    let enforced = enforce_token_limit(&cleaned, limit, &strategy, &counter);
    trim_to_limit(&enforced, limit, cfg.kind, &counter)
}

async fn run(cli: &Cli) -> Result<(), String> {
    let lexical_cfg = model_config(&cli.lexical_model).map_err(|e| e.to_string())?;
    let vector_cfg = model_config(&cli.vector_model).map_err(|e| e.to_string())?;
    let lexical_limit = clamp_limit(cli.lexical_limit, lexical_cfg);
    let vector_limit = clamp_limit(cli.vector_limit, vector_cfg);

    let samples: Vec<EvalSample> = load_samples(&cli.input)
        .map_err(|e| e.to_string())?
        .into_iter()
        .filter(|s| !s.content_summary.trim().is_empty())
        .collect();
    info!(
        samples = samples.len(),
        mode = %cli.mode,
        lexical_limit,
        vector_limit,
        "starting evaluation"
    );

    let client = if cli.mode == "llm" {
        let api_key = std::env::var("OPENAI_API_KEY")
            .map_err(|_| "OPENAI_API_KEY environment variable is not set".to_string())?;
        Some(ChatCompletionsClient::new(api_key)?)
    } else {
        None
    };

    let mut docs = Vec::with_capacity(samples.len());
    for sample in &samples {
        let text = sample.content_summary.trim();
        let (lexical_summary, vector_summary) = match &client {
            Some(client) => (
                llm_summary(text, lexical_limit, lexical_cfg, &cli.model, cli.retries, client)
                    .await,
                llm_summary(text, vector_limit, vector_cfg, &cli.model, cli.retries, client)
                    .await,
            ),
            None => (
                build_pipeline(text, lexical_cfg, lexical_limit).final_summary,
                build_pipeline(text, vector_cfg, vector_limit).final_summary,
            ),
        };
        docs.push(SummarizedDoc {
            content_id: sample.content_id.clone(),
            title: sample.title.clone(),
            orig_text: text.to_string(),
            lexical_summary,
            vector_summary,
        });
    }

    let rows = build_rows(&docs, &WhitespaceCounter);
    write_csv(&rows, &cli.output_csv).map_err(|e| e.to_string())?;
    write_markdown(&rows, &cli.output_md).map_err(|e| e.to_string())?;
    info!(
        rows = rows.len(),
        csv = %cli.output_csv,
        md = %cli.output_md,
        "evaluation complete"
    );
    Ok(())
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    if let Err(e) = run(&cli).await {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
