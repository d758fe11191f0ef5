//! feedback-report: score a JSON file of feedback rows and print the analytics.
//!
//! Usage: `feedback-report <rows.json | ->`
//!
//! Input is a JSON array of `{ "text", "instructor"?, "rating"?, "timestamp"? }`.
//! Config comes from `FEEDBACK_CONFIG_PATH` (default `config/feedback.toml`);
//! `FEEDBACK_LEXICON_PATH` swaps in a custom lexicon.

use anyhow::{bail, Context};
use feedback_sentiment::{analyze_rows, EngineConfig, FeedbackRow, Lexicon, SentimentAnalyzer};
use std::io::Read;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

const ENV_LEXICON_PATH: &str = "FEEDBACK_LEXICON_PATH";

/// Logs go to stderr so stdout stays clean JSON.
/// `FEEDBACK_LOG_JSON=1` switches to JSON lines.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("feedback_sentiment=info,warn"));

    let json = std::env::var("FEEDBACK_LOG_JSON")
        .ok()
        .is_some_and(|v| v == "1");

    if json {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().compact().with_writer(std::io::stderr))
            .init();
    }
}

fn read_input(arg: &str) -> anyhow::Result<String> {
    if arg == "-" {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .context("failed to read rows from stdin")?;
        Ok(buf)
    } else {
        std::fs::read_to_string(arg).with_context(|| format!("failed to read rows from {arg}"))
    }
}

fn run() -> anyhow::Result<()> {
    let Some(input) = std::env::args().nth(1) else {
        bail!("usage: feedback-report <rows.json | ->");
    };

    let cfg = EngineConfig::from_env()?;
    let lexicon = match std::env::var(ENV_LEXICON_PATH) {
        Ok(path) => Arc::new(Lexicon::load_from_file(&path)?),
        Err(_) => Lexicon::builtin(),
    };
    let analyzer = SentimentAnalyzer::with_lexicon(lexicon, cfg.scoring);

    let raw = read_input(&input)?;
    let rows: Vec<FeedbackRow> =
        serde_json::from_str(&raw).context("input must be a JSON array of feedback rows")?;

    let (_, summary) = analyze_rows(&analyzer, &rows, &cfg.aggregation)?;
    info!(
        rows = rows.len(),
        flagged = summary.flagged_count,
        instructors = summary.instructors_count,
        "report ready"
    );

    println!("{}", serde_json::to_string_pretty(&summary)?);
    Ok(())
}

fn main() -> anyhow::Result<()> {
    // Load .env in local/dev; missing file is fine.
    let _ = dotenvy::dotenv();
    init_tracing();
    run()
}
