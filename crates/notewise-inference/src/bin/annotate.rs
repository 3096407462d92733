//! Notewise Annotation Runner
//!
//! Annotate a piece of text with sentiment, summary, and suggested category.
//!
//! Usage:
//!   cargo run --bin notewise-annotate -- "Finished the quarterly report"
//!   echo "Idea: color-code notes by mood" | cargo run --bin notewise-annotate
//!   cargo run --bin notewise-annotate -- --config ./inference.toml --health

use anyhow::Context;
use notewise_inference::{
    HuggingFaceBackend, InferenceBackend, InferenceConfig, TextAnnotator,
};
use std::env;
use std::io::Read;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Debug, Default)]
struct Args {
    config: Option<PathBuf>,
    health: bool,
    text: Option<String>,
}

fn parse_args() -> Args {
    let args: Vec<String> = env::args().collect();
    let mut result = Args::default();
    let mut words = Vec::new();

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--config" | "-c" => {
                i += 1;
                if i < args.len() {
                    result.config = Some(PathBuf::from(&args[i]));
                }
            }
            "--health" => {
                result.health = true;
            }
            "--help" | "-h" => {
                print_help();
                std::process::exit(0);
            }
            other => words.push(other.to_string()),
        }
        i += 1;
    }

    if !words.is_empty() {
        result.text = Some(words.join(" "));
    }
    result
}

fn print_help() {
    println!(
        r#"
Notewise Annotation Runner

Usage: notewise-annotate [OPTIONS] [TEXT...]

Reads TEXT from the arguments, or from stdin when none is given.

Options:
  -c, --config <FILE>     Inference config file (default: ~/.config/notewise/inference.toml)
      --health            Check that the sentiment service is reachable and exit
  -h, --help              Print help

Environment:
  HUGGING_FACE_API_TOKEN          Bearer token for the hosted services
  NOTEWISE_SENTIMENT_URL          Sentiment endpoint override
  NOTEWISE_SUMMARIZATION_URL      Summarization endpoint override
  NOTEWISE_CLASSIFICATION_URL     Classification endpoint override
  NOTEWISE_INFERENCE_TIMEOUT_MS   Per-call timeout (default: none)
  LOG_FORMAT                      "text" (default) or "json"
  RUST_LOG                        Standard env filter (default: "notewise_inference=info")
"#
    );
}

fn init_logging() {
    let log_format = env::var("LOG_FORMAT").unwrap_or_else(|_| "text".to_string());
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "notewise_inference=info".into());

    let registry = tracing_subscriber::registry().with(env_filter);
    if log_format == "json" {
        registry
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }
}

/// Drop the single line terminator `echo` appends; other whitespace counts
/// toward the analysis thresholds.
fn strip_line_terminator(input: &str) -> &str {
    match input.strip_suffix('\n') {
        Some(line) => line.strip_suffix('\r').unwrap_or(line),
        None => input,
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    init_logging();

    let args = parse_args();

    let config = match args.config {
        Some(ref path) => InferenceConfig::from_file(path)
            .with_context(|| format!("Failed to load config from {}", path.display()))?,
        None => InferenceConfig::load().context("Failed to load inference config")?,
    };

    let backend = Arc::new(HuggingFaceBackend::new(config.huggingface.clone())?);

    if args.health {
        let healthy = backend.health_check().await?;
        println!("{}", if healthy { "healthy" } else { "unhealthy" });
        if !healthy {
            std::process::exit(1);
        }
        return Ok(());
    }

    let text = match args.text {
        Some(text) => text,
        None => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("Failed to read text from stdin")?;
            strip_line_terminator(&buf).to_string()
        }
    };

    info!(text_len = text.chars().count(), "Annotating text");
    let annotator = TextAnnotator::with_config(backend, config.annotator);
    let annotation = annotator.annotate(&text).await;

    println!("{}", serde_json::to_string_pretty(&annotation)?);
    Ok(())
}
