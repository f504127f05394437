//! CLI entry point for the keyword extractor.

use std::fs;
use std::io::{self, Read, Write};
use std::process::ExitCode;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use keyword_core::{AnalysisError, AnalyzerConfig, ContentDocument, KeywordAnalyzer, Language};
use tracing::{debug, error, info};

mod app_config;
mod cli;

use app_config::{FileConfig, load_default_file_config, load_word_list};
use cli::Args;

#[tokio::main]
async fn main() -> Result<ExitCode> {
    // Parse CLI arguments first (before tracing, so --help works without logs)
    let args = Args::parse();

    // Priority: RUST_LOG env var > quiet flag > verbose flag > default (info)
    let default_level = if args.quiet {
        "error"
    } else {
        match args.verbose {
            0 => "info",
            1 => "debug",
            _ => "trace",
        }
    };

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level));

    // Logs go to stderr; stdout carries the report
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();

    debug!(?args, "CLI arguments parsed");

    let loaded = load_default_file_config()?;
    if let Some(path) = loaded.path.as_deref()
        && loaded.config.is_some()
    {
        debug!(path = %path.display(), "loaded config file");
    }
    let file_config = loaded.config.unwrap_or_default();

    let config = build_config(&args, &file_config)?;
    let mut doc = read_document(&args)?;
    if let Some(path) = args.suggestions.as_deref() {
        let suggestions = load_word_list(path)?;
        info!(count = suggestions.len(), "loaded search suggestions");
        doc.search_suggestions.extend(suggestions);
    }

    let analyzer = KeywordAnalyzer::new(config)?;
    let report = match analyzer.analyze(Arc::new(doc)).await {
        Ok(report) => report,
        Err(e @ AnalysisError::InsufficientContent { .. }) => {
            error!("{e}");
            return Ok(ExitCode::FAILURE);
        }
        Err(e) => return Err(e.into()),
    };

    let json = if args.pretty {
        serde_json::to_string_pretty(&report)
    } else {
        serde_json::to_string(&report)
    }
    .context("Failed to serialize report")?;

    if let Some(path) = args.output.as_deref() {
        fs::write(path, format!("{json}\n"))
            .with_context(|| format!("Failed to write report '{}'", path.display()))?;
        info!(path = %path.display(), "report written");
    } else {
        let mut stdout = io::stdout().lock();
        writeln!(stdout, "{json}").context("Failed to write report to stdout")?;
    }

    Ok(ExitCode::SUCCESS)
}

/// Built-in defaults, overridden by the config file, overridden by flags.
fn build_config(args: &Args, file: &FileConfig) -> Result<AnalyzerConfig> {
    let mut config = AnalyzerConfig::default();

    if let Some(max_keywords) = args.max_keywords {
        config.max_keywords = usize::from(max_keywords);
    } else if let Some(max_keywords) = file.max_keywords {
        config.max_keywords = max_keywords;
    }
    if let Some(min_len) = args.min_keyword_length {
        config.min_keyword_length = usize::from(min_len);
    } else if let Some(min_len) = file.min_keyword_length {
        config.min_keyword_length = min_len;
    }
    if args.include_stopwords {
        config.exclude_stopwords = false;
    } else if let Some(exclude) = file.exclude_stopwords {
        config.exclude_stopwords = exclude;
    }
    if let Some(code) = args.language.as_deref() {
        config.language = Language::from_code(code);
    } else if let Some(language) = file.language {
        config.language = language;
    }
    if let Some(depth) = args.depth.or(file.analysis_depth) {
        config.analysis_depth = depth;
    }
    if let Some(mode) = args.mode.or(file.mode) {
        config.mode = mode;
    }

    let stopwords_file = args
        .stopwords_file
        .as_deref()
        .or(file.custom_stopwords_file.as_deref());
    if let Some(path) = stopwords_file {
        config.custom_stopwords = load_word_list(path)?;
        debug!(
            count = config.custom_stopwords.len(),
            path = %path.display(),
            "loaded custom stopwords"
        );
    }

    Ok(config)
}

fn read_document(args: &Args) -> Result<ContentDocument> {
    let raw = if let Some(path) = args.input.as_deref() {
        fs::read_to_string(path)
            .with_context(|| format!("Failed to read input '{}'", path.display()))?
    } else {
        let mut buffer = String::new();
        io::stdin()
            .read_to_string(&mut buffer)
            .context("Failed to read input from stdin")?;
        buffer
    };

    serde_json::from_str(&raw).context("Input is not a valid content document")
}
