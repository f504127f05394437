//! Application configuration loading for CLI defaults.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use keyword_core::{AnalysisDepth, ContentMode, Language};

/// Largest accepted `max_keywords`.
pub const MAX_KEYWORDS_LIMIT: usize = 500;

/// Largest accepted `min_keyword_length`.
pub const MIN_KEYWORD_LENGTH_LIMIT: usize = 50;

/// File configuration for analyzer defaults.
#[derive(Debug, Clone, Default)]
pub struct FileConfig {
    /// Default cap on ranked keywords and output buckets.
    pub max_keywords: Option<usize>,
    /// Default minimum keyword length in characters.
    pub min_keyword_length: Option<usize>,
    /// Whether stopwords are removed from tokens.
    pub exclude_stopwords: Option<bool>,
    /// Stopword language.
    pub language: Option<Language>,
    /// Analysis depth hint.
    pub analysis_depth: Option<AnalysisDepth>,
    /// Path to a file of extra stopwords, one per line.
    pub custom_stopwords_file: Option<PathBuf>,
    /// Extraction pipeline.
    pub mode: Option<ContentMode>,
}

impl FileConfig {
    /// Validates config values against the CLI constraints.
    pub fn validate(&self) -> Result<()> {
        if let Some(max_keywords) = self.max_keywords
            && !(1..=MAX_KEYWORDS_LIMIT).contains(&max_keywords)
        {
            bail!(
                "Invalid config value for `max_keywords`: {max_keywords}. Expected range: 1..={MAX_KEYWORDS_LIMIT}"
            );
        }

        if let Some(min_len) = self.min_keyword_length
            && !(1..=MIN_KEYWORD_LENGTH_LIMIT).contains(&min_len)
        {
            bail!(
                "Invalid config value for `min_keyword_length`: {min_len}. Expected range: 1..={MIN_KEYWORD_LENGTH_LIMIT}"
            );
        }

        Ok(())
    }
}

/// Loaded config metadata.
#[derive(Debug, Clone)]
pub struct LoadedConfig {
    /// Resolved config path if a base directory is known.
    pub path: Option<PathBuf>,
    /// Parsed file config when a config file exists and was valid.
    pub config: Option<FileConfig>,
}

/// Resolves default config path.
///
/// Priority:
/// 1. `$XDG_CONFIG_HOME/keyword-extractor/config.toml`
/// 2. `$HOME/.config/keyword-extractor/config.toml`
#[must_use]
pub fn resolve_default_config_path() -> Option<PathBuf> {
    if let Some(xdg_config_home) = env_var_non_empty_os("XDG_CONFIG_HOME") {
        return Some(
            PathBuf::from(xdg_config_home)
                .join("keyword-extractor")
                .join("config.toml"),
        );
    }

    let home = env_var_non_empty_os("HOME")?;
    Some(
        PathBuf::from(home)
            .join(".config")
            .join("keyword-extractor")
            .join("config.toml"),
    )
}

fn env_var_non_empty_os(name: &str) -> Option<std::ffi::OsString> {
    let value = env::var_os(name)?;
    if value.is_empty() { None } else { Some(value) }
}

/// Loads config from default path if present.
pub fn load_default_file_config() -> Result<LoadedConfig> {
    let path = resolve_default_config_path();
    let config = match path.as_deref() {
        Some(path_ref) if path_ref.exists() => Some(load_file_config(path_ref)?),
        _ => None,
    };
    Ok(LoadedConfig { path, config })
}

fn load_file_config(path: &Path) -> Result<FileConfig> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file '{}'", path.display()))?;
    parse_config_str(&raw)
        .with_context(|| format!("Failed to parse config file '{}'", path.display()))
}

fn parse_config_str(raw: &str) -> Result<FileConfig> {
    let mut cfg = FileConfig::default();
    for (line_index, raw_line) in raw.lines().enumerate() {
        let line = strip_inline_comment(raw_line).trim();
        if line.is_empty() {
            continue;
        }

        let Some((raw_key, raw_value)) = line.split_once('=') else {
            bail!(
                "Invalid config syntax on line {}: expected key = value",
                line_index + 1
            );
        };

        let key = raw_key.trim();
        let value = raw_value.trim();
        let line_no = line_index + 1;

        match key {
            "max_keywords" => {
                let parsed = parse_integer_usize(value)
                    .with_context(|| format!("Invalid `max_keywords` value on line {line_no}"))?;
                cfg.max_keywords = Some(parsed);
            }
            "min_keyword_length" => {
                let parsed = parse_integer_usize(value).with_context(|| {
                    format!("Invalid `min_keyword_length` value on line {line_no}")
                })?;
                cfg.min_keyword_length = Some(parsed);
            }
            "exclude_stopwords" => {
                let parsed = parse_boolean(value).with_context(|| {
                    format!("Invalid `exclude_stopwords` value on line {line_no}")
                })?;
                cfg.exclude_stopwords = Some(parsed);
            }
            "language" => {
                let parsed = parse_string_literal(value)
                    .with_context(|| format!("Invalid `language` value on line {line_no}"))?;
                cfg.language = Some(Language::from_code(&parsed));
            }
            "analysis_depth" => {
                let parsed = parse_string_literal(value)
                    .with_context(|| format!("Invalid `analysis_depth` value on line {line_no}"))?;
                let depth = parsed.parse::<AnalysisDepth>().map_err(|e| {
                    anyhow::anyhow!("Invalid `analysis_depth` value on line {line_no}: {e}")
                })?;
                cfg.analysis_depth = Some(depth);
            }
            "custom_stopwords_file" => {
                let parsed = parse_string_literal(value).with_context(|| {
                    format!("Invalid `custom_stopwords_file` value on line {line_no}")
                })?;
                cfg.custom_stopwords_file = Some(PathBuf::from(parsed));
            }
            "mode" => {
                let parsed = parse_string_literal(value)
                    .with_context(|| format!("Invalid `mode` value on line {line_no}"))?;
                let mode = parsed.parse::<ContentMode>().map_err(|e| {
                    anyhow::anyhow!("Invalid `mode` value on line {line_no}: {e}")
                })?;
                cfg.mode = Some(mode);
            }
            unknown => {
                bail!("Unknown configuration key: '{unknown}' on line {line_no}");
            }
        }
    }
    cfg.validate()?;
    Ok(cfg)
}

/// Reads a word list: one entry per line, blank lines and `#` comments skipped.
pub fn load_word_list(path: &Path) -> Result<Vec<String>> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Cannot read word list '{}'", path.display()))?;

    let words = content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(String::from)
        .collect();

    Ok(words)
}

fn strip_inline_comment(line: &str) -> &str {
    let mut in_string = false;
    for (index, ch) in line.char_indices() {
        match ch {
            '"' => in_string = !in_string,
            '#' if !in_string => return &line[..index],
            _ => {}
        }
    }
    line
}

fn parse_string_literal(raw_value: &str) -> Result<String> {
    if raw_value.len() < 2 || !raw_value.starts_with('"') || !raw_value.ends_with('"') {
        bail!("Expected double-quoted string");
    }
    Ok(raw_value[1..raw_value.len() - 1].to_string())
}

fn parse_integer_usize(raw_value: &str) -> Result<usize> {
    let token = raw_value.trim();
    if token.is_empty() {
        bail!("Expected integer value");
    }
    let value = token.parse::<i128>()?;
    if value < 0 {
        bail!("Expected non-negative integer");
    }
    usize::try_from(value).map_err(|_| anyhow::anyhow!("Integer value out of range"))
}

fn parse_boolean(raw_value: &str) -> Result<bool> {
    match raw_value.trim() {
        "true" => Ok(true),
        "false" => Ok(false),
        _ => bail!("Expected 'true' or 'false'"),
    }
}
