//! Cleaning, tokenization and token filtering.

use std::collections::HashMap;
use std::sync::LazyLock;

use regex::Regex;
use unicode_segmentation::UnicodeSegmentation;

use super::StopwordSet;
use crate::config::AnalyzerConfig;

#[allow(clippy::expect_used)]
static WHITESPACE_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("whitespace regex is valid")); // Static pattern, safe to panic

#[allow(clippy::expect_used)]
static NON_WORD_CHAR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^\w\s-]").expect("non-word regex is valid")); // Static pattern, safe to panic

#[allow(clippy::expect_used)]
static NUMERIC_TOKEN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b\d+\b").expect("numeric regex is valid")); // Static pattern, safe to panic

/// Collapses whitespace, replaces characters outside word/hyphen/space with a
/// space, and removes standalone numbers.
#[must_use]
pub fn clean(text: &str) -> String {
    if text.is_empty() {
        return String::new();
    }
    let collapsed = WHITESPACE_RUN.replace_all(text, " ");
    let stripped = NON_WORD_CHAR.replace_all(collapsed.trim(), " ");
    NUMERIC_TOKEN.replace_all(&stripped, "").into_owned()
}

/// Splits text into trimmed, non-empty sentences (UAX #29 boundaries).
#[must_use]
pub fn sentences(text: &str) -> Vec<String> {
    text.unicode_sentences()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect()
}

/// Contiguous `n`-word phrases over `tokens`.
#[must_use]
pub fn ngrams(tokens: &[String], n: usize) -> Vec<String> {
    if n == 0 || tokens.len() < n {
        return Vec::new();
    }
    tokens.windows(n).map(|window| window.join(" ")).collect()
}

/// Single tokens followed by every n-gram from 2 up to `max_n`.
#[must_use]
pub fn all_ngrams(tokens: &[String], max_n: usize) -> Vec<String> {
    let mut all = tokens.to_vec();
    for n in 2..=max_n.min(tokens.len()) {
        all.extend(ngrams(tokens, n));
    }
    all
}

/// Occurrence count per token.
#[must_use]
pub fn frequency(tokens: &[String]) -> HashMap<String, usize> {
    let mut counts = HashMap::new();
    for token in tokens {
        *counts.entry(token.clone()).or_insert(0) += 1;
    }
    counts
}

/// Min-max scales scores into 0..=100. A zero range is treated as 1.
#[must_use]
pub fn normalize_scores(scores: &HashMap<String, f64>) -> HashMap<String, f64> {
    let max = scores.values().copied().fold(f64::NEG_INFINITY, f64::max);
    let min = scores.values().copied().fold(f64::INFINITY, f64::min);
    let range = if max - min == 0.0 { 1.0 } else { max - min };
    scores
        .iter()
        .map(|(key, score)| (key.clone(), (score - min) / range * 100.0))
        .collect()
}

/// Tokenizer and token filter configured from an [`AnalyzerConfig`].
#[derive(Debug, Clone)]
pub struct TextProcessor {
    min_keyword_length: usize,
    exclude_stopwords: bool,
    stopwords: StopwordSet,
}

impl TextProcessor {
    #[must_use]
    pub fn new(config: &AnalyzerConfig) -> Self {
        Self {
            min_keyword_length: config.min_keyword_length,
            exclude_stopwords: config.exclude_stopwords,
            stopwords: StopwordSet::new(config.language, &config.custom_stopwords),
        }
    }

    #[must_use]
    pub fn min_keyword_length(&self) -> usize {
        self.min_keyword_length
    }

    #[must_use]
    pub fn stopwords(&self) -> &StopwordSet {
        &self.stopwords
    }

    /// True if the token is too short to be a keyword on its own.
    #[must_use]
    pub fn is_too_short(&self, token: &str) -> bool {
        token.chars().count() < self.min_keyword_length
    }

    /// Cleans then lowercases `text` and splits it into words.
    #[must_use]
    pub fn tokenize(&self, text: &str) -> Vec<String> {
        clean(text)
            .to_lowercase()
            .unicode_words()
            .map(String::from)
            .collect()
    }

    /// Drops stopwords, custom stopwords and tokens under the minimum length.
    ///
    /// Returns the tokens untouched when stopword exclusion is disabled.
    #[must_use]
    pub fn remove_stopwords(&self, tokens: Vec<String>) -> Vec<String> {
        if !self.exclude_stopwords {
            return tokens;
        }
        tokens
            .into_iter()
            .filter(|token| !self.stopwords.contains(token) && !self.is_too_short(token))
            .collect()
    }

    /// [`tokenize`](Self::tokenize) followed by [`remove_stopwords`](Self::remove_stopwords).
    #[must_use]
    pub fn content_tokens(&self, text: &str) -> Vec<String> {
        self.remove_stopwords(self.tokenize(text))
    }
}
