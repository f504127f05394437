//! Phrase extraction using RAKE (Rapid Automatic Keyword Extraction).
//!
//! Candidate phrases are the runs of content words between stopwords (or
//! too-short tokens) inside each sentence. Each word is scored by
//! `(degree + frequency) / frequency`, where degree counts the other words
//! it shares phrases with, and a phrase scores the sum of its words. Words
//! that recur inside longer phrases therefore lift every phrase they appear
//! in.

use std::collections::{HashMap, HashSet};

use tracing::instrument;
use unicode_segmentation::UnicodeSegmentation;

use super::{Candidate, Method};
use crate::config::AnalyzerConfig;
use crate::text::{StopwordSet, sentences};

/// A distinct candidate phrase with its RAKE score.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoredPhrase {
    pub phrase: String,
    pub score: f64,
}

/// RAKE extractor with a cached stopword set.
pub struct RakeExtractor {
    stopwords: StopwordSet,
    min_word_length: usize,
    max_words_per_keyword: usize,
}

impl std::fmt::Debug for RakeExtractor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RakeExtractor")
            .field("min_word_length", &self.min_word_length)
            .field("max_words_per_keyword", &self.max_words_per_keyword)
            .finish_non_exhaustive()
    }
}

impl RakeExtractor {
    /// Creates an extractor using the configured language and custom stopwords.
    #[must_use]
    pub fn new(config: &AnalyzerConfig) -> Self {
        Self::with_stopwords(
            StopwordSet::new(config.language, &config.custom_stopwords),
            config,
        )
    }

    /// Creates an extractor around an already-loaded stopword set.
    #[must_use]
    pub fn with_stopwords(stopwords: StopwordSet, config: &AnalyzerConfig) -> Self {
        Self {
            stopwords,
            min_word_length: config.min_keyword_length,
            max_words_per_keyword: config.max_words_per_keyword,
        }
    }

    /// Splits one sentence into candidate phrases.
    ///
    /// Runs longer than `max_words_per_keyword` are discarded, not truncated.
    #[must_use]
    pub fn candidate_phrases(&self, sentence: &str) -> Vec<String> {
        let lowered = sentence.to_lowercase();
        let mut phrases = Vec::new();
        let mut current: Vec<&str> = Vec::new();

        for token in lowered.unicode_words() {
            if self.stopwords.contains(token) || token.chars().count() < self.min_word_length {
                self.flush(&mut current, &mut phrases);
            } else {
                current.push(token);
            }
        }
        self.flush(&mut current, &mut phrases);
        phrases
    }

    fn flush(&self, current: &mut Vec<&str>, phrases: &mut Vec<String>) {
        if !current.is_empty() && current.len() <= self.max_words_per_keyword {
            phrases.push(current.join(" "));
        }
        current.clear();
    }

    /// Extracts and scores phrases from `text`, highest score first.
    ///
    /// Each distinct phrase appears once. Ties keep first-appearance order.
    #[must_use]
    #[instrument(skip(self, text), fields(text_len = text.len()))]
    pub fn extract(&self, text: &str) -> Vec<ScoredPhrase> {
        if text.trim().is_empty() {
            return Vec::new();
        }
        let phrases: Vec<String> = sentences(text)
            .iter()
            .flat_map(|sentence| self.candidate_phrases(sentence))
            .collect();
        score_phrases(&phrases)
    }

    /// Top `limit` phrases as `rake` candidates.
    #[must_use]
    pub fn candidates(&self, text: &str, limit: usize) -> Vec<Candidate> {
        self.extract(text)
            .into_iter()
            .take(limit)
            .map(|scored| Candidate::new(scored.phrase, Method::Rake))
            .collect()
    }
}

/// Scores phrase occurrences by word degree and frequency.
///
/// `phrases` holds every occurrence, so a phrase seen twice counts twice
/// towards its words' frequency and degree.
#[must_use]
pub fn score_phrases(phrases: &[String]) -> Vec<ScoredPhrase> {
    let mut word_frequency: HashMap<&str, usize> = HashMap::new();
    let mut word_degree: HashMap<&str, usize> = HashMap::new();

    for phrase in phrases {
        let words: Vec<&str> = phrase.split(' ').collect();
        let degree = words.len() - 1;
        for word in words {
            *word_frequency.entry(word).or_insert(0) += 1;
            *word_degree.entry(word).or_insert(0) += degree;
        }
    }

    let mut seen: HashSet<&str> = HashSet::new();
    let mut scored = Vec::new();
    for phrase in phrases {
        if !seen.insert(phrase.as_str()) {
            continue;
        }
        #[allow(clippy::cast_precision_loss)]
        let score = phrase
            .split(' ')
            .map(|word| {
                let freq = word_frequency.get(word).copied().unwrap_or(1) as f64;
                let deg = word_degree.get(word).copied().unwrap_or(0) as f64;
                (deg + freq) / freq
            })
            .sum();
        scored.push(ScoredPhrase {
            phrase: phrase.clone(),
            score,
        });
    }

    scored.sort_by(|a, b| b.score.total_cmp(&a.score));
    scored
}
