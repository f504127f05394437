//! Term weighting with TF-IDF computed inside a single page.
//!
//! Every sentence is a pseudo-document, so IDF reflects how a term is spread
//! across the page's sentences rather than how rare it is on the web. Term
//! frequency is counted over the whole text being scored.

use std::collections::{HashMap, HashSet};

use tracing::{debug, instrument};

use super::{Candidate, Method};
use crate::text::TextProcessor;

/// A term and its TF-IDF weight.
#[derive(Debug, Clone, PartialEq)]
pub struct TermWeight {
    pub term: String,
    pub weight: f64,
}

/// Weighs the terms of `text` against the `sentences` corpus, highest first.
///
/// Stopwords and terms shorter than the minimum length are skipped. Uses
/// `tf * (1 + ln(N / (1 + df)))`. Ties keep first-appearance order.
#[must_use]
#[instrument(skip_all, fields(sentences = sentences.len()))]
pub fn weigh_terms(text: &str, sentences: &[String], processor: &TextProcessor) -> Vec<TermWeight> {
    if sentences.is_empty() {
        return Vec::new();
    }

    let terms = |s: &str| -> Vec<String> {
        processor
            .tokenize(s)
            .into_iter()
            .filter(|t| !processor.stopwords().contains(t) && !processor.is_too_short(t))
            .collect()
    };

    let mut document_frequency: HashMap<String, usize> = HashMap::new();
    for sentence in sentences {
        let unique: HashSet<String> = terms(sentence).into_iter().collect();
        for term in unique {
            *document_frequency.entry(term).or_insert(0) += 1;
        }
    }

    let mut order: Vec<String> = Vec::new();
    let mut term_frequency: HashMap<String, usize> = HashMap::new();
    for term in terms(text) {
        let count = term_frequency.entry(term.clone()).or_insert(0);
        if *count == 0 {
            order.push(term);
        }
        *count += 1;
    }

    #[allow(clippy::cast_precision_loss)]
    let document_count = sentences.len() as f64;
    let mut weights: Vec<TermWeight> = order
        .into_iter()
        .map(|term| {
            let tf = term_frequency[&term];
            let df = document_frequency.get(&term).copied().unwrap_or(0);
            #[allow(clippy::cast_precision_loss)]
            let idf = 1.0 + (document_count / (1.0 + df as f64)).ln();
            #[allow(clippy::cast_precision_loss)]
            let weight = tf as f64 * idf;
            TermWeight { term, weight }
        })
        .collect();

    weights.sort_by(|a, b| b.weight.total_cmp(&a.weight));
    debug!(terms = weights.len(), "weighted terms");
    weights
}

/// Top `limit` TF-IDF terms as scored `tfidf` candidates.
#[must_use]
pub fn tfidf_keywords(
    text: &str,
    sentences: &[String],
    processor: &TextProcessor,
    limit: usize,
) -> Vec<Candidate> {
    weigh_terms(text, sentences, processor)
        .into_iter()
        .take(limit)
        .map(|tw| Candidate::scored(tw.term, Method::Tfidf, tw.weight))
        .collect()
}
