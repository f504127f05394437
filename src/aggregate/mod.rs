//! Merging of method-tagged candidates into one ranked keyword set.
//!
//! The merge owns a local map from normalized keyword to its running tally;
//! nothing survives the call. Records are scored once every candidate has
//! been counted, since difficulty depends on the total distinct count.

mod categorize;

pub use categorize::{
    CategorizeOptions, CategorizedKeywords, CompetitionBuckets, RelatedKeyword, categorize,
    related_by_cooccurrence, related_by_shared_words,
};

use std::collections::{BTreeSet, HashMap};

use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use crate::extract::{Candidate, Method};
use crate::metrics::{self, Competition, KeywordMetrics};

/// Score bonus for keywords observed as real search suggestions.
pub const SEARCH_TERM_BONUS: u32 = 20;

/// One distinct keyword with its provenance and SEO metrics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AggregatedKeyword {
    /// Lowercased, trimmed keyword text. Unique within a merge result.
    pub keyword: String,
    /// Number of candidates merged into this record, across all methods.
    pub frequency: usize,
    pub methods: BTreeSet<Method>,
    /// Highest TF-IDF weight among the merged candidates, 0 if none.
    pub tfidf_score: f64,
    pub prominence: u32,
    pub difficulty: f64,
    pub seo_score: u32,
    pub competition: Competition,
    pub is_long_tail: bool,
    pub is_question: bool,
    pub has_commercial_intent: bool,
    pub is_search_term: bool,
}

impl AggregatedKeyword {
    /// True if any of `methods` contributed to this keyword.
    #[must_use]
    pub fn found_by_any(&self, methods: &[Method]) -> bool {
        methods.iter().any(|m| self.methods.contains(m))
    }
}

/// Parameters of a single merge.
#[derive(Debug, Clone, Copy)]
pub struct MergeOptions<'a> {
    /// Text that prominence is measured against.
    pub prominence_text: &'a str,
    /// Keywords shorter than this (in chars) are dropped.
    pub min_keyword_length: usize,
    /// Added to the score of search-suggestion keywords, capped at 100.
    pub search_term_bonus: u32,
}

struct Tally {
    keyword: String,
    frequency: usize,
    methods: BTreeSet<Method>,
    tfidf_score: f64,
}

/// Deduplicates candidates by lowercase text, scores them and ranks them.
///
/// The result is ordered by descending SEO score; equal scores keep the
/// order in which their keyword was first merged.
#[must_use]
#[instrument(skip_all, fields(min_len = options.min_keyword_length))]
pub fn merge<I>(candidates: I, options: &MergeOptions<'_>) -> Vec<AggregatedKeyword>
where
    I: IntoIterator<Item = Candidate>,
{
    let mut index: HashMap<String, usize> = HashMap::new();
    let mut tallies: Vec<Tally> = Vec::new();
    let mut dropped = 0usize;

    for candidate in candidates {
        let keyword = candidate.text.trim().to_lowercase();
        if keyword.is_empty() || keyword.chars().count() < options.min_keyword_length {
            dropped += 1;
            continue;
        }

        let slot = *index.entry(keyword.clone()).or_insert_with(|| {
            tallies.push(Tally {
                keyword,
                frequency: 0,
                methods: BTreeSet::new(),
                tfidf_score: 0.0,
            });
            tallies.len() - 1
        });

        let tally = &mut tallies[slot];
        tally.frequency += 1;
        tally.methods.insert(candidate.method);
        if let Some(score) = candidate.score {
            tally.tfidf_score = tally.tfidf_score.max(score);
        }
    }

    let total = tallies.len();
    let mut keywords: Vec<AggregatedKeyword> = tallies
        .into_iter()
        .map(|tally| score_tally(tally, total, options))
        .collect();

    keywords.sort_by(|a, b| b.seo_score.cmp(&a.seo_score));
    debug!(keywords = keywords.len(), dropped, "merged candidates");
    keywords
}

fn score_tally(tally: Tally, total: usize, options: &MergeOptions<'_>) -> AggregatedKeyword {
    let keyword = tally.keyword;
    let prominence = metrics::prominence(&keyword, options.prominence_text);
    let difficulty = metrics::difficulty(&keyword, tally.frequency, total);
    let is_search_term = tally.methods.contains(&Method::SearchSuggestion);

    let mut seo_score = metrics::seo_score(
        &keyword,
        &KeywordMetrics {
            prominence,
            frequency: tally.frequency,
            difficulty,
        },
    );
    if is_search_term {
        seo_score = (seo_score + options.search_term_bonus).min(100);
    }

    AggregatedKeyword {
        prominence,
        difficulty,
        seo_score,
        competition: Competition::from_difficulty(difficulty),
        is_long_tail: metrics::is_long_tail(&keyword),
        is_question: metrics::is_question(&keyword),
        has_commercial_intent: metrics::has_commercial_intent(&keyword)
            || tally.methods.contains(&Method::PriceTerm),
        is_search_term,
        frequency: tally.frequency,
        methods: tally.methods,
        tfidf_score: tally.tfidf_score,
        keyword,
    }
}
