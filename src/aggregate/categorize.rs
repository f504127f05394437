//! Output buckets and related-term groups over the ranked keyword set.

use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::AggregatedKeyword;
use crate::extract::Method;
use crate::metrics::{self, Competition};

const TOP_CAP: usize = 20;
const LONG_TAIL_CAP: usize = 15;
const QUESTION_CAP: usize = 10;
const COMMERCIAL_CAP: usize = 15;
const SHOP_COMMERCIAL_CAP: usize = 20;
const COMPETITION_CAP: usize = 10;
const SEARCH_SUGGESTION_CAP: usize = 20;
const PRODUCT_CAP: usize = 15;
const BRAND_CAP: usize = 10;
const RELATED_CAP: usize = 15;

/// How many of the best-scoring keywords feed related-term detection.
pub const RELATED_POOL: usize = 30;

/// Minimum sentence co-occurrences for a pair to count as related.
pub const MIN_PAIR_COUNT: usize = 2;

/// Keywords by competition tier, in score order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CompetitionBuckets {
    pub high: Vec<AggregatedKeyword>,
    pub medium: Vec<AggregatedKeyword>,
    pub low: Vec<AggregatedKeyword>,
}

/// A keyword from the related-term group with its relatedness score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RelatedKeyword {
    #[serde(flatten)]
    pub keyword: AggregatedKeyword,
    pub lsi_score: usize,
}

/// Everything the report layer consumes.
///
/// The shop-only buckets are `None` for article and general pages.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategorizedKeywords {
    pub all: Vec<AggregatedKeyword>,
    pub top_keywords: Vec<AggregatedKeyword>,
    pub long_tail_keywords: Vec<AggregatedKeyword>,
    pub question_keywords: Vec<AggregatedKeyword>,
    pub commercial_keywords: Vec<AggregatedKeyword>,
    pub competition_keywords: CompetitionBuckets,
    pub lsi_keywords: Vec<RelatedKeyword>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub search_suggestions: Option<Vec<AggregatedKeyword>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub product_keywords: Option<Vec<AggregatedKeyword>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub brand_keywords: Option<Vec<AggregatedKeyword>>,
}

/// Parameters of [`categorize`].
#[derive(Debug, Clone, Copy)]
pub struct CategorizeOptions<'a> {
    /// Caps `all` and every bucket.
    pub max_keywords: usize,
    /// Sentences for related-term detection. When empty, keywords are
    /// related by shared words instead.
    pub sentences: &'a [String],
    /// Adds the shop buckets (search suggestions, products, brands).
    pub commerce: bool,
}

/// Splits score-ordered keywords into output buckets.
///
/// Only the first `max_keywords` records are considered. Every bucket keeps
/// score order except `top_keywords`, which is re-sorted by frequency.
#[must_use]
pub fn categorize(
    mut ranked: Vec<AggregatedKeyword>,
    options: &CategorizeOptions<'_>,
) -> CategorizedKeywords {
    let max = options.max_keywords;
    let cap = |limit: usize| limit.min(max);
    ranked.truncate(max);

    let pick = |limit: usize, keep: &dyn Fn(&AggregatedKeyword) -> bool| -> Vec<AggregatedKeyword> {
        ranked.iter().filter(|k| keep(k)).take(limit).cloned().collect()
    };

    let mut top_keywords = ranked.clone();
    top_keywords.sort_by(|a, b| b.frequency.cmp(&a.frequency));
    top_keywords.truncate(cap(TOP_CAP));

    let commercial_cap = if options.commerce {
        SHOP_COMMERCIAL_CAP
    } else {
        COMMERCIAL_CAP
    };

    let competition_keywords = CompetitionBuckets {
        high: pick(COMPETITION_CAP, &|k| k.competition == Competition::High),
        medium: pick(COMPETITION_CAP, &|k| k.competition == Competition::Medium),
        low: pick(COMPETITION_CAP, &|k| k.competition == Competition::Low),
    };

    let lsi_keywords = if options.sentences.is_empty() {
        related_by_shared_words(&ranked, cap(RELATED_CAP))
    } else {
        related_by_cooccurrence(&ranked, options.sentences, cap(RELATED_CAP))
    };

    let (search_suggestions, product_keywords, brand_keywords) = if options.commerce {
        (
            Some(pick(cap(SEARCH_SUGGESTION_CAP), &|k| k.is_search_term)),
            Some(pick(cap(PRODUCT_CAP), &|k| {
                k.found_by_any(&[Method::ProductSchema, Method::ProductCategory])
            })),
            Some(pick(cap(BRAND_CAP), &|k| {
                k.found_by_any(&[Method::BrandSchema, Method::BrandTitle])
            })),
        )
    } else {
        (None, None, None)
    };

    let categorized = CategorizedKeywords {
        top_keywords,
        long_tail_keywords: pick(cap(LONG_TAIL_CAP), &|k| k.is_long_tail),
        question_keywords: pick(cap(QUESTION_CAP), &|k| k.is_question),
        commercial_keywords: pick(cap(commercial_cap), &|k| k.has_commercial_intent),
        competition_keywords,
        lsi_keywords,
        search_suggestions,
        product_keywords,
        brand_keywords,
        all: ranked,
    };
    debug!(
        all = categorized.all.len(),
        long_tail = categorized.long_tail_keywords.len(),
        related = categorized.lsi_keywords.len(),
        "categorized keywords"
    );
    categorized
}

/// Keywords that share sentences with other top keywords.
///
/// Among the first [`RELATED_POOL`] keywords, pairs co-occurring in at least
/// [`MIN_PAIR_COUNT`] sentences qualify; each keyword scores the sum of its
/// qualifying pair counts. Highest score first, ties in rank order.
#[must_use]
pub fn related_by_cooccurrence(
    ranked: &[AggregatedKeyword],
    sentences: &[String],
    limit: usize,
) -> Vec<RelatedKeyword> {
    let pool = &ranked[..ranked.len().min(RELATED_POOL)];
    let texts: Vec<&str> = pool.iter().map(|k| k.keyword.as_str()).collect();

    let mut scores: HashMap<String, usize> = HashMap::new();
    for ((first, second), count) in metrics::co_occurrence(texts.as_slice(), sentences) {
        if count < MIN_PAIR_COUNT {
            continue;
        }
        *scores.entry(first).or_insert(0) += count;
        *scores.entry(second).or_insert(0) += count;
    }
    rank_related(pool, &scores, limit)
}

/// Keywords that share at least one word with another top keyword.
///
/// Each keyword scores the total size of every multi-member word group it
/// belongs to.
#[must_use]
pub fn related_by_shared_words(ranked: &[AggregatedKeyword], limit: usize) -> Vec<RelatedKeyword> {
    let pool = &ranked[..ranked.len().min(RELATED_POOL)];

    let mut groups: BTreeMap<&str, Vec<&str>> = BTreeMap::new();
    for kw in pool {
        let mut words: Vec<&str> = kw.keyword.split_whitespace().collect();
        words.sort_unstable();
        words.dedup();
        for word in words {
            groups.entry(word).or_default().push(kw.keyword.as_str());
        }
    }

    let mut scores: HashMap<String, usize> = HashMap::new();
    for members in groups.values().filter(|members| members.len() > 1) {
        for member in members {
            *scores.entry((*member).to_string()).or_insert(0) += members.len();
        }
    }
    rank_related(pool, &scores, limit)
}

fn rank_related(
    pool: &[AggregatedKeyword],
    scores: &HashMap<String, usize>,
    limit: usize,
) -> Vec<RelatedKeyword> {
    let mut related: Vec<RelatedKeyword> = pool
        .iter()
        .filter_map(|kw| {
            scores.get(&kw.keyword).map(|&lsi_score| RelatedKeyword {
                keyword: kw.clone(),
                lsi_score,
            })
        })
        .collect();
    related.sort_by(|a, b| b.lsi_score.cmp(&a.lsi_score));
    related.truncate(limit);
    related
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::aggregate::{MergeOptions, merge};
    use crate::extract::Candidate;

    fn ranked(words: &[(&str, Method)]) -> Vec<AggregatedKeyword> {
        let candidates = words.iter().map(|(w, m)| Candidate::new(*w, *m));
        merge(
            candidates,
            &MergeOptions {
                prominence_text: "",
                min_keyword_length: 3,
                search_term_bonus: 0,
            },
        )
    }

    fn keywords(list: &[AggregatedKeyword]) -> Vec<&str> {
        list.iter().map(|k| k.keyword.as_str()).collect()
    }

    fn article(max_keywords: usize) -> CategorizeOptions<'static> {
        CategorizeOptions {
            max_keywords,
            sentences: &[],
            commerce: false,
        }
    }

    #[test]
    fn test_buckets_filter_by_flags() {
        let ranked = ranked(&[
            ("how to clean suede boots", Method::Rake),
            ("buy leather boots", Method::Rake),
            ("boots", Method::Tfidf),
        ]);
        let categorized = categorize(ranked, &article(50));
        assert_eq!(categorized.all.len(), 3);
        assert_eq!(
            keywords(&categorized.question_keywords),
            vec!["how to clean suede boots"]
        );
        assert_eq!(
            keywords(&categorized.commercial_keywords),
            vec!["buy leather boots"]
        );
        assert_eq!(categorized.long_tail_keywords.len(), 2);
        assert!(categorized.search_suggestions.is_none());
        assert!(categorized.product_keywords.is_none());
    }

    #[test]
    fn test_max_keywords_caps_all_buckets() {
        let ranked = ranked(&[
            ("first long phrase", Method::Rake),
            ("second long phrase", Method::Rake),
            ("third long phrase", Method::Rake),
        ]);
        let categorized = categorize(ranked, &article(2));
        assert_eq!(categorized.all.len(), 2);
        assert_eq!(categorized.top_keywords.len(), 2);
        assert_eq!(categorized.long_tail_keywords.len(), 2);
    }

    #[test]
    fn test_top_keywords_sorted_by_frequency_others_by_score() {
        let ranked = ranked(&[
            ("trail running shoes", Method::Rake),
            ("shoes", Method::Tfidf),
            ("shoes", Method::Meta),
            ("shoes", Method::Heading),
        ]);
        let by_score = keywords(&ranked).iter().map(|s| (*s).to_string()).collect::<Vec<_>>();
        let categorized = categorize(ranked, &article(50));
        assert_eq!(categorized.top_keywords[0].keyword, "shoes");
        assert_eq!(keywords(&categorized.all), by_score);
    }

    #[test]
    fn test_competition_buckets_match_tiers() {
        let ranked = ranked(&[
            ("trail running shoes", Method::Rake),
            ("running shoes", Method::Rake),
            ("shoes", Method::Rake),
        ]);
        let categorized = categorize(ranked, &article(50));
        let buckets = &categorized.competition_keywords;
        assert!(buckets.high.iter().all(|k| k.competition == Competition::High));
        assert!(buckets.medium.iter().all(|k| k.competition == Competition::Medium));
        assert!(buckets.low.iter().all(|k| k.competition == Competition::Low));
        assert_eq!(keywords(&buckets.low), vec!["trail running shoes"]);
        assert_eq!(keywords(&buckets.medium), vec!["running shoes"]);
        assert_eq!(keywords(&buckets.high), vec!["shoes"]);
    }

    #[test]
    fn test_related_pairs_need_two_sentences() {
        let ranked = ranked(&[("red shoes", Method::Rake), ("shoes fit", Method::Rake)]);
        let twice: Vec<String> = ["red shoes fit snugly", "the red shoes fit everyone"]
            .map(String::from)
            .to_vec();
        let related = related_by_cooccurrence(&ranked, &twice, 15);
        assert_eq!(related.len(), 2);
        assert!(related.iter().all(|r| r.lsi_score == 2));

        let once: Vec<String> = ["red shoes are great", "red shoes fit well"]
            .map(String::from)
            .to_vec();
        assert!(related_by_cooccurrence(&ranked, &once, 15).is_empty());
    }

    #[test]
    fn test_related_by_shared_words_scores_group_sizes() {
        let ranked = ranked(&[
            ("leather boots", Method::Rake),
            ("suede boots", Method::Rake),
            ("rain boots", Method::Rake),
            ("wool socks", Method::Rake),
        ]);
        let related = related_by_shared_words(&ranked, 15);
        assert_eq!(related.len(), 3);
        assert!(related.iter().all(|r| r.lsi_score == 3));
        assert!(related.iter().all(|r| r.keyword.keyword != "wool socks"));
    }

    #[test]
    fn test_commerce_buckets_present() {
        let ranked = ranked(&[
            ("trail shoes", Method::SearchSuggestion),
            ("stridex", Method::BrandSchema),
            ("runner", Method::ProductSchema),
        ]);
        let categorized = categorize(
            ranked,
            &CategorizeOptions {
                max_keywords: 50,
                sentences: &[],
                commerce: true,
            },
        );
        assert_eq!(
            keywords(&categorized.search_suggestions.unwrap()),
            vec!["trail shoes"]
        );
        assert_eq!(keywords(&categorized.brand_keywords.unwrap()), vec!["stridex"]);
        assert_eq!(keywords(&categorized.product_keywords.unwrap()), vec!["runner"]);
    }

    #[test]
    fn test_related_keyword_serializes_flat() {
        let ranked = ranked(&[("leather boots", Method::Rake), ("suede boots", Method::Rake)]);
        let related = related_by_shared_words(&ranked, 15);
        let value = serde_json::to_value(&related[0]).unwrap();
        assert_eq!(value["lsiScore"], 2);
        assert!(value.get("keyword").unwrap().is_string());
    }

    #[test]
    fn test_empty_input_yields_empty_buckets() {
        let categorized = categorize(Vec::new(), &article(50));
        assert!(categorized.all.is_empty());
        assert!(categorized.lsi_keywords.is_empty());
        assert!(categorized.competition_keywords.high.is_empty());
    }
}
