//! SEO heuristics computed per keyword.
//!
//! Every function here is pure. Difficulty, competition and score are
//! estimates derived from in-page statistics only; the thresholds and
//! weights are fixed so that output stays comparable between runs.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Leading words that mark a keyword as a question.
pub const QUESTION_WORDS: &[&str] = &[
    "what", "when", "where", "why", "who", "how", "which", "can", "does", "is", "are",
];

/// Purchase-signalling vocabulary (substring match).
pub const COMMERCIAL_TERMS: &[&str] = &[
    "buy",
    "purchase",
    "order",
    "price",
    "cost",
    "cheap",
    "affordable",
    "discount",
    "sale",
    "deal",
    "coupon",
    "free shipping",
    "best",
    "review",
    "comparison",
    "vs",
    "alternative",
    "shop",
    "store",
];

/// Difficulty at or above which competition is high.
pub const HIGH_COMPETITION_DIFFICULTY: f64 = 70.0;

/// Difficulty at or above which competition is medium.
pub const MEDIUM_COMPETITION_DIFFICULTY: f64 = 40.0;

/// Heuristic competition tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Competition {
    High,
    Medium,
    Low,
}

impl Competition {
    /// Tier for a difficulty estimate.
    #[must_use]
    pub fn from_difficulty(difficulty: f64) -> Self {
        if difficulty >= HIGH_COMPETITION_DIFFICULTY {
            Self::High
        } else if difficulty >= MEDIUM_COMPETITION_DIFFICULTY {
            Self::Medium
        } else {
            Self::Low
        }
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::High => "high",
            Self::Medium => "medium",
            Self::Low => "low",
        }
    }
}

impl fmt::Display for Competition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Inputs to [`seo_score`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct KeywordMetrics {
    pub prominence: u32,
    pub frequency: usize,
    pub difficulty: f64,
}

/// Number of whitespace-separated words.
#[must_use]
pub fn word_count(keyword: &str) -> usize {
    keyword.split_whitespace().count()
}

/// Position score of the first case-insensitive occurrence of `keyword`.
///
/// `100 - position / length * 100`, rounded; 0 when absent.
#[must_use]
pub fn prominence(keyword: &str, text: &str) -> u32 {
    let lower_text = text.to_lowercase();
    let lower_keyword = keyword.to_lowercase();
    if lower_keyword.is_empty() {
        return 0;
    }
    let Some(byte_pos) = lower_text.find(&lower_keyword) else {
        return 0;
    };

    let position = lower_text[..byte_pos].chars().count();
    let length = lower_text.chars().count();
    #[allow(clippy::cast_precision_loss)]
    let score = 100.0 - (position as f64 / length as f64 * 100.0);
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let rounded = score.round().clamp(0.0, 100.0) as u32;
    rounded
}

/// Difficulty estimate in roughly 20..=100.
///
/// Single words start at 60, pairs at 40, long-tail phrases at 20, each
/// raised by the keyword's share of `total_keywords`.
#[must_use]
pub fn difficulty(keyword: &str, frequency: usize, total_keywords: usize) -> f64 {
    #[allow(clippy::cast_precision_loss)]
    let share = if total_keywords == 0 {
        0.0
    } else {
        frequency as f64 / total_keywords as f64
    };
    match word_count(keyword) {
        0 | 1 => 60.0 + share * 40.0,
        2 => 40.0 + share * 35.0,
        _ => 20.0 + share * 30.0,
    }
}

/// Three or more words.
#[must_use]
pub fn is_long_tail(keyword: &str) -> bool {
    word_count(keyword) >= 3
}

/// First word is interrogative, or the keyword contains `?`.
#[must_use]
pub fn is_question(keyword: &str) -> bool {
    let first = keyword
        .split_whitespace()
        .next()
        .unwrap_or_default()
        .to_lowercase();
    QUESTION_WORDS.contains(&first.as_str()) || keyword.contains('?')
}

/// Contains any commercial term.
#[must_use]
pub fn has_commercial_intent(keyword: &str) -> bool {
    let lower = keyword.to_lowercase();
    COMMERCIAL_TERMS.iter().any(|term| lower.contains(term))
}

/// Composite 0..=100 score.
///
/// Prominence weighs 30%, frequency adds up to 25 points, length up to 20
/// and inverse difficulty up to 25.
#[must_use]
pub fn seo_score(keyword: &str, metrics: &KeywordMetrics) -> u32 {
    #[allow(clippy::cast_precision_loss)]
    let frequency_points = (metrics.frequency as f64 * 5.0).min(25.0);
    #[allow(clippy::cast_precision_loss)]
    let length_points = (word_count(keyword) as f64 * 5.0).min(20.0);

    let score = f64::from(metrics.prominence) * 0.3
        + frequency_points
        + length_points
        + (25.0 - metrics.difficulty * 0.25);

    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let rounded = score.clamp(0.0, 100.0).round() as u32;
    rounded
}

/// Keyword density as a percentage of `total_words`.
#[must_use]
pub fn keyword_density(keyword: &str, total_words: usize) -> f64 {
    if total_words == 0 {
        return 0.0;
    }
    #[allow(clippy::cast_precision_loss)]
    let density = word_count(keyword) as f64 / total_words as f64 * 100.0;
    density
}

/// Counts sentences in which both keywords of a pair appear.
///
/// Presence is a case-insensitive substring test. Pairs are keyed in sorted
/// order, so `(a, b)` and `(b, a)` share a counter.
#[must_use]
pub fn co_occurrence<S: AsRef<str>>(
    keywords: &[S],
    sentences: &[String],
) -> BTreeMap<(String, String), usize> {
    let lowered: Vec<String> = keywords.iter().map(|k| k.as_ref().to_lowercase()).collect();
    let mut counts = BTreeMap::new();

    for sentence in sentences {
        let sentence = sentence.to_lowercase();
        let present: Vec<&String> = lowered
            .iter()
            .filter(|kw| !kw.is_empty() && sentence.contains(kw.as_str()))
            .collect();

        for (i, first) in present.iter().enumerate() {
            for second in &present[i + 1..] {
                if first == second {
                    continue;
                }
                let key = if first <= second {
                    ((*first).clone(), (*second).clone())
                } else {
                    ((*second).clone(), (*first).clone())
                };
                *counts.entry(key).or_insert(0) += 1;
            }
        }
    }
    counts
}

/// Kind of advice in a [`Recommendation`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecommendationKind {
    Opportunity,
    Suggestion,
    Insight,
}

/// Human-readable advice derived from the keyword mix.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recommendation {
    #[serde(rename = "type")]
    pub kind: RecommendationKind,
    pub message: String,
}

/// Advice on long-tail coverage, question keywords and commercial focus.
#[must_use]
pub fn recommendations<S: AsRef<str>>(keywords: &[S]) -> Vec<Recommendation> {
    let mut advice = Vec::new();
    if keywords.is_empty() {
        return advice;
    }

    let total = keywords.len();
    let long_tail = keywords.iter().filter(|k| is_long_tail(k.as_ref())).count();
    let questions = keywords.iter().filter(|k| is_question(k.as_ref())).count();
    let commercial = keywords
        .iter()
        .filter(|k| has_commercial_intent(k.as_ref()))
        .count();

    if long_tail * 10 < total * 3 {
        advice.push(Recommendation {
            kind: RecommendationKind::Opportunity,
            message: "Consider targeting more long-tail keywords (3+ words) for easier ranking"
                .to_string(),
        });
    }
    if questions > 0 {
        advice.push(Recommendation {
            kind: RecommendationKind::Suggestion,
            message: format!(
                "Found {questions} question-based keywords - great for FAQ sections and voice search"
            ),
        });
    }
    if commercial * 2 > total {
        advice.push(Recommendation {
            kind: RecommendationKind::Insight,
            message: "High commercial intent detected - content is well-optimized for conversions"
                .to_string(),
        });
    }
    advice
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prominence_rewards_early_occurrence() {
        let text = "kayak paddles are light and kayak racks are heavy";
        assert_eq!(prominence("kayak", text), 100);
        assert_eq!(prominence("Racks", text), 31); // position 34 of 49 chars
        assert_eq!(prominence("canoe", text), 0);
        assert_eq!(prominence("kayak", ""), 0);
    }

    #[test]
    fn test_difficulty_by_word_count() {
        assert!((difficulty("shoes", 5, 10) - 80.0).abs() < 1e-9);
        assert!((difficulty("running shoes", 2, 10) - 47.0).abs() < 1e-9);
        assert!((difficulty("trail running shoes", 1, 10) - 23.0).abs() < 1e-9);
    }

    #[test]
    fn test_competition_thresholds() {
        assert_eq!(Competition::from_difficulty(70.0), Competition::High);
        assert_eq!(Competition::from_difficulty(69.99), Competition::Medium);
        assert_eq!(Competition::from_difficulty(40.0), Competition::Medium);
        assert_eq!(Competition::from_difficulty(39.99), Competition::Low);
    }

    #[test]
    fn test_is_long_tail() {
        assert!(is_long_tail("best running shoes for flat feet"));
        assert!(is_long_tail("trail running shoes"));
        assert!(!is_long_tail("running shoes"));
        assert!(!is_long_tail("shoes"));
    }

    #[test]
    fn test_is_question() {
        assert!(is_question("how to fix a bike"));
        assert!(!is_question("bike repair"));
        assert!(is_question("can bikes be repaired?"));
        assert!(is_question("bikes repaired?"));
        assert!(is_question("Is"));
    }

    #[test]
    fn test_question_ignores_mid_phrase_inversion() {
        assert!(!is_question("running is good for you"));
    }

    #[test]
    fn test_has_commercial_intent() {
        assert!(has_commercial_intent("best budget laptop deal"));
        assert!(has_commercial_intent("Free Shipping boots"));
        assert!(!has_commercial_intent("laptop specifications"));
    }

    #[test]
    fn test_seo_score_components() {
        let metrics = KeywordMetrics {
            prominence: 100,
            frequency: 2,
            difficulty: 26.0,
        };
        // 30 + 10 + 15 + 18.5 = 73.5
        assert_eq!(seo_score("trail running shoes", &metrics), 74);
    }

    #[test]
    fn test_seo_score_caps_components_and_bounds() {
        let metrics = KeywordMetrics {
            prominence: 100,
            frequency: 50,
            difficulty: 20.0,
        };
        // 30 + 25 + 20 + 20 = 95
        assert_eq!(seo_score("one two three four five six", &metrics), 95);

        let low = KeywordMetrics {
            prominence: 0,
            frequency: 0,
            difficulty: 100.0,
        };
        assert_eq!(seo_score("x", &low), 5);
    }

    #[test]
    fn test_keyword_density() {
        assert!((keyword_density("running shoes", 200) - 1.0).abs() < 1e-9);
        assert!(keyword_density("shoes", 0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_co_occurrence_counts_sentence_pairs() {
        let sentences: Vec<String> = [
            "red shoes fit well",
            "Red shoes fit everyone",
            "red shoes are great",
        ]
        .map(String::from)
        .to_vec();
        let counts = co_occurrence(&["shoes fit", "red shoes"], &sentences);
        assert_eq!(counts.len(), 1);
        assert_eq!(
            counts[&("red shoes".to_string(), "shoes fit".to_string())],
            2
        );
    }

    #[test]
    fn test_co_occurrence_single_sentence_pair_counts_once() {
        let sentences: Vec<String> = ["red shoes are great", "red shoes fit well"]
            .map(String::from)
            .to_vec();
        let counts = co_occurrence(&["red shoes", "shoes fit"], &sentences);
        assert_eq!(
            counts[&("red shoes".to_string(), "shoes fit".to_string())],
            1
        );
    }

    #[test]
    fn test_recommendations() {
        let keywords = ["shoes", "how to lace shoes", "buy shoes", "cheap boots"];
        let advice = recommendations(&keywords);
        let kinds: Vec<RecommendationKind> = advice.iter().map(|r| r.kind).collect();
        assert_eq!(
            kinds,
            vec![
                RecommendationKind::Opportunity,
                RecommendationKind::Suggestion
            ]
        );
        assert!(advice[1].message.contains("Found 1 question-based"));
        assert!(recommendations::<&str>(&[]).is_empty());
    }

    #[test]
    fn test_recommendations_commercial_insight() {
        let keywords = ["buy running shoes online", "best trail shoe deal", "laptop"];
        let advice = recommendations(&keywords);
        assert!(advice.iter().any(|r| r.kind == RecommendationKind::Insight));
        assert!(!advice.iter().any(|r| r.kind == RecommendationKind::Opportunity));
    }
}
