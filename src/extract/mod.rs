//! Keyword candidate extraction.
//!
//! Each extraction method reads the immutable [`ContentDocument`](crate::document::ContentDocument)
//! and produces its own list of [`Candidate`]s tagged with the [`Method`] that
//! found them. Methods are independent of one another; a failing method
//! contributes nothing rather than aborting the analysis (see [`recover`]).

mod commerce;
mod entities;
mod rake;
mod structural;
mod tfidf;

pub use commerce::{
    PRICE_TERMS, brand_keywords, category_keywords, is_category_link, price_keywords,
    product_keywords, search_suggestion_keywords,
};
pub use entities::{EntityKind, entity_keywords, extract_entities};
pub use rake::{RakeExtractor, ScoredPhrase};
pub use structural::{heading_keywords, meta_keywords};
pub use tfidf::{TermWeight, tfidf_keywords, weigh_terms};

use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::MethodError;

/// Provenance tag recording which extraction method produced a candidate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Method {
    Rake,
    Tfidf,
    Meta,
    Title,
    Heading,
    EntityPerson,
    EntityPlace,
    EntityOrg,
    EntityTopic,
    SearchSuggestion,
    ProductSchema,
    ProductCategory,
    ProductBrand,
    ImageAlt,
    CategoryLink,
    PriceTerm,
    BrandTitle,
    BrandSchema,
}

impl Method {
    /// Stable tag used in output and logs.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Rake => "rake",
            Self::Tfidf => "tfidf",
            Self::Meta => "meta",
            Self::Title => "title",
            Self::Heading => "heading",
            Self::EntityPerson => "entity-person",
            Self::EntityPlace => "entity-place",
            Self::EntityOrg => "entity-org",
            Self::EntityTopic => "entity-topic",
            Self::SearchSuggestion => "search-suggestion",
            Self::ProductSchema => "product-schema",
            Self::ProductCategory => "product-category",
            Self::ProductBrand => "product-brand",
            Self::ImageAlt => "image-alt",
            Self::CategoryLink => "category-link",
            Self::PriceTerm => "price-term",
            Self::BrandTitle => "brand-title",
            Self::BrandSchema => "brand-schema",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One keyword proposal from one extraction method. Not yet deduplicated.
#[derive(Debug, Clone, PartialEq)]
pub struct Candidate {
    /// Phrase as extracted; lowercased when merged.
    pub text: String,
    pub method: Method,
    /// TF-IDF weight, for candidates from the TF-IDF method.
    pub score: Option<f64>,
}

impl Candidate {
    #[must_use]
    pub fn new(text: impl Into<String>, method: Method) -> Self {
        Self {
            text: text.into(),
            method,
            score: None,
        }
    }

    #[must_use]
    pub fn scored(text: impl Into<String>, method: Method, score: f64) -> Self {
        Self {
            text: text.into(),
            method,
            score: Some(score),
        }
    }
}

/// Result of running one extraction method.
pub type MethodOutcome = Result<Vec<Candidate>, MethodError>;

/// Turns a method failure into an empty candidate list, logging a warning.
#[must_use]
pub fn recover(outcome: MethodOutcome) -> Vec<Candidate> {
    match outcome {
        Ok(candidates) => candidates,
        Err(e) => {
            warn!(method = %e.method(), error = %e, "extraction method failed, continuing without it");
            Vec::new()
        }
    }
}

/// Wraps tokens as candidates of a single method.
pub(crate) fn tag_all(tokens: Vec<String>, method: Method) -> Vec<Candidate> {
    tokens
        .into_iter()
        .map(|token| Candidate::new(token, method))
        .collect()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_method_tags_serialize_kebab_case() {
        assert_eq!(
            serde_json::to_string(&Method::EntityPerson).unwrap(),
            "\"entity-person\""
        );
        assert_eq!(serde_json::to_string(&Method::Tfidf).unwrap(), "\"tfidf\"");
        for method in [Method::SearchSuggestion, Method::PriceTerm, Method::BrandSchema] {
            assert_eq!(
                serde_json::to_string(&method).unwrap(),
                format!("\"{}\"", method.as_str())
            );
        }
    }

    #[test]
    fn test_recover_passes_candidates_through() {
        let outcome: MethodOutcome = Ok(vec![Candidate::new("shoes", Method::Rake)]);
        assert_eq!(recover(outcome).len(), 1);
    }

    #[test]
    fn test_recover_turns_failure_into_empty_list() {
        let outcome: MethodOutcome = Err(MethodError::MalformedRecord {
            method: Method::ProductSchema,
            reason: "bad".to_string(),
        });
        assert!(recover(outcome).is_empty());
    }
}
