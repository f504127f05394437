//! Shop-page extraction methods: search suggestions, product schema, image
//! alt text, category links, price vocabulary and brand names.

use std::sync::LazyLock;

use regex::Regex;
use serde_json::Value;
use tracing::{debug, instrument};

use super::{Candidate, Method, MethodOutcome, tag_all};
use crate::document::{ContentDocument, Link};
use crate::error::MethodError;
use crate::text::TextProcessor;

/// Price and promotion vocabulary looked up in the body text.
pub const PRICE_TERMS: &[&str] = &[
    "discount",
    "sale",
    "offer",
    "deal",
    "coupon",
    "promo",
    "free shipping",
    "clearance",
    "special",
    "limited",
    "save",
    "off",
    "cheap",
    "affordable",
    "budget",
    "premium",
    "luxury",
    "exclusive",
];

#[allow(clippy::expect_used)]
static CATEGORY_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)category|department|shop|collection|browse")
        .expect("category regex is valid") // Static pattern, safe to panic
});

#[allow(clippy::expect_used)]
static TITLE_SEPARATOR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[-|•]").expect("title separator regex is valid")); // Static pattern, safe to panic

/// Observed search suggestions, lowercased, as `search-suggestion` candidates.
#[must_use]
pub fn search_suggestion_keywords(suggestions: &[String]) -> Vec<Candidate> {
    suggestions
        .iter()
        .map(|s| s.trim().to_lowercase())
        .filter(|s| !s.is_empty())
        .map(|s| Candidate::new(s, Method::SearchSuggestion))
        .collect()
}

/// Product schema name tokens, category and brand, then image alt tokens.
///
/// # Errors
/// Returns [`MethodError::MalformedRecord`] if a product record has a
/// non-string `name`.
#[instrument(skip_all, fields(records = doc.schema_data.len(), images = doc.images.len()))]
pub fn product_keywords(doc: &ContentDocument, processor: &TextProcessor) -> MethodOutcome {
    let mut keywords = Vec::new();

    for record in doc.schema_records_of_type("Product") {
        match record.get("name") {
            None | Some(Value::Null) => {}
            Some(Value::String(name)) => {
                keywords.extend(tag_all(processor.content_tokens(name), Method::ProductSchema));
            }
            Some(other) => {
                return Err(MethodError::MalformedRecord {
                    method: Method::ProductSchema,
                    reason: format!("product name is not a string: {other}"),
                });
            }
        }

        if let Some(category) = record.get("category").and_then(Value::as_str) {
            keywords.push(Candidate::new(category.to_lowercase(), Method::ProductCategory));
        }
        if let Some(brand) = brand_name(record) {
            keywords.push(Candidate::new(brand.to_lowercase(), Method::ProductBrand));
        }
    }

    for image in &doc.images {
        if !image.alt.is_empty() {
            keywords.extend(tag_all(processor.content_tokens(&image.alt), Method::ImageAlt));
        }
    }

    debug!(candidates = keywords.len(), "product keywords extracted");
    Ok(keywords)
}

/// True if the link's href or text looks like shop navigation.
#[must_use]
pub fn is_category_link(link: &Link) -> bool {
    CATEGORY_PATTERN.is_match(&link.href) || CATEGORY_PATTERN.is_match(&link.text)
}

/// Content tokens of category/navigation link texts.
#[must_use]
pub fn category_keywords(doc: &ContentDocument, processor: &TextProcessor) -> Vec<Candidate> {
    doc.links
        .iter()
        .filter(|link| !link.text.is_empty() && is_category_link(link))
        .flat_map(|link| tag_all(processor.content_tokens(&link.text), Method::CategoryLink))
        .collect()
}

/// Price terms that occur anywhere in the body text (substring match).
#[must_use]
pub fn price_keywords(doc: &ContentDocument) -> Vec<Candidate> {
    let body = doc.body_text.to_lowercase();
    PRICE_TERMS
        .iter()
        .filter(|term| body.contains(*term))
        .map(|term| Candidate::new(*term, Method::PriceTerm))
        .collect()
}

/// Brand from the last title segment and from any schema `brand`.
#[must_use]
pub fn brand_keywords(doc: &ContentDocument, processor: &TextProcessor) -> Vec<Candidate> {
    let mut keywords = Vec::new();

    let parts: Vec<&str> = TITLE_SEPARATOR.split(&doc.title).collect();
    if parts.len() > 1
        && let Some(last) = parts.last()
    {
        keywords.extend(tag_all(processor.tokenize(last.trim()), Method::BrandTitle));
    }

    for record in &doc.schema_data {
        if let Some(brand) = brand_name(record) {
            keywords.push(Candidate::new(brand.to_lowercase(), Method::BrandSchema));
        }
    }
    keywords
}

/// `brand.name`, or `brand` itself when it is a plain string.
fn brand_name(record: &Value) -> Option<&str> {
    let name = match record.get("brand")? {
        Value::String(name) => Some(name.as_str()),
        Value::Object(brand) => brand.get("name").and_then(Value::as_str),
        _ => None,
    };
    name.filter(|name| !name.trim().is_empty())
}
