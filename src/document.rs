//! Page content handed to the analyzer by the fetching layer.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Heading texts by level.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Headings {
    pub h1: Vec<String>,
    pub h2: Vec<String>,
    pub h3: Vec<String>,
}

impl Headings {
    /// All headings, level 1 first.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.h1
            .iter()
            .chain(&self.h2)
            .chain(&self.h3)
            .map(String::as_str)
    }
}

/// An anchor on the page.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Link {
    pub text: String,
    pub href: String,
}

/// An image on the page.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Image {
    pub alt: String,
    pub src: String,
}

/// Structured content extracted from one page.
///
/// Read-only for the duration of an analysis run. `schema_data` holds the
/// parsed JSON-LD blocks as-is.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ContentDocument {
    pub url: Option<String>,
    pub title: String,
    pub meta_description: String,
    pub meta_keywords: String,
    pub headings: Headings,
    pub body_text: String,
    /// Text of the main article region, when the page has one.
    pub article_content: String,
    pub links: Vec<Link>,
    pub images: Vec<Image>,
    pub schema_data: Vec<Value>,
    /// Raw autocomplete strings observed in the page's search box.
    pub search_suggestions: Vec<String>,
    pub has_search_box: bool,
    pub has_product_info: bool,
    pub has_article_structure: bool,
}

impl ContentDocument {
    /// Article text when present, otherwise the body text.
    #[must_use]
    pub fn main_text(&self) -> &str {
        if self.article_content.trim().is_empty() {
            &self.body_text
        } else {
            &self.article_content
        }
    }

    /// Title, meta description, main text and headings joined by spaces.
    ///
    /// Empty parts are skipped.
    #[must_use]
    pub fn combined_text(&self) -> String {
        [
            self.title.as_str(),
            self.meta_description.as_str(),
            self.main_text(),
        ]
        .into_iter()
        .chain(self.headings.iter())
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
    }

    /// Structured-data records whose `@type` names the given schema type.
    ///
    /// Matches a string `@type` containing `type_name` or an array with an
    /// element that does.
    pub fn schema_records_of_type<'a>(
        &'a self,
        type_name: &'a str,
    ) -> impl Iterator<Item = &'a Value> + 'a {
        self.schema_data
            .iter()
            .filter(move |record| schema_type_matches(record, type_name))
    }
}

fn schema_type_matches(record: &Value, type_name: &str) -> bool {
    match record.get("@type") {
        Some(Value::String(t)) => t.contains(type_name),
        Some(Value::Array(types)) => types
            .iter()
            .filter_map(Value::as_str)
            .any(|t| t == type_name),
        _ => false,
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_combined_text_prefers_article_content() {
        let doc = ContentDocument {
            title: "Title".to_string(),
            meta_description: "Description".to_string(),
            body_text: "body".to_string(),
            article_content: "article".to_string(),
            headings: Headings {
                h1: vec!["Heading".to_string()],
                ..Headings::default()
            },
            ..ContentDocument::default()
        };
        assert_eq!(doc.combined_text(), "Title Description article Heading");
    }

    #[test]
    fn test_combined_text_skips_empty_parts() {
        let doc = ContentDocument {
            body_text: "only body".to_string(),
            ..ContentDocument::default()
        };
        assert_eq!(doc.combined_text(), "only body");
        assert_eq!(ContentDocument::default().combined_text(), "");
    }

    #[test]
    fn test_deserializes_scraper_json_with_missing_fields() {
        let doc: ContentDocument = serde_json::from_value(json!({
            "title": "Shoes",
            "metaDescription": "Running shoes",
            "headings": {"h1": ["Shoes"]},
            "links": [{"text": "Shop", "href": "/shop"}],
            "schemaData": [{"@type": "Product", "name": "Trail Runner"}]
        }))
        .unwrap();
        assert_eq!(doc.title, "Shoes");
        assert_eq!(doc.headings.h1, vec!["Shoes"]);
        assert!(doc.headings.h2.is_empty());
        assert_eq!(doc.links[0].href, "/shop");
        assert!(doc.images.is_empty());
    }

    #[test]
    fn test_schema_records_of_type_matches_string_and_array() {
        let doc = ContentDocument {
            schema_data: vec![
                json!({"@type": "Product"}),
                json!({"@type": ["Thing", "Product"]}),
                json!({"@type": "BlogPosting"}),
                json!({"name": "untyped"}),
            ],
            ..ContentDocument::default()
        };
        assert_eq!(doc.schema_records_of_type("Product").count(), 2);
        assert_eq!(doc.schema_records_of_type("Posting").count(), 1);
    }
}
