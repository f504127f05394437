//! Keywords declared by page structure: meta keywords, title and headings.

use super::{Candidate, Method, tag_all};
use crate::document::ContentDocument;
use crate::text::TextProcessor;

/// Comma-separated meta keywords (`meta`) followed by title tokens (`title`).
#[must_use]
pub fn meta_keywords(doc: &ContentDocument, processor: &TextProcessor) -> Vec<Candidate> {
    let mut keywords: Vec<Candidate> = doc
        .meta_keywords
        .split(',')
        .map(str::trim)
        .filter(|kw| !kw.is_empty() && !processor.is_too_short(kw))
        .map(|kw| Candidate::new(kw, Method::Meta))
        .collect();

    if !doc.title.is_empty() {
        keywords.extend(tag_all(processor.content_tokens(&doc.title), Method::Title));
    }
    keywords
}

/// Content tokens of every h1-h3 heading.
#[must_use]
pub fn heading_keywords(doc: &ContentDocument, processor: &TextProcessor) -> Vec<Candidate> {
    doc.headings
        .iter()
        .flat_map(|heading| tag_all(processor.content_tokens(heading), Method::Heading))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AnalyzerConfig;
    use crate::document::Headings;

    fn processor() -> TextProcessor {
        TextProcessor::new(&AnalyzerConfig::default())
    }

    #[test]
    fn test_meta_keywords_split_and_filter_short() {
        let doc = ContentDocument {
            meta_keywords: "running shoes, trail, ai ,  , Marathon Gear".to_string(),
            ..ContentDocument::default()
        };
        let texts: Vec<String> = meta_keywords(&doc, &processor())
            .into_iter()
            .map(|c| c.text)
            .collect();
        assert_eq!(texts, vec!["running shoes", "trail", "Marathon Gear"]);
    }

    #[test]
    fn test_title_tokens_tagged_title() {
        let doc = ContentDocument {
            title: "Trail Running Shoes".to_string(),
            ..ContentDocument::default()
        };
        let candidates = meta_keywords(&doc, &processor());
        assert_eq!(candidates.len(), 3);
        assert!(candidates.iter().all(|c| c.method == Method::Title));
        assert_eq!(candidates[0].text, "trail");
    }

    #[test]
    fn test_heading_keywords_cover_all_levels() {
        let doc = ContentDocument {
            headings: Headings {
                h1: vec!["Kayak Paddles".to_string()],
                h2: vec!["Carbon Blades".to_string()],
                h3: vec!["Storage".to_string()],
            },
            ..ContentDocument::default()
        };
        let texts: Vec<String> = heading_keywords(&doc, &processor())
            .into_iter()
            .map(|c| c.text)
            .collect();
        assert_eq!(texts, vec!["kayak", "paddles", "carbon", "blades", "storage"]);
    }
}
