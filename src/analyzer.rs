//! Keyword analysis pipeline.
//!
//! [`KeywordAnalyzer`] picks the pipeline for a page, runs its extraction
//! methods, merges their candidates and categorizes the ranked result into
//! an [`AnalysisReport`].
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use keyword_core::{AnalyzerConfig, ContentDocument, KeywordAnalyzer};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let analyzer = KeywordAnalyzer::new(AnalyzerConfig::default())?;
//! let doc: ContentDocument = serde_json::from_str(r#"{"title": "Trail running shoes"}"#)?;
//! let report = analyzer.analyze(Arc::new(doc)).await?;
//! println!("{} keywords", report.seo_metrics.total_keywords);
//! # Ok(())
//! # }
//! ```

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument, warn};

use crate::aggregate::{
    CategorizeOptions, CategorizedKeywords, MergeOptions, SEARCH_TERM_BONUS, categorize, merge,
};
use crate::config::{AnalysisDepth, AnalyzerConfig, ContentMode};
use crate::document::ContentDocument;
use crate::error::{AnalysisError, MIN_CONTENT_LENGTH, MethodError};
use crate::extract::{
    Candidate, Method, MethodOutcome, RakeExtractor, brand_keywords, category_keywords,
    entity_keywords, heading_keywords, meta_keywords, price_keywords, product_keywords, recover,
    search_suggestion_keywords, tfidf_keywords,
};
use crate::metrics::{self, Recommendation};
use crate::text::{TextProcessor, sentences};

/// Article text longer than this (in chars) marks a page as an article.
pub const SUBSTANTIAL_ARTICLE_LENGTH: usize = 1000;

/// Schema types that mark a page as an article.
const ARTICLE_SCHEMA_TYPES: &[&str] = &["Article", "NewsArticle", "BlogPosting"];

/// Classifies a page from its hints and structured data.
///
/// Product pages, and pages with a search box but no article structure, are
/// `Ecommerce`. Pages with article structure or substantial article text are
/// `Article`. Everything else is `General`.
#[must_use]
pub fn detect_content_type(doc: &ContentDocument) -> ContentMode {
    let has_product_info =
        doc.has_product_info || doc.schema_records_of_type("Product").next().is_some();
    let has_article_structure = doc.has_article_structure
        || ARTICLE_SCHEMA_TYPES
            .iter()
            .any(|t| doc.schema_records_of_type(t).next().is_some());
    let has_substantial_article =
        doc.article_content.chars().count() > SUBSTANTIAL_ARTICLE_LENGTH;

    if has_product_info || (doc.has_search_box && !has_article_structure) {
        ContentMode::Ecommerce
    } else if has_article_structure || has_substantial_article {
        ContentMode::Article
    } else {
        ContentMode::General
    }
}

/// One independent extraction step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Job {
    Rake,
    Tfidf,
    MetaAndTitle,
    Headings,
    Entities,
    SearchSuggestions,
    Products,
    Categories,
    PriceTerms,
    Brands,
}

const ARTICLE_JOBS: &[Job] = &[
    Job::Rake,
    Job::Tfidf,
    Job::MetaAndTitle,
    Job::Headings,
    Job::Entities,
];

const COMMERCE_JOBS: &[Job] = &[
    Job::SearchSuggestions,
    Job::Products,
    Job::Categories,
    Job::PriceTerms,
    Job::Brands,
];

impl Job {
    /// Method reported when the job itself fails.
    fn method(self) -> Method {
        match self {
            Self::Rake => Method::Rake,
            Self::Tfidf => Method::Tfidf,
            Self::MetaAndTitle => Method::Meta,
            Self::Headings => Method::Heading,
            Self::Entities => Method::EntityTopic,
            Self::SearchSuggestions => Method::SearchSuggestion,
            Self::Products => Method::ProductSchema,
            Self::Categories => Method::CategoryLink,
            Self::PriceTerms => Method::PriceTerm,
            Self::Brands => Method::BrandTitle,
        }
    }

    fn run(self, engine: &Engine, doc: &ContentDocument, text: &PreparedText) -> MethodOutcome {
        let processor = &engine.processor;
        let limit = engine.config.max_keywords;
        let candidates = match self {
            Self::Rake => engine.rake.candidates(&text.full, limit),
            Self::Tfidf => tfidf_keywords(&text.full, &text.sentences, processor, limit),
            Self::MetaAndTitle => meta_keywords(doc, processor),
            Self::Headings => heading_keywords(doc, processor),
            Self::Entities => entity_keywords(&text.full, processor.stopwords()),
            Self::SearchSuggestions => search_suggestion_keywords(&doc.search_suggestions),
            Self::Products => return product_keywords(doc, processor),
            Self::Categories => category_keywords(doc, processor),
            Self::PriceTerms => price_keywords(doc),
            Self::Brands => brand_keywords(doc, processor),
        };
        Ok(candidates)
    }
}

/// Text shared by all jobs of one run.
#[derive(Debug)]
struct PreparedText {
    /// Text the article methods read, and the prominence reference.
    full: String,
    sentences: Vec<String>,
}

#[derive(Debug)]
struct Engine {
    config: AnalyzerConfig,
    processor: TextProcessor,
    rake: RakeExtractor,
}

/// Keyword analyzer for single pages.
///
/// Cheap to clone; clones share the loaded stopword sets.
#[derive(Debug, Clone)]
pub struct KeywordAnalyzer {
    engine: Arc<Engine>,
}

impl KeywordAnalyzer {
    /// Creates an analyzer, loading stopwords for the configured language.
    ///
    /// # Errors
    /// Returns [`AnalysisError::InvalidConfig`] if the configuration is rejected.
    pub fn new(config: AnalyzerConfig) -> Result<Self, AnalysisError> {
        config.validate()?;
        let processor = TextProcessor::new(&config);
        let rake = RakeExtractor::with_stopwords(processor.stopwords().clone(), &config);
        debug!(
            language = config.language.code(),
            stopwords = processor.stopwords().len(),
            "analyzer ready"
        );
        Ok(Self {
            engine: Arc::new(Engine {
                config,
                processor,
                rake,
            }),
        })
    }

    #[must_use]
    pub fn config(&self) -> &AnalyzerConfig {
        &self.engine.config
    }

    /// Configured mode, or the detected one when the mode is `Auto`.
    #[must_use]
    pub fn resolve_mode(&self, doc: &ContentDocument) -> ContentMode {
        match self.engine.config.mode {
            ContentMode::Auto => {
                let detected = detect_content_type(doc);
                info!(content_type = %detected, "auto-detected content type");
                detected
            }
            mode => mode,
        }
    }

    /// Analyzes a page, running extraction methods concurrently.
    ///
    /// Each method runs on the blocking pool. The merge waits for all of
    /// them; a method that fails or panics contributes no candidates.
    ///
    /// # Errors
    /// Returns [`AnalysisError::InsufficientContent`] if the combined page
    /// text is shorter than [`MIN_CONTENT_LENGTH`] characters.
    #[instrument(skip(self, doc), fields(url = doc.url.as_deref().unwrap_or("")))]
    pub async fn analyze(&self, doc: Arc<ContentDocument>) -> Result<AnalysisReport, AnalysisError> {
        let mode = self.resolve_mode(&doc);
        let text = Arc::new(prepare(&doc, mode)?);

        let mut handles = Vec::new();
        for &job in jobs_for(mode) {
            let engine = Arc::clone(&self.engine);
            let doc = Arc::clone(&doc);
            let text = Arc::clone(&text);
            handles.push((
                job,
                tokio::task::spawn_blocking(move || job.run(&engine, &doc, &text)),
            ));
        }

        debug!(task_count = handles.len(), "waiting for extraction methods");

        let mut candidates = Vec::new();
        for (job, handle) in handles {
            let outcome = handle.await.unwrap_or_else(|e| {
                Err(MethodError::Aborted {
                    method: job.method(),
                    reason: e.to_string(),
                })
            });
            candidates.extend(recover(outcome));
        }

        Ok(self.finish(&doc, mode, &text, candidates))
    }

    /// Synchronous [`analyze`](Self::analyze): runs the methods in order on
    /// the calling thread. Output is identical.
    ///
    /// # Errors
    /// Returns [`AnalysisError::InsufficientContent`] if the combined page
    /// text is shorter than [`MIN_CONTENT_LENGTH`] characters.
    #[instrument(skip(self, doc), fields(url = doc.url.as_deref().unwrap_or("")))]
    pub fn analyze_blocking(&self, doc: &ContentDocument) -> Result<AnalysisReport, AnalysisError> {
        let mode = self.resolve_mode(doc);
        let text = prepare(doc, mode)?;

        let candidates: Vec<Candidate> = jobs_for(mode)
            .iter()
            .flat_map(|job| recover(job.run(&self.engine, doc, &text)))
            .collect();

        Ok(self.finish(doc, mode, &text, candidates))
    }

    fn finish(
        &self,
        doc: &ContentDocument,
        mode: ContentMode,
        text: &PreparedText,
        candidates: Vec<Candidate>,
    ) -> AnalysisReport {
        let config = &self.engine.config;
        let commerce = mode == ContentMode::Ecommerce;
        let candidate_count = candidates.len();

        let ranked = merge(
            candidates,
            &MergeOptions {
                prominence_text: &text.full,
                min_keyword_length: config.min_keyword_length,
                search_term_bonus: if commerce { SEARCH_TERM_BONUS } else { 0 },
            },
        );
        let keywords = categorize(
            ranked,
            &CategorizeOptions {
                max_keywords: config.max_keywords,
                sentences: &text.sentences,
                commerce,
            },
        );

        let seo_metrics = SeoSummary::from_keywords(&keywords);
        if seo_metrics.total_keywords == 0 {
            warn!(candidate_count, "no keywords survived merging");
        }
        let texts: Vec<&str> = keywords.all.iter().map(|k| k.keyword.as_str()).collect();
        let recommendations = metrics::recommendations(texts.as_slice());

        info!(
            content_type = %mode,
            candidates = candidate_count,
            keywords = seo_metrics.total_keywords,
            "keyword analysis complete"
        );

        AnalysisReport {
            url: doc.url.clone(),
            content_type: mode,
            analysis_depth: config.analysis_depth,
            keywords,
            seo_metrics,
            recommendations,
            page_metadata: PageMetadata::from_document(doc),
        }
    }
}

fn jobs_for(mode: ContentMode) -> &'static [Job] {
    if mode == ContentMode::Ecommerce {
        COMMERCE_JOBS
    } else {
        ARTICLE_JOBS
    }
}

/// Checks the content floor and builds the shared text for `mode`.
fn prepare(doc: &ContentDocument, mode: ContentMode) -> Result<PreparedText, AnalysisError> {
    let combined = doc.combined_text();
    let length = combined.chars().count();
    if length < MIN_CONTENT_LENGTH {
        return Err(AnalysisError::insufficient(length));
    }

    let full = if mode == ContentMode::Ecommerce {
        doc.body_text.clone()
    } else {
        combined
    };
    let sentences = sentences(&full);
    debug!(chars = full.chars().count(), sentences = sentences.len(), "prepared text");
    Ok(PreparedText { full, sentences })
}

/// Per-tier counts of the competition buckets.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompetitionBreakdown {
    pub high: usize,
    pub medium: usize,
    pub low: usize,
}

/// Summary statistics over the `all` bucket.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeoSummary {
    pub total_keywords: usize,
    pub unique_keywords: usize,
    /// Mean words per keyword, 0 when there are no keywords.
    pub avg_keyword_length: f64,
    pub competition_breakdown: CompetitionBreakdown,
}

impl SeoSummary {
    #[must_use]
    pub fn from_keywords(keywords: &CategorizedKeywords) -> Self {
        let total_keywords = keywords.all.len();
        let unique_keywords = keywords
            .all
            .iter()
            .map(|k| k.keyword.as_str())
            .collect::<std::collections::HashSet<_>>()
            .len();
        let total_words: usize = keywords
            .all
            .iter()
            .map(|k| metrics::word_count(&k.keyword))
            .sum();
        #[allow(clippy::cast_precision_loss)]
        let avg_keyword_length = if total_keywords == 0 {
            0.0
        } else {
            total_words as f64 / total_keywords as f64
        };

        let buckets = &keywords.competition_keywords;
        Self {
            total_keywords,
            unique_keywords,
            avg_keyword_length,
            competition_breakdown: CompetitionBreakdown {
                high: buckets.high.len(),
                medium: buckets.medium.len(),
                low: buckets.low.len(),
            },
        }
    }
}

/// Heading counts by level.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeadingCounts {
    pub h1: usize,
    pub h2: usize,
    pub h3: usize,
}

/// Page facts echoed into the report.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageMetadata {
    pub title: String,
    pub meta_description: String,
    pub headings_count: HeadingCounts,
}

impl PageMetadata {
    #[must_use]
    pub fn from_document(doc: &ContentDocument) -> Self {
        Self {
            title: doc.title.clone(),
            meta_description: doc.meta_description.clone(),
            headings_count: HeadingCounts {
                h1: doc.headings.h1.len(),
                h2: doc.headings.h2.len(),
                h3: doc.headings.h3.len(),
            },
        }
    }
}

/// Result of analyzing one page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisReport {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    /// Pipeline that produced the keywords.
    pub content_type: ContentMode,
    pub analysis_depth: AnalysisDepth,
    pub keywords: CategorizedKeywords,
    pub seo_metrics: SeoSummary,
    pub recommendations: Vec<Recommendation>,
    pub page_metadata: PageMetadata,
}
