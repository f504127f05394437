//! Keyword Extractor Core Library
//!
//! This library extracts, scores and categorizes SEO keywords from the
//! structured content of a single page.
//!
//! # Architecture
//!
//! The library is organized into the following modules:
//! - [`document`] - Page content handed in by the fetching layer
//! - [`config`] - Analyzer options, languages and content modes
//! - [`text`] - Text cleaning, tokenization and stopword filtering
//! - [`extract`] - Candidate extraction methods (RAKE, TF-IDF, structure, entities, shop data)
//! - [`metrics`] - Per-keyword SEO heuristics
//! - [`aggregate`] - Candidate merging, ranking and output buckets
//! - [`analyzer`] - The end-to-end pipeline

// Clippy lints - strict for library code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod aggregate;
pub mod analyzer;
pub mod config;
pub mod document;
pub mod error;
pub mod extract;
pub mod metrics;
pub mod text;

// Re-export commonly used types
pub use aggregate::{AggregatedKeyword, CategorizedKeywords, CompetitionBuckets, RelatedKeyword};
pub use analyzer::{
    AnalysisReport, KeywordAnalyzer, PageMetadata, SeoSummary, detect_content_type,
};
pub use config::{AnalysisDepth, AnalyzerConfig, ContentMode, Language};
pub use document::{ContentDocument, Headings, Image, Link};
pub use error::{AnalysisError, MIN_CONTENT_LENGTH, MethodError};
pub use extract::{Candidate, Method};
pub use metrics::{Competition, Recommendation, RecommendationKind};
pub use text::{StopwordSet, TextProcessor};
