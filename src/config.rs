//! Analyzer configuration and the option enums it carries.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use stop_words::LANGUAGE;
use tracing::warn;

use crate::error::AnalysisError;

/// Default cap on every output bucket.
pub const DEFAULT_MAX_KEYWORDS: usize = 50;

/// Default minimum keyword length in characters.
pub const DEFAULT_MIN_KEYWORD_LENGTH: usize = 3;

/// Default maximum number of words in a RAKE phrase.
pub const DEFAULT_MAX_WORDS_PER_KEYWORD: usize = 4;

/// Stopword language selector.
///
/// Unknown codes resolve to [`Language::English`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    English,
    Spanish,
    French,
    German,
    Italian,
    Portuguese,
    Dutch,
    Russian,
}

impl Language {
    /// Resolves an ISO 639-1 code or English language name.
    ///
    /// Falls back to English (with a warning) for anything unrecognized.
    #[must_use]
    pub fn from_code(code: &str) -> Self {
        match code.trim().to_lowercase().as_str() {
            "en" | "english" => Self::English,
            "es" | "spanish" => Self::Spanish,
            "fr" | "french" => Self::French,
            "de" | "german" => Self::German,
            "it" | "italian" => Self::Italian,
            "pt" | "portuguese" => Self::Portuguese,
            "nl" | "dutch" => Self::Dutch,
            "ru" | "russian" => Self::Russian,
            other => {
                warn!(language = other, "unknown stopword language, using English");
                Self::English
            }
        }
    }

    /// ISO 639-1 code.
    #[must_use]
    pub fn code(self) -> &'static str {
        match self {
            Self::English => "en",
            Self::Spanish => "es",
            Self::French => "fr",
            Self::German => "de",
            Self::Italian => "it",
            Self::Portuguese => "pt",
            Self::Dutch => "nl",
            Self::Russian => "ru",
        }
    }

    pub(crate) fn stop_words_language(self) -> LANGUAGE {
        match self {
            Self::English => LANGUAGE::English,
            Self::Spanish => LANGUAGE::Spanish,
            Self::French => LANGUAGE::French,
            Self::German => LANGUAGE::German,
            Self::Italian => LANGUAGE::Italian,
            Self::Portuguese => LANGUAGE::Portuguese,
            Self::Dutch => LANGUAGE::Dutch,
            Self::Russian => LANGUAGE::Russian,
        }
    }
}

/// Analysis depth hint. Carried through to the report; does not change the algorithm.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AnalysisDepth {
    Quick,
    #[default]
    Standard,
    Deep,
}

impl FromStr for AnalysisDepth {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "quick" => Ok(Self::Quick),
            "standard" => Ok(Self::Standard),
            "deep" => Ok(Self::Deep),
            other => Err(format!(
                "unknown analysis depth '{other}' (expected quick, standard, deep)"
            )),
        }
    }
}

/// Which extraction pipeline to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentMode {
    /// Detect from page hints and structured data.
    #[default]
    Auto,
    Article,
    Ecommerce,
    /// Neither article nor shop; analyzed with the article pipeline.
    General,
}

impl ContentMode {
    /// Stable label for display output.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Auto => "auto",
            Self::Article => "article",
            Self::Ecommerce => "ecommerce",
            Self::General => "general",
        }
    }
}

impl fmt::Display for ContentMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ContentMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "auto" => Ok(Self::Auto),
            "article" => Ok(Self::Article),
            "ecommerce" | "e-commerce" => Ok(Self::Ecommerce),
            "general" => Ok(Self::General),
            other => Err(format!(
                "unknown mode '{other}' (expected auto, article, ecommerce, general)"
            )),
        }
    }
}

/// Options recognized by the keyword analyzer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AnalyzerConfig {
    /// Caps the ranked keyword list and every output bucket.
    pub max_keywords: usize,
    /// Keywords and tokens shorter than this (in chars) are dropped.
    pub min_keyword_length: usize,
    /// Whether token filtering removes stopwords.
    pub exclude_stopwords: bool,
    pub language: Language,
    /// Extra stopwords, matched case-insensitively.
    pub custom_stopwords: Vec<String>,
    pub analysis_depth: AnalysisDepth,
    /// Longest RAKE phrase kept, in words.
    pub max_words_per_keyword: usize,
    pub mode: ContentMode,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            max_keywords: DEFAULT_MAX_KEYWORDS,
            min_keyword_length: DEFAULT_MIN_KEYWORD_LENGTH,
            exclude_stopwords: true,
            language: Language::English,
            custom_stopwords: Vec::new(),
            analysis_depth: AnalysisDepth::Standard,
            max_words_per_keyword: DEFAULT_MAX_WORDS_PER_KEYWORD,
            mode: ContentMode::Auto,
        }
    }
}

impl AnalyzerConfig {
    /// Rejects values the pipeline cannot work with.
    ///
    /// # Errors
    /// Returns [`AnalysisError::InvalidConfig`] naming the first bad field.
    pub fn validate(&self) -> Result<(), AnalysisError> {
        if self.max_keywords == 0 {
            return Err(AnalysisError::InvalidConfig {
                field: "max_keywords",
                reason: "must be at least 1".to_string(),
            });
        }
        if self.min_keyword_length == 0 {
            return Err(AnalysisError::InvalidConfig {
                field: "min_keyword_length",
                reason: "must be at least 1".to_string(),
            });
        }
        if self.max_words_per_keyword == 0 {
            return Err(AnalysisError::InvalidConfig {
                field: "max_words_per_keyword",
                reason: "must be at least 1".to_string(),
            });
        }
        Ok(())
    }
}
