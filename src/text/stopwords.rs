//! Language-keyed stopword sets.

use std::collections::HashSet;

use stop_words::get;
use tracing::instrument;

use crate::config::Language;

/// Stopwords for one language plus user-supplied extras.
#[derive(Debug, Clone, Default)]
pub struct StopwordSet {
    language: HashSet<String>,
    custom: HashSet<String>,
}

impl StopwordSet {
    /// Loads the stopword list for `language` and adds `custom` words.
    ///
    /// Custom words are lowercased and trimmed; blank entries are ignored.
    #[must_use]
    #[instrument(skip(custom), fields(custom_count = custom.len()))]
    pub fn new(language: Language, custom: &[String]) -> Self {
        let language = get(language.stop_words_language())
            .iter()
            .map(|word| word.to_string().to_lowercase())
            .collect();
        let custom = custom
            .iter()
            .map(|word| word.trim().to_lowercase())
            .filter(|word| !word.is_empty())
            .collect();
        Self { language, custom }
    }

    /// True if `token` is in the language list.
    #[must_use]
    pub fn is_language_stopword(&self, token: &str) -> bool {
        self.language.contains(token)
    }

    /// True if `token` (already lowercase) is a language or custom stopword.
    #[must_use]
    pub fn contains(&self, token: &str) -> bool {
        self.language.contains(token) || self.custom.contains(token)
    }

    /// Number of language stopwords loaded.
    #[must_use]
    pub fn len(&self) -> usize {
        self.language.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.language.is_empty()
    }
}
