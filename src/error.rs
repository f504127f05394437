//! Error types for keyword analysis.

use thiserror::Error;

use crate::extract::Method;

/// Minimum combined text length (in characters) worth analyzing.
pub const MIN_CONTENT_LENGTH: usize = 100;

/// Errors that abort an analysis run.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AnalysisError {
    /// Combined document text is too short to analyze
    #[error(
        "insufficient content for analysis ({length} chars, min {minimum})\n  Suggestion: Check that the page body was extracted before analysis"
    )]
    InsufficientContent {
        /// Length of the combined text in characters
        length: usize,
        /// Minimum required length
        minimum: usize,
    },

    /// Configuration value outside its accepted range
    #[error("invalid configuration for `{field}`: {reason}")]
    InvalidConfig {
        /// Offending option name
        field: &'static str,
        /// Why the value was rejected
        reason: String,
    },
}

impl AnalysisError {
    /// Creates an `InsufficientContent` error for text of the given length.
    #[must_use]
    pub fn insufficient(length: usize) -> Self {
        Self::InsufficientContent {
            length,
            minimum: MIN_CONTENT_LENGTH,
        }
    }
}

/// Failure inside a single extraction method.
///
/// Never escalated: the analyzer logs it and continues with zero candidates
/// from that method.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MethodError {
    /// A structured-data record had an unexpected shape
    #[error("{method} extraction failed: malformed record ({reason})")]
    MalformedRecord {
        /// Method that rejected the record
        method: Method,
        /// What was wrong with it
        reason: String,
    },

    /// The method's task panicked or was cancelled
    #[error("{method} extraction task did not complete: {reason}")]
    Aborted {
        /// Method whose task failed
        method: Method,
        /// Join error description
        reason: String,
    },
}

impl MethodError {
    /// Method the failure belongs to.
    #[must_use]
    pub fn method(&self) -> Method {
        match self {
            Self::MalformedRecord { method, .. } | Self::Aborted { method, .. } => *method,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insufficient_content_message() {
        let err = AnalysisError::insufficient(50);
        let msg = err.to_string();
        assert!(msg.contains("50 chars"), "should contain length");
        assert!(msg.contains("min 100"), "should contain minimum");
        assert!(msg.contains("Suggestion"), "should have suggestion");
    }

    #[test]
    fn test_invalid_config_message() {
        let err = AnalysisError::InvalidConfig {
            field: "max_keywords",
            reason: "must be at least 1".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "invalid configuration for `max_keywords`: must be at least 1"
        );
    }

    #[test]
    fn test_method_error_reports_method() {
        let err = MethodError::MalformedRecord {
            method: Method::ProductSchema,
            reason: "name is not a string".to_string(),
        };
        assert_eq!(err.method(), Method::ProductSchema);
        assert!(err.to_string().starts_with("product-schema extraction failed"));
    }
}
