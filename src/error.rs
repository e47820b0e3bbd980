//! Unified error types for kakaopack.
//!
//! This module provides a single [`KakaopackError`] enum that covers all error
//! cases in the library.
//!
//! # Error Handling Philosophy
//!
//! - The line parser itself is **total**: malformed lines degrade into
//!   continuations or counted drops, never into errors
//! - Errors come from the edges: file I/O, output writers, date filters,
//!   and the text-generation collaborator
//! - Callers detect an empty parse with
//!   [`ensure_not_empty`](crate::core::processor::ensure_not_empty)

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// A specialized [`Result`] type for kakaopack operations.
///
/// # Example
///
/// ```rust
/// use kakaopack::error::Result;
/// use kakaopack::ParsedMessage;
///
/// fn my_function() -> Result<Vec<ParsedMessage>> {
///     Ok(vec![])
/// }
/// ```
pub type Result<T> = std::result::Result<T, KakaopackError>;

/// The error type for all kakaopack operations.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum KakaopackError {
    /// An I/O error occurred.
    ///
    /// This typically happens when:
    /// - The input file doesn't exist
    /// - The input file is not valid UTF-8
    /// - Permission denied when writing output
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// The requested format or feature is not usable.
    #[error("Invalid {format} format: {message}")]
    InvalidFormat {
        /// The format that was expected
        format: &'static str,
        /// Description of what's wrong
        message: String,
    },

    /// Invalid date format in filter configuration.
    ///
    /// Date filters expect YYYY-MM-DD format.
    #[error("Invalid date '{input}'. Expected format: {expected}")]
    InvalidDate {
        /// The invalid date string that was provided
        input: String,
        /// Expected format description
        expected: &'static str,
    },

    /// Parsing finished without producing a single message.
    ///
    /// The parser returns an empty sequence in this case; callers that need
    /// at least one message convert it into this error.
    #[error("No messages found{}. Check that the file is a KakaoTalk text export.", path.as_ref().map(|p| format!(" in {}", p.display())).unwrap_or_default())]
    NoMessages {
        /// The file that was parsed, if known
        path: Option<PathBuf>,
    },

    /// The selected sender has no messages suitable for persona analysis.
    #[error("No suitable messages found for user {sender} to analyze")]
    NoPersonaMessages {
        /// The sender that was selected
        sender: String,
    },

    /// A chat message was empty or whitespace only.
    #[error("Chat message is empty")]
    EmptyChatMessage,

    /// The text-generation model does not exist.
    #[error("Model not found. Available models: {}", available.join(", "))]
    ModelNotFound {
        /// Models reported by the service, possibly empty
        available: Vec<String>,
    },

    /// The text-generation collaborator failed permanently.
    #[error("Text generation failed: {0}")]
    Generation(#[source] crate::generate::GenerationError),

    /// CSV writing error.
    #[cfg(feature = "csv-output")]
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// JSON serialization error.
    #[cfg(any(feature = "json-output", feature = "persona"))]
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// UTF-8 encoding error.
    #[error("UTF-8 encoding error in {context}: {source}")]
    Utf8 {
        /// Description of where the error occurred
        context: String,
        /// The underlying UTF-8 error
        #[source]
        source: std::string::FromUtf8Error,
    },
}

impl From<std::string::FromUtf8Error> for KakaopackError {
    fn from(err: std::string::FromUtf8Error) -> Self {
        KakaopackError::Utf8 {
            context: "output conversion".to_string(),
            source: err,
        }
    }
}

impl From<crate::generate::GenerationError> for KakaopackError {
    fn from(err: crate::generate::GenerationError) -> Self {
        KakaopackError::Generation(err)
    }
}

// ============================================================================
// Convenience constructors
// ============================================================================

impl KakaopackError {
    /// Creates an invalid format error.
    pub fn invalid_format(format: &'static str, message: impl Into<String>) -> Self {
        KakaopackError::InvalidFormat {
            format,
            message: message.into(),
        }
    }

    /// Creates an invalid date error.
    pub fn invalid_date(input: impl Into<String>) -> Self {
        KakaopackError::InvalidDate {
            input: input.into(),
            expected: "YYYY-MM-DD",
        }
    }

    /// Creates an empty-result error.
    pub fn no_messages(path: Option<PathBuf>) -> Self {
        KakaopackError::NoMessages { path }
    }

    /// Returns `true` if this is an IO error.
    pub fn is_io(&self) -> bool {
        matches!(self, KakaopackError::Io(_))
    }

    /// Returns `true` if this is an invalid format error.
    pub fn is_invalid_format(&self) -> bool {
        matches!(self, KakaopackError::InvalidFormat { .. })
    }

    /// Returns `true` if this is a date-related error.
    pub fn is_invalid_date(&self) -> bool {
        matches!(self, KakaopackError::InvalidDate { .. })
    }

    /// Returns `true` if parsing produced no messages.
    pub fn is_no_messages(&self) -> bool {
        matches!(self, KakaopackError::NoMessages { .. })
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generate::GenerationError;

    #[test]
    fn test_io_error_display() {
        let io_err = io::Error::new(io::ErrorKind::NotFound, "file not found");
        let err = KakaopackError::from(io_err);
        let display = err.to_string();
        assert!(display.contains("IO error"));
        assert!(display.contains("file not found"));
        assert!(err.is_io());
    }

    #[test]
    fn test_invalid_date_display() {
        let err = KakaopackError::invalid_date("2024/01/01");
        assert_eq!(
            err.to_string(),
            "Invalid date '2024/01/01'. Expected format: YYYY-MM-DD"
        );
        assert!(err.is_invalid_date());
    }

    #[test]
    fn test_no_messages_with_path() {
        let err = KakaopackError::no_messages(Some(PathBuf::from("chat.txt")));
        let display = err.to_string();
        assert!(display.contains("No messages found in chat.txt"));
        assert!(display.contains("KakaoTalk"));
        assert!(err.is_no_messages());
    }

    #[test]
    fn test_no_messages_without_path() {
        let err = KakaopackError::no_messages(None);
        assert!(err.to_string().starts_with("No messages found."));
    }

    #[test]
    fn test_model_not_found_lists_models() {
        let err = KakaopackError::ModelNotFound {
            available: vec!["model-a".into(), "model-b".into()],
        };
        assert_eq!(
            err.to_string(),
            "Model not found. Available models: model-a, model-b"
        );
    }

    #[test]
    fn test_generation_error_source() {
        use std::error::Error as _;

        let err = KakaopackError::from(GenerationError::Other("boom".into()));
        assert!(err.to_string().contains("boom"));
        assert!(err.source().is_some());
    }

    #[test]
    fn test_invalid_format_helper() {
        let err = KakaopackError::invalid_format("output", "unknown extension");
        assert!(err.is_invalid_format());
        assert!(!err.is_io());
    }
}
