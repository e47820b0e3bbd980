//! Parser trait for chat exports.
//!
//! # Example
//!
//! ```rust,no_run
//! use kakaopack::parser::Parser;
//! use kakaopack::parsers::KakaoParser;
//! use std::path::Path;
//!
//! let parser = KakaoParser::new();
//! let messages = parser.parse(Path::new("KakaoTalk_Chat.txt"))?;
//! # Ok::<(), kakaopack::KakaopackError>(())
//! ```

use std::path::Path;

use crate::ParsedMessage;
use crate::error::KakaopackError;

/// Trait for parsing chat exports.
///
/// # Implementation Notes
///
/// Parsers must implement:
/// - [`name`](Parser::name) - Parser identifier
/// - [`parse`](Parser::parse) - Read and parse a file
/// - [`parse_str`](Parser::parse_str) - Parse from a string
pub trait Parser: Send + Sync {
    /// Returns the human-readable name of this parser.
    ///
    /// ```rust
    /// use kakaopack::parser::Parser;
    /// use kakaopack::parsers::KakaoParser;
    ///
    /// assert_eq!(KakaoParser::new().name(), "KakaoTalk");
    /// ```
    fn name(&self) -> &'static str;

    /// Parses a chat export file and returns all messages.
    ///
    /// The whole file is read into memory before parsing.
    ///
    /// # Errors
    ///
    /// Returns [`KakaopackError::Io`] if the file cannot be read or is not
    /// valid UTF-8.
    fn parse(&self, path: &Path) -> Result<Vec<ParsedMessage>, KakaopackError>;

    /// Parses chat content from a string.
    ///
    /// Useful for testing with inline data or content already in memory.
    fn parse_str(&self, content: &str) -> Result<Vec<ParsedMessage>, KakaopackError>;

    /// Parses a chat export file (convenience method accepting &str path).
    ///
    /// This is equivalent to `parse(Path::new(path))`.
    fn parse_file(&self, path: &str) -> Result<Vec<ParsedMessage>, KakaopackError> {
        self.parse(Path::new(path))
    }
}
