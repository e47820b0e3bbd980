//! # Kakaopack
//!
//! A Rust library for parsing KakaoTalk chat exports into timestamped messages
//! and preparing them for LLM persona analysis.
//!
//! ## Overview
//!
//! KakaoTalk exports a conversation as plain text. The desktop app groups
//! messages under date header lines, the mobile apps write the date on every
//! line:
//!
//! ```text
//! --------------- 2023년 10월 25일 수요일 ---------------
//! [지수] [오후 3:45] 안녕!
//! 2023. 10. 25. 오후 3:46, 민수 : 반가워
//! ```
//!
//! Kakaopack recognizes both layouts (including English `AM`/`PM` markers),
//! attaches unrecognized lines to the previous message as continuation text
//! and never fails on malformed input.
//!
//! ## Quick Start
//!
//! ```rust
//! use kakaopack::prelude::*;
//!
//! let text = "\
//! 2023년 10월 25일 수요일
//! [지수] [오후 3:45] 안녕!
//! 여러 줄 메시지
//! [민수] [PM 3:46] 반가워";
//!
//! let messages = parse_kakao_chat(text);
//! assert_eq!(messages.len(), 2);
//! assert_eq!(messages[0].content, "안녕!\n여러 줄 메시지");
//! assert_eq!(unique_senders(&messages), vec!["지수", "민수"]);
//! ```
//!
//! ## Parse Reports
//!
//! Lines that cannot be placed (a bracketed message before any date header,
//! or free text before the first message) are dropped. Use
//! [`KakaoParser::parse_with_report`](parsers::KakaoParser::parse_with_report)
//! to see how many:
//!
//! ```rust
//! use kakaopack::parsers::KakaoParser;
//!
//! let outcome = KakaoParser::new().parse_with_report("[A] [오전 9:00] too early");
//! assert!(outcome.messages.is_empty());
//! assert_eq!(outcome.report.dateless_dropped, 1);
//! ```
//!
//! ## Module Structure
//!
//! - [`parsing`] - Line grammars and date/time normalization
//!   - [`LineClassifier`](parsing::LineClassifier), [`HalfDay`](parsing::HalfDay),
//!     [`to_24_hour`](parsing::to_24_hour)
//! - [`parsers`] - [`KakaoParser`](parsers::KakaoParser) and [`parse_kakao_chat`](parsers::parse_kakao_chat)
//! - [`parser`] - The [`Parser`](parser::Parser) trait
//! - [`message`] - [`ParsedMessage`]
//! - [`config`] - [`KakaoConfig`](config::KakaoConfig), [`PersonaConfig`](config::PersonaConfig),
//!   [`RetryConfig`](config::RetryConfig)
//! - [`core`] - Filtering, merging, sender listing and output writers
//! - [`format`] - [`OutputFormat`](format::OutputFormat) dispatch
//! - [`generate`] - Text-generation collaborator contract (prompts and chat turns) with retries
//! - `persona` - Persona prompt preparation and chat sessions (feature `persona`)
//! - [`error`] - [`KakaopackError`], [`Result`]
//! - [`prelude`] - Convenient re-exports
//!
//! ## Features
//!
//! | Feature | Enables |
//! |---------|---------|
//! | `csv-output` | CSV writer |
//! | `json-output` | JSON and JSONL writers |
//! | `persona` | [`persona`] module |
//! | `cli` | the `kakaopack` binary |
//! | `full` | all of the above (default) |

#[cfg(feature = "cli")]
pub mod cli;
pub mod config;
pub mod core;
pub mod error;
pub mod format;
pub mod generate;
pub mod message;
pub mod parser;
pub mod parsers;
pub mod parsing;
#[cfg(feature = "persona")]
pub mod persona;

// Re-export the main types at the crate root for convenience
pub use error::{KakaopackError, Result};
pub use message::ParsedMessage;

/// Convenient re-exports for common usage.
///
/// Import everything you need with a single line:
///
/// ```rust
/// use kakaopack::prelude::*;
/// ```
pub mod prelude {
    // Core message type
    pub use crate::ParsedMessage;

    // Error types
    pub use crate::error::{KakaopackError, Result};

    // Parsing
    pub use crate::config::KakaoConfig;
    pub use crate::parser::Parser;
    pub use crate::parsers::{KakaoParser, ParseReport, parse_kakao_chat};

    // Post-processing
    pub use crate::core::filter::{FilterConfig, apply_filters};
    pub use crate::core::models::OutputConfig;
    pub use crate::core::processor::{
        ProcessingStats, ensure_not_empty, merge_consecutive, unique_senders,
    };

    // Output (file writers and string converters)
    #[cfg(feature = "csv-output")]
    pub use crate::core::output::{to_csv, write_csv};
    #[cfg(feature = "json-output")]
    pub use crate::core::output::{to_json, to_jsonl, write_json, write_jsonl};
    pub use crate::format::{OutputFormat, to_format_string, write_to_format};

    // Text generation
    pub use crate::config::{PersonaConfig, RetryConfig};
    pub use crate::generate::{ChatRole, ChatTurn, GenerationError, RetryingGenerator, TextGenerator};
    #[cfg(feature = "persona")]
    pub use crate::persona::{PersonaChat, PersonaData, generate_persona};
}
