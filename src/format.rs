//! Picks a writer for a parsed export.
//!
//! The CLI maps its `-f` flag onto [`OutputFormat`]; library callers can use
//! it directly or infer it from a file name with [`OutputFormat::from_path`].
//!
//! ```rust
//! # #[cfg(feature = "csv-output")]
//! # fn example() -> kakaopack::Result<()> {
//! use kakaopack::core::models::OutputConfig;
//! use kakaopack::format::{OutputFormat, to_format_string};
//! use kakaopack::parsers::parse_kakao_chat;
//!
//! let messages = parse_kakao_chat("2024. 1. 1. 오후 1:00, 지수 : 새해 복 많이 받아");
//! let csv = to_format_string(&messages, OutputFormat::Csv, &OutputConfig::new())?;
//! assert_eq!(csv, "Sender;Content\n지수;새해 복 많이 받아\n");
//! # Ok(())
//! # }
//! ```

use std::fmt;
use std::path::Path;

use crate::ParsedMessage;
use crate::core::models::OutputConfig;
use crate::error::KakaopackError;

/// Serialization of a message list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum OutputFormat {
    /// `;`-delimited CSV (`Sender;Content`, optionally led by `Timestamp`)
    #[default]
    Csv,
    /// Pretty-printed JSON array
    Json,
    /// One JSON object per line
    Jsonl,
}

impl OutputFormat {
    pub fn extension(self) -> &'static str {
        match self {
            OutputFormat::Csv => "csv",
            OutputFormat::Json => "json",
            OutputFormat::Jsonl => "jsonl",
        }
    }

    /// Infers the format from a file extension (case-insensitive).
    /// `.ndjson` is read as JSONL.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, KakaopackError> {
        let ext = path
            .as_ref()
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase)
            .unwrap_or_default();

        match ext.as_str() {
            "csv" => Ok(OutputFormat::Csv),
            "json" => Ok(OutputFormat::Json),
            "jsonl" | "ndjson" => Ok(OutputFormat::Jsonl),
            _ => Err(KakaopackError::invalid_format(
                "output",
                format!("cannot infer format from extension '{ext}' (csv, json, jsonl)"),
            )),
        }
    }

    fn feature(self) -> &'static str {
        match self {
            OutputFormat::Csv => "csv-output",
            OutputFormat::Json | OutputFormat::Jsonl => "json-output",
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            OutputFormat::Csv => "CSV",
            OutputFormat::Json => "JSON",
            OutputFormat::Jsonl => "JSONL",
        })
    }
}

#[allow(dead_code)]
fn disabled(format: OutputFormat) -> KakaopackError {
    KakaopackError::invalid_format(
        "output",
        format!("{format} output needs the '{}' feature", format.feature()),
    )
}

/// Writes `messages` to `path` with the writer for `format`.
///
/// # Errors
///
/// I/O and serializer errors from the writer, or
/// [`KakaopackError::InvalidFormat`] when the writer's feature is off.
#[allow(unused_variables)]
pub fn write_to_format(
    messages: &[ParsedMessage],
    path: &str,
    format: OutputFormat,
    config: &OutputConfig,
) -> Result<(), KakaopackError> {
    use crate::core::output;

    match format {
        #[cfg(feature = "csv-output")]
        OutputFormat::Csv => output::write_csv(messages, path, config),
        #[cfg(feature = "json-output")]
        OutputFormat::Json => output::write_json(messages, path, config),
        #[cfg(feature = "json-output")]
        OutputFormat::Jsonl => output::write_jsonl(messages, path, config),
        #[allow(unreachable_patterns)]
        other => Err(disabled(other)),
    }
}

/// Renders `messages` in `format` without touching the filesystem.
#[allow(unused_variables)]
pub fn to_format_string(
    messages: &[ParsedMessage],
    format: OutputFormat,
    config: &OutputConfig,
) -> Result<String, KakaopackError> {
    use crate::core::output;

    match format {
        #[cfg(feature = "csv-output")]
        OutputFormat::Csv => output::to_csv(messages, config),
        #[cfg(feature = "json-output")]
        OutputFormat::Json => output::to_json(messages, config),
        #[cfg(feature = "json-output")]
        OutputFormat::Jsonl => output::to_jsonl(messages, config),
        #[allow(unreachable_patterns)]
        other => Err(disabled(other)),
    }
}
