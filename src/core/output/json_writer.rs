//! JSON output writer.

use std::fs::File;
use std::io::Write;

use serde::Serialize;

use crate::ParsedMessage;
use crate::core::models::OutputConfig;
use crate::error::KakaopackError;

/// Message structure for JSON and JSONL output.
/// Only includes fields enabled in `OutputConfig`.
#[derive(Serialize)]
pub(super) struct OutputMessage<'a> {
    sender: &'a str,
    content: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    timestamp: Option<String>,
}

impl<'a> OutputMessage<'a> {
    pub(super) fn new(msg: &'a ParsedMessage, config: &OutputConfig) -> Self {
        Self {
            sender: &msg.sender,
            content: &msg.content,
            timestamp: config
                .include_timestamps
                .then(|| msg.timestamp.format("%Y-%m-%dT%H:%M:%S").to_string()),
        }
    }
}

/// Writes messages to JSON file as an array.
///
/// # Format
/// ```json
/// [
///   {"sender": "Alice", "content": "Hello"},
///   {"sender": "Bob", "content": "Hi"}
/// ]
/// ```
pub fn write_json(
    messages: &[ParsedMessage],
    output_path: &str,
    config: &OutputConfig,
) -> Result<(), KakaopackError> {
    let json = to_json(messages, config)?;
    let mut file = File::create(output_path)?;
    file.write_all(json.as_bytes())?;
    Ok(())
}

/// Converts messages to JSON string as an array.
///
/// Same format as `write_json`, but returns a String instead of writing to file.
pub fn to_json(messages: &[ParsedMessage], config: &OutputConfig) -> Result<String, KakaopackError> {
    let json_messages: Vec<OutputMessage<'_>> = messages
        .iter()
        .map(|m| OutputMessage::new(m, config))
        .collect();

    Ok(serde_json::to_string_pretty(&json_messages)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use tempfile::NamedTempFile;

    fn msg(sender: &str, content: &str) -> ParsedMessage {
        let ts = NaiveDate::from_ymd_opt(2024, 6, 15)
            .unwrap()
            .and_hms_opt(12, 30, 0)
            .unwrap();
        ParsedMessage::new(ts, sender, content)
    }

    #[test]
    fn test_to_json_basic() {
        let messages = vec![msg("Alice", "Hello"), msg("Bob", "Hi")];
        let json = to_json(&messages, &OutputConfig::new()).unwrap();

        assert!(json.contains(r#""sender": "Alice""#));
        assert!(json.contains(r#""content": "Hello""#));
        assert!(!json.contains("timestamp"));
    }

    #[test]
    fn test_write_json_with_timestamps() {
        let temp_file = NamedTempFile::new().unwrap();
        let path = temp_file.path().to_str().unwrap();

        write_json(&[msg("Alice", "Hello")], path, &OutputConfig::new().with_timestamps()).unwrap();

        let content = std::fs::read_to_string(path).unwrap();
        assert!(content.contains(r#""timestamp": "2024-06-15T12:30:00""#));
    }
}
