//! JSON Lines (JSONL) output writer.
//!
//! JSONL format is ideal for:
//! - Machine learning pipelines
//! - RAG (Retrieval-Augmented Generation)
//! - Line-by-line processing

use std::fs::File;
use std::io::{BufWriter, Write};

use super::json_writer::OutputMessage;
use crate::ParsedMessage;
use crate::core::models::OutputConfig;
use crate::error::KakaopackError;

/// Writes messages to JSONL (JSON Lines) format.
///
/// Each line is a valid JSON object:
/// ```jsonl
/// {"sender":"Alice","content":"Hello"}
/// {"sender":"Bob","content":"Hi"}
/// ```
pub fn write_jsonl(
    messages: &[ParsedMessage],
    output_path: &str,
    config: &OutputConfig,
) -> Result<(), KakaopackError> {
    let file = File::create(output_path)?;
    let mut writer = BufWriter::new(file);

    for msg in messages {
        let line = serde_json::to_string(&OutputMessage::new(msg, config))?;
        writeln!(writer, "{line}")?;
    }

    writer.flush()?;
    Ok(())
}

/// Converts messages to a JSONL string.
pub fn to_jsonl(messages: &[ParsedMessage], config: &OutputConfig) -> Result<String, KakaopackError> {
    let mut out = String::new();
    for msg in messages {
        out.push_str(&serde_json::to_string(&OutputMessage::new(msg, config))?);
        out.push('\n');
    }
    Ok(out)
}
