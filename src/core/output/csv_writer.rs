//! CSV output writer.

use std::fs::File;

use crate::ParsedMessage;
use crate::core::models::OutputConfig;
use crate::error::KakaopackError;

/// Writes messages to CSV with semicolon delimiter.
///
/// # Format
/// - Delimiter: `;`
/// - Columns: `Sender`, `Content`, with a leading `Timestamp` when enabled
/// - Encoding: UTF-8
pub fn write_csv(
    messages: &[ParsedMessage],
    output_path: &str,
    config: &OutputConfig,
) -> Result<(), KakaopackError> {
    let file = File::create(output_path)?;
    let mut writer = csv::WriterBuilder::new()
        .delimiter(b';')
        .from_writer(file);
    write_records(&mut writer, messages, config)?;
    writer.flush()?;
    Ok(())
}

/// Converts messages to a CSV string.
///
/// Same format as [`write_csv`], but returns a String instead of writing to file.
pub fn to_csv(messages: &[ParsedMessage], config: &OutputConfig) -> Result<String, KakaopackError> {
    let mut writer = csv::WriterBuilder::new()
        .delimiter(b';')
        .from_writer(Vec::new());
    write_records(&mut writer, messages, config)?;
    let bytes = writer
        .into_inner()
        .map_err(|e| KakaopackError::Io(e.into_error()))?;
    Ok(String::from_utf8(bytes)?)
}

fn write_records<W: std::io::Write>(
    writer: &mut csv::Writer<W>,
    messages: &[ParsedMessage],
    config: &OutputConfig,
) -> Result<(), KakaopackError> {
    writer.write_record(build_header(config))?;
    for msg in messages {
        writer.write_record(build_record(msg, config))?;
    }
    Ok(())
}

/// Build CSV header based on output configuration.
fn build_header(config: &OutputConfig) -> Vec<&'static str> {
    let mut header = Vec::with_capacity(3);
    if config.include_timestamps {
        header.push("Timestamp");
    }
    header.push("Sender");
    header.push("Content");
    header
}

/// Build CSV record for a single message.
fn build_record(msg: &ParsedMessage, config: &OutputConfig) -> Vec<String> {
    let mut record = Vec::with_capacity(3);
    if config.include_timestamps {
        record.push(msg.timestamp.format("%Y-%m-%d %H:%M:%S").to_string());
    }
    record.push(msg.sender.clone());
    record.push(msg.content.clone());
    record
}
