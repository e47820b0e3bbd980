//! Parsed chat message type.
//!
//! This module provides [`ParsedMessage`], the only record produced by the
//! KakaoTalk parser. Every message carries an absolute (naive, local-calendar)
//! timestamp, the sender label exactly as it appeared in the export, and the
//! message body.
//!
//! # Examples
//!
//! ```
//! use chrono::NaiveDate;
//! use kakaopack::ParsedMessage;
//!
//! let ts = NaiveDate::from_ymd_opt(2023, 10, 25)
//!     .unwrap()
//!     .and_hms_opt(15, 45, 0)
//!     .unwrap();
//! let msg = ParsedMessage::new(ts, "Alice", "hello");
//!
//! assert_eq!(msg.sender(), "Alice");
//! assert_eq!(msg.content(), "hello");
//! assert_eq!(msg.date(), NaiveDate::from_ymd_opt(2023, 10, 25).unwrap());
//! ```
//!
//! ## Serialization
//!
//! ```
//! use chrono::NaiveDate;
//! use kakaopack::ParsedMessage;
//!
//! let ts = NaiveDate::from_ymd_opt(2023, 10, 25).unwrap().and_hms_opt(9, 0, 0).unwrap();
//! let msg = ParsedMessage::new(ts, "Bob", "hi");
//! let json = serde_json::to_string(&msg)?;
//! assert!(json.contains("2023-10-25T09:00:00"));
//!
//! let back: ParsedMessage = serde_json::from_str(&json)?;
//! assert_eq!(msg, back);
//! # Ok::<(), serde_json::Error>(())
//! ```

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// A single message recovered from a chat export.
///
/// # Fields
///
/// | Field | Type | Description |
/// |-------|------|-------------|
/// | `timestamp` | `NaiveDateTime` | Section date plus the 24-hour time of the line |
/// | `sender` | `String` | Author label, unnormalized |
/// | `content` | `String` | Message body; continuation lines joined with `\n` |
///
/// Timestamps carry no timezone: exports only record the local calendar.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsedMessage {
    /// When the message was sent, seconds always zero.
    pub timestamp: NaiveDateTime,

    /// Author label exactly as it appears in the source line.
    pub sender: String,

    /// Message body.
    ///
    /// Lines that follow a message without matching any known grammar are
    /// appended here, separated by `\n`.
    pub content: String,
}

impl ParsedMessage {
    /// Creates a new message.
    pub fn new(
        timestamp: NaiveDateTime,
        sender: impl Into<String>,
        content: impl Into<String>,
    ) -> Self {
        Self {
            timestamp,
            sender: sender.into(),
            content: content.into(),
        }
    }

    /// Returns the sender name.
    pub fn sender(&self) -> &str {
        &self.sender
    }

    /// Returns the message content.
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Returns the timestamp.
    pub fn timestamp(&self) -> NaiveDateTime {
        self.timestamp
    }

    /// Returns the calendar date the message was sent on.
    pub fn date(&self) -> NaiveDate {
        self.timestamp.date()
    }

    /// Returns `true` if continuation lines were appended to this message.
    pub fn is_multiline(&self) -> bool {
        self.content.contains('\n')
    }

    /// Appends a continuation line to the content.
    pub(crate) fn push_line(&mut self, line: &str) {
        self.content.push('\n');
        self.content.push_str(line);
    }
}
