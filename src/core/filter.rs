//! Filter messages by date range and sender.
//!
//! This module provides [`FilterConfig`] for defining filter criteria and
//! [`apply_filters`] for filtering message collections.
//!
//! # Filter Types
//!
//! | Filter | Method | Description |
//! |--------|--------|-------------|
//! | Date from | [`with_date_from`](FilterConfig::with_date_from) | Messages on or after date |
//! | Date to | [`with_date_to`](FilterConfig::with_date_to) | Messages on or before date |
//! | Sender | [`with_sender`](FilterConfig::with_sender) | Messages from specific user |
//!
//! # Examples
//!
//! ```
//! use kakaopack::core::filter::{FilterConfig, apply_filters};
//! use kakaopack::parsers::parse_kakao_chat;
//!
//! # fn main() -> kakaopack::Result<()> {
//! let messages = parse_kakao_chat(
//!     "2024년 1월 1일\n[Alice] [오전 9:00] Old\n2024년 6월 15일\n[Alice] [오전 9:00] New",
//! );
//!
//! let config = FilterConfig::new()
//!     .with_date_from("2024-06-01")?
//!     .with_date_to("2024-12-31")?;
//!
//! let filtered = apply_filters(messages, &config);
//! assert_eq!(filtered.len(), 1);
//! assert_eq!(filtered[0].content, "New");
//! # Ok(())
//! # }
//! ```
//!
//! # Behavior Notes
//!
//! - Date bounds are inclusive whole days in the export's local calendar
//! - Sender matching is case-insensitive for ASCII characters
//! - Multiple filters are combined with AND logic

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};

use crate::ParsedMessage;
use crate::error::KakaopackError;

/// Configuration for filtering messages by date and sender.
///
/// Filters are combined with AND logic: a message must match all active
/// filters to be included in the result.
#[derive(Debug, Clone, Default)]
pub struct FilterConfig {
    /// Include only messages on or after this timestamp.
    pub after: Option<NaiveDateTime>,

    /// Include only messages on or before this timestamp.
    pub before: Option<NaiveDateTime>,

    /// Include only messages from this sender (case-insensitive).
    pub from: Option<String>,
}

impl FilterConfig {
    /// Creates a new empty filter configuration.
    ///
    /// No filters are active by default; all messages pass through.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the start date filter (inclusive).
    ///
    /// Date format: `YYYY-MM-DD`.
    ///
    /// # Errors
    ///
    /// Returns [`KakaopackError::InvalidDate`] if the format is invalid.
    pub fn with_date_from(mut self, date_str: &str) -> Result<Self, KakaopackError> {
        let date = parse_date(date_str)?;
        self.after = Some(date.and_time(NaiveTime::MIN));
        Ok(self)
    }

    /// Sets the end date filter (inclusive).
    ///
    /// Date format: `YYYY-MM-DD`.
    ///
    /// # Errors
    ///
    /// Returns [`KakaopackError::InvalidDate`] if the format is invalid.
    pub fn with_date_to(mut self, date_str: &str) -> Result<Self, KakaopackError> {
        let date = parse_date(date_str)?;
        // End of the day to include the full day
        let end = NaiveTime::from_hms_opt(23, 59, 59).unwrap_or(NaiveTime::MIN);
        self.before = Some(date.and_time(end));
        Ok(self)
    }

    /// Sets the sender filter.
    ///
    /// Matching is case-insensitive for ASCII characters.
    ///
    /// ```
    /// use kakaopack::core::filter::FilterConfig;
    ///
    /// // Matches "Alice", "alice", "ALICE"
    /// let config = FilterConfig::new().with_sender("Alice");
    /// ```
    #[must_use]
    pub fn with_sender(mut self, sender: impl Into<String>) -> Self {
        self.from = Some(sender.into());
        self
    }

    /// Sets the start timestamp directly.
    #[must_use]
    pub fn with_after(mut self, dt: NaiveDateTime) -> Self {
        self.after = Some(dt);
        self
    }

    /// Sets the end timestamp directly.
    #[must_use]
    pub fn with_before(mut self, dt: NaiveDateTime) -> Self {
        self.before = Some(dt);
        self
    }

    /// Returns `true` if any filter is active.
    pub fn is_active(&self) -> bool {
        self.after.is_some() || self.before.is_some() || self.from.is_some()
    }

    /// Returns `true` if date filters are active.
    pub fn has_date_filter(&self) -> bool {
        self.after.is_some() || self.before.is_some()
    }

    /// Returns `true` if the message passes every active filter.
    pub fn matches(&self, msg: &ParsedMessage) -> bool {
        if let Some(ref from) = self.from {
            if !msg.sender.eq_ignore_ascii_case(from) {
                return false;
            }
        }
        if self.after.is_some_and(|after| msg.timestamp < after) {
            return false;
        }
        if self.before.is_some_and(|before| msg.timestamp > before) {
            return false;
        }
        true
    }
}

fn parse_date(date_str: &str) -> Result<NaiveDate, KakaopackError> {
    NaiveDate::parse_from_str(date_str, "%Y-%m-%d")
        .map_err(|_| KakaopackError::invalid_date(date_str))
}

/// Filters a collection of messages based on the provided configuration.
///
/// Returns a new vector containing only messages that match all active
/// filters, in their original order. If no filters are active, returns the
/// original messages unchanged.
pub fn apply_filters(messages: Vec<ParsedMessage>, config: &FilterConfig) -> Vec<ParsedMessage> {
    if !config.is_active() {
        return messages;
    }

    messages
        .into_iter()
        .filter(|msg| config.matches(msg))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_msg(sender: &str, content: &str, date: &str) -> ParsedMessage {
        let day = NaiveDate::parse_from_str(date, "%Y-%m-%d").unwrap();
        ParsedMessage::new(day.and_hms_opt(12, 0, 0).unwrap(), sender, content)
    }

    #[test]
    fn test_filter_by_sender() {
        let messages = vec![
            make_msg("Alice", "Hello", "2024-01-01"),
            make_msg("Bob", "Hi", "2024-01-01"),
            make_msg("alice", "Bye", "2024-01-01"),
        ];

        let config = FilterConfig::new().with_sender("Alice");
        let filtered = apply_filters(messages, &config);

        assert_eq!(filtered.len(), 2);
        assert!(
            filtered
                .iter()
                .all(|m| m.sender.eq_ignore_ascii_case("Alice"))
        );
    }

    #[test]
    fn test_filter_korean_sender_is_exact() {
        let messages = vec![
            make_msg("민수", "안녕", "2024-01-01"),
            make_msg("민지", "하이", "2024-01-01"),
        ];
        let filtered = apply_filters(messages, &FilterConfig::new().with_sender("민수"));
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].content, "안녕");
    }

    #[test]
    fn test_filter_by_date_after() {
        let messages = vec![
            make_msg("Alice", "Old", "2024-01-01"),
            make_msg("Alice", "New", "2024-06-15"),
        ];

        let config = FilterConfig::new().with_date_from("2024-06-01").unwrap();
        let filtered = apply_filters(messages, &config);

        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].content, "New");
    }

    #[test]
    fn test_filter_by_date_before() {
        let messages = vec![
            make_msg("Alice", "Old", "2024-01-01"),
            make_msg("Alice", "New", "2024-06-15"),
        ];

        let config = FilterConfig::new().with_date_to("2024-03-01").unwrap();
        let filtered = apply_filters(messages, &config);

        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].content, "Old");
    }

    #[test]
    fn test_filter_boundaries_inclusive() {
        let messages = vec![make_msg("Alice", "Edge", "2024-06-01")];
        let config = FilterConfig::new()
            .with_date_from("2024-06-01")
            .unwrap()
            .with_date_to("2024-06-01")
            .unwrap();
        assert_eq!(apply_filters(messages, &config).len(), 1);
    }

    #[test]
    fn test_invalid_date_format() {
        let result = FilterConfig::new().with_date_from("01-01-2024");
        assert!(matches!(result, Err(KakaopackError::InvalidDate { .. })));
    }

    #[test]
    fn test_combined_filters() {
        let messages = vec![
            make_msg("Alice", "Old Alice", "2024-01-01"),
            make_msg("Alice", "New Alice", "2024-06-15"),
            make_msg("Bob", "New Bob", "2024-06-15"),
        ];

        let config = FilterConfig::new()
            .with_date_from("2024-06-01")
            .unwrap()
            .with_sender("Alice");

        let filtered = apply_filters(messages, &config);

        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].content, "New Alice");
    }

    #[test]
    fn test_is_active() {
        assert!(!FilterConfig::new().is_active());
        assert!(FilterConfig::new().with_sender("Alice").is_active());
        assert!(
            FilterConfig::new()
                .with_date_from("2024-01-01")
                .unwrap()
                .has_date_filter()
        );
    }
}
