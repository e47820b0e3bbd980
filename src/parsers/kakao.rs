//! KakaoTalk TXT export parser.
//!
//! KakaoTalk exports differ between apps. This parser accepts all of them in
//! a single pass, line by line:
//!
//! - Desktop: `2023년 10월 25일 수요일` headers followed by `[Sender] [오후 3:45] Message`
//! - Mobile: `2023. 10. 25. 오전 10:05, Sender : Message`
//! - Mobile (Korean dates): `2023년 10월 25일 오후 1:00, Sender : Message`
//!
//! Lines that match no grammar are appended to the previous message. The only
//! state carried between lines is the current section date, threaded through
//! a fold together with the output log.
//!
//! Parsing never fails. Two kinds of lines are dropped instead, and counted
//! in [`ParseReport`]:
//! - bracketed messages that appear before any date is known
//! - continuation lines that appear before the first message

use std::fs;
use std::path::Path;

use chrono::{NaiveDate, NaiveDateTime};
use serde::Serialize;
use tracing::{debug, warn};

use crate::ParsedMessage;
use crate::config::KakaoConfig;
use crate::error::KakaopackError;
use crate::parser::Parser;
use crate::parsing::kakao::{Line, LineClassifier, trim_line};

/// Parses a KakaoTalk export with the default configuration.
///
/// This is the pure `(text) → messages` entry point: it never fails and
/// keeps no state between calls.
///
/// ```
/// use kakaopack::parsers::parse_kakao_chat;
///
/// let messages = parse_kakao_chat("2023년 10월 25일 수요일\n[Alice] [오후 3:45] hello");
/// assert_eq!(messages.len(), 1);
/// assert_eq!(messages[0].sender, "Alice");
/// ```
pub fn parse_kakao_chat(text: &str) -> Vec<ParsedMessage> {
    KakaoParser::new().parse_text(text)
}

/// Parser for KakaoTalk TXT exports.
///
/// # Example
///
/// ```rust
/// use kakaopack::parsers::KakaoParser;
///
/// let parser = KakaoParser::new();
/// let outcome = parser.parse_with_report("[Alice] [오전 9:00] too early\n2023. 10. 25.");
///
/// assert!(outcome.messages.is_empty());
/// assert_eq!(outcome.report.dateless_dropped, 1);
/// ```
#[derive(Debug, Clone)]
pub struct KakaoParser {
    config: KakaoConfig,
    classifier: LineClassifier,
}

impl KakaoParser {
    /// Creates a new parser with default configuration.
    pub fn new() -> Self {
        Self::with_config(KakaoConfig::default())
    }

    /// Creates a parser with custom configuration.
    pub fn with_config(config: KakaoConfig) -> Self {
        Self {
            config,
            classifier: LineClassifier::new(),
        }
    }

    /// Returns the current configuration.
    pub fn config(&self) -> &KakaoConfig {
        &self.config
    }

    /// Parses a whole document. Never fails; may return an empty vector.
    pub fn parse_text(&self, content: &str) -> Vec<ParsedMessage> {
        self.parse_with_report(content).messages
    }

    /// Parses a whole document and reports what was dropped along the way.
    pub fn parse_with_report(&self, content: &str) -> ParseOutcome {
        let state = content
            .lines()
            .enumerate()
            .fold(ParseState::default(), |state, (index, raw)| {
                state.step(&self.classifier, index + 1, raw)
            });

        let report = state.report;
        debug!(
            lines = report.lines,
            headers = report.headers,
            messages = report.messages,
            continuations = report.continuations,
            dropped = report.dropped(),
            "parsed KakaoTalk export"
        );
        if report.dropped() > 0 && report.drop_ratio() > self.config.warn_drop_ratio {
            warn!(
                dateless = report.dateless_dropped,
                orphans = report.orphans_dropped,
                ratio = report.drop_ratio(),
                "many lines were dropped; the export may use an unsupported format"
            );
        }

        ParseOutcome {
            messages: state.log.into_messages(),
            report,
        }
    }
}

impl Default for KakaoParser {
    fn default() -> Self {
        Self::new()
    }
}

impl Parser for KakaoParser {
    fn name(&self) -> &'static str {
        "KakaoTalk"
    }

    fn parse(&self, path: &Path) -> Result<Vec<ParsedMessage>, KakaopackError> {
        let content = fs::read_to_string(path)?;
        Ok(self.parse_text(&content))
    }

    fn parse_str(&self, content: &str) -> Result<Vec<ParsedMessage>, KakaopackError> {
        Ok(self.parse_text(content))
    }
}

/// Messages produced by one parse, with its diagnostics.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseOutcome {
    /// Messages in source line order.
    pub messages: Vec<ParsedMessage>,
    /// Line counters.
    pub report: ParseReport,
}

/// Per-parse line counters.
///
/// `lines = blank_lines + headers + messages + continuations + dropped()`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ParseReport {
    /// Physical lines seen.
    pub lines: usize,
    /// Empty or whitespace-only lines.
    pub blank_lines: usize,
    /// Date-section headers recognized.
    pub headers: usize,
    /// Messages created.
    pub messages: usize,
    /// Lines appended to an existing message.
    pub continuations: usize,
    /// Bracketed messages dropped because no date was known yet.
    pub dateless_dropped: usize,
    /// Continuation lines dropped because no message existed yet.
    pub orphans_dropped: usize,
}

impl ParseReport {
    /// Total number of dropped lines.
    pub fn dropped(&self) -> usize {
        self.dateless_dropped + self.orphans_dropped
    }

    /// Fraction of non-empty lines that were dropped, in `0.0..=1.0`.
    pub fn drop_ratio(&self) -> f64 {
        let non_blank = self.lines - self.blank_lines;
        if non_blank == 0 {
            return 0.0;
        }
        self.dropped() as f64 / non_blank as f64
    }
}

/// Ordered output of a parse.
///
/// Messages are only ever appended or extended at the end.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MessageLog {
    messages: Vec<ParsedMessage>,
}

impl MessageLog {
    /// Creates an empty log.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a new message.
    pub fn append(&mut self, message: ParsedMessage) {
        self.messages.push(message);
    }

    /// Appends `line` to the last message's content, separated by `\n`.
    ///
    /// Returns `false` and does nothing when the log is empty.
    pub fn extend_last(&mut self, line: &str) -> bool {
        match self.messages.last_mut() {
            Some(last) => {
                last.push_line(line);
                true
            }
            None => false,
        }
    }

    /// Returns the most recent message.
    pub fn last(&self) -> Option<&ParsedMessage> {
        self.messages.last()
    }

    /// Number of messages.
    pub fn len(&self) -> usize {
        self.messages.len()
    }

    /// Returns `true` if no message was added yet.
    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// Consumes the log, returning messages in insertion order.
    pub fn into_messages(self) -> Vec<ParsedMessage> {
        self.messages
    }
}

/// Fold accumulator.
#[derive(Debug, Default)]
struct ParseState {
    section_date: Option<NaiveDate>,
    log: MessageLog,
    report: ParseReport,
}

impl ParseState {
    fn step(mut self, classifier: &LineClassifier, line_no: usize, raw: &str) -> Self {
        self.report.lines += 1;

        let line = trim_line(raw);
        if line.is_empty() {
            self.report.blank_lines += 1;
            return self;
        }

        match classifier.classify(line) {
            Line::Header(date) => {
                self.section_date = Some(date);
                self.report.headers += 1;
            }
            Line::Bracketed {
                time,
                sender,
                content,
            } => match self.section_date.and_then(|date| time.on(date)) {
                Some(timestamp) => self.push(timestamp, sender, content),
                None => {
                    self.report.dateless_dropped += 1;
                    debug!(line = line_no, "dropped message line before any date header");
                }
            },
            Line::Dated {
                date,
                timestamp,
                sender,
                content,
                ..
            } => {
                self.section_date = Some(date);
                self.push(timestamp, sender, content);
            }
            Line::Continuation(text) => {
                if self.log.extend_last(text) {
                    self.report.continuations += 1;
                } else {
                    self.report.orphans_dropped += 1;
                    debug!(line = line_no, "dropped text before the first message");
                }
            }
        }

        self
    }

    fn push(&mut self, timestamp: NaiveDateTime, sender: &str, content: &str) {
        self.log
            .append(ParsedMessage::new(timestamp, sender, content));
        self.report.messages += 1;
    }
}
