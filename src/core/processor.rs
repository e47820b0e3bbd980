//! Sender listing, merging and statistics over parsed messages.

use std::collections::HashSet;
use std::path::Path;

use crate::ParsedMessage;
use crate::error::KakaopackError;

/// Returns every distinct sender, in order of first appearance.
///
/// ```
/// use kakaopack::core::unique_senders;
/// use kakaopack::parsers::parse_kakao_chat;
///
/// let messages = parse_kakao_chat(
///     "2023. 10. 25.\n[B] [오전 9:00] hi\n[A] [오전 9:01] hey\n[B] [오전 9:02] sup",
/// );
/// assert_eq!(unique_senders(&messages), vec!["B", "A"]);
/// ```
pub fn unique_senders(messages: &[ParsedMessage]) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut senders = Vec::new();
    for msg in messages {
        if seen.insert(msg.sender.as_str()) {
            senders.push(msg.sender.clone());
        }
    }
    senders
}

/// Merges consecutive messages from the same sender into single entries.
/// This reduces token count when feeding to LLMs.
///
/// The merged entry keeps the first message's timestamp.
///
/// # Example
/// Input:  [("Alice", "Hi"), ("Alice", "How are you?"), ("Bob", "Fine")]
/// Output: [("Alice", "Hi\nHow are you?"), ("Bob", "Fine")]
pub fn merge_consecutive(messages: Vec<ParsedMessage>) -> Vec<ParsedMessage> {
    let mut merged: Vec<ParsedMessage> = Vec::with_capacity(messages.len());

    for msg in messages {
        match merged.last_mut() {
            Some(last) if last.sender == msg.sender => {
                last.push_line(&msg.content);
            }
            _ => {
                merged.push(msg);
            }
        }
    }

    merged
}

/// Turns an empty parse into [`KakaopackError::NoMessages`].
///
/// The parser returns an empty vector rather than failing; callers that need
/// at least one message use this to report it.
pub fn ensure_not_empty(
    messages: Vec<ParsedMessage>,
    source: Option<&Path>,
) -> Result<Vec<ParsedMessage>, KakaopackError> {
    if messages.is_empty() {
        return Err(KakaopackError::no_messages(source.map(Path::to_path_buf)));
    }
    Ok(messages)
}

/// Statistics about the processing result
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProcessingStats {
    pub original_count: usize,
    pub merged_count: usize,
}

impl ProcessingStats {
    pub fn new(original_count: usize, merged_count: usize) -> Self {
        Self {
            original_count,
            merged_count,
        }
    }

    /// Percentage of entries removed by merging.
    pub fn compression_ratio(&self) -> f64 {
        if self.original_count == 0 {
            return 0.0;
        }
        (1.0 - (self.merged_count as f64 / self.original_count as f64)) * 100.0
    }
}
