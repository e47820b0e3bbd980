//! Configuration types for parsing, persona preparation and retries.
//!
//! This module provides clean configuration structs for library usage,
//! without any CLI framework dependencies.
//!
//! - [`KakaoConfig`] - KakaoTalk parser settings
//! - [`PersonaConfig`] - how messages are sampled for persona analysis
//! - [`RetryConfig`] - retry policy for the text-generation collaborator
//!
//! # Example
//!
//! ```rust
//! use kakaopack::config::KakaoConfig;
//! use kakaopack::parsers::KakaoParser;
//!
//! let config = KakaoConfig::new().with_warn_drop_ratio(0.25);
//! let parser = KakaoParser::with_config(config);
//! ```

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Configuration for KakaoTalk export parsing.
///
/// The line grammars themselves are fixed; this only controls how lines the
/// parser had to drop are reported.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KakaoConfig {
    /// Log a warning when more than this fraction of non-empty lines was
    /// dropped (default: 0.1). Set to `1.0` to never warn.
    pub warn_drop_ratio: f64,
}

impl Default for KakaoConfig {
    fn default() -> Self {
        Self {
            warn_drop_ratio: 0.1,
        }
    }
}

impl KakaoConfig {
    /// Creates a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the drop ratio above which a warning is logged.
    #[must_use]
    pub fn with_warn_drop_ratio(mut self, ratio: f64) -> Self {
        self.warn_drop_ratio = ratio;
        self
    }
}

/// Configuration for selecting the messages a persona is built from.
///
/// # Example
///
/// ```rust
/// use kakaopack::config::PersonaConfig;
///
/// let config = PersonaConfig::new()
///     .with_max_messages(200)
///     .with_excluded_marker("동영상");
/// assert_eq!(config.excluded_markers.len(), 3);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersonaConfig {
    /// Keep at most this many of the sender's most recent messages;
    /// 0 keeps all of them (default: 1000)
    pub max_messages: usize,

    /// Minimum content length in characters (default: 2)
    pub min_chars: usize,

    /// Messages containing any of these are attachment placeholders and are
    /// skipped (default: `이모티콘`, `사진`)
    pub excluded_markers: Vec<String>,

    /// Retry policy for the generation request
    #[serde(default)]
    pub retry: RetryConfig,
}

impl Default for PersonaConfig {
    fn default() -> Self {
        Self {
            max_messages: 1000,
            min_chars: 2,
            excluded_markers: vec!["이모티콘".to_string(), "사진".to_string()],
            retry: RetryConfig::default(),
        }
    }
}

impl PersonaConfig {
    /// Creates a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the maximum number of sampled messages.
    #[must_use]
    pub fn with_max_messages(mut self, max: usize) -> Self {
        self.max_messages = max;
        self
    }

    /// Sets the minimum content length in characters.
    #[must_use]
    pub fn with_min_chars(mut self, min: usize) -> Self {
        self.min_chars = min;
        self
    }

    /// Adds a placeholder marker to skip.
    #[must_use]
    pub fn with_excluded_marker(mut self, marker: impl Into<String>) -> Self {
        self.excluded_markers.push(marker.into());
        self
    }

    /// Sets the retry policy used by persona generation.
    #[must_use]
    pub fn with_retry(mut self, retry: RetryConfig) -> Self {
        self.retry = retry;
        self
    }
}

/// Retry policy for transient "overloaded" failures of a text generator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RetryConfig {
    /// Retries after the first attempt (default: 3)
    pub max_retries: u32,

    /// Fixed wait between attempts (default: 2s)
    pub delay: Duration,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_retries: 3,
            delay: Duration::from_secs(2),
        }
    }
}

impl RetryConfig {
    /// Creates a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the number of retries.
    #[must_use]
    pub fn with_max_retries(mut self, retries: u32) -> Self {
        self.max_retries = retries;
        self
    }

    /// Sets the delay between attempts.
    #[must_use]
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// A policy that never waits, for tests.
    pub fn immediate() -> Self {
        Self {
            delay: Duration::ZERO,
            ..Self::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kakao_config_default() {
        let config = KakaoConfig::default();
        assert!((config.warn_drop_ratio - 0.1).abs() < f64::EPSILON);
    }

    #[test]
    fn test_kakao_config_builder() {
        let config = KakaoConfig::new().with_warn_drop_ratio(0.5);
        assert!((config.warn_drop_ratio - 0.5).abs() < f64::EPSILON);
    }

    #[test]
    fn test_persona_config_default() {
        let config = PersonaConfig::default();
        assert_eq!(config.max_messages, 1000);
        assert_eq!(config.min_chars, 2);
        assert_eq!(config.excluded_markers, vec!["이모티콘", "사진"]);
    }

    #[test]
    fn test_persona_config_builder() {
        let config = PersonaConfig::new()
            .with_max_messages(10)
            .with_min_chars(5)
            .with_excluded_marker("파일");
        assert_eq!(config.max_messages, 10);
        assert_eq!(config.min_chars, 5);
        assert!(config.excluded_markers.contains(&"파일".to_string()));
    }

    #[test]
    fn test_retry_config_default() {
        let config = RetryConfig::default();
        assert_eq!(config.max_retries, 3);
        assert_eq!(config.delay, Duration::from_secs(2));
    }

    #[test]
    fn test_retry_config_immediate() {
        let config = RetryConfig::immediate().with_max_retries(1);
        assert_eq!(config.delay, Duration::ZERO);
        assert_eq!(config.max_retries, 1);
    }

    #[test]
    fn test_config_serde() {
        let config = PersonaConfig::new().with_max_messages(5);
        let json = serde_json::to_string(&config).unwrap();
        let parsed: PersonaConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, config);
    }
}
