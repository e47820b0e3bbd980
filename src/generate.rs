//! Text-generation collaborator contract.
//!
//! kakaopack does not talk to any model service itself. Callers plug in a
//! [`TextGenerator`] (an HTTP client, a local model, a test double) and wrap it
//! in [`RetryingGenerator`] to get the retry and not-found handling that
//! persona generation relies on.
//!
//! # Example
//!
//! ```rust
//! use kakaopack::config::RetryConfig;
//! use kakaopack::generate::{GenerationError, RetryingGenerator, TextGenerator};
//!
//! struct Echo;
//!
//! impl TextGenerator for Echo {
//!     fn generate_text(&self, prompt: &str) -> Result<String, GenerationError> {
//!         Ok(prompt.to_uppercase())
//!     }
//!
//!     fn list_models(&self) -> Result<Vec<String>, GenerationError> {
//!         Ok(vec!["echo".into()])
//!     }
//! }
//!
//! let generator = RetryingGenerator::new(Echo, RetryConfig::immediate());
//! assert_eq!(generator.generate("hi")?, "HI");
//! # Ok::<(), kakaopack::KakaopackError>(())
//! ```

use std::thread;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

use crate::config::RetryConfig;
use crate::error::KakaopackError;

/// Failure reported by a [`TextGenerator`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GenerationError {
    /// The service is temporarily overloaded; the request may be retried.
    #[error("model overloaded: {0}")]
    Overloaded(String),

    /// The configured model does not exist.
    #[error("model not found: {0}")]
    NotFound(String),

    /// Any other failure. Never retried.
    #[error("{0}")]
    Other(String),
}

impl GenerationError {
    /// Returns `true` if the request may succeed when repeated.
    pub fn is_transient(&self) -> bool {
        matches!(self, GenerationError::Overloaded(_))
    }
}

/// Author of a [`ChatTurn`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    User,
    Model,
}

impl ChatRole {
    fn label(self) -> &'static str {
        match self {
            ChatRole::User => "User",
            ChatRole::Model => "Model",
        }
    }
}

/// One message of a multi-turn conversation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatTurn {
    pub role: ChatRole,
    pub text: String,
}

impl ChatTurn {
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            role: ChatRole::User,
            text: text.into(),
        }
    }

    pub fn model(text: impl Into<String>) -> Self {
        Self {
            role: ChatRole::Model,
            text: text.into(),
        }
    }
}

/// Flattens a conversation into a single prompt ending with an open model turn.
pub fn render_transcript(history: &[ChatTurn], message: &str) -> String {
    let mut prompt = String::new();
    for turn in history {
        prompt.push_str(&format!("{}: {}\n", turn.role.label(), turn.text));
    }
    prompt.push_str(&format!("{}: {message}\n{}:", ChatRole::User.label(), ChatRole::Model.label()));
    prompt
}

/// A service that turns a prompt into text.
pub trait TextGenerator {
    /// Generates a completion for `prompt`.
    fn generate_text(&self, prompt: &str) -> Result<String, GenerationError>;

    /// Lists the model identifiers the service offers.
    fn list_models(&self) -> Result<Vec<String>, GenerationError>;

    /// Answers `message` given the earlier turns of a conversation.
    ///
    /// Services with a native multi-turn API should override this. The
    /// default sends [`render_transcript`] through [`generate_text`](Self::generate_text).
    fn chat(&self, history: &[ChatTurn], message: &str) -> Result<String, GenerationError> {
        self.generate_text(&render_transcript(history, message))
    }
}

impl<T: TextGenerator + ?Sized> TextGenerator for &T {
    fn generate_text(&self, prompt: &str) -> Result<String, GenerationError> {
        (**self).generate_text(prompt)
    }

    fn list_models(&self) -> Result<Vec<String>, GenerationError> {
        (**self).list_models()
    }

    fn chat(&self, history: &[ChatTurn], message: &str) -> Result<String, GenerationError> {
        (**self).chat(history, message)
    }
}

/// Wraps a [`TextGenerator`] with the retry policy from [`RetryConfig`].
///
/// - [`GenerationError::Overloaded`] is retried up to `max_retries` times,
///   sleeping `delay` before each retry
/// - [`GenerationError::NotFound`] asks the service for its models and fails
///   with [`KakaopackError::ModelNotFound`]
/// - anything else becomes [`KakaopackError::Generation`]
#[derive(Debug, Clone)]
pub struct RetryingGenerator<G> {
    inner: G,
    config: RetryConfig,
}

impl<G: TextGenerator> RetryingGenerator<G> {
    pub fn new(inner: G, config: RetryConfig) -> Self {
        Self { inner, config }
    }

    /// Wraps `inner` with the default policy (3 retries, 2 seconds apart).
    pub fn with_defaults(inner: G) -> Self {
        Self::new(inner, RetryConfig::default())
    }

    pub fn config(&self) -> &RetryConfig {
        &self.config
    }

    pub fn into_inner(self) -> G {
        self.inner
    }

    /// Generates text for `prompt`, applying the retry policy.
    pub fn generate(&self, prompt: &str) -> Result<String, KakaopackError> {
        self.with_policy(|| self.inner.generate_text(prompt))
    }

    /// Sends one chat message, applying the retry policy.
    pub fn converse(&self, history: &[ChatTurn], message: &str) -> Result<String, KakaopackError> {
        self.with_policy(|| self.inner.chat(history, message))
    }

    fn with_policy<F>(&self, mut call: F) -> Result<String, KakaopackError>
    where
        F: FnMut() -> Result<String, GenerationError>,
    {
        let mut retries_left = self.config.max_retries;

        loop {
            match call() {
                Ok(text) => return Ok(text),
                Err(err) if err.is_transient() && retries_left > 0 => {
                    warn!(
                        error = %err,
                        retries_left,
                        "model overloaded, retrying"
                    );
                    retries_left -= 1;
                    if !self.config.delay.is_zero() {
                        thread::sleep(self.config.delay);
                    }
                }
                Err(GenerationError::NotFound(reason)) => {
                    debug!(%reason, "model not found, listing available models");
                    let available = self.inner.list_models().unwrap_or_else(|err| {
                        warn!(error = %err, "failed to list models");
                        Vec::new()
                    });
                    return Err(KakaopackError::ModelNotFound { available });
                }
                Err(err) => return Err(err.into()),
            }
        }
    }
}

fn to_generation_error(err: KakaopackError) -> GenerationError {
    match err {
        KakaopackError::Generation(inner) => inner,
        KakaopackError::ModelNotFound { available } => {
            GenerationError::NotFound(format!("available models: {}", available.join(", ")))
        }
        other => GenerationError::Other(other.to_string()),
    }
}

impl<G: TextGenerator> TextGenerator for RetryingGenerator<G> {
    fn generate_text(&self, prompt: &str) -> Result<String, GenerationError> {
        self.generate(prompt).map_err(to_generation_error)
    }

    fn list_models(&self) -> Result<Vec<String>, GenerationError> {
        self.inner.list_models()
    }

    fn chat(&self, history: &[ChatTurn], message: &str) -> Result<String, GenerationError> {
        self.converse(history, message).map_err(to_generation_error)
    }
}
