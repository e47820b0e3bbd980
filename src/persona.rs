//! Persona prompt preparation and response parsing.
//!
//! A persona is a description of how one participant writes, produced by a
//! text generator from a sample of their messages. This module picks the
//! sample, builds the prompt and reads the model's answer back into
//! [`PersonaData`]. [`PersonaChat`] then holds a conversation with it.
//!
//! # Example
//!
//! ```rust
//! use kakaopack::config::PersonaConfig;
//! use kakaopack::parsers::parse_kakao_chat;
//! use kakaopack::persona::{build_persona_prompt, select_persona_messages};
//!
//! let messages = parse_kakao_chat(
//!     "2024년 1월 1일 월요일\n[지수] [오후 1:00] 안녕하세요~\n[지수] [오후 1:01] 사진\n[민수] [오후 1:02] ㅎㅇ",
//! );
//!
//! let samples = select_persona_messages(&messages, "지수", &PersonaConfig::default());
//! assert_eq!(samples, vec!["안녕하세요~"]);
//!
//! let prompt = build_persona_prompt("지수", &samples);
//! assert!(prompt.contains("\"지수\""));
//! ```

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::ParsedMessage;
use crate::config::{PersonaConfig, RetryConfig};
use crate::error::KakaopackError;
use crate::generate::{ChatTurn, RetryingGenerator, TextGenerator};

/// Analysis placed in [`PersonaData`] when the model answer is not valid JSON.
pub const FALLBACK_ANALYSIS: &str = "Failed to parse structured analysis.";

/// Structured persona returned by the model.
///
/// Serialized with camelCase keys, the shape the prompt asks for.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonaData {
    /// System prompt that makes a model write like the analyzed user.
    pub system_prompt: String,

    #[serde(default)]
    pub traits: Vec<String>,

    #[serde(default)]
    pub frequent_words: Vec<String>,

    /// Short summary of personality and communication style.
    #[serde(default)]
    pub analysis: String,
}

impl PersonaData {
    /// Persona built from an unparseable answer: the raw text becomes the
    /// system prompt.
    pub fn fallback(raw: impl Into<String>) -> Self {
        Self {
            system_prompt: raw.into(),
            traits: Vec::new(),
            frequent_words: Vec::new(),
            analysis: FALLBACK_ANALYSIS.to_string(),
        }
    }

    /// Returns `true` if this came from [`PersonaData::fallback`].
    pub fn is_fallback(&self) -> bool {
        self.analysis == FALLBACK_ANALYSIS && self.traits.is_empty()
    }
}

/// Picks the message bodies a persona is built from.
///
/// Keeps messages whose sender equals `target` exactly, drops bodies shorter
/// than `min_chars` characters or containing an excluded marker, and returns
/// the last `max_messages` of what remains in chat order (all of them when
/// `max_messages` is 0).
///
/// Length is counted in `char`s, so a lone emoji is one character and is
/// dropped at the default minimum of 2.
pub fn select_persona_messages<'a>(
    messages: &'a [ParsedMessage],
    target: &str,
    config: &PersonaConfig,
) -> Vec<&'a str> {
    let mut samples: Vec<&str> = messages
        .iter()
        .filter(|m| m.sender == target)
        .map(|m| m.content.as_str())
        .filter(|content| content.chars().count() >= config.min_chars)
        .filter(|content| {
            !config
                .excluded_markers
                .iter()
                .any(|marker| content.contains(marker.as_str()))
        })
        .collect();

    if config.max_messages > 0 && samples.len() > config.max_messages {
        samples.drain(..samples.len() - config.max_messages);
    }
    samples
}

/// Builds the analysis prompt for `target` from sampled message bodies.
pub fn build_persona_prompt(target: &str, samples: &[&str]) -> String {
    format!(
        r#"Analyze the following chat messages from a user named "{target}".
Identify their speaking style, tone, frequently used words, sentence structure, and personality traits.
Respond in Korean.

Messages:
{messages}

Based on this analysis, provide a JSON response with the following structure:
{{
    "systemPrompt": "A detailed system prompt for an AI to roleplay as this user. It should instruct the AI to mimic the user's tone, style, and habits exactly.",
    "traits": ["trait1", "trait2", "trait3"],
    "frequentWords": ["word1", "word2", "word3"],
    "analysis": "A brief summary of the user's personality and communication style."
}}

Output ONLY the valid JSON string. Do not include markdown formatting like ```json.
"#,
        messages = samples.join("\n"),
    )
}

/// Reads a model answer into [`PersonaData`].
///
/// Markdown code fences are removed first. An answer that still is not the
/// expected JSON object yields [`PersonaData::fallback`] holding the raw text.
pub fn parse_persona_response(response: &str) -> PersonaData {
    let cleaned = response.replace("```json", "").replace("```", "");

    match serde_json::from_str(cleaned.trim()) {
        Ok(data) => data,
        Err(err) => {
            warn!(error = %err, "persona response is not valid JSON, using raw text");
            PersonaData::fallback(response)
        }
    }
}

/// Samples `target`'s messages, asks `generator` for an analysis and parses
/// the answer.
///
/// The request goes through [`RetryingGenerator`] with `config.retry`.
///
/// # Errors
///
/// - [`KakaopackError::NoPersonaMessages`] if no message survives selection
/// - [`KakaopackError::ModelNotFound`] or [`KakaopackError::Generation`] if
///   the generator fails
pub fn generate_persona(
    messages: &[ParsedMessage],
    target: &str,
    generator: &dyn TextGenerator,
    config: &PersonaConfig,
) -> Result<PersonaData, KakaopackError> {
    let samples = select_persona_messages(messages, target, config);
    debug!(sender = target, samples = samples.len(), "selected persona messages");

    if samples.is_empty() {
        return Err(KakaopackError::NoPersonaMessages {
            sender: target.to_string(),
        });
    }

    let prompt = build_persona_prompt(target, &samples);
    let response = RetryingGenerator::new(generator, config.retry.clone()).generate(&prompt)?;
    Ok(parse_persona_response(&response))
}

/// Turns that open every [`PersonaChat`] history.
const SEED_TURNS: usize = 2;

/// A conversation with a generated persona.
///
/// The history opens with the persona's system prompt as a user turn and the
/// model's acknowledgement. Each successful [`send`](PersonaChat::send)
/// appends the message and the reply; a failed one leaves it untouched.
///
/// ```rust
/// use kakaopack::config::RetryConfig;
/// use kakaopack::generate::{GenerationError, TextGenerator};
/// use kakaopack::persona::{PersonaChat, PersonaData};
///
/// struct Parrot;
///
/// impl TextGenerator for Parrot {
///     fn generate_text(&self, _prompt: &str) -> Result<String, GenerationError> {
///         Ok("ㅋㅋ 그래".into())
///     }
///
///     fn list_models(&self) -> Result<Vec<String>, GenerationError> {
///         Ok(Vec::new())
///     }
/// }
///
/// let persona = PersonaData::fallback("너는 지수야. 반말로 짧게 대답해.");
/// let mut chat = PersonaChat::new("지수", &persona, Parrot, RetryConfig::immediate());
///
/// assert_eq!(chat.send("뭐해?")?, "ㅋㅋ 그래");
/// assert_eq!(chat.turns().len(), 2);
/// # Ok::<(), kakaopack::KakaopackError>(())
/// ```
#[derive(Debug, Clone)]
pub struct PersonaChat<G> {
    name: String,
    generator: RetryingGenerator<G>,
    history: Vec<ChatTurn>,
}

impl<G: TextGenerator> PersonaChat<G> {
    pub fn new(name: impl Into<String>, persona: &PersonaData, generator: G, retry: RetryConfig) -> Self {
        let name = name.into();
        let history = vec![
            ChatTurn::user(persona.system_prompt.clone()),
            ChatTurn::model(format!("Okay, I will act as {name}.")),
        ];
        Self {
            name,
            generator: RetryingGenerator::new(generator, retry),
            history,
        }
    }

    /// Name of the persona being played.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Full history, seed turns included.
    pub fn history(&self) -> &[ChatTurn] {
        &self.history
    }

    /// Exchanged turns, without the seed.
    pub fn turns(&self) -> &[ChatTurn] {
        &self.history[SEED_TURNS..]
    }

    /// Sends `message` and records the exchange.
    ///
    /// # Errors
    ///
    /// - [`KakaopackError::EmptyChatMessage`] for blank input; nothing is sent
    /// - generator failures as in [`RetryingGenerator::converse`]
    pub fn send(&mut self, message: &str) -> Result<String, KakaopackError> {
        if message.trim().is_empty() {
            return Err(KakaopackError::EmptyChatMessage);
        }

        let reply = self.generator.converse(&self.history, message)?;
        self.history.push(ChatTurn::user(message));
        self.history.push(ChatTurn::model(reply.clone()));
        debug!(persona = %self.name, turns = self.history.len() - SEED_TURNS, "chat reply");
        Ok(reply)
    }

    pub fn into_history(self) -> Vec<ChatTurn> {
        self.history
    }
}
