//! Chat export parsers.
//!
//! - [`KakaoParser`] - KakaoTalk TXT exports from the desktop and mobile apps

pub mod kakao;

pub use kakao::{KakaoParser, MessageLog, ParseOutcome, ParseReport, parse_kakao_chat};
