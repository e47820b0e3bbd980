//! Output format writers.
//!
//! This module provides writers for different output formats:
//! - [`write_csv`] / [`to_csv`] - CSV with semicolon delimiter (best for LLMs) - requires `csv-output` feature
//! - [`write_json`] / [`to_json`] - JSON array of messages - requires `json-output` feature
//! - [`write_jsonl`] / [`to_jsonl`] - JSON Lines (one JSON per line) - requires `json-output` feature
//!
//! # Example
//!
//! ```rust,no_run
//! # #[cfg(all(feature = "csv-output", feature = "json-output"))]
//! # fn main() -> kakaopack::Result<()> {
//! use kakaopack::core::output::{write_csv, write_json, to_csv};
//! use kakaopack::core::models::OutputConfig;
//! use kakaopack::parsers::parse_kakao_chat;
//!
//! let messages = parse_kakao_chat("2023. 10. 25. 오전 10:05, Bob : hi there");
//! let config = OutputConfig::new().with_timestamps();
//!
//! write_csv(&messages, "output.csv", &config)?;
//! write_json(&messages, "output.json", &config)?;
//! let csv_string = to_csv(&messages, &config)?;
//! # Ok(())
//! # }
//! # #[cfg(not(all(feature = "csv-output", feature = "json-output")))]
//! # fn main() {}
//! ```

#[cfg(feature = "csv-output")]
mod csv_writer;
#[cfg(feature = "json-output")]
mod json_writer;
#[cfg(feature = "json-output")]
mod jsonl_writer;

#[cfg(feature = "csv-output")]
pub use csv_writer::{to_csv, write_csv};
#[cfg(feature = "json-output")]
pub use json_writer::{to_json, write_json};
#[cfg(feature = "json-output")]
pub use jsonl_writer::{to_jsonl, write_jsonl};
