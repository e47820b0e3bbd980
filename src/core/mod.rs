//! Post-processing for parsed messages.
//!
//! This module contains:
//! - [`models`] - Output configuration
//! - [`filter`] - Message filtering by date and sender
//! - [`processor`] - Sender listing, merging and statistics
//! - [`output`] - Format writers (CSV, JSON, JSONL)
//!
//! # Quick Start
//!
//! ```rust
//! # #[cfg(all(feature = "csv-output", feature = "json-output"))]
//! # fn example() {
//! use kakaopack::core::{
//!     FilterConfig, OutputConfig,
//!     merge_consecutive, apply_filters, unique_senders,
//!     write_csv, write_json, write_jsonl,
//! };
//! # }
//! ```

pub mod filter;
pub mod models;
pub mod output;
pub mod processor;

// Re-export main types for convenience
pub use filter::{FilterConfig, apply_filters};
pub use models::OutputConfig;

// Conditionally re-export output writers
#[cfg(feature = "csv-output")]
pub use output::{to_csv, write_csv};
#[cfg(feature = "json-output")]
pub use output::{to_json, to_jsonl, write_json, write_jsonl};

pub use processor::{ProcessingStats, ensure_not_empty, merge_consecutive, unique_senders};
