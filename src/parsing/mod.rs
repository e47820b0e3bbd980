//! Line-level parsing utilities.
//!
//! This module holds the grammars and pure conversion functions that the
//! document parser in [`crate::parsers`] folds over.

pub mod kakao;

pub use kakao::{
    ClockTime, DateNotation, HalfDay, Line, LineClassifier, calendar_date, to_24_hour, to_timestamp,
    trim_line,
};
