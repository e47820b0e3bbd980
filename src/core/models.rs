//! Output configuration.

use serde::{Deserialize, Serialize};

/// Configuration for output format.
/// Controls which optional fields are included in the output.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Include timestamps in output
    pub include_timestamps: bool,
}

impl OutputConfig {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_timestamps(mut self) -> Self {
        self.include_timestamps = true;
        self
    }
}
