//! Command-line interface definition using clap.
//!
//! This module defines:
//! - [`Args`] - CLI argument structure (for use with clap)
//! - [`OutputFormat`] - Output format options, convertible into
//!   [`format::OutputFormat`](crate::format::OutputFormat)
//!
//! ```rust
//! use clap::Parser;
//! use kakaopack::cli::{Args, OutputFormat};
//!
//! let args = Args::parse_from(["kakaopack", "chat.txt", "-f", "jsonl"]);
//! assert_eq!(args.format, OutputFormat::Jsonl);
//! assert_eq!(args.output_path(), "kakao_chat.jsonl");
//! ```

use clap::{ArgAction, Parser, ValueEnum};
use serde::{Deserialize, Serialize};

/// Default output path; its extension follows `--format`.
pub const DEFAULT_OUTPUT: &str = "kakao_chat.csv";

/// Parse KakaoTalk chat exports (desktop and mobile) into compact,
/// timestamped message lists for LLMs.
#[derive(Parser, Debug, Clone)]
#[command(name = "kakaopack")]
#[command(version, about, long_about = None)]
#[command(after_help = "EXAMPLES:
    kakaopack KakaoTalk_20231025.txt
    kakaopack chat.txt -o chat.json -f json -t
    kakaopack chat.txt --after 2023-01-01 --from 지수
    kakaopack chat.txt --senders
    kakaopack chat.txt --persona-prompt 지수 > prompt.txt")]
pub struct Args {
    /// Path to the KakaoTalk .txt export
    pub input: String,

    /// Path to output file
    #[arg(short, long, default_value = DEFAULT_OUTPUT)]
    pub output: String,

    /// Output format
    #[arg(short, long, value_enum, default_value = "csv")]
    pub format: OutputFormat,

    /// Filter messages after this date (YYYY-MM-DD)
    #[arg(long, value_name = "DATE")]
    pub after: Option<String>,

    /// Filter messages before this date (YYYY-MM-DD)
    #[arg(long, value_name = "DATE")]
    pub before: Option<String>,

    /// Filter messages from specific user
    #[arg(long, value_name = "USER")]
    pub from: Option<String>,

    /// Include timestamps in output
    #[arg(short = 't', long)]
    pub timestamps: bool,

    /// Disable merging consecutive messages from same sender
    #[arg(long)]
    pub no_merge: bool,

    /// Print the distinct senders and exit
    #[arg(long, conflicts_with = "persona_prompt")]
    pub senders: bool,

    /// Print the parse report as JSON to stderr
    #[arg(long)]
    pub report: bool,

    /// Print the persona analysis prompt for USER and exit
    #[arg(long, value_name = "USER")]
    pub persona_prompt: Option<String>,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

impl Args {
    /// Output path, with the extension adjusted to the format when the
    /// default path is in use.
    pub fn output_path(&self) -> String {
        if self.output != DEFAULT_OUTPUT {
            return self.output.clone();
        }
        format!("kakao_chat.{}", self.format.extension())
    }

    /// Log filter directive for the requested verbosity.
    pub fn log_level(&self) -> &'static str {
        match self.verbose {
            0 => "warn",
            1 => "debug",
            _ => "trace",
        }
    }
}

/// Values accepted by `-f/--format`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, ValueEnum, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// `;`-delimited CSV
    #[default]
    Csv,

    /// JSON array of messages
    Json,

    /// One JSON object per line
    #[value(alias = "ndjson")]
    Jsonl,
}

impl OutputFormat {
    /// Returns the file extension for this format (without dot).
    pub fn extension(&self) -> &'static str {
        crate::format::OutputFormat::from(*self).extension()
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", crate::format::OutputFormat::from(*self))
    }
}

// Conversion to library format type
impl From<OutputFormat> for crate::format::OutputFormat {
    fn from(format: OutputFormat) -> crate::format::OutputFormat {
        match format {
            OutputFormat::Csv => crate::format::OutputFormat::Csv,
            OutputFormat::Json => crate::format::OutputFormat::Json,
            OutputFormat::Jsonl => crate::format::OutputFormat::Jsonl,
        }
    }
}
