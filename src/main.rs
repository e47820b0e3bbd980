//! # kakaopack CLI
//!
//! Command-line interface for the kakaopack library.

use std::path::Path;
use std::process;
use std::time::Instant;

use clap::Parser as ClapParser;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use kakaopack::KakaopackError;
use kakaopack::cli::Args;
use kakaopack::config::PersonaConfig;
use kakaopack::core::{
    FilterConfig, OutputConfig, ProcessingStats, apply_filters, ensure_not_empty,
    merge_consecutive, unique_senders,
};
use kakaopack::format::{OutputFormat, write_to_format};
use kakaopack::parser::Parser;
use kakaopack::parsers::KakaoParser;
use kakaopack::persona::{build_persona_prompt, select_persona_messages};

fn main() {
    let args = <Args as ClapParser>::parse();
    init_tracing(&args);

    if let Err(e) = run(&args) {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

/// `RUST_LOG` wins over `-v`.
fn init_tracing(args: &Args) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("kakaopack={}", args.log_level())));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn run(args: &Args) -> Result<(), KakaopackError> {
    let total_start = Instant::now();
    let input = Path::new(&args.input);
    let parser = KakaoParser::new();

    info!(input = %args.input, parser = parser.name(), "parsing");
    let content = std::fs::read_to_string(input)?;
    let outcome = parser.parse_with_report(&content);

    if args.report {
        eprintln!("{}", serde_json::to_string_pretty(&outcome.report)?);
    }

    let messages = ensure_not_empty(outcome.messages, Some(input))?;
    let original_count = messages.len();
    debug!(messages = original_count, "parsed");

    if args.senders {
        for sender in unique_senders(&messages) {
            println!("{sender}");
        }
        return Ok(());
    }

    if let Some(ref target) = args.persona_prompt {
        let samples = select_persona_messages(&messages, target, &PersonaConfig::default());
        if samples.is_empty() {
            return Err(KakaopackError::NoPersonaMessages {
                sender: target.clone(),
            });
        }
        print!("{}", build_persona_prompt(target, &samples));
        return Ok(());
    }

    // Filter before merge so merged entries never straddle a boundary
    let mut filter_config = FilterConfig::new();
    if let Some(ref after) = args.after {
        filter_config = filter_config.with_date_from(after)?;
    }
    if let Some(ref before) = args.before {
        filter_config = filter_config.with_date_to(before)?;
    }
    if let Some(ref from) = args.from {
        filter_config = filter_config.with_sender(from.clone());
    }
    let filtered = apply_filters(messages, &filter_config);
    let filtered_count = filtered.len();

    let final_messages = if args.no_merge {
        filtered
    } else {
        let merged = merge_consecutive(filtered);
        debug!(
            entries = merged.len(),
            reduction_pct = ProcessingStats::new(filtered_count, merged.len()).compression_ratio(),
            "merged consecutive messages"
        );
        merged
    };

    let mut output_config = OutputConfig::new();
    if args.timestamps {
        output_config = output_config.with_timestamps();
    }

    let output_path = args.output_path();
    let format: OutputFormat = args.format.into();
    write_to_format(&final_messages, &output_path, format, &output_config)?;

    println!(
        "{} messages -> {} {} entries written to {}",
        original_count,
        final_messages.len(),
        format,
        output_path
    );
    info!(
        elapsed = ?total_start.elapsed(),
        filtered = filtered_count,
        "done"
    );

    Ok(())
}
