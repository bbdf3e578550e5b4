// src/main.rs
mod config;
mod digest;
mod extractors;
mod storage;
mod utils;
mod vault;

use std::path::PathBuf;
use clap::Parser;
use config::Config;
use extractors::{DateRange, NormalizedDate};
use utils::AppError;

/// Collects dated sections from a notes vault into one digest file
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Notes vault directory to scan
    #[arg(long, default_value = ".")]
    vault_directory: PathBuf,

    /// File to write the extracted content
    #[arg(long, default_value = "output.md")]
    output_file: PathBuf,

    /// Start date for matching level 1 headers, YYYY-MM-DD (default: today)
    #[arg(long, value_parser = config::parse_canonical_date)]
    start_date: Option<NormalizedDate>,

    /// End date for matching level 1 headers, YYYY-MM-DD (default: today)
    #[arg(long, value_parser = config::parse_canonical_date)]
    end_date: Option<NormalizedDate>,

    /// Append to the output file instead of overwriting it
    #[arg(long)]
    append: bool,
}

impl Args {
    fn into_config(self) -> Config {
        let today = NormalizedDate::today();
        Config {
            root: self.vault_directory,
            output_file: self.output_file,
            range: DateRange::new(
                self.start_date.unwrap_or(today),
                self.end_date.unwrap_or(today),
            ),
            append: self.append,
        }
    }
}

fn main() -> Result<(), AppError> {
    // 1. Setup Logging (reads RUST_LOG env var)
    utils::logging::setup_logging();

    // 2. Parse CLI Arguments into the run configuration
    let args = Args::parse();
    tracing::debug!("Parsed args: {:?}", args);
    let config = args.into_config();

    // 3. Scan the vault
    let summary = digest::run(&config).inspect_err(|e| tracing::error!("{}", e))?;

    tracing::info!(
        "Processing finished. Files scanned: {}, Sections emitted: {}, Failures: {}",
        summary.files_scanned,
        summary.sections_emitted,
        summary.files_failed
    );

    Ok(())
}
