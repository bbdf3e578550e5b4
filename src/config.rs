// src/config.rs
use std::path::PathBuf;
use crate::extractors::{DateRange, NormalizedDate};
use crate::utils::AppError;

/// Immutable settings for one digest run, built once from the command line.
#[derive(Debug, Clone)]
pub struct Config {
    pub root: PathBuf,
    pub output_file: PathBuf,
    pub range: DateRange,
    pub append: bool,
}

/// `value_parser` for `--start-date` / `--end-date`: canonical `YYYY-MM-DD` only.
pub fn parse_canonical_date(text: &str) -> Result<NormalizedDate, AppError> {
    NormalizedDate::parse_canonical(text).ok_or_else(|| {
        AppError::Config(format!("Invalid date '{}': expected YYYY-MM-DD", text))
    })
}
