// src/extractors/mod.rs
pub mod date;
pub mod section;

// Re-export key extraction types for convenience
pub use date::{DateRange, NormalizedDate};
pub use section::{CapturedSection, SectionExtractor};
