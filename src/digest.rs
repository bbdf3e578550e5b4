// src/digest.rs
use crate::config::Config;
use crate::extractors::SectionExtractor;
use crate::storage::OutputDocument;
use crate::utils::AppError;
use crate::vault::VaultWalker;

/// Counters reported at the end of a run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DigestSummary {
    pub files_scanned: usize,
    pub files_failed: usize,
    pub sections_emitted: usize,
}

/// Scans the vault and appends every in-range section to the output file.
///
/// Notes are handled one at a time in walk order. A note that cannot be read,
/// or whose sections cannot be written, is logged and skipped. Preparing the
/// output file and walking the directory tree are fatal.
pub fn run(config: &Config) -> Result<DigestSummary, AppError> {
    let output = OutputDocument::prepare(&config.output_file, config.append)?;

    tracing::info!(
        "Scanning for Markdown files with level 1 headers matching date range: {}",
        config.range
    );
    if config.range.is_inverted() {
        tracing::warn!("Start date is after end date; no header can match {}", config.range);
    }

    let extractor = SectionExtractor::new(config.range);
    let walker = VaultWalker::new(&config.root, &config.output_file);
    let mut summary = DigestSummary::default();

    for note in walker.notes() {
        let note = note?;
        summary.files_scanned += 1;

        let contents = match note.read_contents() {
            Ok(contents) => contents,
            Err(e) => {
                tracing::error!("{}", e);
                summary.files_failed += 1;
                continue;
            }
        };

        let sections = extractor.capture_sections(&note.document_id(), contents.split('\n'));
        for section in &sections {
            tracing::info!(
                "Match found in file {}: {} ({})",
                note.path().display(),
                section.header,
                section.date
            );
        }

        match output.append_sections(&sections) {
            Ok(_) => summary.sections_emitted += sections.len(),
            Err(e) => {
                tracing::error!(
                    "Failed to write sections from {} to {}: {}",
                    note.path().display(),
                    output.path().display(),
                    e
                );
                summary.files_failed += 1;
            }
        }
    }

    Ok(summary)
}
