// src/storage/mod.rs
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use crate::extractors::CapturedSection;
use crate::utils::error::StorageError;

/// The single digest file every matching section is appended to.
pub struct OutputDocument {
    path: PathBuf,
}

impl OutputDocument {
    /// Prepares the output file for a run.
    /// Without `append` the file is created or truncated to empty up front; with
    /// `append` it is left untouched until the first write creates it.
    pub fn prepare<P: AsRef<Path>>(path: P, append: bool) -> Result<Self, StorageError> {
        let path = path.as_ref().to_path_buf();

        if !append {
            fs::write(&path, b"").map_err(|source| StorageError::Io {
                path: path.clone(),
                source,
            })?;
            tracing::debug!("Truncated output file {}", path.display());
        }

        Ok(Self { path })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Appends the blocks of one document in a single write.
    /// Returns the number of bytes written; an empty slice writes nothing.
    pub fn append_sections(&self, sections: &[CapturedSection]) -> Result<usize, StorageError> {
        if sections.is_empty() {
            return Ok(0);
        }

        let mut buffer = String::new();
        for section in sections {
            section.render_into(&mut buffer);
        }

        let io_error = |source| StorageError::Io {
            path: self.path.clone(),
            source,
        };

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .map_err(io_error)?;

        file.write_all(buffer.as_bytes()).map_err(io_error)?;

        tracing::debug!(
            "Appended {} section(s) ({} bytes) to {}",
            sections.len(),
            buffer.len(),
            self.path.display()
        );

        Ok(buffer.len())
    }
}
