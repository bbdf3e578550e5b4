// src/vault/mod.rs
use std::ffi::OsStr;
use std::fs;
use std::path::{Component, Path, PathBuf};
use walkdir::WalkDir;
use crate::utils::error::VaultError;

/// Notes are recognised by this (case-sensitive) file name suffix.
pub const NOTE_EXTENSION: &str = ".md";

/// A note discovered while walking the vault.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoteFile {
    path: PathBuf,
}

impl NoteFile {
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The path with its extension removed, used to label output blocks.
    /// The path is cleaned first, so a walk from `.` yields `notes/today` and
    /// one from `notes/../vault` yields `vault/today`.
    pub fn document_id(&self) -> String {
        let path = normalize(&self.path);
        let text = path.to_string_lossy();
        text.strip_suffix(NOTE_EXTENSION).unwrap_or(&text).to_string()
    }

    /// Reads the whole note. Invalid UTF-8 is replaced rather than rejected.
    pub fn read_contents(&self) -> Result<String, VaultError> {
        let bytes = fs::read(&self.path).map_err(|source| VaultError::Read {
            path: self.path.clone(),
            source,
        })?;
        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }
}

/// Walks a vault directory for notes, skipping the digest output file.
pub struct VaultWalker {
    root: PathBuf,
    output_file: PathBuf,
}

impl VaultWalker {
    pub fn new<P: AsRef<Path>, Q: AsRef<Path>>(root: P, output_file: Q) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
            output_file: output_file.as_ref().to_path_buf(),
        }
    }

    /// Lazily yields notes in a stable order (by file name within each
    /// directory). A walk error is yielded as an item so the caller decides
    /// whether to stop.
    pub fn notes(&self) -> impl Iterator<Item = Result<NoteFile, VaultError>> + '_ {
        let skip = normalize(&self.output_file);

        WalkDir::new(&self.root)
            .sort_by_file_name()
            .into_iter()
            .filter_map(move |entry| {
                let entry = match entry {
                    Ok(entry) => entry,
                    Err(e) => return Some(Err(VaultError::Walk(e))),
                };

                if normalize(entry.path()) == skip {
                    tracing::debug!("Skipping output file {}", entry.path().display());
                    return None;
                }

                if entry.file_type().is_dir() || !is_note(entry.file_name()) {
                    return None;
                }

                Some(Ok(NoteFile { path: entry.into_path() }))
            })
    }
}

fn is_note(file_name: &OsStr) -> bool {
    file_name.to_string_lossy().ends_with(NOTE_EXTENSION)
}

/// Lexical clean-up used for path equality: drops `.` components and folds
/// `..` into the preceding directory. A `..` directly under the root is
/// dropped; leading `..` of a relative path is kept.
fn normalize(path: &Path) -> PathBuf {
    let mut cleaned: Vec<Component<'_>> = Vec::new();

    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => match cleaned.last() {
                Some(Component::Normal(_)) => {
                    cleaned.pop();
                }
                Some(Component::RootDir) | Some(Component::Prefix(_)) => {}
                _ => cleaned.push(component),
            },
            other => cleaned.push(other),
        }
    }

    cleaned.iter().collect()
}
