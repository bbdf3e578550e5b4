// src/utils/error.rs
use std::path::PathBuf;
use thiserror::Error;

// Define specific error types for different parts of the application
#[derive(Error, Debug)]
pub enum VaultError {
    #[error("Error while scanning directory: {0}")]
    Walk(#[from] walkdir::Error), // Unreadable directory entry, fatal to the run

    #[error("Error reading file {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("I/O error on output file {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Vault traversal failed: {0}")]
    Vault(#[from] VaultError),

    #[error("Output error: {0}")]
    Storage(#[from] StorageError),
}
