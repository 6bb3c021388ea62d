//! Storage traits and error types
//!
//! This module defines the trait interface for page sinks and the
//! associated error types.

use async_trait::async_trait;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors that can occur while persisting a page
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("IO error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid file stem: {0:?}")]
    InvalidStem(String),
}

impl StorageError {
    pub(crate) fn io(path: &Path, source: std::io::Error) -> Self {
        Self::Io {
            path: path.to_path_buf(),
            source,
        }
    }
}

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

/// Destination for raw page bytes
#[async_trait]
pub trait PageSink: Send + Sync {
    /// Writes `bytes` to `{dir}/{stem}.html`
    ///
    /// Missing directories are created. An existing file is replaced, so
    /// writing the same input twice leaves a single file with that content.
    /// Returns the path of the written file.
    async fn write(&self, bytes: &[u8], dir: &Path, stem: &str) -> StorageResult<PathBuf>;
}
