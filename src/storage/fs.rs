use crate::storage::traits::{PageSink, StorageError, StorageResult};
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::io::AsyncWriteExt;

/// [`PageSink`] backed by the local filesystem
///
/// Each file is written next to its final name and renamed into place once
/// synced, so readers never observe a half-written page.
#[derive(Debug, Clone, Copy, Default)]
pub struct FsSink;

impl FsSink {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl PageSink for FsSink {
    async fn write(&self, bytes: &[u8], dir: &Path, stem: &str) -> StorageResult<PathBuf> {
        if stem.is_empty() || stem.contains(['/', '\\']) || stem == "." || stem == ".." {
            return Err(StorageError::InvalidStem(stem.to_string()));
        }

        fs::create_dir_all(dir)
            .await
            .map_err(|e| StorageError::io(dir, e))?;

        let target = dir.join(format!("{}.html", stem));
        let partial = dir.join(format!("{}.html.part", stem));

        let mut file = fs::File::create(&partial)
            .await
            .map_err(|e| StorageError::io(&partial, e))?;
        file.write_all(bytes)
            .await
            .map_err(|e| StorageError::io(&partial, e))?;
        file.sync_all()
            .await
            .map_err(|e| StorageError::io(&partial, e))?;
        drop(file);

        fs::rename(&partial, &target)
            .await
            .map_err(|e| StorageError::io(&target, e))?;

        tracing::debug!("Wrote {} bytes to {}", bytes.len(), target.display());
        Ok(target)
    }
}
