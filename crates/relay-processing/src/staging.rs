//! Scratch staging of incoming uploads.
//!
//! Every upload is written to the scratch directory under a generated name
//! before it is processed. The staged file belongs to the request that
//! created it; nothing sweeps the directory.

use std::io;
use std::path::{Path, PathBuf};

use relay_core::generate_object_name;
use tokio::fs;
use tokio::io::AsyncWriteExt;

use crate::validator::{UploadValidator, ValidationError};

/// Staging failures
#[derive(Debug, thiserror::Error)]
pub enum StagingError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("Scratch storage error: {0}")]
    Io(#[from] io::Error),
}

/// Scratch directory for staged uploads
///
/// The directory is assumed to exist and be writable.
#[derive(Clone, Debug)]
pub struct ScratchDir {
    root: PathBuf,
}

impl ScratchDir {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Open a new staged file named `<timestamp><hex>.<extension>`.
    ///
    /// Every written chunk is checked against `validator`'s size ceiling.
    pub async fn create(
        &self,
        extension: &str,
        validator: &UploadValidator,
    ) -> Result<StagingWriter, StagingError> {
        let name = generate_object_name(extension);
        let path = self.root.join(&name);
        let file = fs::File::create(&path).await?;

        Ok(StagingWriter {
            file,
            name,
            path,
            extension: extension.to_string(),
            written: 0,
            validator: validator.clone(),
        })
    }
}

/// In-progress staged file
pub struct StagingWriter {
    file: fs::File,
    name: String,
    path: PathBuf,
    extension: String,
    written: usize,
    validator: UploadValidator,
}

impl StagingWriter {
    /// Append a chunk, failing once the total exceeds the ceiling.
    ///
    /// On failure the caller should [`discard`](Self::discard) the writer.
    pub async fn write_chunk(&mut self, chunk: &[u8]) -> Result<(), StagingError> {
        let total = self.written.saturating_add(chunk.len());
        self.validator.validate_file_size(total)?;
        self.file.write_all(chunk).await?;
        self.written = total;
        Ok(())
    }

    /// Flush to disk and hand over the staged file.
    pub async fn finish(
        mut self,
        original_filename: String,
        content_type: String,
    ) -> Result<StagedFile, StagingError> {
        self.file.flush().await?;
        self.file.sync_all().await?;

        Ok(StagedFile {
            name: self.name,
            path: self.path,
            original_filename,
            content_type,
            extension: self.extension,
            size: self.written as u64,
        })
    }

    /// Drop the partially written file.
    pub async fn discard(self) {
        let StagingWriter { file, path, .. } = self;
        drop(file);
        remove_best_effort(&path).await;
    }
}

/// Upload staged on local scratch storage
#[derive(Debug, Clone)]
pub struct StagedFile {
    /// Generated file name; doubles as the storage key for passthrough uploads
    pub name: String,
    pub path: PathBuf,
    pub original_filename: String,
    pub content_type: String,
    /// Normalized extension
    pub extension: String,
    pub size: u64,
}

impl StagedFile {
    /// Read the whole staged file into memory
    pub async fn read(&self) -> io::Result<Vec<u8>> {
        fs::read(&self.path).await
    }

    /// Open the staged file for streaming
    pub async fn open(&self) -> io::Result<fs::File> {
        fs::File::open(&self.path).await
    }

    /// Delete the staged file; failures are logged and otherwise ignored
    pub async fn remove(&self) {
        remove_best_effort(&self.path).await;
    }
}

async fn remove_best_effort(path: &Path) {
    match fs::remove_file(path).await {
        Ok(()) => {
            tracing::debug!(path = %path.display(), "Removed staged file");
        }
        Err(e) if e.kind() == io::ErrorKind::NotFound => {}
        Err(e) => {
            tracing::warn!(
                error = %e,
                path = %path.display(),
                "Failed to remove staged file"
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[tokio::test]
    async fn test_stage_and_remove() {
        let dir = tempdir().unwrap();
        let scratch = ScratchDir::new(dir.path());
        let validator = UploadValidator::any_file(100);

        let mut writer = scratch.create("txt", &validator).await.unwrap();
        writer.write_chunk(b"hello ").await.unwrap();
        writer.write_chunk(b"world").await.unwrap();
        let staged = writer
            .finish("greeting.txt".to_string(), "text/plain".to_string())
            .await
            .unwrap();

        assert!(staged.name.ends_with(".txt"));
        assert_eq!(staged.size, 11);
        assert_eq!(staged.path, dir.path().join(&staged.name));
        assert_eq!(staged.read().await.unwrap(), b"hello world");

        staged.remove().await;
        assert!(!staged.path.exists());
        // second removal is a no-op
        staged.remove().await;
    }

    #[tokio::test]
    async fn test_exact_ceiling_accepted() {
        let dir = tempdir().unwrap();
        let scratch = ScratchDir::new(dir.path());
        let validator = UploadValidator::any_file(8);

        let mut writer = scratch.create("bin", &validator).await.unwrap();
        writer.write_chunk(&[0u8; 4]).await.unwrap();
        writer.write_chunk(&[0u8; 4]).await.unwrap();
        let staged = writer
            .finish("full.bin".to_string(), "application/octet-stream".to_string())
            .await
            .unwrap();
        assert_eq!(staged.size, 8);
    }

    #[tokio::test]
    async fn test_over_ceiling_rejected_and_discarded() {
        let dir = tempdir().unwrap();
        let scratch = ScratchDir::new(dir.path());
        let validator = UploadValidator::any_file(8);

        let mut writer = scratch.create("bin", &validator).await.unwrap();
        writer.write_chunk(&[0u8; 8]).await.unwrap();
        let err = writer.write_chunk(&[0u8; 1]).await.unwrap_err();
        assert!(matches!(
            err,
            StagingError::Validation(ValidationError::FileTooLarge { size: 9, max: 8 })
        ));

        writer.discard().await;
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
    }
}
