//! Content checksum of the project hookfile, used upstream as a cache key.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use async_trait::async_trait;
use sha2::{Digest, Sha256};
use tracing::debug;

use hookfile_core::error::{AppError, ErrorKind};
use hookfile_core::result::AppResult;

/// Computes a content hash for a file.
#[async_trait]
pub trait ContentHasher: Send + Sync {
    async fn hash(&self, path: &Path) -> AppResult<String>;
}

/// Lowercase hex SHA-256 of the file contents with CRLF folded to LF, so
/// checkouts with different line endings produce the same key.
#[derive(Debug, Clone, Copy, Default)]
pub struct Sha256FileHasher;

#[async_trait]
impl ContentHasher for Sha256FileHasher {
    async fn hash(&self, path: &Path) -> AppResult<String> {
        let bytes = tokio::fs::read(path).await.map_err(|e| {
            AppError::with_source(
                ErrorKind::Storage,
                format!("Failed to read '{}' for checksum: {e}", path.display()),
                e,
            )
        })?;

        let mut hasher = Sha256::new();
        hasher.update(normalize_line_endings(&bytes));
        Ok(hex::encode(hasher.finalize()))
    }
}

fn normalize_line_endings(bytes: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(bytes.len());
    let mut iter = bytes.iter().peekable();
    while let Some(&b) = iter.next() {
        if b == b'\r' && iter.peek() == Some(&&b'\n') {
            continue;
        }
        out.push(b);
    }
    out
}

/// Deferred checksum of one hookfile.
///
/// Nothing is read until [`calculate`](Self::calculate) is called, and every
/// call hashes the file again.
#[derive(Clone)]
pub struct ChecksumProvider {
    path: PathBuf,
    hasher: Arc<dyn ContentHasher>,
}

impl ChecksumProvider {
    pub fn new(path: impl Into<PathBuf>, hasher: Arc<dyn ContentHasher>) -> Self {
        Self {
            path: path.into(),
            hasher,
        }
    }

    /// The hookfile this provider hashes.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Hashes the hookfile's current contents.
    pub async fn calculate(&self) -> AppResult<String> {
        let checksum = self.hasher.hash(&self.path).await?;
        debug!(path = %self.path.display(), checksum = %checksum, "Hookfile checksum calculated");
        Ok(checksum)
    }
}

impl std::fmt::Debug for ChecksumProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChecksumProvider")
            .field("path", &self.path)
            .finish()
    }
}
