//! Log source abstraction — tail files from disk, mocks, or other backends.

use std::path::{Path, PathBuf};

use async_trait::async_trait;

use crate::error::{LogError, LogResult};
use crate::reader;
use crate::types::TailOptions;

/// Backend a `LogSearchService` reads from.
///
/// Lets the search service be exercised against in-memory fixtures
/// (`MockLogSource`) without touching the filesystem.
#[async_trait]
pub trait LogSource: Send + Sync {
    /// Last `num_lines` lines of `path`, oldest first.
    async fn tail(&self, path: &Path, num_lines: usize, opts: &TailOptions) -> LogResult<Vec<String>>;

    /// Resolve `path` to its canonical form, following symlinks.
    async fn canonicalize(&self, path: &Path) -> LogResult<PathBuf>;
}

/// Reads logs from the local filesystem.
pub struct FileLogSource;

#[async_trait]
impl LogSource for FileLogSource {
    async fn tail(&self, path: &Path, num_lines: usize, opts: &TailOptions) -> LogResult<Vec<String>> {
        reader::read_last_n_lines(path, num_lines, opts).await
    }

    async fn canonicalize(&self, path: &Path) -> LogResult<PathBuf> {
        tokio::fs::canonicalize(path)
            .await
            .map_err(|e| LogError::from_io(path, e))
    }
}
