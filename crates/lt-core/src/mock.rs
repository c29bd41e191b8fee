//! Mock log source for testing — serves pre-loaded log content.

use async_trait::async_trait;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::error::{LogError, LogResult};
use crate::reader;
use crate::source::LogSource;
use crate::types::TailOptions;

/// A mock log source that serves pre-loaded content by path.
///
/// Content goes through the same streaming tail as real files, so line
/// splitting, truncation, and window caps behave identically.
#[derive(Default)]
pub struct MockLogSource {
    files: HashMap<PathBuf, String>,
}

impl MockLogSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a file with the given raw content.
    pub fn add_file(&mut self, path: impl Into<PathBuf>, content: impl Into<String>) {
        self.files.insert(path.into(), content.into());
    }

    /// Add a file built from lines, each terminated by `\n`.
    pub fn add_lines(&mut self, path: impl Into<PathBuf>, lines: &[&str]) {
        let content: String = lines.iter().map(|l| format!("{l}\n")).collect();
        self.add_file(path, content);
    }

    /// Create a mock with `/var/log/test-log.txt`: ten lines alternating
    /// "I love Daisy Dog" (odd) and "Mad Max the cat" (even).
    pub fn with_pet_sample() -> Self {
        let mut m = Self::new();
        m.add_file("/var/log/test-log.txt", pet_sample());
        m
    }

    /// Create a mock with a mixed-severity application log.
    pub fn with_app_sample() -> Self {
        let mut m = Self::new();
        m.add_lines(
            "/var/log/app.log",
            &[
                "2024-01-15 12:00:01 INFO  Service started",
                "2024-01-15 12:00:05 ERROR Failed to connect to database: connection refused",
                "2024-01-15 12:00:10 WARN  Memory usage high: 82%",
                "2024-01-15 12:00:15 INFO  Request served in 12ms",
                "2024-01-15 12:00:20 ERROR Connection reset by peer",
                "2024-01-15 12:00:25 DEBUG Heartbeat sent",
            ],
        );
        m
    }
}

/// Ten-line fixture: `"{n}: I love Daisy Dog"` for odd `n`, `"{n}: Mad Max the cat"` for even.
pub fn pet_sample() -> String {
    (1..=10)
        .map(|i| {
            if i % 2 == 0 {
                format!("{i}: Mad Max the cat\n")
            } else {
                format!("{i}: I love Daisy Dog\n")
            }
        })
        .collect()
}

#[async_trait]
impl LogSource for MockLogSource {
    async fn tail(&self, path: &Path, num_lines: usize, opts: &TailOptions) -> LogResult<Vec<String>> {
        let content = self
            .files
            .get(path)
            .ok_or_else(|| LogError::NotFound(format!("file not found: {}", path.display())))?;
        reader::tail_reader(content.as_bytes(), num_lines, opts).await
    }

    /// In-memory paths have no symlinks; resolution is the identity.
    async fn canonicalize(&self, path: &Path) -> LogResult<PathBuf> {
        Ok(path.to_path_buf())
    }
}
