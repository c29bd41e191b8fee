//! Core value types shared by the reader, filter, and search service.

use serde::{Deserialize, Serialize};

use crate::error::{LogError, LogResult};

// ── Limits ────────────────────────────────────────────────────

/// Hard ceiling on lines per read; bounds memory at `MAX_LINES * max_line_length`.
pub const MAX_LINES: usize = 100_000;

/// Default per-line cap (10 KiB).
pub const DEFAULT_MAX_LINE_LENGTH: usize = 10 * 1024;

/// Default read granularity (1 MiB).
pub const DEFAULT_CHUNK_SIZE: usize = 1024 * 1024;

/// Suffix appended to lines cut at `max_line_length`.
pub const TRUNCATION_MARKER: &str = "... [truncated]";

// ── Tail Options ──────────────────────────────────────────────

/// Tunables for a single tail read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TailOptions {
    /// Lines longer than this many bytes are truncated and marked.
    pub max_line_length: usize,
    /// Buffer capacity of the underlying reader. Never affects output.
    pub chunk_size: usize,
}

impl Default for TailOptions {
    fn default() -> Self {
        Self {
            max_line_length: DEFAULT_MAX_LINE_LENGTH,
            chunk_size: DEFAULT_CHUNK_SIZE,
        }
    }
}

impl TailOptions {
    pub fn validate(&self) -> LogResult<()> {
        if self.max_line_length == 0 {
            return Err(LogError::InvalidArgument(
                "max_line_length must be greater than 0".into(),
            ));
        }
        if self.chunk_size == 0 {
            return Err(LogError::InvalidArgument(
                "chunk_size must be greater than 0".into(),
            ));
        }
        Ok(())
    }
}

// ── Search Request / Result ───────────────────────────────────

/// A request for the last `num_lines` lines of `filename`, optionally filtered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchRequest {
    pub filename: String,
    pub num_lines: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub keyword: Option<String>,
}

impl SearchRequest {
    pub fn new(filename: impl Into<String>, num_lines: usize) -> Self {
        Self {
            filename: filename.into(),
            num_lines,
            keyword: None,
        }
    }

    pub fn with_keyword(mut self, keyword: impl Into<String>) -> Self {
        self.keyword = Some(keyword.into());
        self
    }

    /// Check the filename and line-count invariants.
    pub fn validate(&self) -> LogResult<()> {
        if self.filename.is_empty() {
            return Err(LogError::InvalidArgument("Filename is required".into()));
        }
        if self.num_lines == 0 || self.num_lines > MAX_LINES {
            return Err(LogError::InvalidArgument(format!(
                "Number of lines must be between 1 and {MAX_LINES}"
            )));
        }
        Ok(())
    }
}

/// Lines returned by a search, oldest first.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchResult {
    pub lines: Vec<String>,
}

impl SearchResult {
    pub fn count(&self) -> usize {
        self.lines.len()
    }
}

impl From<Vec<String>> for SearchResult {
    fn from(lines: Vec<String>) -> Self {
        Self { lines }
    }
}
