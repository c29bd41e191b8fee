//! Log search — confine a filename to the log directory, tail it, and
//! optionally keep only the lines matching a keyword.

use std::path::{Component, Path, PathBuf};
use std::sync::Arc;

use crate::error::{LogError, LogResult};
use crate::filter;
use crate::source::LogSource;
use crate::types::{SearchRequest, SearchResult, TailOptions};

/// Searches the tail of log files inside a single base directory.
#[derive(Clone)]
pub struct LogSearchService {
    log_dir: PathBuf,
    source: Arc<dyn LogSource>,
    options: TailOptions,
}

impl LogSearchService {
    pub fn new(log_dir: impl Into<PathBuf>, source: Arc<dyn LogSource>) -> Self {
        Self {
            log_dir: log_dir.into(),
            source,
            options: TailOptions::default(),
        }
    }

    pub fn with_options(mut self, options: TailOptions) -> Self {
        self.options = options;
        self
    }

    pub fn log_dir(&self) -> &Path {
        &self.log_dir
    }

    pub fn options(&self) -> &TailOptions {
        &self.options
    }

    fn outside_base_dir(&self) -> LogError {
        LogError::InvalidArgument(format!(
            "Invalid file path - must be within base directory {}",
            self.log_dir.display()
        ))
    }

    /// Map `filename` to a path directly under the log directory.
    ///
    /// Directory components are discarded, but any `..` component is treated
    /// as a traversal attempt and rejected. Purely lexical: nothing on disk is
    /// touched.
    pub fn resolve_path(&self, filename: &str) -> LogResult<PathBuf> {
        let raw = Path::new(filename);
        if raw.components().any(|c| matches!(c, Component::ParentDir)) {
            return Err(self.outside_base_dir());
        }

        let name = raw.file_name().ok_or_else(|| {
            LogError::InvalidArgument(format!("Invalid file path - no file name in '{filename}'"))
        })?;

        let path = self.log_dir.join(name);
        if !path.starts_with(&self.log_dir) {
            return Err(self.outside_base_dir());
        }
        Ok(path)
    }

    /// Last `num_lines` lines of `filename`, oldest first, keeping only lines
    /// containing `keyword` (case-insensitive) when one is given.
    pub async fn search(
        &self,
        filename: &str,
        num_lines: usize,
        keyword: Option<&str>,
    ) -> LogResult<Vec<String>> {
        let request = SearchRequest {
            filename: filename.to_string(),
            num_lines,
            keyword: keyword.map(str::to_string),
        };
        Ok(self.search_request(&request).await?.lines)
    }

    pub async fn search_request(&self, request: &SearchRequest) -> LogResult<SearchResult> {
        request.validate()?;
        let path = self.resolve_path(&request.filename)?;

        // Symlinks inside the log directory must not lead out of it.
        let base = self.source.canonicalize(&self.log_dir).await?;
        let resolved = self.source.canonicalize(&path).await?;
        if !resolved.starts_with(&base) {
            tracing::warn!(
                filename = %request.filename,
                resolved = %resolved.display(),
                "rejected path outside log directory"
            );
            return Err(self.outside_base_dir());
        }

        tracing::info!(
            path = %resolved.display(),
            lines = request.num_lines,
            keyword = request.keyword.as_deref().unwrap_or(""),
            "searching log"
        );

        let window = self
            .source
            .tail(&resolved, request.num_lines, &self.options)
            .await?;
        let lines = match request.keyword.as_deref() {
            Some(keyword) => filter::filter_all(window, keyword),
            None => window,
        };

        tracing::info!(path = %resolved.display(), count = lines.len(), "search complete");
        Ok(SearchResult::from(lines))
    }
}
