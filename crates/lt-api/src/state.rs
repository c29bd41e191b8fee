//! Shared application state for the Axum server.

use std::path::PathBuf;
use std::sync::Arc;

use lt_core::{FileLogSource, LogSearchService, LogSource, MockLogSource, TailOptions};

use crate::config::ApiConfig;

/// Shared application state, cloned into each Axum handler.
#[derive(Clone)]
pub struct AppState {
    /// Tail-and-filter search confined to the configured log directory.
    pub search: Arc<LogSearchService>,
}

impl AppState {
    /// Create state reading real files under `config.log_dir`.
    pub fn from_config(config: &ApiConfig) -> Self {
        Self::with_source(
            config.log_dir.clone(),
            Arc::new(FileLogSource),
            config.tail_options(),
        )
    }

    /// Create state over an arbitrary log source.
    pub fn with_source(
        log_dir: impl Into<PathBuf>,
        source: Arc<dyn LogSource>,
        options: TailOptions,
    ) -> Self {
        let search = LogSearchService::new(log_dir, source).with_options(options);
        Self {
            search: Arc::new(search),
        }
    }

    /// Create in-memory state serving `/var/log/test-log.txt` (tests and development).
    pub fn with_sample_data() -> Self {
        Self::with_source(
            "/var/log",
            Arc::new(MockLogSource::with_pet_sample()),
            TailOptions::default(),
        )
    }
}
