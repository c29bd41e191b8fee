//! Log tail error types.

use thiserror::Error;

/// Errors that can occur while reading or searching a log file.
///
/// `Display` yields the bare message so the HTTP layer can surface it verbatim.
#[derive(Debug, Error)]
pub enum LogError {
    #[error("{0}")]
    InvalidArgument(String),

    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    Io(String),

    #[error("{0}")]
    Sink(String),
}

impl LogError {
    /// Classify an I/O error raised while opening or reading `path`.
    pub fn from_io(path: &std::path::Path, err: std::io::Error) -> Self {
        if err.kind() == std::io::ErrorKind::NotFound {
            LogError::NotFound(format!("file not found: {}", path.display()))
        } else {
            LogError::Io(format!("{}: {err}", path.display()))
        }
    }

    pub fn is_invalid_argument(&self) -> bool {
        matches!(self, LogError::InvalidArgument(_))
    }
}

/// Convenience alias for log tail results.
pub type LogResult<T> = Result<T, LogError>;
