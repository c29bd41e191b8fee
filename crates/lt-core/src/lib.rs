//! Bounded-memory log tailing for logtail.
//!
//! Provides a streaming "last N lines" reader whose memory use is fixed by
//! the line count and per-line cap instead of the file size, a literal
//! case-insensitive keyword filter, a `LogSource` abstraction for
//! testability, and `LogSearchService`, which confines lookups to a single
//! log directory.

pub mod error;
pub mod filter;
pub mod mock;
pub mod reader;
pub mod search;
pub mod source;
pub mod types;

// Re-export key types for convenience
pub use error::{LogError, LogResult};
pub use mock::MockLogSource;
pub use reader::{read_last_n_lines, read_last_n_lines_with, tail_reader};
pub use search::LogSearchService;
pub use source::{FileLogSource, LogSource};
pub use types::{MAX_LINES, SearchRequest, SearchResult, TRUNCATION_MARKER, TailOptions};
