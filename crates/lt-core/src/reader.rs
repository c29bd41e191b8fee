//! Bounded-memory tail reader.
//!
//! Streams a file forward and keeps only a sliding window of the most recent
//! lines, capped both by line count and by total content bytes. Memory use is
//! `O(num_lines * max_line_length)` no matter how large the file is, and a
//! single oversized line never grows past `max_line_length` bytes while it is
//! being scanned.

use std::collections::VecDeque;
use std::future::Future;
use std::io;
use std::path::Path;

use tokio::fs::File;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncRead, BufReader};

use crate::error::{LogError, LogResult};
use crate::types::{MAX_LINES, TRUNCATION_MARKER, TailOptions};

/// Upper bound on the per-line scratch buffer preallocation.
const INITIAL_LINE_CAPACITY: usize = 256;

/// Upper bound on the window preallocation, so `MAX_LINES` requests on small
/// files don't reserve 100k slots up front.
const INITIAL_WINDOW_CAPACITY: usize = 1024;

/// Reject line counts outside `1..=MAX_LINES`.
pub fn validate_num_lines(num_lines: usize) -> LogResult<()> {
    if num_lines == 0 {
        return Err(LogError::InvalidArgument(
            "Number of lines must be greater than 0.".into(),
        ));
    }
    if num_lines > MAX_LINES {
        return Err(LogError::InvalidArgument(format!(
            "Cannot request more than {MAX_LINES} lines for memory safety."
        )));
    }
    Ok(())
}

// ── Tail Window ───────────────────────────────────────────────

#[derive(Debug)]
struct RetainedLine {
    text: String,
    /// Content bytes charged against the byte cap (marker excluded).
    charge: usize,
}

/// Sliding window over the most recent lines, oldest at the front.
///
/// Invariants after every `push`:
/// - `len() <= capacity`
/// - `total_bytes() <= capacity * max_line_length`
#[derive(Debug)]
pub struct TailWindow {
    lines: VecDeque<RetainedLine>,
    capacity: usize,
    max_line_length: usize,
    max_bytes: usize,
    total_bytes: usize,
    seen: u64,
    truncated: u64,
}

impl TailWindow {
    pub fn new(capacity: usize, max_line_length: usize) -> Self {
        Self {
            lines: VecDeque::with_capacity(capacity.min(INITIAL_WINDOW_CAPACITY)),
            capacity,
            max_line_length,
            max_bytes: capacity.saturating_mul(max_line_length),
            total_bytes: 0,
            seen: 0,
            truncated: 0,
        }
    }

    /// Insert a raw line as the newest entry, truncating it if it exceeds
    /// `max_line_length` or if `overflowed` says bytes were already dropped.
    pub fn push(&mut self, raw: &[u8], overflowed: bool) {
        let truncated = overflowed || raw.len() > self.max_line_length;
        let raw = &raw[..raw.len().min(self.max_line_length)];

        let (text, charge) = if truncated {
            let keep = utf8_prefix_len(raw);
            let mut text = String::from_utf8_lossy(&raw[..keep]).into_owned();
            text.push_str(TRUNCATION_MARKER);
            self.truncated += 1;
            (text, keep)
        } else {
            (String::from_utf8_lossy(raw).into_owned(), raw.len())
        };

        self.seen += 1;
        self.total_bytes += charge;
        self.lines.push_back(RetainedLine { text, charge });

        // The newest line always survives the byte cap.
        while self.total_bytes > self.max_bytes && self.lines.len() > 1 {
            self.evict_oldest();
        }
        while self.lines.len() > self.capacity {
            self.evict_oldest();
        }
    }

    fn evict_oldest(&mut self) {
        if let Some(old) = self.lines.pop_front() {
            self.total_bytes -= old.charge;
        }
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn total_bytes(&self) -> usize {
        self.total_bytes
    }

    /// Lines pushed so far, including evicted ones.
    pub fn lines_seen(&self) -> u64 {
        self.seen
    }

    pub fn lines_truncated(&self) -> u64 {
        self.truncated
    }

    /// Consume the window, oldest line first.
    pub fn into_lines(self) -> Vec<String> {
        self.lines.into_iter().map(|l| l.text).collect()
    }
}

/// Length of the longest prefix that doesn't end inside a multi-byte character.
fn utf8_prefix_len(bytes: &[u8]) -> usize {
    match std::str::from_utf8(bytes) {
        Ok(_) => bytes.len(),
        Err(e) if e.error_len().is_none() => e.valid_up_to(),
        Err(_) => bytes.len(),
    }
}

// ── Streaming scan ────────────────────────────────────────────

/// Append `seg` to `line`, keeping at most `limit` bytes.
fn append_bounded(line: &mut Vec<u8>, seg: &[u8], limit: usize, overflowed: &mut bool) {
    let room = limit.saturating_sub(line.len());
    if seg.len() > room {
        line.extend_from_slice(&seg[..room]);
        *overflowed = true;
    } else {
        line.extend_from_slice(seg);
    }
}

/// Split `reader` into lines on `\n`, `\r\n`, or a lone `\r`, feeding each
/// one into `window` in file order.
async fn scan_into<R>(reader: &mut R, window: &mut TailWindow) -> io::Result<()>
where
    R: AsyncBufRead + Unpin,
{
    let limit = window.max_line_length;
    let mut line: Vec<u8> = Vec::with_capacity(limit.min(INITIAL_LINE_CAPACITY));
    let mut overflowed = false;
    let mut pending = false;
    // Previous buffer ended on `\r`; a leading `\n` belongs to that separator.
    let mut skip_lf = false;

    loop {
        let buf = reader.fill_buf().await?;
        let len = buf.len();
        if len == 0 {
            break;
        }

        let mut pos = 0;
        if skip_lf {
            if buf[0] == b'\n' {
                pos = 1;
            }
            skip_lf = false;
        }

        while let Some(offset) = buf[pos..].iter().position(|&b| b == b'\n' || b == b'\r') {
            let end = pos + offset;
            append_bounded(&mut line, &buf[pos..end], limit, &mut overflowed);
            window.push(&line, overflowed);
            line.clear();
            overflowed = false;
            pending = false;

            pos = end + 1;
            if buf[end] == b'\r' {
                if pos < len {
                    if buf[pos] == b'\n' {
                        pos += 1;
                    }
                } else {
                    skip_lf = true;
                }
            }
        }

        if pos < len {
            append_bounded(&mut line, &buf[pos..], limit, &mut overflowed);
            pending = true;
        }
        reader.consume(len);
    }

    // Final line without a terminator.
    if pending {
        window.push(&line, overflowed);
    }
    Ok(())
}

async fn collect_window<R>(mut reader: R, num_lines: usize, opts: &TailOptions) -> io::Result<TailWindow>
where
    R: AsyncBufRead + Unpin,
{
    let mut window = TailWindow::new(num_lines, opts.max_line_length);
    scan_into(&mut reader, &mut window).await?;
    Ok(window)
}

// ── Public entry points ───────────────────────────────────────

/// Tail an arbitrary async byte stream, buffering reads at `opts.chunk_size`.
pub async fn tail_reader<R>(reader: R, num_lines: usize, opts: &TailOptions) -> LogResult<Vec<String>>
where
    R: AsyncRead + Unpin,
{
    validate_num_lines(num_lines)?;
    opts.validate()?;

    let reader = BufReader::with_capacity(opts.chunk_size, reader);
    let window = collect_window(reader, num_lines, opts)
        .await
        .map_err(|e| LogError::Io(e.to_string()))?;
    Ok(window.into_lines())
}

/// Read the last `num_lines` lines of the file at `path`, oldest first.
pub async fn read_last_n_lines(
    path: impl AsRef<Path>,
    num_lines: usize,
    opts: &TailOptions,
) -> LogResult<Vec<String>> {
    read_last_n_lines_with(path, num_lines, opts, |lines| async move { Ok(lines) }).await
}

/// Read the last `num_lines` lines of `path` and hand them to `sink` exactly
/// once, oldest first.
///
/// The file handle is closed before `sink` runs. On a read failure the sink is
/// never called and nothing partial is delivered. Errors returned by `sink`
/// come back unchanged.
pub async fn read_last_n_lines_with<T, F, Fut>(
    path: impl AsRef<Path>,
    num_lines: usize,
    opts: &TailOptions,
    sink: F,
) -> LogResult<T>
where
    F: FnOnce(Vec<String>) -> Fut,
    Fut: Future<Output = LogResult<T>>,
{
    let path = path.as_ref();
    validate_num_lines(num_lines)?;
    opts.validate()?;

    let window = {
        let file = File::open(path)
            .await
            .map_err(|e| LogError::from_io(path, e))?;
        let reader = BufReader::with_capacity(opts.chunk_size, file);
        collect_window(reader, num_lines, opts)
            .await
            .map_err(|e| LogError::from_io(path, e))?
    };

    tracing::debug!(
        path = %path.display(),
        lines_seen = window.lines_seen(),
        retained = window.len(),
        truncated = window.lines_truncated(),
        "tail read complete"
    );

    sink(window.into_lines()).await
}
