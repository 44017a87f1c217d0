// Assistant Console - bridge/log_source.rs
//
// The tail-fetch host call: incremental reads of the engine's append-only
// log file.
//
// `LogSource` is the seam the tail view model consumes; `FileLogSource` is
// the production implementation. Semantics:
//   - A missing log file is not an error: the engine may simply not have
//     started yet. An empty chunk at offset 0 is returned so the view
//     keeps polling until the file appears.
//   - A file shorter than the requested offset (rotation/truncation) clamps
//     the read back to the tail within the byte cap.
//   - On the first fetch (`offset == 0` with `last_lines` set) the response
//     seeds the view with the final N lines instead of the whole file.
//   - The reported offset is the file length at read time; if more than
//     `max_bytes` accumulated since the last fetch, the response skips the
//     middle rather than delivering an unbounded backlog. Consumers see
//     that as a cursor advance and carry on.
//
// Encoding: reads are decoded as lossy UTF-8. The engine writes UTF-8;
// a torn multi-byte sequence at a read boundary shows up as a replacement
// character for one cycle and heals on the next.

use crate::core::model::LogChunk;
use crate::util::error::BridgeError;
use std::io::{Read, Seek, SeekFrom};
use std::path::{Path, PathBuf};

/// Parameters of one tail-fetch call.
#[derive(Debug, Clone, Copy)]
pub struct TailRequest {
    /// Position to resume reading from.
    pub offset: u64,
    /// Upper bound on bytes returned in this response.
    pub max_bytes: u64,
    /// Seed the view with the source's last N lines. Only meaningful when
    /// `offset == 0`; ignored otherwise.
    pub last_lines: Option<usize>,
}

/// Read-only view onto an append-only remote text stream.
///
/// Implementations must be callable from a worker thread; the view model
/// holds the source behind an `Arc`.
pub trait LogSource: Send + Sync {
    fn fetch(&self, req: &TailRequest) -> Result<LogChunk, BridgeError>;
}

/// Production log source backed by the engine's log file.
pub struct FileLogSource {
    path: PathBuf,
}

impl FileLogSource {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl LogSource for FileLogSource {
    fn fetch(&self, req: &TailRequest) -> Result<LogChunk, BridgeError> {
        let display_path = self.path.to_string_lossy().to_string();

        // Not an error — the engine has not written its log yet.
        if !self.path.exists() {
            return Ok(LogChunk {
                content: String::new(),
                offset: 0u64.into(),
                path: display_path,
            });
        }

        let mut file = std::fs::File::open(&self.path).map_err(|e| BridgeError::Io {
            operation: "open log file",
            source: e,
        })?;

        let len = file
            .metadata()
            .map_err(|e| BridgeError::Io {
                operation: "stat log file",
                source: e,
            })?
            .len();

        let cap = req.max_bytes;
        let mut start = req.offset;

        // Rotation/truncation: the file shrank below the caller's cursor.
        // Restart from the tail within the cap so the rewritten content is
        // picked up without delivering the whole file again.
        if start > len {
            tracing::debug!(
                file = %self.path.display(),
                requested = req.offset,
                len,
                "Log file shrank below requested offset; clamping to tail"
            );
            start = len.saturating_sub(cap);
        }

        // First fetch with a seed request: return only the last N lines of
        // the trailing window instead of starting the view empty.
        if start == 0 && req.last_lines.unwrap_or(0) > 0 {
            let to_read = len.min(cap);
            let read_start = len.saturating_sub(to_read);
            let window = read_window(&mut file, read_start, to_read as usize)?;
            let content = seed_tail_lines(&window, read_start > 0, req.last_lines.unwrap_or(0));
            return Ok(LogChunk {
                content,
                offset: len.into(),
                path: display_path,
            });
        }

        let available = len.saturating_sub(start);
        let to_read = available.min(cap);
        let content = read_window(&mut file, start, to_read as usize)?;

        Ok(LogChunk {
            content,
            offset: len.into(),
            path: display_path,
        })
    }
}

/// Read exactly `limit` bytes from `file` starting at `offset`, decoded as
/// lossy UTF-8. Returns fewer bytes if the file ends first.
fn read_window(
    file: &mut std::fs::File,
    offset: u64,
    limit: usize,
) -> Result<String, BridgeError> {
    file.seek(SeekFrom::Start(offset)).map_err(|e| BridgeError::Io {
        operation: "seek log file",
        source: e,
    })?;
    let mut buf = vec![0u8; limit];
    let mut filled = 0;
    while filled < limit {
        let n = file.read(&mut buf[filled..]).map_err(|e| BridgeError::Io {
            operation: "read log file",
            source: e,
        })?;
        if n == 0 {
            break;
        }
        filled += n;
    }
    buf.truncate(filled);
    Ok(String::from_utf8_lossy(&buf).into_owned())
}

/// Reduce a trailing read window to its last `n` lines.
///
/// When the window started mid-file, the first line of the window is
/// (potentially) broken mid-line and is dropped before counting.
fn seed_tail_lines(window: &str, started_mid_file: bool, n: usize) -> String {
    let mut normalized = window.replace('\r', "");

    if started_mid_file {
        normalized = match normalized.find('\n') {
            Some(idx) => normalized[idx + 1..].to_string(),
            None => String::new(),
        };
    }

    let parts: Vec<&str> = normalized.split('\n').collect();
    let take_from = parts.len().saturating_sub(n);
    parts[take_from..].join("\n")
}

// =============================================================================
// Unit tests
// =============================================================================
