//! Tail-follow of a growing feed file.

use crate::error::FeedResult;
use std::io::SeekFrom;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tokio::fs::File;
use tokio::io::{AsyncBufReadExt, AsyncSeekExt, BufReader};
use tokio::time::{sleep, Instant};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

/// Reference poll interval when the cursor is at end-of-file.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Follows a file as it grows, yielding newly appended lines.
///
/// The read position starts at the current end of the file, so content
/// present before the follower opens is never delivered. The file handle is
/// held for the follower's whole lifetime. The line sequence is infinite:
/// `next_line` returns `None` only on cancellation, or after `max_idle`
/// with no growth when that option is set.
#[derive(Debug)]
pub struct FileFollower {
    path: PathBuf,
    reader: BufReader<File>,
    /// Fragment of a line whose newline has not been appended yet.
    pending: String,
    poll_interval: Duration,
    max_idle: Option<Duration>,
    shutdown: CancellationToken,
}

impl FileFollower {
    /// Open a feed file and position the cursor at its current end.
    pub async fn open(
        path: impl AsRef<Path>,
        poll_interval: Duration,
        shutdown: CancellationToken,
    ) -> FeedResult<Self> {
        let path = path.as_ref().to_path_buf();
        let mut file = File::open(&path).await?;
        file.seek(SeekFrom::End(0)).await?;
        debug!(path = %path.display(), "Following feed file from current end");
        Ok(Self {
            path,
            reader: BufReader::new(file),
            pending: String::new(),
            poll_interval,
            max_idle: None,
            shutdown,
        })
    }

    /// Stop following after this long with no new data.
    pub fn with_max_idle(mut self, max_idle: Duration) -> Self {
        self.max_idle = Some(max_idle);
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Next complete appended line, terminator stripped.
    ///
    /// Waits at end-of-file, polling every `poll_interval`; the wait races
    /// the cancellation token, so shutdown latency is bounded by the poll
    /// interval. A trailing fragment without its newline is buffered and
    /// delivered once the newline arrives. Read failures are fatal.
    pub async fn next_line(&mut self) -> FeedResult<Option<String>> {
        let mut idle_since = Instant::now();
        loop {
            if self.shutdown.is_cancelled() {
                return Ok(None);
            }

            let mut chunk = String::new();
            let read = self.reader.read_line(&mut chunk).await?;
            if read == 0 {
                if let Some(max_idle) = self.max_idle {
                    if idle_since.elapsed() >= max_idle {
                        info!(path = %self.path.display(), "Feed idle limit reached, stopping");
                        return Ok(None);
                    }
                }
                tokio::select! {
                    _ = self.shutdown.cancelled() => return Ok(None),
                    _ = sleep(self.poll_interval) => continue,
                }
            }
            idle_since = Instant::now();

            if chunk.ends_with('\n') {
                let mut line = std::mem::take(&mut self.pending);
                line.push_str(&chunk);
                line.pop();
                if line.ends_with('\r') {
                    line.pop();
                }
                return Ok(Some(line));
            }

            // The writer is mid-append; stash the fragment until its
            // newline shows up.
            self.pending.push_str(&chunk);
        }
    }
}
