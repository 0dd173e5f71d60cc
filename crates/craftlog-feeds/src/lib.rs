//! craftlog-feeds: line sources for craftlog.
//!
//! A feed reads server output on a single background task, parses each line
//! with a bound [`OutputParser`], and forwards the results in emission order
//! over a bounded channel. Dropping the [`FeedHandle`] (or calling
//! [`FeedHandle::finish`]) stops the reader at its next send.

pub mod file;
pub mod stdin;

use craftlog_core::{OutputParser, ParseResult};
use tokio::io::{AsyncBufReadExt, AsyncRead, BufReader};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

/// Which source a feed reads from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FeedKind {
    Stdin,
    File(std::path::PathBuf),
    /// Any other async reader (pipes, tests).
    Reader,
}

impl std::fmt::Display for FeedKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FeedKind::Stdin => write!(f, "stdin"),
            FeedKind::File(path) => write!(f, "file:{}", path.display()),
            FeedKind::Reader => write!(f, "reader"),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum FeedError {
    #[error("could not open {path}: {source}")]
    Open {
        path: std::path::PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("read failed after {lines} lines: {source}")]
    Read {
        lines: u64,
        #[source]
        source: std::io::Error,
    },

    #[error("feed task panicked or was cancelled: {0}")]
    Join(#[from] tokio::task::JoinError),
}

/// What a finished reader task reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FeedSummary {
    /// Lines parsed and delivered.
    pub lines: u64,
    /// The receiver went away before EOF.
    pub stopped_early: bool,
}

/// Receiving side of a running feed.
#[derive(Debug)]
pub struct FeedHandle {
    kind: FeedKind,
    rx: mpsc::Receiver<ParseResult>,
    task: JoinHandle<Result<FeedSummary, FeedError>>,
}

impl FeedHandle {
    pub fn kind(&self) -> &FeedKind {
        &self.kind
    }

    /// Next parsed line, or `None` once the source is exhausted.
    pub async fn recv(&mut self) -> Option<ParseResult> {
        self.rx.recv().await
    }

    /// Stop reading and wait for the reader task. Results not yet received
    /// are discarded.
    pub async fn finish(self) -> Result<FeedSummary, FeedError> {
        drop(self.rx);
        self.task.await?
    }

    /// Receive everything until EOF, then wait for the reader task.
    pub async fn collect(mut self) -> Result<Vec<ParseResult>, FeedError> {
        let mut results = Vec::new();
        while let Some(result) = self.rx.recv().await {
            results.push(result);
        }
        self.task.await??;
        Ok(results)
    }
}

/// Spawn a reader task over any async byte source.
///
/// Lines are split on `\n`, a trailing `\r` is dropped, and invalid UTF-8 is
/// replaced lossily. `capacity` is clamped to at least 1.
pub fn spawn_reader<R>(reader: R, parser: OutputParser, capacity: usize) -> FeedHandle
where
    R: AsyncRead + Unpin + Send + 'static,
{
    spawn_with_kind(FeedKind::Reader, reader, parser, capacity)
}

pub(crate) fn spawn_with_kind<R>(
    kind: FeedKind,
    reader: R,
    parser: OutputParser,
    capacity: usize,
) -> FeedHandle
where
    R: AsyncRead + Unpin + Send + 'static,
{
    let (tx, rx) = mpsc::channel(capacity.max(1));
    let task_kind = kind.clone();
    let task = tokio::spawn(async move { read_lines(task_kind, reader, parser, tx).await });
    FeedHandle { kind, rx, task }
}

async fn read_lines<R>(
    kind: FeedKind,
    reader: R,
    parser: OutputParser,
    tx: mpsc::Sender<ParseResult>,
) -> Result<FeedSummary, FeedError>
where
    R: AsyncRead + Unpin,
{
    let mut reader = BufReader::new(reader);
    let mut buf = Vec::new();
    let mut lines = 0u64;
    tracing::debug!(feed = %kind, variant = %parser.variant().id(), "feed started");
    loop {
        buf.clear();
        let n = reader
            .read_until(b'\n', &mut buf)
            .await
            .map_err(|source| FeedError::Read { lines, source })?;
        if n == 0 {
            break;
        }
        let text = String::from_utf8_lossy(&buf);
        let line = text.trim_end_matches('\n').trim_end_matches('\r');
        let result = parser.parse(line);
        if tx.send(result).await.is_err() {
            tracing::debug!(feed = %kind, lines, "receiver dropped, stopping feed");
            return Ok(FeedSummary {
                lines,
                stopped_early: true,
            });
        }
        lines += 1;
    }
    tracing::debug!(feed = %kind, lines, "feed reached EOF");
    Ok(FeedSummary {
        lines,
        stopped_early: false,
    })
}
