//! Stdin feed: parses lines piped into the process.

use craftlog_core::OutputParser;

use crate::{spawn_with_kind, FeedHandle, FeedKind};

/// Start reading the process's standard input.
pub fn spawn(parser: OutputParser, capacity: usize) -> FeedHandle {
    spawn_with_kind(FeedKind::Stdin, tokio::io::stdin(), parser, capacity)
}
