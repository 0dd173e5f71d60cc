//! File feed: parses an existing log file from the start to EOF.

use std::path::Path;

use craftlog_core::OutputParser;

use crate::{spawn_with_kind, FeedError, FeedHandle, FeedKind};

/// Open `path` and start reading it.
pub async fn open(
    path: impl AsRef<Path>,
    parser: OutputParser,
    capacity: usize,
) -> Result<FeedHandle, FeedError> {
    let path = path.as_ref();
    let file = tokio::fs::File::open(path)
        .await
        .map_err(|source| FeedError::Open {
            path: path.to_path_buf(),
            source,
        })?;
    Ok(spawn_with_kind(
        FeedKind::File(path.to_path_buf()),
        file,
        parser,
        capacity,
    ))
}
