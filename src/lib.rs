//! craftlog: classify Minecraft server console output into typed events.
//!
//! The parsing core lives in [`craftlog_core`] and the line sources in
//! [`craftlog_feeds`]; both are re-exported here so integration tests and the
//! binary share one import path. This crate adds the output formatting used by
//! the `craftlog` binary.
//!
//! # Architecture
//!
//! ```text
//! Feed (stdin/file) ──► OutputParser(ServerVariant) ──► channel ──► printer
//! ```
//!
//! One background task reads and parses; the main task prints.

pub mod output;

pub use craftlog_core as core;
pub use craftlog_feeds as feeds;
