#![allow(unused)]
//! Feed integration harness.
//!
//! # What this covers
//!
//! - **Emission order**: lines written to a live pipe come out parsed, in the
//!   order they were written, while the writer is still open.
//! - **Burst**: a large number of lines through a small channel arrive
//!   without loss.
//! - **File feed**: a log file on disk is parsed with the bound variant.
//! - **Output**: results render as text and JSON lines for the binary.
//!
//! # What this does NOT cover
//!
//! - Spawning or supervising the server process itself
//!
//! # Running
//!
//! ```sh
//! cargo test --test feed_harness
//! ```

mod common;
use common::*;

use std::io::Write;

use craftlog::output::{format_json, format_text, TypeFilter};
use craftlog_core::{MessageType, OutputParser, VariantId, VariantRegistry};
use craftlog_feeds::{file, spawn_reader, FeedKind};
use tokio::io::AsyncWriteExt;

fn parser(id: VariantId) -> OutputParser {
    let registry = VariantRegistry::standard().unwrap();
    OutputParser::for_id(&registry, id).unwrap()
}

// ---------------------------------------------------------------------------
// Emission order
// ---------------------------------------------------------------------------

#[tokio::test]
async fn live_pipe_delivers_in_order() {
    let (mut writer, reader) = tokio::io::duplex(64);
    let mut feed = spawn_reader(reader, parser(VariantId::Vanilla), 4);
    assert_eq!(feed.kind(), &FeedKind::Reader);

    writer
        .write_all(b"[12:30:01] [Server thread/INFO]: Bertware[/127.0.0.1:58189] logged in with entity id 27\n")
        .await
        .unwrap();
    let first = feed.recv().await.unwrap();
    assert_type!(first, MessageType::PlayerJoin);
    assert_action!(first, join("Bertware", "127.0.0.1"));

    writer
        .write_all(b"[12:31:00] [Server thread/WARN]: Can't keep up!\n[12:31:10] [Server thread/INFO]: Bertware left the game.\n")
        .await
        .unwrap();
    drop(writer);

    let second = feed.recv().await.unwrap();
    let third = feed.recv().await.unwrap();
    assert_type!(second, MessageType::Warning);
    assert_type!(third, MessageType::PlayerLeave);
    assert!(feed.recv().await.is_none());

    let summary = feed.finish().await.unwrap();
    assert_eq!(summary.lines, 3);
    assert!(!summary.stopped_early);
}

// ---------------------------------------------------------------------------
// Burst
// ---------------------------------------------------------------------------

#[tokio::test]
async fn burst_arrives_without_loss() {
    let lines = corpus_high_volume(10_000);
    let input = lines.join("\n").into_bytes();
    let results = spawn_reader(std::io::Cursor::new(input), parser(VariantId::Vanilla), 8)
        .collect()
        .await
        .unwrap();

    assert_eq!(results.len(), lines.len());
    for (result, line) in results.iter().zip(&lines) {
        assert_eq!(result.raw_text(), line);
        assert_action_invariant(result);
    }
    let joins = results
        .iter()
        .filter(|r| r.message_type() == MessageType::PlayerJoin)
        .count();
    assert_eq!(joins, 1_000);
}

// ---------------------------------------------------------------------------
// File feed
// ---------------------------------------------------------------------------

#[tokio::test]
async fn forge_log_file() {
    let mut log = tempfile::NamedTempFile::new().unwrap();
    for (line, _) in CORPUS_FORGE {
        writeln!(log, "{line}").unwrap();
    }

    let results = file::open(log.path(), parser(VariantId::Forge), 2)
        .await
        .unwrap()
        .collect()
        .await
        .unwrap();

    let types: Vec<_> = results.iter().map(|r| r.message_type()).collect();
    let expected: Vec<_> = CORPUS_FORGE.iter().map(|(_, t)| *t).collect();
    assert_eq!(types, expected);
}

// ---------------------------------------------------------------------------
// Output
// ---------------------------------------------------------------------------

#[tokio::test]
async fn filtered_text_and_json_output() {
    let input: Vec<u8> = CORPUS_VANILLA
        .iter()
        .map(|(line, _)| format!("{line}\n"))
        .collect::<String>()
        .into_bytes();
    let results = spawn_reader(std::io::Cursor::new(input), parser(VariantId::Vanilla), 16)
        .collect()
        .await
        .unwrap();

    let filter = TypeFilter::from_names(&["player_ban"]).unwrap();
    let shown: Vec<_> = results.iter().filter(|r| filter.accepts(r)).collect();
    assert_eq!(shown.len(), 1);
    assert_eq!(
        format_text(shown[0]),
        "PlayerBan\t[INFO] Griefer42 lost connection: Banned by admin.\tban Griefer42 details=\"Banned by admin.\""
    );

    let json: serde_json::Value = serde_json::from_str(&format_json(shown[0]).unwrap()).unwrap();
    assert_eq!(json["type"], "player_ban");
    assert_eq!(json["action"]["player_name"], "Griefer42");
    assert_eq!(json["action"]["details"], "Banned by admin.");
}
