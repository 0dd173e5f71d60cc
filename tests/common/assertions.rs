//! Domain-specific assertion macros for craftlog harnesses.
//!
//! These add context-rich failure messages that make it clear *which* line
//! and *which* pipeline stage broke.

use craftlog_core::{MessageType, ParseResult, PlayerAction};

/// Assert that a `ParseResult` has the expected message type.
///
/// ```rust
/// assert_type!(result, MessageType::PlayerJoin);
/// ```
#[macro_export]
macro_rules! assert_type {
    ($result:expr, $expected:expr) => {{
        let result: &craftlog_core::ParseResult = &$result;
        let expected: craftlog_core::MessageType = $expected;
        if result.message_type() != expected {
            panic!(
                "assert_type! failed:\n  expected:   {:?}\n  actual:     {:?}\n  raw:        {:?}\n  normalized: {:?}",
                expected,
                result.message_type(),
                result.raw_text(),
                result.normalized_message()
            );
        }
    }};
}

/// Assert that a `ParseResult` carries no action.
#[macro_export]
macro_rules! assert_no_action {
    ($result:expr) => {{
        let result: &craftlog_core::ParseResult = &$result;
        if let Some(action) = result.action() {
            panic!(
                "assert_no_action! failed: found {:?}\n  raw: {:?}",
                action,
                result.raw_text()
            );
        }
    }};
}

/// Assert that a `ParseResult` carries exactly `expected`.
#[macro_export]
macro_rules! assert_action {
    ($result:expr, $expected:expr) => {{
        let result: &craftlog_core::ParseResult = &$result;
        let expected: craftlog_core::PlayerAction = $expected;
        match result.action() {
            Some(actual) if *actual == expected => {}
            Some(actual) => panic!(
                "assert_action! failed:\n  expected: {:?}\n  actual:   {:?}\n  raw: {:?}",
                expected,
                actual,
                result.raw_text()
            ),
            None => panic!(
                "assert_action! failed: no action on {:?} line.\n  raw: {:?}",
                result.message_type(),
                result.raw_text()
            ),
        }
    }};
}

/// `action` is present exactly for the five player-lifecycle types, and the
/// action variant matches the type.
pub fn assert_action_invariant(result: &ParseResult) {
    let lifecycle = matches!(
        result.message_type(),
        MessageType::PlayerJoin
            | MessageType::PlayerLeave
            | MessageType::PlayerKick
            | MessageType::PlayerBan
            | MessageType::PlayerIpBan
    );
    assert_eq!(
        result.action().is_some(),
        lifecycle,
        "action presence does not match {:?}: {:?}",
        result.message_type(),
        result.raw_text()
    );
    if let Some(action) = result.action() {
        assert_eq!(
            action.message_type(),
            result.message_type(),
            "action variant does not match type: {:?}",
            result.raw_text()
        );
    }
}

/// Shorthand for a join action.
pub fn join(player_name: &str, ip: &str) -> PlayerAction {
    PlayerAction::Join {
        player_name: player_name.to_string(),
        ip: ip.to_string(),
    }
}

/// Shorthand for a leave action.
pub fn leave(player_name: &str, details: &str) -> PlayerAction {
    PlayerAction::Leave {
        player_name: player_name.to_string(),
        details: details.to_string(),
    }
}

/// Shorthand for a ban action.
pub fn ban(player_name: &str, details: &str) -> PlayerAction {
    PlayerAction::Ban {
        player_name: player_name.to_string(),
        details: details.to_string(),
    }
}
