//! Extractor: pulls player names, IPs and details out of lifecycle lines.
//!
//! A pattern that does not match yields an empty string for that field.

use regex::Regex;
use std::sync::LazyLock;

use crate::classifier::{IP_NO_PORT, PLAYER};
use crate::types::{MessageType, PlayerAction};

static PLAYER_NAME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(&format!(r"\s+{PLAYER}")).expect("player pattern is a literal"));
static IP: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(IP_NO_PORT).expect("ip pattern is a literal"));
static DETAILS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r":(.*)$").expect("details pattern is a literal"));

/// Extract the [`PlayerAction`] for `message_type`, or `None` when the type
/// carries no action.
pub fn extract(message_type: MessageType, normalized: &str) -> Option<PlayerAction> {
    let action = match message_type {
        MessageType::PlayerJoin => PlayerAction::Join {
            player_name: player_name(normalized),
            ip: ip(normalized),
        },
        MessageType::PlayerLeave => PlayerAction::Leave {
            player_name: player_name(normalized),
            details: details(normalized),
        },
        MessageType::PlayerKick => PlayerAction::Kick {
            player_name: player_name(normalized),
            details: details(normalized),
        },
        MessageType::PlayerBan => PlayerAction::Ban {
            player_name: player_name(normalized),
            details: details(normalized),
        },
        MessageType::PlayerIpBan => PlayerAction::IpBan,
        _ => return None,
    };
    tracing::trace!(stage = "extract", line = %normalized, action = %action, "extracted");
    Some(action)
}

/// First word run (2-16 chars) that follows whitespace.
pub fn player_name(text: &str) -> String {
    PLAYER_NAME
        .find(text)
        .map(|m| m.as_str().trim().to_string())
        .unwrap_or_default()
}

/// First dotted-quad address, port dropped.
pub fn ip(text: &str) -> String {
    IP.find(text)
        .map(|m| m.as_str().to_string())
        .unwrap_or_default()
}

/// Everything after the first colon, trimmed.
pub fn details(text: &str) -> String {
    DETAILS
        .find(text)
        .map(|m| m.as_str().trim_start_matches(':').trim().to_string())
        .unwrap_or_default()
}
