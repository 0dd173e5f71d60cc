//! Core types for craftlog-core.
//!
//! This module defines the values produced by the parsing pipeline: the
//! closed [`MessageType`] category set, the structured [`PlayerAction`]
//! payload, and the immutable [`ParseResult`] that combines them with the raw
//! and normalised text.

use serde::Serialize;

/// The category assigned to every line of server output.
///
/// Discriminants are grouped in bands of ten; see [`MessageBand`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
#[repr(u8)]
pub enum MessageType {
    Unknown = 0,
    Info = 10,
    Warning = 11,
    Severe = 12,
    PlayerJoin = 20,
    PlayerLeave = 21,
    PlayerKick = 22,
    PlayerBan = 23,
    PlayerIpBan = 24,
    JavaStackTrace = 30,
    JavaStatus = 31,
    PlayerList = 40,
}

/// Semantic grouping of [`MessageType`] values, derived from the numeric band.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MessageBand {
    Unknown,
    Informational,
    PlayerLifecycle,
    Diagnostic,
    Listing,
}

impl MessageType {
    pub const ALL: [MessageType; 12] = [
        MessageType::Unknown,
        MessageType::Info,
        MessageType::Warning,
        MessageType::Severe,
        MessageType::PlayerJoin,
        MessageType::PlayerLeave,
        MessageType::PlayerKick,
        MessageType::PlayerBan,
        MessageType::PlayerIpBan,
        MessageType::JavaStackTrace,
        MessageType::JavaStatus,
        MessageType::PlayerList,
    ];

    /// Numeric code of this type.
    pub fn code(self) -> u8 {
        self as u8
    }

    pub fn band(self) -> MessageBand {
        match self.code() / 10 {
            1 => MessageBand::Informational,
            2 => MessageBand::PlayerLifecycle,
            3 => MessageBand::Diagnostic,
            4 => MessageBand::Listing,
            _ => MessageBand::Unknown,
        }
    }

    /// Whether a [`ParseResult`] of this type carries a [`PlayerAction`].
    pub fn carries_action(self) -> bool {
        self.band() == MessageBand::PlayerLifecycle
    }

    /// Case-insensitive lookup by name (`player_join`, `PlayerJoin`, `playerjoin`).
    pub fn from_name(name: &str) -> Option<Self> {
        let wanted: String = name
            .chars()
            .filter(|c| *c != '_' && *c != '-')
            .collect::<String>()
            .to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|t| t.to_string().to_ascii_lowercase() == wanted)
    }
}

impl std::fmt::Display for MessageType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            MessageType::Unknown => "Unknown",
            MessageType::Info => "Info",
            MessageType::Warning => "Warning",
            MessageType::Severe => "Severe",
            MessageType::PlayerJoin => "PlayerJoin",
            MessageType::PlayerLeave => "PlayerLeave",
            MessageType::PlayerKick => "PlayerKick",
            MessageType::PlayerBan => "PlayerBan",
            MessageType::PlayerIpBan => "PlayerIpBan",
            MessageType::JavaStackTrace => "JavaStackTrace",
            MessageType::JavaStatus => "JavaStatus",
            MessageType::PlayerList => "PlayerList",
        };
        f.write_str(name)
    }
}

/// Structured data extracted from a player-lifecycle line.
///
/// Extraction never fails: a field whose pattern did not match is left as an
/// empty string, which consumers must read as "absent".
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PlayerAction {
    Join { player_name: String, ip: String },
    Leave { player_name: String, details: String },
    Kick { player_name: String, details: String },
    Ban { player_name: String, details: String },
    /// IP bans carry no extracted fields.
    IpBan,
}

impl PlayerAction {
    pub fn player_name(&self) -> Option<&str> {
        match self {
            PlayerAction::Join { player_name, .. }
            | PlayerAction::Leave { player_name, .. }
            | PlayerAction::Kick { player_name, .. }
            | PlayerAction::Ban { player_name, .. } => Some(player_name),
            PlayerAction::IpBan => None,
        }
    }

    /// The [`MessageType`] this action belongs to.
    pub fn message_type(&self) -> MessageType {
        match self {
            PlayerAction::Join { .. } => MessageType::PlayerJoin,
            PlayerAction::Leave { .. } => MessageType::PlayerLeave,
            PlayerAction::Kick { .. } => MessageType::PlayerKick,
            PlayerAction::Ban { .. } => MessageType::PlayerBan,
            PlayerAction::IpBan => MessageType::PlayerIpBan,
        }
    }
}

impl std::fmt::Display for PlayerAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PlayerAction::Join { player_name, ip } => write!(f, "join {player_name} ip={ip}"),
            PlayerAction::Leave {
                player_name,
                details,
            } => write!(f, "leave {player_name} details={details:?}"),
            PlayerAction::Kick {
                player_name,
                details,
            } => write!(f, "kick {player_name} details={details:?}"),
            PlayerAction::Ban {
                player_name,
                details,
            } => write!(f, "ban {player_name} details={details:?}"),
            PlayerAction::IpBan => write!(f, "ip-ban"),
        }
    }
}

/// One parsed line of server output.
///
/// `action` is present if and only if `message_type` is a player-lifecycle
/// type; [`ParseResult::new`] is the only constructor and enforces this.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ParseResult {
    raw_text: String,
    normalized_message: String,
    #[serde(rename = "type")]
    message_type: MessageType,
    #[serde(skip_serializing_if = "Option::is_none")]
    action: Option<PlayerAction>,
}

impl ParseResult {
    /// Assemble a result. An action that does not belong to `message_type`
    /// is discarded, and a lifecycle type left without an action gets one
    /// with empty fields.
    pub fn new(
        raw_text: impl Into<String>,
        normalized_message: impl Into<String>,
        message_type: MessageType,
        action: Option<PlayerAction>,
    ) -> Self {
        let action = if message_type.carries_action() {
            Some(
                action
                    .filter(|a| a.message_type() == message_type)
                    .unwrap_or_else(|| empty_action(message_type)),
            )
        } else {
            None
        };
        Self {
            raw_text: raw_text.into(),
            normalized_message: normalized_message.into(),
            message_type,
            action,
        }
    }

    pub fn raw_text(&self) -> &str {
        &self.raw_text
    }

    pub fn normalized_message(&self) -> &str {
        &self.normalized_message
    }

    pub fn message_type(&self) -> MessageType {
        self.message_type
    }

    pub fn action(&self) -> Option<&PlayerAction> {
        self.action.as_ref()
    }
}

fn empty_action(message_type: MessageType) -> PlayerAction {
    match message_type {
        MessageType::PlayerJoin => PlayerAction::Join {
            player_name: String::new(),
            ip: String::new(),
        },
        MessageType::PlayerKick => PlayerAction::Kick {
            player_name: String::new(),
            details: String::new(),
        },
        MessageType::PlayerBan => PlayerAction::Ban {
            player_name: String::new(),
            details: String::new(),
        },
        MessageType::PlayerIpBan => PlayerAction::IpBan,
        _ => PlayerAction::Leave {
            player_name: String::new(),
            details: String::new(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bands_follow_codes() {
        assert_eq!(MessageType::Unknown.band(), MessageBand::Unknown);
        assert_eq!(MessageType::Severe.band(), MessageBand::Informational);
        assert_eq!(MessageType::PlayerIpBan.band(), MessageBand::PlayerLifecycle);
        assert_eq!(MessageType::JavaStatus.band(), MessageBand::Diagnostic);
        assert_eq!(MessageType::PlayerList.band(), MessageBand::Listing);
        assert_eq!(MessageType::PlayerKick.code(), 22);
    }

    #[test]
    fn exactly_five_types_carry_actions() {
        let carrying: Vec<_> = MessageType::ALL
            .into_iter()
            .filter(|t| t.carries_action())
            .collect();
        assert_eq!(
            carrying,
            vec![
                MessageType::PlayerJoin,
                MessageType::PlayerLeave,
                MessageType::PlayerKick,
                MessageType::PlayerBan,
                MessageType::PlayerIpBan,
            ]
        );
    }

    #[test]
    fn from_name_accepts_common_spellings() {
        assert_eq!(MessageType::from_name("player_join"), Some(MessageType::PlayerJoin));
        assert_eq!(MessageType::from_name("Warning"), Some(MessageType::Warning));
        assert_eq!(MessageType::from_name("java-stack-trace"), Some(MessageType::JavaStackTrace));
        assert_eq!(MessageType::from_name("nope"), None);
    }

    #[test]
    fn new_drops_action_on_non_lifecycle_type() {
        let action = PlayerAction::IpBan;
        let result = ParseResult::new("x", "x", MessageType::Info, Some(action));
        assert!(result.action().is_none());
    }

    #[test]
    fn new_fills_missing_action_on_lifecycle_type() {
        let result = ParseResult::new("x", "x", MessageType::PlayerBan, None);
        assert_eq!(
            result.action(),
            Some(&PlayerAction::Ban {
                player_name: String::new(),
                details: String::new(),
            })
        );
    }

    #[test]
    fn new_replaces_action_of_another_kind() {
        let leave = PlayerAction::Leave {
            player_name: "Bertware".into(),
            details: String::new(),
        };
        let result = ParseResult::new("x", "x", MessageType::PlayerIpBan, Some(leave));
        assert_eq!(result.action(), Some(&PlayerAction::IpBan));
    }

    #[test]
    fn serializes_type_and_action() {
        let result = ParseResult::new(
            "[INFO] Bertware left the game.",
            "[INFO] Bertware left the game.",
            MessageType::PlayerLeave,
            Some(PlayerAction::Leave {
                player_name: "Bertware".into(),
                details: String::new(),
            }),
        );
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["type"], "player_leave");
        assert_eq!(json["action"]["kind"], "leave");
        assert_eq!(json["action"]["player_name"], "Bertware");
    }
}
