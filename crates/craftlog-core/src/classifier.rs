//! Classifier: ordered, first-match-wins grammar over normalised lines.
//!
//! The vanilla grammar, evaluated top to bottom (all rules case-insensitive):
//!
//! | # | Rule | Result |
//! |---|------|--------|
//! | 1 | warning tag, anything | `Warning` |
//! | 2 | severe/error tag, anything | `Severe` |
//! | 3 | info tag, player, `[/ip[:port]]`, `logged in with entity id` | `PlayerJoin` |
//! | 4 | info tag, player, `lost connection: Disconnected` | `PlayerLeave` |
//! | 5 | same pattern as 4 | `PlayerKick` (never reached) |
//! | 6 | info tag, player, `lost connection: Banned by` | `PlayerBan` |
//! | 7 | info tag, player, `left the game.` | `PlayerLeave` |
//! | 8 | info tag, anything | `Info` |
//! | - | nothing matched | `Unknown` |
//!
//! Rule 5 duplicates rule 4 byte for byte, so a kick line is reported as
//! `PlayerLeave`. Kept as-is until the intended kick pattern is confirmed.

use regex::Regex;
use std::sync::LazyLock;

use crate::types::MessageType;

/// Optional `...thread.../` marker that 1.7.2+ servers put inside the level tag.
pub const THREAD_MARKER: &str = r"((.*)thread(.*)/)?";
/// Player name token.
pub const PLAYER: &str = r"\w{2,16}";
/// Dotted-quad IPv4 address without port.
pub const IP_NO_PORT: &str = r"\d{1,3}\.\d{1,3}\.\d{1,3}\.\d{1,3}";
/// Optional whitespace.
pub const SPACE: &str = r"\s*";

/// `^[<marker>info]`
pub fn info_tag() -> String {
    format!(r"^\[{THREAD_MARKER}info\]")
}

/// `^[<marker>warning]` or `^[<marker>warn]`
pub fn warn_tag() -> String {
    format!(r"^\[{THREAD_MARKER}(warning|warn)\]")
}

/// `^[<marker>severe]` or `^[<marker>error]`
pub fn severe_tag() -> String {
    format!(r"^\[{THREAD_MARKER}(severe|error)\]")
}

/// `[/a.b.c.d]` with an optional `:port`.
pub fn ip_bracket() -> String {
    format!(r"\[/{IP_NO_PORT}(:\d{{2,5}})?\]")
}

/// Info tag, optional space, player token, then `tail`.
pub fn info_player(tail: &str) -> String {
    format!("{}{SPACE}{PLAYER}{tail}", info_tag())
}

static VANILLA: LazyLock<Grammar> = LazyLock::new(Grammar::vanilla);

/// Classify with the vanilla grammar.
pub fn classify(normalized: &str) -> MessageType {
    VANILLA.classify(normalized)
}

/// A single `(pattern, outcome)` pair.
#[derive(Debug, Clone)]
pub struct Rule {
    name: &'static str,
    pattern: Regex,
    outcome: MessageType,
}

impl Rule {
    /// Compile a case-insensitive rule.
    pub fn new(
        name: &'static str,
        pattern: &str,
        outcome: MessageType,
    ) -> Result<Self, regex::Error> {
        Ok(Self {
            name,
            pattern: Regex::new(&format!("(?i){pattern}"))?,
            outcome,
        })
    }

    /// [`Rule::new`] for the built-in grammars, whose patterns are literals
    /// covered by this crate's tests.
    pub(crate) fn literal(name: &'static str, pattern: &str, outcome: MessageType) -> Self {
        Self::new(name, pattern, outcome).expect("built-in grammar patterns are literals")
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn outcome(&self) -> MessageType {
        self.outcome
    }

    pub fn is_match(&self, text: &str) -> bool {
        self.pattern.is_match(text)
    }
}

/// An ordered rule list. Order is part of the contract.
#[derive(Debug, Clone)]
pub struct Grammar {
    rules: Vec<Rule>,
}

impl Grammar {
    pub fn vanilla() -> Self {
        Self {
            rules: vec![
                Rule::literal("warning", &format!("{}(.*)", warn_tag()), MessageType::Warning),
                Rule::literal("severe", &format!("{}(.*)", severe_tag()), MessageType::Severe),
                Rule::literal(
                    "join",
                    &info_player(&format!("{} logged in with entity id", ip_bracket())),
                    MessageType::PlayerJoin,
                ),
                Rule::literal(
                    "disconnect",
                    &info_player(" lost connection: Disconnected"),
                    MessageType::PlayerLeave,
                ),
                Rule::literal(
                    "kick",
                    &info_player(" lost connection: Disconnected"),
                    MessageType::PlayerKick,
                ),
                Rule::literal(
                    "ban",
                    &info_player(" lost connection: Banned by"),
                    MessageType::PlayerBan,
                ),
                Rule::literal("left", &info_player(" left the game."), MessageType::PlayerLeave),
                Rule::literal("info", &format!("{}.*", info_tag()), MessageType::Info),
            ],
        }
    }

    /// Build a grammar from an explicit rule list.
    pub fn from_rules(rules: Vec<Rule>) -> Self {
        Self { rules }
    }

    /// Insert `extra` immediately before the trailing info catch-all, keeping
    /// the priority of every earlier rule.
    pub fn with_rules_before_info(mut self, extra: Vec<Rule>) -> Self {
        let at = self
            .rules
            .iter()
            .rposition(|r| r.outcome == MessageType::Info)
            .unwrap_or(self.rules.len());
        self.rules.splice(at..at, extra);
        self
    }

    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    /// The first rule matching `normalized`, if any.
    pub fn matching_rule(&self, normalized: &str) -> Option<&Rule> {
        self.rules.iter().find(|r| r.is_match(normalized))
    }

    pub fn classify(&self, normalized: &str) -> MessageType {
        match self.matching_rule(normalized) {
            Some(rule) => {
                tracing::trace!(stage = "classify", line = %normalized, rule = rule.name, "matched");
                rule.outcome
            }
            None => {
                tracing::trace!(stage = "classify", line = %normalized, "no rule matched");
                MessageType::Unknown
            }
        }
    }
}
