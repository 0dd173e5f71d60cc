//! Normalizer: strips timestamp and log-framework noise from a raw line.
//!
//! The vanilla rules, in the order a left-to-right reading would apply them:
//!
//! | # | Rule |
//! |---|------|
//! | 1 | drop `YYYY-MM-DD HH:MM:SS[,mmm]` and the whitespace after it |
//! | 2 | drop `[HH:MM:SS]` |
//! | 3 | collapse `[HH:MM:SS ` into `[` |
//! | 4 | drop the literal `Server thread/` |
//! | 5 | drop `[minecraft]` / `[minecraft-server]` (any case) |
//! | 6 | collapse `]` followed by any run of `:` into `]` |
//! | 7 | trim both ends |
//!
//! The rules run in a single scan: each character is appended to the output
//! and the output's tail is rewritten as soon as it completes a match. Every
//! rewrite leaves a prefix of the text as it stood before the character was
//! appended, so the output never contains a match of any rule. That makes a
//! second normalisation a no-op, and the scan does constant work per
//! character.

use regex::Regex;
use std::sync::LazyLock;

static VANILLA: LazyLock<Normalizer> = LazyLock::new(Normalizer::vanilla);

/// Normalise `raw` with the vanilla rules.
pub fn normalize(raw: &str) -> String {
    VANILLA.normalize(raw)
}

// ---------------------------------------------------------------------------
// Vanilla scan
// ---------------------------------------------------------------------------

/// Byte shapes matched against the output tail; `d` stands for an ASCII digit.
const CLOCK_TAG: &[u8] = b"[dd:dd:dd]";
const CLOCK_OPEN: &[u8] = b"[dd:dd:dd ";
const DATE_TIME: &[u8] = b"dddd-dd-dd dd:dd:dd";
const DATE_TIME_MILLIS: &[u8] = b"dddd-dd-dd dd:dd:dd,ddd";
const MILLIS: &[u8] = b",ddd";

const SERVER_THREAD: &[u8] = b"Server thread/";
const MINECRAFT_TAG: &[u8] = b"[minecraft]";
const MINECRAFT_SERVER_TAG: &[u8] = b"[minecraft-server]";

fn matches_shape(bytes: &[u8], shape: &[u8]) -> bool {
    bytes.len() == shape.len()
        && bytes
            .iter()
            .zip(shape)
            .all(|(&b, &s)| if s == b'd' { b.is_ascii_digit() } else { b == s })
}

fn ends_with_shape(buf: &[u8], shape: &[u8]) -> bool {
    buf.len() >= shape.len() && matches_shape(&buf[buf.len() - shape.len()..], shape)
}

fn ends_with_ignore_case(buf: &[u8], needle: &[u8]) -> bool {
    buf.len() >= needle.len() && buf[buf.len() - needle.len()..].eq_ignore_ascii_case(needle)
}

/// How to rewrite the output tail after a character was appended.
#[derive(Debug, PartialEq, Eq)]
struct Rewrite {
    /// Bytes to cut from the end.
    cut: usize,
    /// Drop whitespace that follows in the input.
    skip_space: bool,
}

impl Rewrite {
    fn cut(cut: usize) -> Option<Self> {
        Some(Self {
            cut,
            skip_space: false,
        })
    }
}

/// The rewrite for `buf`, whose last byte was just appended. `rest` is the
/// input not yet read; a date only waits for it to decide on milliseconds.
fn rewrite_tail(buf: &[u8], rest: &[u8]) -> Option<Rewrite> {
    match *buf.last()? {
        b']' if ends_with_shape(buf, CLOCK_TAG) => Rewrite::cut(CLOCK_TAG.len()),
        b']' if ends_with_ignore_case(buf, MINECRAFT_TAG) => Rewrite::cut(MINECRAFT_TAG.len()),
        b']' if ends_with_ignore_case(buf, MINECRAFT_SERVER_TAG) => {
            Rewrite::cut(MINECRAFT_SERVER_TAG.len())
        }
        // Keeps the opening `[`.
        b' ' if ends_with_shape(buf, CLOCK_OPEN) => Rewrite::cut(CLOCK_OPEN.len() - 1),
        b':' if buf.len() >= 2 && buf[buf.len() - 2] == b']' => Rewrite::cut(1),
        b'/' if buf.ends_with(SERVER_THREAD) => Rewrite::cut(SERVER_THREAD.len()),
        b'0'..=b'9' if ends_with_shape(buf, DATE_TIME_MILLIS) => Some(Rewrite {
            cut: DATE_TIME_MILLIS.len(),
            skip_space: true,
        }),
        b'0'..=b'9'
            if ends_with_shape(buf, DATE_TIME)
                && !(rest.len() >= MILLIS.len() && matches_shape(&rest[..MILLIS.len()], MILLIS)) =>
        {
            Some(Rewrite {
                cut: DATE_TIME.len(),
                skip_space: true,
            })
        }
        _ => None,
    }
}

fn scan(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut skip_space = false;
    for (i, c) in raw.char_indices() {
        if skip_space {
            if c.is_whitespace() {
                continue;
            }
            skip_space = false;
        }
        out.push(c);
        let rest = &raw.as_bytes()[i + c.len_utf8()..];
        if let Some(rewrite) = rewrite_tail(out.as_bytes(), rest) {
            // Every shape is ASCII, so the cut lands on a char boundary.
            out.truncate(out.len() - rewrite.cut);
            skip_space = rewrite.skip_space;
        }
    }
    let trimmed = out.trim();
    if trimmed.len() == out.len() {
        out
    } else {
        trimmed.to_string()
    }
}

// ---------------------------------------------------------------------------
// Extra steps
// ---------------------------------------------------------------------------

/// A variant-specific rewrite applied once, after the vanilla rules.
///
/// Normalisation stays idempotent only if the rewrite leaves nothing it
/// would match again and never joins text into a vanilla match.
#[derive(Debug, Clone)]
pub struct NormalizeStep {
    name: &'static str,
    pattern: Regex,
    replacement: &'static str,
}

impl NormalizeStep {
    /// Replace every match of `pattern` with `replacement` (`$1` style
    /// references allowed).
    pub fn pattern(
        name: &'static str,
        pattern: &str,
        replacement: &'static str,
    ) -> Result<Self, regex::Error> {
        Ok(Self {
            name,
            pattern: Regex::new(pattern)?,
            replacement,
        })
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    fn apply(&self, text: String) -> String {
        match self.pattern.replace_all(&text, self.replacement) {
            std::borrow::Cow::Borrowed(_) => text,
            std::borrow::Cow::Owned(s) => s,
        }
    }
}

/// The vanilla rules plus any appended [`NormalizeStep`]s.
#[derive(Debug, Clone, Default)]
pub struct Normalizer {
    steps: Vec<NormalizeStep>,
}

impl Normalizer {
    /// The reference rules used by the vanilla server.
    pub fn vanilla() -> Self {
        Self::default()
    }

    /// Append a step after the vanilla rules and any earlier steps.
    pub fn with_step(mut self, step: NormalizeStep) -> Self {
        self.steps.push(step);
        self
    }

    /// The appended steps, in order.
    pub fn steps(&self) -> &[NormalizeStep] {
        &self.steps
    }

    pub fn normalize(&self, raw: &str) -> String {
        let normalized = self.steps.iter().fold(scan(raw), |acc, step| step.apply(acc));
        tracing::trace!(stage = "normalize", line = %raw, normalized = %normalized, "normalized");
        normalized
    }
}
