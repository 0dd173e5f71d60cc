//! Output: renders [`ParseResult`]s for the terminal.

use std::collections::HashSet;

use craftlog_core::config::OutputFormat;
use craftlog_core::{MessageType, ParseResult, ServerVariant};

/// `<type>\t<normalized>[\t<action>]`
pub fn format_text(result: &ParseResult) -> String {
    match result.action() {
        Some(action) => format!(
            "{}\t{}\t{}",
            result.message_type(),
            result.normalized_message(),
            action
        ),
        None => format!("{}\t{}", result.message_type(), result.normalized_message()),
    }
}

/// One JSON object per line.
pub fn format_json(result: &ParseResult) -> serde_json::Result<String> {
    serde_json::to_string(result)
}

pub fn format_result(result: &ParseResult, format: OutputFormat) -> anyhow::Result<String> {
    Ok(match format {
        OutputFormat::Text => format_text(result),
        OutputFormat::Json => format_json(result)?,
    })
}

/// One summary line per variant for `--list-variants`.
pub fn format_variant(variant: &ServerVariant, is_default: bool) -> String {
    let caps = variant.capabilities();
    let flag = |b: bool| if b { "y" } else { "-" };
    format!(
        "{}{}\t{}\t{}\tplugins={} local={} fetch={}{}{} download={}{}{} version={}",
        variant.id(),
        if is_default { "*" } else { "" },
        variant.name(),
        variant.homepage_url(),
        flag(variant.supports_plugins()),
        flag(variant.is_local()),
        flag(caps.can_fetch.recommended),
        flag(caps.can_fetch.beta),
        flag(caps.can_fetch.dev),
        flag(caps.can_download.recommended),
        flag(caps.can_download.beta),
        flag(caps.can_download.dev),
        flag(caps.can_get_current_version),
    )
}

/// Which message types to print. Empty means all.
#[derive(Debug, Clone, Default)]
pub struct TypeFilter {
    allowed: HashSet<MessageType>,
}

impl TypeFilter {
    /// Build from user-supplied names; unknown names are an error.
    pub fn from_names<S: AsRef<str>>(names: &[S]) -> anyhow::Result<Self> {
        let allowed = names
            .iter()
            .map(|name| {
                let name = name.as_ref();
                MessageType::from_name(name)
                    .ok_or_else(|| anyhow::anyhow!("unknown message type {name:?}"))
            })
            .collect::<anyhow::Result<HashSet<_>>>()?;
        Ok(Self { allowed })
    }

    pub fn accepts(&self, result: &ParseResult) -> bool {
        self.allowed.is_empty() || self.allowed.contains(&result.message_type())
    }
}
