//! Built-in server variants.
//!
//! | Variant | Overrides |
//! |---------|-----------|
//! | `vanilla` | none, reference implementation |
//! | `bukkit` | classifier (list, stack traces, JVM status), launch parameters, current version |
//! | `paper` | as `bukkit`, plus launch flags and its own jar naming |
//! | `forge` | normalizer (drops `[logger/source]` tags) |
//!
//! Every built-in variant ships with fetch and download disabled; see
//! [`RegistryBuilder::version_feed`](crate::registry::RegistryBuilder::version_feed).

use std::path::Path;
use std::sync::LazyLock;

use regex::Regex;

use crate::classifier::{info_tag, Grammar, Rule, SPACE};
use crate::error::VariantError;
use crate::normalizer::{NormalizeStep, Normalizer};
use crate::types::MessageType;
use crate::variant::{ServerVariant, VariantId};

/// JVM properties that keep console output in UTF-8.
pub const UTF8_STDIO: &str = "-Dsun.stdout.encoding=UTF-8 -Dsun.stderr.encoding=UTF-8";

/// All built-in variants, default first.
pub fn all() -> Vec<ServerVariant> {
    vec![vanilla(), bukkit(), paper(), forge()]
}

pub fn vanilla() -> ServerVariant {
    ServerVariant::builder(VariantId::Vanilla)
        .name("Default Minecraft Server")
        .homepage_url("http://www.minecraft.net")
        .logo("vanilla_logo")
        .build()
}

pub fn bukkit() -> ServerVariant {
    ServerVariant::builder(VariantId::Bukkit)
        .name("CraftBukkit")
        .homepage_url("https://bukkit.org")
        .logo("bukkit_logo")
        .supports_plugins(true)
        .classify(plugin_server_classify)
        .launch_parameters(utf8_stdio_parameters)
        .current_version(bukkit_current_version)
        .build()
}

pub fn paper() -> ServerVariant {
    ServerVariant::builder(VariantId::Paper)
        .name("Paper")
        .homepage_url("https://papermc.io")
        .logo("paper_logo")
        .supports_plugins(true)
        .classify(plugin_server_classify)
        .launch_parameters(utf8_stdio_parameters)
        .launch_flags(paper_launch_flags)
        .current_version(paper_current_version)
        .build()
}

pub fn forge() -> ServerVariant {
    ServerVariant::builder(VariantId::Forge)
        .name("Minecraft Forge")
        .homepage_url("https://files.minecraftforge.net")
        .logo("forge_logo")
        .supports_plugins(true)
        .normalize(forge_normalize)
        .build()
}

// ---------------------------------------------------------------------------
// Plugin-server grammar
// ---------------------------------------------------------------------------

static PLUGIN_SERVER_GRAMMAR: LazyLock<Grammar> = LazyLock::new(plugin_server_grammar);

/// Vanilla grammar plus `/list` output, JVM status lines and stack traces.
pub fn plugin_server_grammar() -> Grammar {
    Grammar::vanilla().with_rules_before_info(vec![
        Rule::literal(
            "player_list",
            &format!(
                r"{}{SPACE}There are \d+(/| out of maximum )\d+ players online",
                info_tag()
            ),
            MessageType::PlayerList,
        ),
        Rule::literal(
            "vm_init_error",
            r"^Error occurred during initialization of VM",
            MessageType::JavaStatus,
        ),
        Rule::literal("vm_warning", r"^.*VM warning:", MessageType::JavaStatus),
        Rule::literal("java_options", r"^Picked up _JAVA_OPTIONS", MessageType::JavaStatus),
        Rule::literal("uncaught", r#"^Exception in thread ""#, MessageType::JavaStatus),
        Rule::literal("stack_frame", r"^at [\w$.<>/-]+\(.*\)", MessageType::JavaStackTrace),
        Rule::literal("caused_by", r"^Caused by: ", MessageType::JavaStackTrace),
        Rule::literal("more_frames", r"^\.\.\. \d+ more", MessageType::JavaStackTrace),
        Rule::literal(
            "exception_header",
            r"^([a-z_$][\w$]*\.)+[\w$]*(Exception|Error|Throwable)(: .*)?$",
            MessageType::JavaStackTrace,
        ),
    ])
}

fn plugin_server_classify(normalized: &str) -> MessageType {
    PLUGIN_SERVER_GRAMMAR.classify(normalized)
}

// ---------------------------------------------------------------------------
// Forge normalizer
// ---------------------------------------------------------------------------

// Consumes every stacked tag at once, so the result carries no tag to strip.
static FORGE_NORMALIZER: LazyLock<Normalizer> = LazyLock::new(|| {
    Normalizer::vanilla().with_step(
        NormalizeStep::pattern(
            "logger_source",
            r"^(\[[^\]]*\])(?:\s*\[[\w.$-]+/[\w.$-]*\])+",
            "$1",
        )
        .expect("logger tag pattern is a literal"),
    )
});

fn forge_normalize(raw: &str) -> String {
    FORGE_NORMALIZER.normalize(raw)
}

// ---------------------------------------------------------------------------
// Launch transforms
// ---------------------------------------------------------------------------

fn utf8_stdio_parameters(defaults: &str) -> String {
    let defaults = defaults.trim();
    if defaults.contains("-Dsun.stdout.encoding") {
        defaults.to_string()
    } else if defaults.is_empty() {
        UTF8_STDIO.to_string()
    } else {
        format!("{UTF8_STDIO} {defaults}")
    }
}

fn paper_launch_flags(defaults: &str) -> String {
    let defaults = defaults.trim();
    if defaults
        .split_whitespace()
        .any(|flag| flag == "nogui" || flag == "--nogui")
    {
        defaults.to_string()
    } else if defaults.is_empty() {
        "--nogui".to_string()
    } else {
        format!("{defaults} --nogui")
    }
}

// ---------------------------------------------------------------------------
// Current version from jar names
// ---------------------------------------------------------------------------

static BUKKIT_JAR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^craftbukkit-(\d+\.\d+(?:\.\d+)?)(-R\d+\.\d+)?(?:-SNAPSHOT)?\.jar$")
        .expect("jar pattern is a literal")
});
static PAPER_JAR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^paper-(\d+\.\d+(?:\.\d+)?)-(\d+)\.jar$").expect("jar pattern is a literal")
});

fn jar_name(file: &Path) -> Result<&str, VariantError> {
    file.file_name()
        .and_then(|n| n.to_str())
        .ok_or_else(|| VariantError::UnrecognizedVersion {
            file: file.display().to_string(),
        })
}

fn bukkit_current_version(file: &Path) -> Result<String, VariantError> {
    let name = jar_name(file)?;
    let caps = BUKKIT_JAR
        .captures(name)
        .ok_or_else(|| VariantError::UnrecognizedVersion {
            file: file.display().to_string(),
        })?;
    let mc = &caps[1];
    Ok(match caps.get(2) {
        Some(revision) => format!("{mc}{}", revision.as_str()),
        None => mc.to_string(),
    })
}

fn paper_current_version(file: &Path) -> Result<String, VariantError> {
    let name = jar_name(file)?;
    let caps = PAPER_JAR
        .captures(name)
        .ok_or_else(|| VariantError::UnrecognizedVersion {
            file: file.display().to_string(),
        })?;
    Ok(format!("{}-{}", &caps[1], &caps[2]))
}
