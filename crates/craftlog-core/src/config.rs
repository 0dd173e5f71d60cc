//! CLI configuration: default variant, launch defaults and output format.
//!
//! Values are layered: embedded TOML defaults first, then the user's
//! `config.toml` on top. [`Config::defaults`] skips the filesystem.

use serde::Deserialize;
use std::path::{Path, PathBuf};

// ---------------------------------------------------------------------------
// Embedded defaults
// ---------------------------------------------------------------------------

const DEFAULT_CONFIG: &str = r#"
[server]
variant = "vanilla"

[launch]
parameters = "-Xms1024M -Xmx1024M"
flags      = "nogui"

[output]
format           = "text"
channel_capacity = 1024
"#;

// ---------------------------------------------------------------------------
// Public config types
// ---------------------------------------------------------------------------

/// Top-level application configuration, loaded from `~/.config/craftlog/config.toml`.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub launch: LaunchConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

/// `[server]` section of `config.toml`.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Variant name, resolved through the registry's alias table.
    #[serde(default = "default_variant")]
    pub variant: String,
}

fn default_variant() -> String { "vanilla".to_string() }

impl Default for ServerConfig {
    fn default() -> Self {
        Self { variant: default_variant() }
    }
}

/// `[launch]` section: defaults handed to the variant's launch transforms.
#[derive(Debug, Clone, Deserialize)]
pub struct LaunchConfig {
    #[serde(default = "default_parameters")]
    pub parameters: String,
    #[serde(default = "default_flags")]
    pub flags: String,
}

fn default_parameters() -> String { "-Xms1024M -Xmx1024M".to_string() }
fn default_flags() -> String { "nogui".to_string() }

impl Default for LaunchConfig {
    fn default() -> Self {
        Self {
            parameters: default_parameters(),
            flags: default_flags(),
        }
    }
}

/// How parsed lines are printed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    Text,
    Json,
}

/// `[output]` section of `config.toml`.
#[derive(Debug, Clone, Deserialize)]
pub struct OutputConfig {
    #[serde(default = "default_format")]
    pub format: OutputFormat,
    /// Capacity of the channel between the line reader and the printer.
    #[serde(default = "default_channel_capacity")]
    pub channel_capacity: usize,
}

fn default_format() -> OutputFormat { OutputFormat::Text }
fn default_channel_capacity() -> usize { 1024 }

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: default_format(),
            channel_capacity: default_channel_capacity(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::defaults()
    }
}

impl Config {
    /// Load from `~/.config/craftlog/config.toml`, layered on top of the
    /// built-in defaults. Creates the file with defaults if it does not exist.
    pub fn load() -> anyhow::Result<Self> {
        let path = config_path();

        if !path.exists() {
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)?;
            }
            std::fs::write(&path, DEFAULT_CONFIG.trim_start())?;
        }

        Self::load_from(&path)
    }

    /// Load from an explicit file, layered on top of the built-in defaults.
    /// A missing file yields the defaults.
    pub fn load_from(path: &Path) -> anyhow::Result<Self> {
        config::Config::builder()
            .add_source(config::File::from_str(DEFAULT_CONFIG, config::FileFormat::Toml))
            .add_source(config::File::from(path).required(false))
            .build()?
            .try_deserialize()
            .map_err(Into::into)
    }

    /// Return the built-in defaults without touching the filesystem.
    pub fn defaults() -> Self {
        config::Config::builder()
            .add_source(config::File::from_str(DEFAULT_CONFIG, config::FileFormat::Toml))
            .build()
            .expect("built-in default config must be valid TOML")
            .try_deserialize()
            .expect("built-in default config must deserialize correctly")
    }
}

// ---------------------------------------------------------------------------
// Path helpers
// ---------------------------------------------------------------------------

fn config_path() -> PathBuf {
    std::env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| ".".to_string()))
                .join(".config")
        })
        .join("craftlog")
        .join("config.toml")
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
