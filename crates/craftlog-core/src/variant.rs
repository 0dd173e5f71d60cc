//! Server variants: per-flavour descriptors with overridable parsing stages.
//!
//! A [`ServerVariant`] is built once, shared behind an `Arc`, and never
//! mutated. It carries plain metadata and capability flags plus one strategy
//! slot per overridable stage. Slots default to the vanilla reference
//! implementation, so a flavour only supplies what differs.

use std::path::Path;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::error::{RegistryError, VariantError};
use crate::types::{MessageType, ParseResult, PlayerAction};
use crate::{classifier, extractor, normalizer};

/// Identity of a supported server flavour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VariantId {
    Vanilla,
    Bukkit,
    Paper,
    Forge,
}

impl VariantId {
    pub fn as_str(self) -> &'static str {
        match self {
            VariantId::Vanilla => "vanilla",
            VariantId::Bukkit => "bukkit",
            VariantId::Paper => "paper",
            VariantId::Forge => "forge",
        }
    }
}

impl std::fmt::Display for VariantId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Release channel for version fetch and download.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VersionChannel {
    Recommended,
    Beta,
    Dev,
}

impl std::fmt::Display for VersionChannel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            VersionChannel::Recommended => write!(f, "recommended"),
            VersionChannel::Beta => write!(f, "beta"),
            VersionChannel::Dev => write!(f, "dev"),
        }
    }
}

/// One flag per [`VersionChannel`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ChannelFlags {
    pub recommended: bool,
    pub beta: bool,
    pub dev: bool,
}

impl ChannelFlags {
    pub const NONE: ChannelFlags = ChannelFlags {
        recommended: false,
        beta: false,
        dev: false,
    };
    pub const ALL: ChannelFlags = ChannelFlags {
        recommended: true,
        beta: true,
        dev: true,
    };

    pub fn get(&self, channel: VersionChannel) -> bool {
        match channel {
            VersionChannel::Recommended => self.recommended,
            VersionChannel::Beta => self.beta,
            VersionChannel::Dev => self.dev,
        }
    }

    pub fn any(&self) -> bool {
        self.recommended || self.beta || self.dev
    }
}

/// Capability flags gating the version operations.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Capabilities {
    pub can_fetch: ChannelFlags,
    pub can_download: ChannelFlags,
    pub can_get_current_version: bool,
}

/// Source of release versions and server jars for a variant.
///
/// Implemented by the download collaborator; the core never performs I/O
/// on its own behalf.
pub trait VersionFeed: Send + Sync + std::fmt::Debug {
    /// Latest version string published on `channel`.
    fn fetch(&self, channel: VersionChannel) -> Result<String, VariantError>;

    /// Download the latest build on `channel` to `target`.
    fn download(&self, channel: VersionChannel, target: &Path) -> Result<(), VariantError>;
}

pub type NormalizeFn = fn(&str) -> String;
pub type ClassifyFn = fn(&str) -> MessageType;
pub type ExtractFn = fn(MessageType, &str) -> Option<PlayerAction>;
pub type LaunchFn = fn(&str) -> String;
pub type CurrentVersionFn = fn(&Path) -> Result<String, VariantError>;
pub type PrepareLaunchFn = fn(&Path) -> Result<(), VariantError>;

fn pass_through(s: &str) -> String {
    s.to_string()
}

fn nothing_to_prepare(_server_dir: &Path) -> Result<(), VariantError> {
    Ok(())
}

/// Strategy slots for the overridable stages.
#[derive(Clone, Copy)]
pub struct VariantHooks {
    pub normalize: NormalizeFn,
    pub classify: ClassifyFn,
    pub extract: ExtractFn,
    pub launch_parameters: LaunchFn,
    pub launch_flags: LaunchFn,
    pub prepare_launch: PrepareLaunchFn,
    /// No default exists; see [`ServerVariant::current_version`].
    pub current_version: Option<CurrentVersionFn>,
}

impl std::fmt::Debug for VariantHooks {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VariantHooks")
            .field("current_version", &self.current_version.is_some())
            .finish_non_exhaustive()
    }
}

impl Default for VariantHooks {
    fn default() -> Self {
        Self {
            normalize: normalizer::normalize,
            classify: classifier::classify,
            extract: extractor::extract,
            launch_parameters: pass_through,
            launch_flags: pass_through,
            prepare_launch: nothing_to_prepare,
            current_version: None,
        }
    }
}

/// Immutable descriptor of one server flavour.
#[derive(Debug, Clone)]
pub struct ServerVariant {
    id: VariantId,
    name: String,
    homepage_url: String,
    logo: String,
    supports_plugins: bool,
    is_local: bool,
    has_custom_assembly: bool,
    capabilities: Capabilities,
    hooks: VariantHooks,
    feed: Option<Arc<dyn VersionFeed>>,
}

impl ServerVariant {
    pub fn builder(id: VariantId) -> ServerVariantBuilder {
        ServerVariantBuilder::new(id)
    }

    pub fn id(&self) -> VariantId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn homepage_url(&self) -> &str {
        &self.homepage_url
    }

    /// Resource key of the variant's logo.
    pub fn logo(&self) -> &str {
        &self.logo
    }

    pub fn supports_plugins(&self) -> bool {
        self.supports_plugins
    }

    pub fn is_local(&self) -> bool {
        self.is_local
    }

    pub fn has_custom_assembly(&self) -> bool {
        self.has_custom_assembly
    }

    pub fn capabilities(&self) -> Capabilities {
        self.capabilities
    }

    pub fn can_fetch(&self, channel: VersionChannel) -> bool {
        self.capabilities.can_fetch.get(channel)
    }

    pub fn can_download(&self, channel: VersionChannel) -> bool {
        self.capabilities.can_download.get(channel)
    }

    pub fn can_get_current_version(&self) -> bool {
        self.capabilities.can_get_current_version
    }

    // -----------------------------------------------------------------------
    // Parsing stages
    // -----------------------------------------------------------------------

    pub fn normalize(&self, raw: &str) -> String {
        (self.hooks.normalize)(raw)
    }

    pub fn classify(&self, normalized: &str) -> MessageType {
        (self.hooks.classify)(normalized)
    }

    pub fn extract(&self, message_type: MessageType, normalized: &str) -> Option<PlayerAction> {
        (self.hooks.extract)(message_type, normalized)
    }

    /// Run normalise, classify and (for lifecycle types) extract.
    pub fn parse_output(&self, raw: &str) -> ParseResult {
        let normalized = self.normalize(raw);
        let message_type = self.classify(&normalized);
        let action = if message_type.carries_action() {
            self.extract(message_type, &normalized)
        } else {
            None
        };
        ParseResult::new(raw, normalized, message_type, action)
    }

    // -----------------------------------------------------------------------
    // Launch transforms
    // -----------------------------------------------------------------------

    pub fn launch_parameters(&self, defaults: &str) -> String {
        (self.hooks.launch_parameters)(defaults)
    }

    pub fn launch_flags(&self, defaults: &str) -> String {
        (self.hooks.launch_flags)(defaults)
    }

    /// Ready `server_dir` for a launch. A no-op unless the variant overrides it.
    pub fn prepare_launch(&self, server_dir: &Path) -> Result<(), VariantError> {
        tracing::debug!(variant = %self.id, dir = %server_dir.display(), "preparing launch");
        (self.hooks.prepare_launch)(server_dir)
    }

    // -----------------------------------------------------------------------
    // Version operations
    // -----------------------------------------------------------------------

    /// Latest version on `channel`. Gated by [`can_fetch`](Self::can_fetch).
    pub fn fetch_version(&self, channel: VersionChannel) -> Result<String, VariantError> {
        let operation = match channel {
            VersionChannel::Recommended => "fetch recommended version",
            VersionChannel::Beta => "fetch beta version",
            VersionChannel::Dev => "fetch dev version",
        };
        if !self.can_fetch(channel) {
            return Err(self.unsupported(operation));
        }
        self.feed(operation)?.fetch(channel)
    }

    /// Download the latest build on `channel`. Gated by [`can_download`](Self::can_download).
    pub fn download_version(&self, channel: VersionChannel, target: &Path) -> Result<(), VariantError> {
        let operation = match channel {
            VersionChannel::Recommended => "download recommended version",
            VersionChannel::Beta => "download beta version",
            VersionChannel::Dev => "download dev version",
        };
        if !self.can_download(channel) {
            return Err(self.unsupported(operation));
        }
        tracing::debug!(variant = %self.id, %channel, target = %target.display(), "downloading");
        self.feed(operation)?.download(channel, target)
    }

    /// Version of the server jar at `file`.
    ///
    /// Gated by [`can_get_current_version`](Self::can_get_current_version). A
    /// variant without a hook returns [`VariantError::NotImplemented`];
    /// the registry refuses such variants when the flag is set.
    pub fn current_version(&self, file: &Path) -> Result<String, VariantError> {
        const OPERATION: &str = "get current version";
        if !self.can_get_current_version() {
            return Err(self.unsupported(OPERATION));
        }
        let hook = self.hooks.current_version.ok_or(VariantError::NotImplemented {
            variant: self.id,
            operation: OPERATION,
        })?;
        hook(file)
    }

    /// Check that every enabled capability has something to back it.
    pub fn validate(&self) -> Result<(), RegistryError> {
        if self.capabilities.can_get_current_version && self.hooks.current_version.is_none() {
            return Err(RegistryError::MissingCurrentVersion(self.id));
        }
        if self.feed.is_none() {
            if self.capabilities.can_fetch.any() {
                return Err(RegistryError::MissingVersionFeed {
                    variant: self.id,
                    operation: "fetch",
                });
            }
            if self.capabilities.can_download.any() {
                return Err(RegistryError::MissingVersionFeed {
                    variant: self.id,
                    operation: "download",
                });
            }
        }
        Ok(())
    }

    /// A copy of this variant backed by `feed`, with the given channels enabled.
    pub fn with_version_feed(
        &self,
        feed: Arc<dyn VersionFeed>,
        can_fetch: ChannelFlags,
        can_download: ChannelFlags,
    ) -> Self {
        let mut variant = self.clone();
        variant.feed = Some(feed);
        variant.capabilities.can_fetch = can_fetch;
        variant.capabilities.can_download = can_download;
        variant
    }

    fn feed(&self, operation: &'static str) -> Result<&dyn VersionFeed, VariantError> {
        self.feed.as_deref().ok_or(VariantError::NotImplemented {
            variant: self.id,
            operation,
        })
    }

    fn unsupported(&self, operation: &'static str) -> VariantError {
        tracing::error!(variant = %self.id, operation, "capability-gated operation called without checking its flag");
        VariantError::Unsupported {
            variant: self.id,
            operation,
        }
    }
}

/// Builder for [`ServerVariant`]. Unset hooks keep the vanilla behaviour.
#[derive(Debug, Clone)]
pub struct ServerVariantBuilder {
    variant: ServerVariant,
}

impl ServerVariantBuilder {
    fn new(id: VariantId) -> Self {
        Self {
            variant: ServerVariant {
                id,
                name: id.as_str().to_string(),
                homepage_url: String::new(),
                logo: format!("{id}_logo"),
                supports_plugins: false,
                is_local: true,
                has_custom_assembly: false,
                capabilities: Capabilities::default(),
                hooks: VariantHooks::default(),
                feed: None,
            },
        }
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.variant.name = name.into();
        self
    }

    pub fn homepage_url(mut self, url: impl Into<String>) -> Self {
        self.variant.homepage_url = url.into();
        self
    }

    pub fn logo(mut self, logo: impl Into<String>) -> Self {
        self.variant.logo = logo.into();
        self
    }

    pub fn supports_plugins(mut self, yes: bool) -> Self {
        self.variant.supports_plugins = yes;
        self
    }

    pub fn is_local(mut self, yes: bool) -> Self {
        self.variant.is_local = yes;
        self
    }

    pub fn has_custom_assembly(mut self, yes: bool) -> Self {
        self.variant.has_custom_assembly = yes;
        self
    }

    pub fn can_fetch(mut self, flags: ChannelFlags) -> Self {
        self.variant.capabilities.can_fetch = flags;
        self
    }

    pub fn can_download(mut self, flags: ChannelFlags) -> Self {
        self.variant.capabilities.can_download = flags;
        self
    }

    /// Set the current-version flag without supplying a hook.
    pub fn can_get_current_version(mut self, yes: bool) -> Self {
        self.variant.capabilities.can_get_current_version = yes;
        self
    }

    pub fn normalize(mut self, f: NormalizeFn) -> Self {
        self.variant.hooks.normalize = f;
        self
    }

    pub fn classify(mut self, f: ClassifyFn) -> Self {
        self.variant.hooks.classify = f;
        self
    }

    pub fn extract(mut self, f: ExtractFn) -> Self {
        self.variant.hooks.extract = f;
        self
    }

    pub fn launch_parameters(mut self, f: LaunchFn) -> Self {
        self.variant.hooks.launch_parameters = f;
        self
    }

    pub fn launch_flags(mut self, f: LaunchFn) -> Self {
        self.variant.hooks.launch_flags = f;
        self
    }

    pub fn prepare_launch(mut self, f: PrepareLaunchFn) -> Self {
        self.variant.hooks.prepare_launch = f;
        self
    }

    /// Supply the current-version hook and enable the capability.
    pub fn current_version(mut self, f: CurrentVersionFn) -> Self {
        self.variant.hooks.current_version = Some(f);
        self.variant.capabilities.can_get_current_version = true;
        self
    }

    pub fn version_feed(mut self, feed: Arc<dyn VersionFeed>) -> Self {
        self.variant.feed = Some(feed);
        self
    }

    pub fn build(self) -> ServerVariant {
        self.variant
    }
}
