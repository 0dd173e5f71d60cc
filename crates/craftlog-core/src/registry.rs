//! Variant registry: the closed set of known server flavours.
//!
//! The registry is built once at startup. Every variant is validated while
//! building, so a variant that advertises a capability it cannot back is a
//! startup error rather than a surprise during parsing.

use std::collections::BTreeMap;
use std::sync::Arc;

use crate::builtin;
use crate::error::RegistryError;
use crate::variant::{ChannelFlags, ServerVariant, VariantId, VersionFeed};

/// Names accepted by [`VariantRegistry::resolve`], lowercase.
static ALIASES: phf::Map<&'static str, VariantId> = phf::phf_map! {
    "vanilla" => VariantId::Vanilla,
    "minecraft" => VariantId::Vanilla,
    "minecraft_server" => VariantId::Vanilla,
    "mojang" => VariantId::Vanilla,
    "default" => VariantId::Vanilla,
    "bukkit" => VariantId::Bukkit,
    "craftbukkit" => VariantId::Bukkit,
    "spigot" => VariantId::Bukkit,
    "paper" => VariantId::Paper,
    "papermc" => VariantId::Paper,
    "forge" => VariantId::Forge,
    "minecraftforge" => VariantId::Forge,
};

/// Map a user-supplied name to a [`VariantId`] (case-insensitive, `-` == `_`).
pub fn lookup_alias(name: &str) -> Option<VariantId> {
    let key = name.trim().to_ascii_lowercase().replace('-', "_");
    ALIASES.get(key.as_str()).copied()
}

/// Immutable map from identity to shared variant, with one default.
#[derive(Debug, Clone)]
pub struct VariantRegistry {
    variants: BTreeMap<VariantId, Arc<ServerVariant>>,
    default: VariantId,
}

impl VariantRegistry {
    /// The built-in variants with `vanilla` as default.
    pub fn standard() -> Result<Self, RegistryError> {
        Self::builder().build()
    }

    /// A builder pre-loaded with the built-in variants.
    pub fn builder() -> RegistryBuilder {
        RegistryBuilder {
            variants: builtin::all(),
            feeds: Vec::new(),
            default: VariantId::Vanilla,
        }
    }

    /// A builder with nothing registered.
    pub fn empty_builder(default: VariantId) -> RegistryBuilder {
        RegistryBuilder {
            variants: Vec::new(),
            feeds: Vec::new(),
            default,
        }
    }

    pub fn get(&self, id: VariantId) -> Option<Arc<ServerVariant>> {
        self.variants.get(&id).cloned()
    }

    pub fn default_variant(&self) -> Arc<ServerVariant> {
        // Presence of the default is checked in `RegistryBuilder::build`.
        Arc::clone(&self.variants[&self.default])
    }

    pub fn default_id(&self) -> VariantId {
        self.default
    }

    /// Resolve a user-supplied name through the alias table.
    pub fn resolve(&self, name: &str) -> Option<Arc<ServerVariant>> {
        lookup_alias(name).and_then(|id| self.get(id))
    }

    pub fn iter(&self) -> impl Iterator<Item = &Arc<ServerVariant>> {
        self.variants.values()
    }

    pub fn len(&self) -> usize {
        self.variants.len()
    }

    pub fn is_empty(&self) -> bool {
        self.variants.is_empty()
    }
}

struct FeedBinding {
    id: VariantId,
    feed: Arc<dyn VersionFeed>,
    can_fetch: ChannelFlags,
    can_download: ChannelFlags,
}

/// Collects variants and version feeds, then validates them in [`build`](Self::build).
pub struct RegistryBuilder {
    variants: Vec<ServerVariant>,
    feeds: Vec<FeedBinding>,
    default: VariantId,
}

impl RegistryBuilder {
    pub fn register(mut self, variant: ServerVariant) -> Self {
        self.variants.push(variant);
        self
    }

    /// Replace an already registered variant with the same identity, or add it.
    pub fn replace(mut self, variant: ServerVariant) -> Self {
        self.variants.retain(|v| v.id() != variant.id());
        self.variants.push(variant);
        self
    }

    pub fn default_variant(mut self, id: VariantId) -> Self {
        self.default = id;
        self
    }

    /// Back `id`'s fetch/download operations with `feed` for the given channels.
    pub fn version_feed(
        mut self,
        id: VariantId,
        feed: Arc<dyn VersionFeed>,
        can_fetch: ChannelFlags,
        can_download: ChannelFlags,
    ) -> Self {
        self.feeds.push(FeedBinding {
            id,
            feed,
            can_fetch,
            can_download,
        });
        self
    }

    pub fn build(self) -> Result<VariantRegistry, RegistryError> {
        let mut variants = BTreeMap::new();
        for variant in self.variants {
            let id = variant.id();
            if variants.insert(id, variant).is_some() {
                return Err(RegistryError::Duplicate(id));
            }
        }
        for binding in self.feeds {
            let variant = variants
                .get_mut(&binding.id)
                .ok_or(RegistryError::UnknownVariant(binding.id))?;
            *variant = variant.with_version_feed(binding.feed, binding.can_fetch, binding.can_download);
        }
        for variant in variants.values() {
            variant.validate()?;
        }
        if !variants.contains_key(&self.default) {
            return Err(RegistryError::MissingDefault(self.default));
        }
        tracing::debug!(
            variants = variants.len(),
            default = %self.default,
            "variant registry built"
        );
        Ok(VariantRegistry {
            variants: variants
                .into_iter()
                .map(|(id, v)| (id, Arc::new(v)))
                .collect(),
            default: self.default,
        })
    }
}
