//! Output parser: the entry point line sources call once per line.

use std::sync::Arc;

use crate::error::RegistryError;
use crate::registry::VariantRegistry;
use crate::types::ParseResult;
use crate::variant::{ServerVariant, VariantId};

/// Parses server output lines with one bound [`ServerVariant`].
///
/// The binding is fixed at construction. Parsing keeps no state between
/// calls, so a parser can be cloned into or shared across any number of
/// tasks.
#[derive(Debug, Clone)]
pub struct OutputParser {
    variant: Arc<ServerVariant>,
}

impl OutputParser {
    pub fn new(variant: Arc<ServerVariant>) -> Self {
        tracing::debug!(variant = %variant.id(), "output parser bound");
        Self { variant }
    }

    /// Bind to the registry entry for `id`.
    pub fn for_id(registry: &VariantRegistry, id: VariantId) -> Result<Self, RegistryError> {
        registry
            .get(id)
            .map(Self::new)
            .ok_or(RegistryError::UnknownVariant(id))
    }

    /// Bind to the variant named `name`, falling back to the registry default
    /// for unknown names.
    pub fn for_name(registry: &VariantRegistry, name: &str) -> Self {
        match registry.resolve(name) {
            Some(variant) => Self::new(variant),
            None => {
                tracing::warn!(name, fallback = %registry.default_id(), "unknown server variant");
                Self::new(registry.default_variant())
            }
        }
    }

    pub fn variant(&self) -> &ServerVariant {
        &self.variant
    }

    /// Parse one line (without its trailing newline).
    pub fn parse(&self, line: &str) -> ParseResult {
        self.variant.parse_output(line)
    }
}

impl Default for OutputParser {
    /// A parser bound to the vanilla reference variant.
    fn default() -> Self {
        Self::new(Arc::new(crate::builtin::vanilla()))
    }
}
