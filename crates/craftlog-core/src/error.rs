//! Error types for variant operations and registry construction.
//!
//! Line parsing has no error type: every line yields a [`ParseResult`](crate::ParseResult).

use crate::variant::{VariantId, VersionChannel};

/// Failure of a capability-gated [`ServerVariant`](crate::variant::ServerVariant) operation.
#[derive(Debug, thiserror::Error)]
pub enum VariantError {
    /// The variant's capability flag denies this operation. Callers are
    /// expected to check the flag first, so this indicates a caller bug.
    #[error("{variant} does not support {operation}")]
    Unsupported {
        variant: VariantId,
        operation: &'static str,
    },

    /// The flag allows the operation but no implementation was supplied.
    #[error("{variant} claims {operation} but does not implement it")]
    NotImplemented {
        variant: VariantId,
        operation: &'static str,
    },

    /// The version feed could not produce a version for the channel.
    #[error("no {channel} version available: {reason}")]
    Fetch {
        channel: VersionChannel,
        reason: String,
    },

    #[error("could not determine server version from {file}")]
    UnrecognizedVersion { file: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Defects caught while building a [`VariantRegistry`](crate::registry::VariantRegistry).
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum RegistryError {
    #[error("{0} can get the current version but has no current-version hook")]
    MissingCurrentVersion(VariantId),

    #[error("{variant} can {operation} but has no version feed")]
    MissingVersionFeed {
        variant: VariantId,
        operation: &'static str,
    },

    #[error("{0} is registered twice")]
    Duplicate(VariantId),

    #[error("default variant {0} is not registered")]
    MissingDefault(VariantId),

    #[error("no variant is registered for {0}")]
    UnknownVariant(VariantId),
}
