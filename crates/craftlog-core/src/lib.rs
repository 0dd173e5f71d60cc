//! craftlog-core: turns Minecraft server console lines into typed events.
//!
//! # Pipeline
//!
//! ```text
//! raw line ──► normalize ──► classify ──► extract (lifecycle types only) ──► ParseResult
//! ```
//!
//! Each stage has a vanilla reference implementation ([`normalizer`],
//! [`classifier`], [`extractor`]). A [`ServerVariant`] binds one
//! implementation per stage and may override any of them; the
//! [`VariantRegistry`] holds the closed set of known variants.
//!
//! Parsing is a pure function of the line and the bound variant. It keeps
//! no state between lines, performs no I/O, and never fails: lines nothing
//! recognises come back as [`MessageType::Unknown`].

pub mod builtin;
pub mod classifier;
pub mod config;
pub mod error;
pub mod extractor;
pub mod normalizer;
pub mod parser;
pub mod registry;
pub mod types;
pub mod variant;

pub use error::{RegistryError, VariantError};
pub use parser::OutputParser;
pub use registry::VariantRegistry;
pub use types::{MessageBand, MessageType, ParseResult, PlayerAction};
pub use variant::{Capabilities, ChannelFlags, ServerVariant, VariantId, VersionChannel, VersionFeed};
