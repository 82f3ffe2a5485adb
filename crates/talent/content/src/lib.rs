//! Data-driven ability content and loaders.
//!
//! This crate ships the ability table and default configuration as data files
//! and provides loaders for RON/TOML:
//! - Ability definitions (RON), also embedded as the built-in table
//! - Engine configuration (TOML)
//! - Character sheets (RON)
//! - Location snapshots (RON)
//!
//! All loaders deserialize `talent-core` types directly through its `serde`
//! feature.

#[cfg(feature = "loaders")]
pub mod loaders;

#[cfg(feature = "loaders")]
pub use loaders::{
    AbilityCatalog, AbilityLoader, CharacterLoader, ConfigLoader, ContentFactory, LoadResult,
    WorldLoader, builtin_registry,
};
