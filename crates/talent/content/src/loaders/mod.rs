//! Content loaders for reading ability data from files.
//!
//! Each loader turns one RON/TOML file into a `talent-core` value, validated
//! where the type carries rules serde cannot check.

pub mod abilities;
pub mod character;
pub mod config;
pub mod factory;
pub mod world;

pub use abilities::{AbilityCatalog, AbilityLoader, builtin_registry};
pub use character::CharacterLoader;
pub use config::ConfigLoader;
pub use factory::ContentFactory;
pub use world::WorldLoader;

use std::path::Path;

/// Common result type for loaders.
pub type LoadResult<T> = anyhow::Result<T>;

/// Helper function to read file contents.
pub(crate) fn read_file(path: &Path) -> LoadResult<String> {
    std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("Failed to read file {}: {}", path.display(), e))
}
