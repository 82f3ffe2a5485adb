//! Content factory for loading everything from one data directory.

use std::path::{Path, PathBuf};

use talent_core::{AbilityRegistry, PlayerState, TalentConfig, WorldSnapshot};

use crate::loaders::{AbilityLoader, CharacterLoader, ConfigLoader, LoadResult, WorldLoader};

/// Content factory that loads ability content from a data directory.
///
/// # Directory Structure
///
/// ```text
/// data_dir/
/// ├── abilities.ron
/// ├── config.toml
/// ├── characters/
/// │   ├── trog_berserker.ron
/// │   └── ru_tengu.ron
/// └── worlds/
///     ├── quiet.ron
///     └── silenced.ron
/// ```
pub struct ContentFactory {
    data_dir: PathBuf,
}

impl ContentFactory {
    /// Creates a new content factory pointing to a data directory.
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    /// Factory over the data directory shipped with this crate.
    pub fn bundled() -> Self {
        Self::new(Path::new(env!("CARGO_MANIFEST_DIR")).join("data"))
    }

    /// Load the ability table from `abilities.ron`.
    pub fn load_abilities(&self) -> LoadResult<AbilityRegistry> {
        AbilityLoader::load(&self.data_dir.join("abilities.ron"))
    }

    /// Load engine configuration from `config.toml`, or defaults if absent.
    pub fn load_config(&self) -> LoadResult<TalentConfig> {
        let path = self.data_dir.join("config.toml");
        if !path.exists() {
            tracing::debug!(path = %path.display(), "no config file, using defaults");
            return Ok(TalentConfig::default());
        }
        ConfigLoader::load(&path)
    }

    /// Load a character from `characters/{name}.ron`.
    pub fn load_character(&self, name: &str) -> LoadResult<PlayerState> {
        CharacterLoader::load(&self.character_path(name))
    }

    /// Save a character to `characters/{name}.ron`.
    pub fn save_character(&self, name: &str, player: &PlayerState) -> LoadResult<()> {
        CharacterLoader::save(&self.character_path(name), player)
    }

    /// Load a location snapshot from `worlds/{name}.ron`.
    pub fn load_world(&self, name: &str) -> LoadResult<WorldSnapshot> {
        let path = self.data_dir.join("worlds").join(format!("{}.ron", name));
        WorldLoader::load(&path)
    }

    /// Names of the character sheets in `characters/`, sorted.
    pub fn character_names(&self) -> LoadResult<Vec<String>> {
        let dir = self.data_dir.join("characters");
        let entries = std::fs::read_dir(&dir)
            .map_err(|e| anyhow::anyhow!("Failed to read directory {}: {}", dir.display(), e))?;

        let mut names = Vec::new();
        for entry in entries {
            let path = entry?.path();
            if !path.extension().is_some_and(|ext| ext == "ron") {
                continue;
            }
            if let Some(stem) = path.file_stem().and_then(|stem| stem.to_str()) {
                names.push(stem.to_owned());
            }
        }
        names.sort();
        Ok(names)
    }

    /// Returns the data directory path.
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    fn character_path(&self, name: &str) -> PathBuf {
        self.data_dir.join("characters").join(format!("{}.ron", name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_factory_paths() {
        let factory = ContentFactory::new("/tmp/data");
        assert_eq!(factory.data_dir(), Path::new("/tmp/data"));
        assert_eq!(
            factory.character_path("ru_tengu"),
            Path::new("/tmp/data/characters/ru_tengu.ron")
        );
    }
}
