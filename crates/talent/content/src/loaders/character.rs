//! Character sheet loader.

use std::path::Path;

use talent_core::PlayerState;

use crate::loaders::{LoadResult, read_file};

/// Loader for player state from RON character sheets.
///
/// Omitted fields take the [`PlayerState`] defaults.
pub struct CharacterLoader;

impl CharacterLoader {
    pub fn load(path: &Path) -> LoadResult<PlayerState> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> LoadResult<PlayerState> {
        let mut player: PlayerState = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse character RON: {}", e))?;
        player.experience_level = player.experience_level.clamp(1, 27);

        Ok(player)
    }

    /// Write a character sheet, e.g. to persist slot assignments.
    pub fn save(path: &Path, player: &PlayerState) -> LoadResult<()> {
        let content = ron::ser::to_string_pretty(player, ron::ser::PrettyConfig::default())
            .map_err(|e| anyhow::anyhow!("Failed to serialize character: {}", e))?;
        std::fs::write(path, content)
            .map_err(|e| anyhow::anyhow!("Failed to write file {}: {}", path.display(), e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use talent_core::{Evokables, God, PlayerFlags, Species};

    #[test]
    fn sparse_sheet_fills_defaults() {
        let player =
            CharacterLoader::parse("(species: Mummy, experience_level: 40, religion: (god: Zin))")
                .unwrap();
        assert_eq!(player.species, Species::Mummy);
        assert_eq!(player.experience_level, 27);
        assert_eq!(player.religion.god, God::Zin);
        assert_eq!(player.hp, PlayerState::default().hp);
    }

    #[test]
    fn flag_sets_read_and_write_as_strings() {
        let player = CharacterLoader::parse(
            r#"(species: Tengu, evokables: "BLINK | FLIGHT", flags: "PERM_FLIGHT")"#,
        )
        .unwrap();
        assert_eq!(player.evokables, Evokables::BLINK | Evokables::FLIGHT);
        assert_eq!(player.flags, PlayerFlags::PERM_FLIGHT);

        let written = ron::ser::to_string(&player).unwrap();
        assert!(written.contains(r#"evokables:"BLINK | FLIGHT""#), "{written}");
        assert_eq!(CharacterLoader::parse(&written).unwrap(), player);
    }

    #[test]
    fn unknown_species_is_an_error() {
        assert!(CharacterLoader::parse("(species: Dragonborn)").is_err());
    }
}
