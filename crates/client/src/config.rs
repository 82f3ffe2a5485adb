//! Client configuration read from the environment.
use std::env;
use std::path::PathBuf;

/// Session settings.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ClientConfig {
    /// Content directory; the bundled content when unset.
    pub data_dir: Option<PathBuf>,
    /// Character sheet name under `characters/`.
    pub character: String,
    /// Location snapshot name under `worlds/`.
    pub world: String,
    /// Write the character back when the session ends.
    pub save_on_exit: bool,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            data_dir: None,
            character: "trog_berserker".to_owned(),
            world: "quiet".to_owned(),
            save_on_exit: false,
        }
    }
}

impl ClientConfig {
    /// Construct configuration from environment variables.
    ///
    /// Environment variables:
    /// - `TALENT_DATA_DIR` - Content directory (default: bundled content)
    /// - `TALENT_CHARACTER` - Character sheet name (default: trog_berserker)
    /// - `TALENT_WORLD` - Location snapshot name (default: quiet)
    /// - `TALENT_SAVE` - Save the character on exit (default: false)
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        if let Some(dir) = lookup("TALENT_DATA_DIR").filter(|dir| !dir.is_empty()) {
            config.data_dir = Some(PathBuf::from(dir));
        }
        if let Some(character) = lookup("TALENT_CHARACTER").filter(|name| !name.is_empty()) {
            config.character = character;
        }
        if let Some(world) = lookup("TALENT_WORLD").filter(|name| !name.is_empty()) {
            config.world = world;
        }
        if let Some(save) = lookup("TALENT_SAVE").as_deref().and_then(parse_bool) {
            config.save_on_exit = save;
        }

        config
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.to_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Some(true),
        "false" | "0" | "no" | "off" => Some(false),
        _ => None,
    }
}
