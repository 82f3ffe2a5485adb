//! Location snapshot loader.

use std::path::Path;

use talent_core::WorldSnapshot;

use crate::loaders::{LoadResult, read_file};

/// Loader for [`WorldSnapshot`]s from RON files.
pub struct WorldLoader;

impl WorldLoader {
    pub fn load(path: &Path) -> LoadResult<WorldSnapshot> {
        let content = read_file(path)?;
        let world: WorldSnapshot = ron::from_str(&content)
            .map_err(|e| anyhow::anyhow!("Failed to parse world RON: {}", e))?;

        Ok(world)
    }
}
