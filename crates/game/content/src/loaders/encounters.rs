//! Encounter catalog loader.

use std::path::Path;

use battle_core::MonsterDef;

use crate::loaders::{LoadResult, ensure_unique_ids, read_file};

/// Loader for encounters (ordered monster lists) from RON files.
pub struct EncounterLoader;

impl EncounterLoader {
    /// Load the encounter catalog from a RON file.
    ///
    /// RON format: `Vec<(String, Vec<MonsterDef>)>`
    pub fn load(path: &Path) -> LoadResult<Vec<(String, Vec<MonsterDef>)>> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> LoadResult<Vec<(String, Vec<MonsterDef>)>> {
        let encounters: Vec<(String, Vec<MonsterDef>)> = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse encounter catalog RON: {}", e))?;

        ensure_unique_ids("encounter", encounters.iter().map(|(id, _)| id.as_str()))?;

        for (id, monsters) in &encounters {
            if monsters.is_empty() {
                tracing::warn!(encounter = %id, "encounter has no monsters");
            }
        }

        Ok(encounters)
    }
}
