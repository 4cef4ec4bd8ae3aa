//! Content factory for building a bundle from a data directory.

use std::path::{Path, PathBuf};

use anyhow::Context;
use battle_core::{CombatConfig, CompanionTemplate, MonsterDef};

use crate::ContentBundle;
use crate::loaders::{ConfigLoader, EncounterLoader, LoadResult, UnitLoader};

/// Content factory that loads all battle content from a data directory.
///
/// # Directory Structure
///
/// ```text
/// data_dir/
/// ├── combat.toml      (optional, defaults apply when absent)
/// ├── companions.ron
/// └── encounters.ron
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

    /// The built-in roster, no files involved.
    pub fn builtin() -> ContentBundle {
        crate::builtin::bundle()
    }

    /// Load combat configuration from `combat.toml`, or defaults if the file
    /// does not exist.
    pub fn load_config(&self) -> LoadResult<CombatConfig> {
        let path = self.data_dir.join("combat.toml");
        if !path.exists() {
            tracing::debug!(path = %path.display(), "no combat.toml, using defaults");
            return Ok(CombatConfig::default());
        }
        ConfigLoader::load(&path)
    }

    /// Load the companion catalog from `companions.ron`.
    pub fn load_companions(&self) -> LoadResult<Vec<(String, CompanionTemplate)>> {
        let path = self.data_dir.join("companions.ron");
        UnitLoader::load(&path)
    }

    /// Load the encounter catalog from `encounters.ron`.
    pub fn load_encounters(&self) -> LoadResult<Vec<(String, Vec<MonsterDef>)>> {
        let path = self.data_dir.join("encounters.ron");
        EncounterLoader::load(&path)
    }

    /// Load everything into one bundle.
    pub fn load_all(&self) -> LoadResult<ContentBundle> {
        let bundle = ContentBundle {
            companions: self.load_companions().context("loading companions")?,
            encounters: self.load_encounters().context("loading encounters")?,
            config: self.load_config().context("loading combat config")?,
        };
        tracing::info!(
            dir = %self.data_dir.display(),
            companions = bundle.companions.len(),
            encounters = bundle.encounters.len(),
            "content loaded"
        );
        Ok(bundle)
    }

    /// Returns the data directory path.
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_factory_paths() {
        let factory = ContentFactory::new("/tmp/data");
        assert_eq!(factory.data_dir(), Path::new("/tmp/data"));
    }

    #[test]
    fn missing_config_falls_back_to_defaults() {
        let factory = ContentFactory::new("/nonexistent/battle-content");
        assert_eq!(factory.load_config().unwrap(), CombatConfig::default());
        assert!(factory.load_companions().is_err());
    }
}
