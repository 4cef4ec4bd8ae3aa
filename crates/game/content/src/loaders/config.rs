//! Combat configuration loader.

use std::path::Path;

use battle_core::CombatConfig;

use crate::loaders::{LoadResult, read_file};

/// Loader for combat configuration from TOML files.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load config data from a TOML file.
    ///
    /// Missing keys fall back to the [`CombatConfig`] defaults.
    pub fn load(path: &Path) -> LoadResult<CombatConfig> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> LoadResult<CombatConfig> {
        let config: CombatConfig = toml::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse config TOML: {}", e))?;

        if config.initial_spirit_min > config.initial_spirit_max {
            anyhow::bail!(
                "initial_spirit_min ({}) exceeds initial_spirit_max ({})",
                config.initial_spirit_min,
                config.initial_spirit_max
            );
        }

        Ok(config)
    }
}
