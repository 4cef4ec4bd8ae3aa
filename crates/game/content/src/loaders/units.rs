//! Companion catalog loader.

use std::path::Path;

use battle_core::CompanionTemplate;

use crate::loaders::{LoadResult, ensure_unique_ids, read_file};

/// Loader for the companion catalog from RON files.
pub struct UnitLoader;

impl UnitLoader {
    /// Load the companion catalog from a RON file.
    ///
    /// RON format: `Vec<(String, CompanionTemplate)>`
    ///
    /// # Returns
    ///
    /// Returns a Vec of (template_id, CompanionTemplate) in file order.
    pub fn load(path: &Path) -> LoadResult<Vec<(String, CompanionTemplate)>> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> LoadResult<Vec<(String, CompanionTemplate)>> {
        let companions: Vec<(String, CompanionTemplate)> = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse companion catalog RON: {}", e))?;

        ensure_unique_ids("companion", companions.iter().map(|(id, _)| id.as_str()))?;

        for (id, template) in &companions {
            if template.max_health == 0 {
                tracing::warn!(companion = %id, "companion starts with zero health");
            }
        }

        Ok(companions)
    }
}
