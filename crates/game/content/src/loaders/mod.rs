//! Content loaders for reading battle data from files.
//!
//! RON carries the catalogs, TOML carries the balance configuration.

pub mod config;
pub mod encounters;
pub mod factory;
pub mod units;

pub use config::ConfigLoader;
pub use encounters::EncounterLoader;
pub use factory::ContentFactory;
pub use units::UnitLoader;

use std::collections::HashSet;
use std::path::Path;

/// Common result type for loaders.
pub type LoadResult<T> = anyhow::Result<T>;

/// Helper function to read file contents.
pub(crate) fn read_file(path: &Path) -> LoadResult<String> {
    std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("Failed to read file {}: {}", path.display(), e))
}

/// Rejects catalogs that define the same id twice.
pub(crate) fn ensure_unique_ids<'a>(
    kind: &str,
    ids: impl IntoIterator<Item = &'a str>,
) -> LoadResult<()> {
    let mut seen = HashSet::new();
    for id in ids {
        if !seen.insert(id) {
            anyhow::bail!("Duplicate {} id '{}'", kind, id);
        }
    }
    Ok(())
}
