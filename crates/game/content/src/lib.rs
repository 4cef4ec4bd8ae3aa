//! Static battle content and loaders.
//!
//! This crate houses the companion catalog, the encounter catalog, and the
//! combat balance configuration:
//! - Companion templates (data-driven via RON)
//! - Encounters, i.e. ordered monster lists (data-driven via RON)
//! - Combat configuration (data-driven via TOML)
//! - A built-in roster used when no data directory is configured
//!
//! Content is consumed by runtime oracles and never appears in combat state.

pub mod builtin;
mod bundle;

#[cfg(feature = "loaders")]
pub mod loaders;

pub use bundle::ContentBundle;

#[cfg(feature = "loaders")]
pub use loaders::{ConfigLoader, ContentFactory, EncounterLoader, UnitLoader};
