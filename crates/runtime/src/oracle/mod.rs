//! Runtime wrappers around static battle content and the math generator.
//!
//! These implementations expose `battle-core` oracle traits and bundle them
//! into an [`OracleManager`] so the session worker can hand them to the
//! engine. The data is immutable at runtime; dynamic state lives in the
//! session.
mod math;
mod units;

use std::sync::Arc;

use battle_content::ContentBundle;
use battle_core::{MathOracle, PcgRng, RngOracle, UnitOracle};

pub use math::ArithmeticOracle;
pub use units::UnitOracleImpl;

/// Manages all oracle implementations and provides unified access
#[derive(Clone)]
pub struct OracleManager {
    pub(crate) units: Arc<UnitOracleImpl>,
    pub(crate) math: Arc<ArithmeticOracle>,
    pub(crate) rng: Arc<PcgRng>,
}

impl OracleManager {
    /// Creates a new oracle manager
    pub fn new(units: Arc<UnitOracleImpl>, math: Arc<ArithmeticOracle>) -> Self {
        Self {
            units,
            math,
            rng: Arc::new(PcgRng), // PcgRng is stateless
        }
    }

    /// Builds the oracles from loaded content.
    pub fn from_bundle(bundle: &ContentBundle) -> Self {
        let units = UnitOracleImpl::from_catalog(bundle.companions.iter().cloned());
        Self::new(Arc::new(units), Arc::new(ArithmeticOracle))
    }

    pub fn units(&self) -> &UnitOracleImpl {
        &self.units
    }

    pub fn math(&self) -> &dyn MathOracle {
        self.math.as_ref()
    }

    pub fn rng(&self) -> &dyn RngOracle {
        self.rng.as_ref()
    }

    pub(crate) fn shared_units(&self) -> Arc<dyn UnitOracle> {
        self.units.clone()
    }

    pub(crate) fn shared_rng(&self) -> Arc<dyn RngOracle> {
        self.rng.clone()
    }
}
