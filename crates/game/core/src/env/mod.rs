//! Traits describing the collaborators the engine reads from.
//!
//! Oracles expose static unit data, the random source, and the math
//! challenge verdicts. The [`Env`] aggregate bundles the ones the engine
//! consumes directly so resolvers never hold concrete implementations.
mod error;
mod math;
mod rng;
mod units;

pub use error::OracleError;
pub use math::{Difficulty, MathOracle, Operation, Problem, Verdict};
pub use rng::{PcgRng, RngOracle, compute_seed};
pub use units::{
    CompanionTemplate, CompanionTemplateBuilder, EffectKind, EffectTarget, MonsterDef, Role,
    SpecialAbility, SpecialEffect, UnitOracle,
};

/// Aggregates read-only oracles required by the engine.
pub struct Env<'a, U, R>
where
    U: UnitOracle + ?Sized,
    R: RngOracle + ?Sized,
{
    units: Option<&'a U>,
    rng: Option<&'a R>,
}

impl<U, R> Clone for Env<'_, U, R>
where
    U: UnitOracle + ?Sized,
    R: RngOracle + ?Sized,
{
    fn clone(&self) -> Self {
        *self
    }
}

impl<U, R> Copy for Env<'_, U, R>
where
    U: UnitOracle + ?Sized,
    R: RngOracle + ?Sized,
{
}

pub type CombatEnv<'a> = Env<'a, dyn UnitOracle + 'a, dyn RngOracle + 'a>;

impl<'a, U, R> Env<'a, U, R>
where
    U: UnitOracle + ?Sized,
    R: RngOracle + ?Sized,
{
    pub fn new(units: Option<&'a U>, rng: Option<&'a R>) -> Self {
        Self { units, rng }
    }

    pub fn with_all(units: &'a U, rng: &'a R) -> Self {
        Self::new(Some(units), Some(rng))
    }

    pub fn empty() -> Self {
        Self {
            units: None,
            rng: None,
        }
    }

    /// Returns the UnitOracle, or an error if not available.
    ///
    /// # Errors
    ///
    /// Returns `OracleError::UnitsNotAvailable` if no unit oracle was provided.
    pub fn units(&self) -> Result<&'a U, OracleError> {
        self.units.ok_or(OracleError::UnitsNotAvailable)
    }

    /// Returns the RngOracle, or an error if not available.
    ///
    /// # Errors
    ///
    /// Returns `OracleError::RngNotAvailable` if no rng oracle was provided.
    pub fn rng(&self) -> Result<&'a R, OracleError> {
        self.rng.ok_or(OracleError::RngNotAvailable)
    }
}

impl<'a, U, R> Env<'a, U, R>
where
    U: UnitOracle + 'a,
    R: RngOracle + 'a,
{
    /// Converts this environment into a trait-object based `CombatEnv`.
    pub fn into_combat_env(self) -> CombatEnv<'a> {
        let units: Option<&'a dyn UnitOracle> = self.units.map(|units| units as _);
        let rng: Option<&'a dyn RngOracle> = self.rng.map(|rng| rng as _);
        Env::new(units, rng)
    }
}
