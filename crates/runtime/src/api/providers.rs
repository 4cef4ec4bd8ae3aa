//! Asynchronous abstraction for sourcing party decisions.
//!
//! Runtime users plug in [`PartyProvider`] implementations so battles can run
//! with human input, scripted fixtures, or autopilot policies.
use async_trait::async_trait;
use battle_core::{CombatState, Problem, UnitId};

use super::errors::{Result, RuntimeError};

/// What the party does next.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PartyCommand {
    /// Basic ability. With `challenge` set, a math problem decides whether it
    /// lands as a critical.
    Basic { unit: UnitId, challenge: bool },
    /// Special ability, gated by a math problem.
    Special { unit: UnitId },
}

impl PartyCommand {
    pub fn unit(&self) -> UnitId {
        match self {
            PartyCommand::Basic { unit, .. } | PartyCommand::Special { unit } => *unit,
        }
    }
}

/// Trait for deciding party commands from the current battle state.
///
/// Called only while the battle accepts input, so at least one party member
/// can act.
#[async_trait]
pub trait PartyProvider: Send + Sync {
    /// Choose the next command.
    async fn choose_command(&self, state: &CombatState) -> Result<PartyCommand>;

    /// Answer the math problem issued for `unit`.
    async fn answer(&self, unit: UnitId, problem: &Problem) -> Result<i64>;
}

/// Acts with the first ready party member and always answers correctly.
/// Useful for testing or headless runs.
pub struct FirstReadyProvider;

#[async_trait]
impl PartyProvider for FirstReadyProvider {
    async fn choose_command(&self, state: &CombatState) -> Result<PartyCommand> {
        let unit = state.ready_actors().next().ok_or(RuntimeError::NoReadyUnit)?;
        if unit.is_special_ready() {
            Ok(PartyCommand::Special { unit: unit.id })
        } else {
            Ok(PartyCommand::Basic {
                unit: unit.id,
                challenge: true,
            })
        }
    }

    async fn answer(&self, _unit: UnitId, problem: &Problem) -> Result<i64> {
        Ok(problem.answer)
    }
}
