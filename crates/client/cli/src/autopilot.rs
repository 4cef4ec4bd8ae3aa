//! Party provider that plays without a human.
use std::sync::{Mutex, PoisonError};

use async_trait::async_trait;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use battle_core::{CombatState, Problem, UnitId};
use battle_runtime::{PartyCommand, PartyProvider, Result, RuntimeError};

/// Acts with the first ready companion, spends full spirit meters on the
/// special, and answers correctly with probability `accuracy`.
pub struct Autopilot {
    accuracy: f64,
    rng: Mutex<StdRng>,
}

impl Autopilot {
    pub fn new(accuracy: f64, seed: u64) -> Self {
        Self {
            accuracy: accuracy.clamp(0.0, 1.0),
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }
}

#[async_trait]
impl PartyProvider for Autopilot {
    async fn choose_command(&self, state: &CombatState) -> Result<PartyCommand> {
        let unit = state.ready_actors().next().ok_or(RuntimeError::NoReadyUnit)?;
        if unit.is_special_ready() {
            return Ok(PartyCommand::Special { unit: unit.id });
        }
        Ok(PartyCommand::Basic {
            unit: unit.id,
            challenge: true,
        })
    }

    async fn answer(&self, unit: UnitId, problem: &Problem) -> Result<i64> {
        let mut rng = self.rng.lock().unwrap_or_else(PoisonError::into_inner);
        if rng.gen_bool(self.accuracy) {
            return Ok(problem.answer);
        }
        let miss = rng.gen_range(1..=3);
        tracing::debug!(unit = %unit, prompt = %problem.prompt(), "autopilot fumbles");
        Ok(problem.answer + miss)
    }
}
