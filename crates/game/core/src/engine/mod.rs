//! Combat flow controller and action resolvers.
//!
//! [`CombatEngine`] is the only writer of [`CombatState`]. Every entry point
//! validates its preconditions before touching the state, so a rejected
//! command leaves the aggregate exactly as it was. Accepted commands advance
//! `nonce` and `version` once and report what they appended to the log and
//! which deferred transition (if any) they left behind.
//!
//! Deferred transitions are not executed here on their own. A driver (see
//! [`crate::session`]) waits out the configured delay and then calls
//! [`CombatEngine::run_transition`].

mod errors;
mod flow;
mod player;

pub use errors::ActionRejected;

use crate::config::CombatConfig;
use crate::env::compute_seed;
use crate::state::{CombatState, PendingTransition, UnitId};

/// Modifiers for a basic action.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ActionOptions {
    /// Reward for a correctly answered challenge; multiplies the effect.
    pub is_critical: bool,
}

impl ActionOptions {
    pub fn critical() -> Self {
        Self { is_critical: true }
    }
}

/// Report of one accepted command or transition.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Resolution {
    /// Log lines appended by this resolution, in order.
    pub log_entries: Vec<String>,
    /// Transition left pending for the driver to schedule.
    pub follow_up: Option<PendingTransition>,
}

/// Authoritative reducer for a [`CombatState`].
pub struct CombatEngine<'a> {
    state: &'a mut CombatState,
    config: &'a CombatConfig,
}

impl<'a> CombatEngine<'a> {
    pub fn new(state: &'a mut CombatState, config: &'a CombatConfig) -> Self {
        Self { state, config }
    }

    pub fn state(&self) -> &CombatState {
        self.state
    }

    /// Seed for one random draw in the current resolution.
    fn draw_seed(&self, unit: UnitId, context: u32) -> u64 {
        compute_seed(self.state.seed, self.state.nonce, unit.0, context)
    }

    /// Closes a resolution that started when the log had `log_start` entries.
    fn commit(&mut self, log_start: usize) -> Resolution {
        self.state.nonce += 1;
        self.state.version += 1;
        Resolution {
            log_entries: self.state.combat_log.since(log_start).to_vec(),
            follow_up: self.state.pending,
        }
    }
}
