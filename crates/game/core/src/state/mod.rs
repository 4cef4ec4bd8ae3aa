//! Authoritative combat state representation.
//!
//! [`CombatState`] is the aggregate for one battle: the phase machine, both
//! unit rosters, the UI selection, and the combat log. Readers receive it as
//! an immutable snapshot; only [`crate::engine::CombatEngine`] mutates it.
mod error;
mod log;
mod unit;

pub use error::InitializationError;
pub use log::CombatLog;
pub use unit::{Side, UnitId, UnitState};

use strum::Display;

/// Phase of the battle state machine.
///
/// ```text
/// INIT → PLAYER_TURN ⇄ MONSTER_TURN → DEFEAT
///             ↓
///          VICTORY
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Display)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Phase {
    #[default]
    Init,
    PlayerTurn,
    MonsterTurn,
    Victory,
    Defeat,
}

impl Phase {
    /// VICTORY and DEFEAT accept no further transitions.
    pub const fn is_terminal(&self) -> bool {
        matches!(self, Phase::Victory | Phase::Defeat)
    }
}

/// Transition that has been decided but waits for its scheduling tick.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PendingTransition {
    /// Resolve the monster turn.
    MonsterTurn,
    /// Flip the phase to VICTORY.
    Victory,
}

/// Final result of a battle.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BattleOutcome {
    Victory,
    Defeat,
}

/// Canonical snapshot of one battle.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CombatState {
    pub phase: Phase,
    /// Starts at 1; advances each time control returns to the player.
    pub turn_count: u32,
    pub party: Vec<UnitState>,
    pub monsters: Vec<UnitState>,
    /// UI selection only; never read by the resolvers.
    pub selected_unit_id: Option<UnitId>,
    pub combat_log: CombatLog,

    /// Deferred transition waiting for the driver. Input is closed while set.
    pub pending: Option<PendingTransition>,

    /// Seed fixed at initialization; combined with `nonce` for every draw.
    pub seed: u64,
    /// Resolution counter. Advances once per accepted command or monster turn.
    pub nonce: u64,
    /// Advances once per committed mutation.
    pub version: u64,
}

impl CombatState {
    /// Empty battle awaiting initialization.
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            ..Self::default()
        }
    }

    pub fn unit(&self, id: UnitId) -> Option<&UnitState> {
        self.party
            .iter()
            .chain(self.monsters.iter())
            .find(|unit| unit.id == id)
    }

    pub(crate) fn party_index(&self, id: UnitId) -> Option<usize> {
        self.party.iter().position(|unit| unit.id == id)
    }

    pub fn living_party(&self) -> impl Iterator<Item = &UnitState> {
        self.party.iter().filter(|unit| unit.is_alive())
    }

    pub fn living_monsters(&self) -> impl Iterator<Item = &UnitState> {
        self.monsters.iter().filter(|unit| unit.is_alive())
    }

    /// Living party members that still have their action this turn.
    pub fn ready_actors(&self) -> impl Iterator<Item = &UnitState> {
        self.party.iter().filter(|unit| unit.can_act())
    }

    pub fn all_monsters_dead(&self) -> bool {
        self.monsters.iter().all(|unit| unit.is_dead)
    }

    pub fn all_party_dead(&self) -> bool {
        self.party.iter().all(|unit| unit.is_dead)
    }

    pub fn all_living_party_acted(&self) -> bool {
        self.living_party().all(|unit| unit.has_acted)
    }

    /// Whether player commands are currently accepted.
    pub fn accepts_input(&self) -> bool {
        self.phase == Phase::PlayerTurn && self.pending.is_none()
    }

    pub fn outcome(&self) -> Option<BattleOutcome> {
        match self.phase {
            Phase::Victory => Some(BattleOutcome::Victory),
            Phase::Defeat => Some(BattleOutcome::Defeat),
            _ => None,
        }
    }

    pub fn is_over(&self) -> bool {
        self.phase.is_terminal()
    }
}
