//! Events emitted during a battle for front-ends to observe.
//!
//! Consumers subscribe to [`BattleEvent`] to react to state changes without
//! blocking the worker loop.
use battle_core::{BattleOutcome, Phase};
use serde::Serialize;

/// Events emitted by the runtime while a battle runs
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum BattleEvent {
    /// A new snapshot was committed
    StateChanged { version: u64, phase: Phase },
    /// A combat log line was appended
    LogAppended(String),
    /// The battle moved to another phase
    PhaseChanged { from: Phase, to: Phase },
    /// The battle reached VICTORY or DEFEAT
    BattleEnded(BattleOutcome),
}
