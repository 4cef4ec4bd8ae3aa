//! Deterministic combat rules for the party battle and the mission duel.
//!
//! `battle-core` defines the canonical battle state, the flow controller and
//! action resolvers, and the enemy policies. It performs no I/O: static unit
//! data and randomness come in through the oracle traits in [`env`], and
//! deferred phase transitions are queued on a virtual clock that a driver
//! advances. All state mutation flows through [`engine::CombatEngine`];
//! [`session::CombatSession`] wraps it with copy-on-write snapshots.
pub mod ai;
pub mod combat;
pub mod config;
pub mod engine;
pub mod env;
pub mod error;
pub mod session;
pub mod state;

pub use ai::{EnemyAction, MissionCombatant, decide_enemy_action};
pub use config::CombatConfig;
pub use engine::{ActionOptions, ActionRejected, CombatEngine, Resolution};
pub use env::{
    CombatEnv, CompanionTemplate, Difficulty, EffectKind, EffectTarget, Env, MathOracle,
    MonsterDef, OracleError, Operation, PcgRng, Problem, RngOracle, Role, SpecialAbility,
    SpecialEffect, UnitOracle, Verdict, compute_seed,
};
pub use error::{CombatError, ErrorSeverity};
pub use session::CombatSession;
pub use state::{
    BattleOutcome, CombatLog, CombatState, InitializationError, PendingTransition, Phase, Side,
    UnitId, UnitState,
};
