//! Runtime orchestration for party battles.
//!
//! This crate wires together the oracle implementations, the challenge
//! bookkeeping, and the session worker into a cohesive runtime API. Consumers
//! embed [`Runtime`] to start battles, drive them with a [`PartyProvider`],
//! and subscribe to [`BattleEvent`]s through [`RuntimeHandle`].
//!
//! Modules are organized by responsibility:
//! - [`runtime`] hosts the orchestrator and builder
//! - [`api`] exposes the types downstream clients interact with
//! - [`challenge`] tracks math challenges gating critical and special actions
//! - [`oracle`] provides the content-backed and arithmetic oracles
//! - `workers` keeps the session task internal to the crate
pub mod api;
pub mod challenge;
pub mod oracle;
pub mod runtime;

mod workers;

pub use api::{
    BattleEvent, ChallengeOutcome, FirstReadyProvider, PartyCommand, PartyProvider, Result,
    RuntimeError, RuntimeHandle,
};
pub use challenge::{ChallengeBook, ChallengePurpose, PendingChallenge};
pub use oracle::{ArithmeticOracle, OracleManager, UnitOracleImpl};
pub use runtime::{Runtime, RuntimeBuilder, RuntimeConfig};
