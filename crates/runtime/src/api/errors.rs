//! Unified error types surfaced by the runtime API.
//!
//! Wraps failures from worker coordination, battle setup, rejected commands,
//! and challenge misuse so clients can bubble them up with consistent context.
use thiserror::Error;
use tokio::sync::oneshot;

use battle_core::{ActionRejected, CombatError, ErrorSeverity, InitializationError, OracleError, UnitId};

pub type Result<T> = std::result::Result<T, RuntimeError>;

#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error("party provider not set")]
    ProviderNotSet,

    #[error("session worker command channel closed")]
    CommandChannelClosed,

    #[error("session worker reply channel closed")]
    ReplyChannelClosed(#[source] oneshot::error::RecvError),

    #[error("battle event channel closed")]
    EventChannelClosed,

    #[error("session worker join failed")]
    WorkerJoin(#[source] tokio::task::JoinError),

    #[error("runtime requires oracles to be configured before building")]
    MissingOracles,

    #[error("no battle has been started")]
    NoActiveBattle,

    #[error("failed to initialize battle")]
    Initialization(#[from] InitializationError),

    #[error("command rejected: {0}")]
    Rejected(#[from] ActionRejected),

    #[error(transparent)]
    Oracle(#[from] OracleError),

    #[error("no pending challenge for unit {0}")]
    NoPendingChallenge(UnitId),

    #[error("special ability of unit {0} is not charged")]
    SpecialNotReady(UnitId),

    #[error("no party member can act")]
    NoReadyUnit,
}

impl RuntimeError {
    /// Whether the battle can go on after this error.
    pub fn is_recoverable(&self) -> bool {
        match self {
            RuntimeError::Rejected(err) => err.severity() != ErrorSeverity::Fatal,
            RuntimeError::NoPendingChallenge(_) | RuntimeError::SpecialNotReady(_) => true,
            _ => false,
        }
    }
}
