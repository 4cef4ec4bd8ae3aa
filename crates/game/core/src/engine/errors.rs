//! Error types for the combat engine entry points.

use crate::env::OracleError;
use crate::error::{CombatError, ErrorSeverity};
use crate::state::{Phase, UnitId};

/// A player command that was refused.
///
/// Rejections are explicit no-op results: the state is left exactly as it
/// was, including its version.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ActionRejected {
    #[error("unit {0} is not a party member")]
    UnitNotFound(UnitId),

    #[error("unit {0} already acted this turn")]
    AlreadyActed(UnitId),

    #[error("unit {0} is defeated")]
    UnitDefeated(UnitId),

    #[error("player commands are not accepted during {phase}")]
    NotPlayerTurn { phase: Phase },

    #[error("a phase transition is pending")]
    TransitionPending,

    /// The unit's template vanished from the catalog after initialization.
    #[error("template '{0}' is missing from the unit catalog")]
    TemplateMissing(String),

    #[error(transparent)]
    Oracle(#[from] OracleError),
}

impl CombatError for ActionRejected {
    fn severity(&self) -> ErrorSeverity {
        match self {
            ActionRejected::UnitNotFound(_)
            | ActionRejected::AlreadyActed(_)
            | ActionRejected::UnitDefeated(_) => ErrorSeverity::Validation,
            ActionRejected::NotPlayerTurn { .. } | ActionRejected::TransitionPending => {
                ErrorSeverity::Recoverable
            }
            ActionRejected::TemplateMissing(_) => ErrorSeverity::Internal,
            ActionRejected::Oracle(err) => err.severity(),
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            ActionRejected::UnitNotFound(_) => "ACTION_UNIT_NOT_FOUND",
            ActionRejected::AlreadyActed(_) => "ACTION_ALREADY_ACTED",
            ActionRejected::UnitDefeated(_) => "ACTION_UNIT_DEFEATED",
            ActionRejected::NotPlayerTurn { .. } => "ACTION_NOT_PLAYER_TURN",
            ActionRejected::TransitionPending => "ACTION_TRANSITION_PENDING",
            ActionRejected::TemplateMissing(_) => "ACTION_TEMPLATE_MISSING",
            ActionRejected::Oracle(err) => err.error_code(),
        }
    }
}
