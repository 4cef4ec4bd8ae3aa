use crate::env::OracleError;
use crate::error::{CombatError, ErrorSeverity};

/// Errors raised while building a fresh battle.
///
/// The previous battle (if any) stays in place when initialization fails.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum InitializationError {
    /// A party template id has no entry in the companion catalog.
    #[error("unknown companion template '{template_id}' at party slot {slot}")]
    UnknownTemplate { template_id: String, slot: usize },

    #[error(transparent)]
    Oracle(#[from] OracleError),
}

impl CombatError for InitializationError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            InitializationError::UnknownTemplate { .. } => ErrorSeverity::Validation,
            InitializationError::Oracle(err) => err.severity(),
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            InitializationError::UnknownTemplate { .. } => "INIT_UNKNOWN_TEMPLATE",
            InitializationError::Oracle(err) => err.error_code(),
        }
    }
}
