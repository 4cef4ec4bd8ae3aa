//! Oracle access errors.

use crate::error::{CombatError, ErrorSeverity};

/// Errors that occur when accessing oracle data.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum OracleError {
    /// UnitOracle is not available in the environment.
    #[error("UnitOracle not available")]
    UnitsNotAvailable,

    /// RngOracle is not available in the environment.
    #[error("RngOracle not available")]
    RngNotAvailable,

    /// Companion template was not found by ID.
    #[error("companion template '{0}' not found")]
    TemplateNotFound(String),
}

impl CombatError for OracleError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            // The engine cannot resolve anything without its collaborators
            OracleError::UnitsNotAvailable | OracleError::RngNotAvailable => ErrorSeverity::Fatal,
            OracleError::TemplateNotFound(_) => ErrorSeverity::Validation,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            OracleError::UnitsNotAvailable => "ORACLE_UNITS_NOT_AVAILABLE",
            OracleError::RngNotAvailable => "ORACLE_RNG_NOT_AVAILABLE",
            OracleError::TemplateNotFound(_) => "ORACLE_TEMPLATE_NOT_FOUND",
        }
    }
}
