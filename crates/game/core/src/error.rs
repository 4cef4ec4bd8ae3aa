//! Common error infrastructure for battle-core.
//!
//! Domain-specific errors (e.g., [`crate::engine::ActionRejected`],
//! [`crate::state::InitializationError`]) live next to the operations they
//! guard. This module only provides the shared classification.
//!
//! # Design Principles
//!
//! - **No panics on bad input**: rejected commands are values, never unwinds
//! - **Untouched on rejection**: an error means the combat state is unchanged
//! - **Severity Classification**: callers decide between ignoring and alerting

/// Severity level of an error, used for categorization and recovery strategies.
///
/// - **Recoverable**: the command may succeed later (e.g., after a phase change)
/// - **Validation**: the command references something invalid and should be dropped
/// - **Internal**: content or engine inconsistency worth investigating
/// - **Fatal**: the session cannot continue (missing collaborator)
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ErrorSeverity {
    /// Can retry once the battle reaches a state that accepts the command.
    ///
    /// Examples: acting during the monster turn, acting while victory is pending
    Recoverable,

    /// Invalid input, should not retry without changes.
    ///
    /// Examples: unit not found, unit already acted
    Validation,

    /// Unexpected inconsistency between state and static content.
    ///
    /// Examples: a unit whose template disappeared from the catalog
    Internal,

    /// Unrecoverable error.
    ///
    /// Examples: a required oracle was not provided
    Fatal,
}

impl ErrorSeverity {
    /// Returns a human-readable description of this severity level.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Recoverable => "recoverable",
            Self::Validation => "validation",
            Self::Internal => "internal",
            Self::Fatal => "fatal",
        }
    }

    /// Returns true if this error is potentially recoverable.
    pub const fn is_recoverable(&self) -> bool {
        matches!(self, Self::Recoverable)
    }

    /// Returns true if this error indicates an internal bug or broken setup.
    pub const fn is_internal(&self) -> bool {
        matches!(self, Self::Internal | Self::Fatal)
    }
}

/// Common trait for all battle-core errors.
///
/// # Implementation Guidelines
///
/// - Use `#[derive(thiserror::Error)]` for Display/Error impl
/// - Classify severity based on recoverability, not impact
/// - Give every variant a stable `error_code` for logs and tests
pub trait CombatError: core::fmt::Display + core::fmt::Debug {
    /// Returns the severity level of this error.
    fn severity(&self) -> ErrorSeverity;

    /// Returns a static string identifier for this error variant.
    ///
    /// Default implementation uses the error type name.
    fn error_code(&self) -> &'static str {
        core::any::type_name::<Self>()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn severity_classification() {
        assert!(ErrorSeverity::Recoverable.is_recoverable());
        assert!(!ErrorSeverity::Validation.is_recoverable());
        assert!(ErrorSeverity::Internal.is_internal());
        assert!(ErrorSeverity::Fatal.is_internal());
        assert!(!ErrorSeverity::Validation.is_internal());
        assert_eq!(ErrorSeverity::Fatal.as_str(), "fatal");
    }
}
