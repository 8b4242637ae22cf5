//! Common error infrastructure for combat-core.
//!
//! This module provides shared types and traits used across all error types in
//! combat-core. Domain-specific errors (e.g. `ParseError`, `CatalogError`,
//! `EngineError`) are defined next to the code that raises them.
//!
//! # Design Principles
//!
//! - **Policy vs. failure**: foreseeable game states (no targets, healing a
//!   knocked-out ally, idle characters) are never errors
//! - **Fail fast**: data errors surface at the point of lookup, never retried
//! - **Severity Classification**: errors are categorized for recovery strategies

/// How a caller driving ticks should react to a failed call.
///
/// - **Recoverable**: fix the request and call again; the battle is intact
/// - **Validation**: skill or loadout data is wrong and must be edited
/// - **Internal**: the engine broke its own bookkeeping
/// - **Fatal**: the battle cannot be built or continued at all
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ErrorSeverity {
    /// The request named something the battle does not have, but the state
    /// is untouched and the next tick can still run.
    ///
    /// Examples: `enqueue_action` for a caster id on neither roster
    Recoverable,

    /// Content data is malformed; retrying the same data fails the same way.
    ///
    /// Examples: a rule tagged `hp-sideways`, a queued `meteor` that no
    /// loadout or catalog defines, a catalog listing `strike` twice
    Validation,

    /// The engine reached a state its own phases should have ruled out.
    ///
    /// Examples: a resolving action whose caster is missing from the
    /// pre-tick snapshot
    Internal,

    /// Nothing sensible can be simulated from here.
    ///
    /// Examples: two characters sharing an id, a catalog lookup with no
    /// catalog configured
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

    /// Returns true if this error indicates an internal bug.
    pub const fn is_internal(&self) -> bool {
        matches!(self, Self::Internal | Self::Fatal)
    }
}

/// Common trait for all combat-core errors.
///
/// This trait provides a uniform interface for error classification across
/// all error types in the crate.
///
/// # Implementation Guidelines
///
/// - All error enums should implement this trait
/// - Use `#[derive(thiserror::Error)]` for Display/Error impl
/// - Classify severity based on recoverability, not impact
pub trait CombatError: core::fmt::Display + core::fmt::Debug {
    /// Returns the severity level of this error.
    fn severity(&self) -> ErrorSeverity;

    /// Returns a static string identifier for this error variant.
    ///
    /// This is useful for error categorization, metrics, and testing.
    /// Default implementation uses the error type name.
    fn error_code(&self) -> &'static str {
        core::any::type_name::<Self>()
    }
}

/// Errors raised while parsing string tags from loadout or catalog data.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ParseError {
    /// Condition tag is not one of the recognized predicates.
    #[error("unknown condition type '{0}'")]
    UnknownCondition(String),

    /// Condition requires a parameter but none was supplied.
    #[error("condition '{tag}' requires a parameter")]
    MissingParameter { tag: String },

    /// Condition parameter could not be interpreted.
    #[error("condition '{tag}' has invalid parameter '{value}'")]
    InvalidParameter { tag: String, value: String },

    /// Status tag is not a known status kind.
    #[error("unknown status type '{0}'")]
    UnknownStatus(String),

    /// Targeting tag is not a known targeting mode.
    #[error("unknown targeting mode '{0}'")]
    UnknownTargeting(String),
}

impl CombatError for ParseError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Validation
    }

    fn error_code(&self) -> &'static str {
        use ParseError::*;
        match self {
            UnknownCondition(_) => "PARSE_UNKNOWN_CONDITION",
            MissingParameter { .. } => "PARSE_MISSING_PARAMETER",
            InvalidParameter { .. } => "PARSE_INVALID_PARAMETER",
            UnknownStatus(_) => "PARSE_UNKNOWN_STATUS",
            UnknownTargeting(_) => "PARSE_UNKNOWN_TARGETING",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_errors_are_validation_failures() {
        let err = ParseError::UnknownCondition("hp-sideways".into());
        assert_eq!(err.severity(), ErrorSeverity::Validation);
        assert_eq!(err.error_code(), "PARSE_UNKNOWN_CONDITION");
        assert_eq!(err.to_string(), "unknown condition type 'hp-sideways'");
    }

    #[test]
    fn documented_examples_match_their_severity() {
        use crate::{CatalogError, CharacterId, EngineError, SkillId};

        let cases: [(&dyn CombatError, ErrorSeverity); 4] = [
            (
                &EngineError::UnknownCharacter(CharacterId(7)),
                ErrorSeverity::Recoverable,
            ),
            (
                &EngineError::UnknownSkill {
                    skill: SkillId::new("meteor"),
                    caster: CharacterId(1),
                },
                ErrorSeverity::Validation,
            ),
            (
                &EngineError::DuplicateCharacter(CharacterId(1)),
                ErrorSeverity::Fatal,
            ),
            (&CatalogError::CatalogNotAvailable, ErrorSeverity::Fatal),
        ];
        for (err, expected) in cases {
            assert_eq!(err.severity(), expected, "{err}");
        }
    }

    #[test]
    fn severity_classification() {
        assert!(ErrorSeverity::Recoverable.is_recoverable());
        assert!(!ErrorSeverity::Validation.is_internal());
        assert!(ErrorSeverity::Fatal.is_internal());
        assert_eq!(ErrorSeverity::Internal.as_str(), "internal");
    }
}
