//! Error types for the tick pipeline.

use crate::error::{CombatError, ErrorSeverity};
use crate::state::{CharacterId, SkillId};

/// Identifies a phase of the tick pipeline.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::IntoStaticStr, strum::EnumIter,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
#[strum(serialize_all = "kebab-case")]
pub enum TickPhase {
    RuleEvaluation,
    Countdown,
    Resolution,
    StatusProcessing,
    Cleanup,
}

impl TickPhase {
    pub fn as_str(&self) -> &'static str {
        (*self).into()
    }
}

/// Errors surfaced while executing a tick or building a state.
///
/// Foreseeable game situations (no targets, healing the fallen, idle
/// characters) never produce an error. These variants are data errors.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum EngineError {
    /// A queued action references a skill neither equipped nor catalogued.
    #[error("unknown skill '{skill}' in action of {caster}")]
    UnknownSkill { skill: SkillId, caster: CharacterId },

    /// An id is not present on either roster.
    #[error("character {0} is not part of this battle")]
    UnknownCharacter(CharacterId),

    /// Two characters in one battle share an id.
    #[error("character id {0} is used more than once")]
    DuplicateCharacter(CharacterId),
}

impl CombatError for EngineError {
    fn severity(&self) -> ErrorSeverity {
        use EngineError::*;
        match self {
            UnknownSkill { .. } => ErrorSeverity::Validation,
            UnknownCharacter(_) => ErrorSeverity::Recoverable,
            DuplicateCharacter(_) => ErrorSeverity::Fatal,
        }
    }

    fn error_code(&self) -> &'static str {
        use EngineError::*;
        match self {
            UnknownSkill { .. } => "ENGINE_UNKNOWN_SKILL",
            UnknownCharacter(_) => "ENGINE_UNKNOWN_CHARACTER",
            DuplicateCharacter(_) => "ENGINE_DUPLICATE_CHARACTER",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_skill_is_a_validation_error() {
        let err = EngineError::UnknownSkill {
            skill: SkillId::new("meteor"),
            caster: CharacterId(4),
        };
        assert_eq!(err.severity(), ErrorSeverity::Validation);
        assert_eq!(err.error_code(), "ENGINE_UNKNOWN_SKILL");
        assert_eq!(err.to_string(), "unknown skill 'meteor' in action of #4");
    }

    #[test]
    fn phases_have_kebab_names() {
        assert_eq!(TickPhase::StatusProcessing.as_str(), "status-processing");
        assert_eq!(TickPhase::RuleEvaluation.to_string(), "rule-evaluation");
    }
}
