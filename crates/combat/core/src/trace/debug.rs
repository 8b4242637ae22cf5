//! Debug trace records.
//!
//! A [`DebugInfo`] holds everything one tick decided: the rule evaluation of
//! every idle character, the targeting of every action resolved, and one record
//! per resolution substep with per-target details.

use std::fmt;

use crate::ai::RuleEvaluation;
use crate::skill::TargetingMode;
use crate::state::{CharacterId, SkillId, Tick};
use crate::targeting::{FilterStep, TargetResolution};

use super::TraceSink;

/// Decision trace of one tick.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DebugInfo {
    pub tick: Tick,
    pub rule_evaluations: Vec<RuleEvaluation>,
    pub targeting_decisions: Vec<TargetingDecision>,
    pub resolution_substeps: Vec<ResolutionSubstep>,
}

impl DebugInfo {
    pub fn is_empty(&self) -> bool {
        self.rule_evaluations.is_empty()
            && self.targeting_decisions.is_empty()
            && self.resolution_substeps.is_empty()
    }

    /// Returns the record of the given substep, if phase 3 ran it.
    pub fn substep(&self, kind: SubstepKind) -> Option<&ResolutionSubstep> {
        self.resolution_substeps.iter().find(|s| s.kind == kind)
    }
}

/// How the targets of one resolved action were chosen.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TargetingDecision {
    pub caster: CharacterId,
    pub skill_id: SkillId,
    pub mode: TargetingMode,
    pub raw_candidates: Vec<CharacterId>,
    pub filters: Vec<FilterStep>,
    pub final_targets: Vec<CharacterId>,
    pub tie_break: String,
}

impl TargetingDecision {
    pub fn new(caster: CharacterId, skill_id: SkillId, resolution: TargetResolution) -> Self {
        Self {
            caster,
            skill_id,
            mode: resolution.mode,
            raw_candidates: resolution.raw_candidates,
            filters: resolution.filters,
            final_targets: resolution.targets,
            tie_break: resolution.tie_break,
        }
    }
}

/// The resolution substeps, in execution order.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    strum::Display,
    strum::IntoStaticStr,
    strum::EnumIter,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
#[strum(serialize_all = "kebab-case")]
pub enum SubstepKind {
    DamageCalculation,
    HealingCalculation,
    ShieldAbsorption,
    HealthUpdate,
    StatusApplication,
    ActionCancellation,
    /// Cleanup after the six substeps: statuses and actions of the fallen.
    KnockoutCleanup,
}

/// One executed substep with its per-target records.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ResolutionSubstep {
    pub kind: SubstepKind,
    pub details: Vec<SubstepDetail>,
}

impl ResolutionSubstep {
    pub fn new(kind: SubstepKind) -> Self {
        Self {
            kind,
            details: Vec::new(),
        }
    }

    pub fn push(&mut self, detail: SubstepDetail) {
        self.details.push(detail);
    }
}

/// A single per-target record inside a substep.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SubstepDetail {
    pub actor: Option<CharacterId>,
    pub target: CharacterId,
    pub skill: Option<String>,
    pub value: i32,
    pub description: String,
}

impl SubstepDetail {
    pub fn new(target: CharacterId, value: i32, description: impl Into<String>) -> Self {
        Self {
            actor: None,
            target,
            skill: None,
            value,
            description: description.into(),
        }
    }

    pub fn by(mut self, actor: CharacterId, skill: impl Into<String>) -> Self {
        self.actor = Some(actor);
        self.skill = Some(skill.into());
        self
    }
}

impl fmt::Display for SubstepDetail {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (&self.actor, &self.skill) {
            (Some(actor), Some(skill)) => {
                write!(f, "{actor} -> {} [{skill}]: {}", self.target, self.description)
            }
            _ => write!(f, "{}: {}", self.target, self.description),
        }
    }
}

/// Sink that keeps every record for the current tick.
#[derive(Clone, Debug, Default)]
pub struct DebugRecorder {
    info: DebugInfo,
}

impl DebugRecorder {
    pub fn new(tick: Tick) -> Self {
        Self {
            info: DebugInfo {
                tick,
                ..DebugInfo::default()
            },
        }
    }

    pub fn finish(self) -> DebugInfo {
        self.info
    }
}

impl TraceSink for DebugRecorder {
    fn rule_evaluated(&mut self, evaluation: RuleEvaluation) {
        self.info.rule_evaluations.push(evaluation);
    }

    fn action_targeted(&mut self, decision: TargetingDecision) {
        self.info.targeting_decisions.push(decision);
    }

    fn substep(&mut self, substep: ResolutionSubstep) {
        self.info.resolution_substeps.push(substep);
    }
}
