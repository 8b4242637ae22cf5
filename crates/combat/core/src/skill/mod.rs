//! Skill definitions: effects, targeting, and the AI rules attached to them.
//!
//! Skills are plain data. Characters carry their equipped skills directly and
//! a [`SkillCatalog`](crate::env::SkillCatalog) can supply the rest; the
//! engine never hard-codes a particular skill.
mod condition;
mod rule;
mod targeting;

pub use condition::{Condition, ConditionTag};
pub use rule::{Rule, by_priority};
pub use targeting::TargetingMode;

use crate::state::{SkillId, StatusKind};

/// A single effect a skill applies to each of its targets.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "type", rename_all = "kebab-case"))]
pub enum SkillEffect {
    /// Base damage before the caster's enraged bonus and the target's defense.
    Damage { amount: i32 },
    /// Restores HP to living targets, capped at missing HP.
    Heal { amount: i32 },
    /// Applies `shielded` with a damage pool of `amount`.
    Shield { amount: i32, duration: u32 },
    /// Applies (or replaces) a status on each target.
    Status {
        kind: StatusKind,
        duration: u32,
        #[cfg_attr(feature = "serde", serde(default))]
        value: Option<i32>,
    },
    /// Restores a fixed amount of HP to knocked-out targets only.
    Revive { amount: i32 },
    /// Cancels whatever action the target has queued.
    Interrupt,
}

/// Tag half of an effect, used in traces and narration.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::IntoStaticStr, strum::EnumIter,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
#[strum(serialize_all = "kebab-case")]
pub enum EffectKind {
    Damage,
    Heal,
    Shield,
    Status,
    Revive,
    Interrupt,
}

impl SkillEffect {
    pub const fn kind(&self) -> EffectKind {
        match self {
            Self::Damage { .. } => EffectKind::Damage,
            Self::Heal { .. } => EffectKind::Heal,
            Self::Shield { .. } => EffectKind::Shield,
            Self::Status { .. } => EffectKind::Status,
            Self::Revive { .. } => EffectKind::Revive,
            Self::Interrupt => EffectKind::Interrupt,
        }
    }

    /// Revive is the only effect aimed at knocked-out characters.
    pub const fn targets_knocked_out(&self) -> bool {
        matches!(self, Self::Revive { .. })
    }

    /// Returns true if the effect removes the target's queued action.
    pub const fn cancels_action(&self) -> bool {
        matches!(
            self,
            Self::Interrupt
                | Self::Status {
                    kind: StatusKind::Stunned,
                    ..
                }
        )
    }
}

/// A usable ability: what it does, how long it takes, and when the AI uses it.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Skill {
    pub id: SkillId,
    pub name: String,
    /// Ticks between queueing and resolution.
    pub base_duration: u32,
    pub targeting: TargetingMode,
    /// Applied in order to every target.
    pub effects: Vec<SkillEffect>,
    /// AI policy for this skill; a skill without rules is never auto-queued.
    #[cfg_attr(feature = "serde", serde(default))]
    pub rules: Vec<Rule>,
}

impl Skill {
    pub fn new(
        id: impl Into<SkillId>,
        name: impl Into<String>,
        base_duration: u32,
        targeting: TargetingMode,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            base_duration,
            targeting,
            effects: Vec::new(),
            rules: Vec::new(),
        }
    }

    pub fn with_effect(mut self, effect: SkillEffect) -> Self {
        self.effects.push(effect);
        self
    }

    pub fn with_rule(mut self, rule: Rule) -> Self {
        self.rules.push(rule);
        self
    }

    pub fn with_rules(mut self, rules: impl IntoIterator<Item = Rule>) -> Self {
        self.rules.extend(rules);
        self
    }

    /// Replaces the rule list, used when a loadout assigns instructions.
    pub fn set_rules(&mut self, rules: Vec<Rule>) {
        self.rules = rules;
    }

    /// Rules in evaluation order, paired with their list index.
    pub fn rules_by_priority(&self) -> Vec<(usize, &Rule)> {
        by_priority(&self.rules)
    }

    pub fn has_effect(&self, kind: EffectKind) -> bool {
        self.effects.iter().any(|e| e.kind() == kind)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stun_status_counts_as_cancelling() {
        let stun = SkillEffect::Status {
            kind: StatusKind::Stunned,
            duration: 2,
            value: None,
        };
        let poison = SkillEffect::Status {
            kind: StatusKind::Poisoned,
            duration: 3,
            value: Some(4),
        };
        assert!(stun.cancels_action());
        assert!(SkillEffect::Interrupt.cancels_action());
        assert!(!poison.cancels_action());
        assert!(!SkillEffect::Damage { amount: 10 }.cancels_action());
    }

    #[test]
    fn builder_keeps_effect_order() {
        let skill = Skill::new("bash", "Bash", 2, TargetingMode::NearestEnemy)
            .with_effect(SkillEffect::Damage { amount: 8 })
            .with_effect(SkillEffect::Interrupt);

        let kinds: Vec<_> = skill.effects.iter().map(SkillEffect::kind).collect();
        assert_eq!(kinds, vec![EffectKind::Damage, EffectKind::Interrupt]);
        assert!(skill.has_effect(EffectKind::Interrupt));
        assert!(!skill.has_effect(EffectKind::Heal));
    }
}
