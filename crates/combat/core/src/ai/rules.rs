//! Rule evaluation for idle characters.
//!
//! Skills are walked in equipped order and, within a skill, rules by
//! descending priority (stable on ties). The first enabled rule whose
//! conditions all pass *and* whose targeting yields at least one target is
//! selected. A rule with zero targets is treated as non-matching and
//! evaluation moves on.

use crate::skill::{Condition, by_priority};
use crate::state::{Character, CharacterId, CombatState, SkillId};
use crate::targeting::{TargetResolution, resolve_targets};

use super::conditions::{ConditionContext, inspect};

/// Why a rule was or was not selected.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::IntoStaticStr)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
#[strum(serialize_all = "kebab-case")]
pub enum RuleOutcome {
    Selected,
    Disabled,
    ConditionFailed,
    NoTargets,
    /// Not evaluated because an earlier rule was selected.
    Skipped,
}

/// Result of one condition inside a rule check.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ConditionCheck {
    pub condition: Condition,
    pub passed: bool,
    pub expected: String,
    pub actual: String,
}

/// One rule as seen by the evaluator.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RuleCheck {
    pub skill_id: SkillId,
    pub skill_name: String,
    /// Index of the rule inside the skill's own rule list.
    pub rule_index: usize,
    pub priority: i32,
    pub outcome: RuleOutcome,
    pub conditions: Vec<ConditionCheck>,
    /// Present once conditions passed and targeting ran.
    pub targeting: Option<TargetResolution>,
}

/// The rule that fired and the action it produces.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SelectedRule {
    pub skill_id: SkillId,
    pub skill_name: String,
    pub base_duration: u32,
    pub rule_index: usize,
    pub priority: i32,
    pub targets: Vec<CharacterId>,
}

/// Everything the evaluator looked at for one idle character.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RuleEvaluation {
    pub caster: CharacterId,
    pub caster_name: String,
    pub checks: Vec<RuleCheck>,
    pub selected: Option<SelectedRule>,
}

impl RuleEvaluation {
    /// The check that produced the selected rule.
    pub fn selected_check(&self) -> Option<&RuleCheck> {
        self.checks
            .iter()
            .find(|check| check.outcome == RuleOutcome::Selected)
    }
}

/// Walks the caster's skills and rules and picks the action to queue.
pub fn evaluate_rules(caster: &Character, state: &CombatState) -> RuleEvaluation {
    let (allies, enemies) = state.sides_of(caster.side);
    let ctx = ConditionContext::new(caster, allies, enemies);

    let mut checks = Vec::new();
    let mut selected = None;

    for skill in &caster.skills {
        for (rule_index, rule) in by_priority(&skill.rules) {
            let mut check = RuleCheck {
                skill_id: skill.id.clone(),
                skill_name: skill.name.clone(),
                rule_index,
                priority: rule.priority,
                outcome: RuleOutcome::Skipped,
                conditions: Vec::new(),
                targeting: None,
            };

            if selected.is_some() {
                checks.push(check);
                continue;
            }
            if !rule.enabled {
                check.outcome = RuleOutcome::Disabled;
                checks.push(check);
                continue;
            }

            // Every condition is inspected so the trace shows all of them.
            check.conditions = rule
                .conditions
                .iter()
                .map(|condition| {
                    let result = inspect(condition, &ctx);
                    ConditionCheck {
                        condition: *condition,
                        passed: result.passed,
                        expected: result.expected,
                        actual: result.actual,
                    }
                })
                .collect();

            if !check.conditions.iter().all(|c| c.passed) {
                check.outcome = RuleOutcome::ConditionFailed;
                checks.push(check);
                continue;
            }

            let resolution = resolve_targets(rule.effective_targeting(skill.targeting), caster, state);
            if resolution.is_empty() {
                check.outcome = RuleOutcome::NoTargets;
            } else {
                check.outcome = RuleOutcome::Selected;
                selected = Some(SelectedRule {
                    skill_id: skill.id.clone(),
                    skill_name: skill.name.clone(),
                    base_duration: skill.base_duration,
                    rule_index,
                    priority: rule.priority,
                    targets: resolution.targets.clone(),
                });
            }
            check.targeting = Some(resolution);
            checks.push(check);
        }
    }

    RuleEvaluation {
        caster: caster.id,
        caster_name: caster.name.clone(),
        checks,
        selected,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::skill::{Rule, Skill, SkillEffect, TargetingMode};
    use crate::state::{StatusEffect, StatusKind};

    fn strike() -> Skill {
        Skill::new("strike", "Strike", 1, TargetingMode::NearestEnemy)
            .with_effect(SkillEffect::Damage { amount: 15 })
    }

    fn heal() -> Skill {
        Skill::new("heal", "Heal", 2, TargetingMode::AllyLowestHp)
            .with_effect(SkillEffect::Heal { amount: 20 })
    }

    fn battle(cleric: Character) -> CombatState {
        CombatState::new(
            vec![cleric, Character::player(2, "Knight", 100).with_hp(30)],
            vec![Character::enemy(10, "Goblin", 50)],
        )
        .unwrap()
    }

    #[test]
    fn highest_priority_matching_rule_wins() {
        let cleric = Character::player(1, "Cleric", 80).with_skill(
            heal()
                .with_rule(Rule::new(1).when(Condition::AllyHpBelow(90)))
                .with_rule(Rule::new(9).when(Condition::AllyHpBelow(10))),
        );
        let state = battle(cleric);
        let caster = state.character(CharacterId(1)).unwrap();

        let evaluation = evaluate_rules(caster, &state);
        let selected = evaluation.selected.as_ref().unwrap();
        assert_eq!(selected.rule_index, 0);
        assert_eq!(selected.targets, vec![CharacterId(2)]);

        let outcomes: Vec<_> = evaluation.checks.iter().map(|c| c.outcome).collect();
        assert_eq!(
            outcomes,
            vec![RuleOutcome::ConditionFailed, RuleOutcome::Selected]
        );
    }

    #[test]
    fn zero_targets_falls_through_to_next_skill() {
        let cleric = Character::player(1, "Cleric", 80)
            .with_skill(
                Skill::new("revive", "Revive", 3, TargetingMode::AllyDead)
                    .with_effect(SkillEffect::Revive { amount: 30 })
                    .with_rule(Rule::always(10)),
            )
            .with_skill(strike().with_rule(Rule::always(0)));
        let state = battle(cleric);
        let caster = state.character(CharacterId(1)).unwrap();

        let evaluation = evaluate_rules(caster, &state);
        assert_eq!(evaluation.checks[0].outcome, RuleOutcome::NoTargets);
        assert_eq!(
            evaluation.selected.unwrap().skill_id,
            SkillId::new("strike")
        );
    }

    #[test]
    fn disabled_rules_are_reported_and_skipped() {
        let cleric = Character::player(1, "Cleric", 80)
            .with_skill(strike().with_rule(Rule::always(5).disabled()));
        let state = battle(cleric);
        let caster = state.character(CharacterId(1)).unwrap();

        let evaluation = evaluate_rules(caster, &state);
        assert!(evaluation.selected.is_none());
        assert_eq!(evaluation.checks[0].outcome, RuleOutcome::Disabled);
    }

    #[test]
    fn all_conditions_are_inspected() {
        let cleric = Character::player(1, "Cleric", 80).with_skill(
            strike().with_rule(
                Rule::always(0)
                    .when(Condition::HpBelow(10))
                    .when(Condition::SelfLacksStatus(StatusKind::Stunned)),
            ),
        );
        let state = battle(cleric);
        let caster = state.character(CharacterId(1)).unwrap();

        let evaluation = evaluate_rules(caster, &state);
        let check = &evaluation.checks[0];
        assert_eq!(check.conditions.len(), 2);
        assert!(!check.conditions[0].passed);
        assert!(check.conditions[1].passed);
        assert!(check.targeting.is_none());
    }

    #[test]
    fn rules_after_selection_are_skipped() {
        let cleric = Character::player(1, "Cleric", 80)
            .with_status(StatusEffect::new(StatusKind::Defending, 1))
            .with_skill(strike().with_rule(Rule::always(3)).with_rule(Rule::always(1)));
        let state = battle(cleric);
        let caster = state.character(CharacterId(1)).unwrap();

        let evaluation = evaluate_rules(caster, &state);
        assert_eq!(evaluation.checks[1].outcome, RuleOutcome::Skipped);
        assert_eq!(evaluation.selected_check().unwrap().rule_index, 0);
    }
}
