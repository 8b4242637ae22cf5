//! Condition evaluation.
//!
//! Conditions are pure predicates over `(caster, allies, enemies)`. They never
//! fail: missing data (no allies, zero max HP) simply evaluates to `false`.
//! `allies` is the caster's own roster and may contain the caster; every
//! "ally" condition skips the caster by id.

use crate::skill::Condition;
use crate::state::{Character, StatusKind};

/// Inputs a condition is evaluated against.
#[derive(Clone, Copy, Debug)]
pub struct ConditionContext<'a> {
    pub caster: &'a Character,
    pub allies: &'a [Character],
    pub enemies: &'a [Character],
}

impl<'a> ConditionContext<'a> {
    pub fn new(caster: &'a Character, allies: &'a [Character], enemies: &'a [Character]) -> Self {
        Self {
            caster,
            allies,
            enemies,
        }
    }

    fn living_allies(&self) -> impl Iterator<Item = &'a Character> + '_ {
        self.allies
            .iter()
            .filter(|c| c.is_alive() && c.id != self.caster.id)
    }

    fn living_enemies(&self) -> impl Iterator<Item = &'a Character> + '_ {
        self.enemies.iter().filter(|c| c.is_alive())
    }
}

/// Outcome of one condition together with the values it compared.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ConditionReading {
    pub passed: bool,
    pub expected: String,
    pub actual: String,
}

/// Evaluates a single condition.
pub fn evaluate(condition: &Condition, ctx: &ConditionContext<'_>) -> bool {
    inspect(condition, ctx).passed
}

/// Evaluates a condition and records expected and actual values.
pub fn inspect(condition: &Condition, ctx: &ConditionContext<'_>) -> ConditionReading {
    let caster = ctx.caster;

    let result = match *condition {
        Condition::HpBelow(pct) => ConditionReading {
            passed: hp_below(caster, pct),
            expected: format!("< {pct}%"),
            actual: hp_percent_label(caster),
        },
        Condition::HpAbove(pct) => ConditionReading {
            passed: hp_above(caster, pct),
            expected: format!("> {pct}%"),
            actual: hp_percent_label(caster),
        },
        Condition::AllyHpBelow(pct) => {
            let lowest = lowest_percent(ctx.living_allies());
            ConditionReading {
                passed: ctx.living_allies().any(|c| hp_below(c, pct)),
                expected: format!("an ally < {pct}%"),
                actual: lowest,
            }
        }
        Condition::EnemyHpBelow(pct) => {
            let lowest = lowest_percent(ctx.living_enemies());
            ConditionReading {
                passed: ctx.living_enemies().any(|c| hp_below(c, pct)),
                expected: format!("an enemy < {pct}%"),
                actual: lowest,
            }
        }
        Condition::AllyCount(n) => {
            let count = ctx.living_allies().count();
            ConditionReading {
                passed: count >= n as usize,
                expected: format!(">= {n} allies"),
                actual: format!("{count} allies"),
            }
        }
        Condition::EnemyCount(n) => {
            let count = ctx.living_enemies().count();
            ConditionReading {
                passed: count >= n as usize,
                expected: format!(">= {n} enemies"),
                actual: format!("{count} enemies"),
            }
        }
        Condition::AllyDead => {
            let fallen = ctx.allies.iter().filter(|c| c.is_knocked_out()).count();
            ConditionReading {
                passed: fallen > 0,
                expected: ">= 1 knocked-out ally".to_owned(),
                actual: format!("{fallen} knocked out"),
            }
        }
        Condition::SelfHasStatus(status) => {
            let has = caster.has_status(status);
            ConditionReading {
                passed: has,
                expected: format!("self {status}"),
                actual: presence(has),
            }
        }
        Condition::SelfLacksStatus(status) => {
            let has = caster.has_status(status);
            ConditionReading {
                passed: !has,
                expected: format!("self not {status}"),
                actual: presence(has),
            }
        }
        Condition::AllyHasStatus(status) => {
            let count = count_with(ctx.living_allies(), status);
            ConditionReading {
                passed: count > 0,
                expected: format!("an ally {status}"),
                actual: format!("{count} allies {status}"),
            }
        }
        Condition::EnemyHasStatus(status) => {
            let count = count_with(ctx.living_enemies(), status);
            ConditionReading {
                passed: count > 0,
                expected: format!("an enemy {status}"),
                actual: format!("{count} enemies {status}"),
            }
        }
        Condition::EnemyLacksStatus(status) => {
            let count = count_with(ctx.living_enemies(), status);
            ConditionReading {
                passed: count == 0,
                expected: format!("no enemy {status}"),
                actual: format!("{count} enemies {status}"),
            }
        }
    };

    tracing::trace!(
        caster = %caster.id,
        condition = %condition,
        passed = result.passed,
        actual = %result.actual,
        "condition checked"
    );
    result
}

/// `current / max < pct / 100` without division.
fn hp_below(character: &Character, pct: u32) -> bool {
    character.max_hp > 0
        && i64::from(character.current_hp) * 100 < i64::from(pct) * i64::from(character.max_hp)
}

fn hp_above(character: &Character, pct: u32) -> bool {
    character.max_hp > 0
        && i64::from(character.current_hp) * 100 > i64::from(pct) * i64::from(character.max_hp)
}

fn hp_percent_label(character: &Character) -> String {
    if character.max_hp <= 0 {
        return "unknown".to_owned();
    }
    let pct = i64::from(character.current_hp) * 100 / i64::from(character.max_hp);
    format!("{pct}% ({}/{})", character.current_hp, character.max_hp)
}

fn lowest_percent<'a>(characters: impl Iterator<Item = &'a Character>) -> String {
    characters
        .filter(|c| c.max_hp > 0)
        .min_by_key(|c| i64::from(c.current_hp) * 100 / i64::from(c.max_hp))
        .map(|c| format!("lowest {} at {}", c.id, hp_percent_label(c)))
        .unwrap_or_else(|| "none living".to_owned())
}

fn count_with<'a>(characters: impl Iterator<Item = &'a Character>, status: StatusKind) -> usize {
    characters.filter(|c| c.has_status(status)).count()
}

fn presence(has: bool) -> String {
    if has { "present" } else { "absent" }.to_owned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::StatusEffect;

    fn party() -> (Vec<Character>, Vec<Character>) {
        let players = vec![
            Character::player(1, "Cleric", 100).with_hp(40),
            Character::player(2, "Knight", 120).with_hp(30),
            Character::player(3, "Fallen", 80).with_hp(0),
        ];
        let enemies = vec![
            Character::enemy(10, "Goblin", 50)
                .with_status(StatusEffect::new(StatusKind::Taunting, 2)),
            Character::enemy(11, "Wolf", 60).with_hp(0),
        ];
        (players, enemies)
    }

    fn check(condition: Condition) -> bool {
        let (players, enemies) = party();
        let ctx = ConditionContext::new(&players[0], &players, &enemies);
        evaluate(&condition, &ctx)
    }

    #[test]
    fn hp_thresholds_are_strict() {
        assert!(check(Condition::HpBelow(41)));
        assert!(!check(Condition::HpBelow(40)));
        assert!(check(Condition::HpAbove(39)));
        assert!(!check(Condition::HpAbove(40)));
    }

    #[test]
    fn ally_conditions_skip_the_caster() {
        // Knight sits at 25%; the caster at 40% must not count as an ally.
        assert!(check(Condition::AllyHpBelow(30)));
        assert!(!check(Condition::AllyHpBelow(25)));
        assert!(check(Condition::AllyCount(1)));
        assert!(!check(Condition::AllyCount(2)));
        assert!(check(Condition::AllyDead));
    }

    #[test]
    fn enemy_conditions_count_living_only() {
        assert!(check(Condition::EnemyCount(1)));
        assert!(!check(Condition::EnemyCount(2)));
        assert!(check(Condition::EnemyHasStatus(StatusKind::Taunting)));
        assert!(!check(Condition::EnemyLacksStatus(StatusKind::Taunting)));
        assert!(check(Condition::EnemyLacksStatus(StatusKind::Poisoned)));
    }

    #[test]
    fn missing_data_is_false() {
        let lonely = Character::player(1, "Solo", 0);
        let allies = vec![lonely.clone()];
        let ctx = ConditionContext::new(&lonely, &allies, &[]);
        assert!(!evaluate(&Condition::HpBelow(100), &ctx));
        assert!(!evaluate(&Condition::AllyHpBelow(100), &ctx));
        assert!(!evaluate(&Condition::EnemyCount(1), &ctx));
        assert!(!evaluate(&Condition::AllyHasStatus(StatusKind::Defending), &ctx));
    }

    #[test]
    fn inspect_reports_actual_values() {
        let (players, enemies) = party();
        let ctx = ConditionContext::new(&players[0], &players, &enemies);
        let reading = inspect(&Condition::HpBelow(30), &ctx);
        assert!(!reading.passed);
        assert_eq!(reading.expected, "< 30%");
        assert_eq!(reading.actual, "40% (40/100)");
    }
}
