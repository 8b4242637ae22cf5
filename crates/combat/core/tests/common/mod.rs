//! Shared roster and skill builders for integration tests.
#![allow(dead_code)]

use combat_core::{
    Character, CharacterId, CombatState, Condition, Rule, Skill, SkillEffect, StatusEffect,
    StatusKind, TargetingMode,
};

pub fn strike() -> Skill {
    Skill::new("strike", "Strike", 1, TargetingMode::NearestEnemy)
        .with_effect(SkillEffect::Damage { amount: 15 })
        .with_rule(Rule::always(0))
}

pub fn smash(targeting: TargetingMode, duration: u32) -> Skill {
    Skill::new("smash", "Smash", duration, targeting)
        .with_effect(SkillEffect::Damage { amount: 20 })
        .with_rule(Rule::always(0))
}

pub fn bash() -> Skill {
    Skill::new("bash", "Bash", 1, TargetingMode::NearestEnemy)
        .with_effect(SkillEffect::Damage { amount: 5 })
        .with_effect(SkillEffect::Interrupt)
        .with_rule(Rule::always(0))
}

pub fn stun_bolt() -> Skill {
    Skill::new("stun-bolt", "Stun Bolt", 1, TargetingMode::NearestEnemy)
        .with_effect(SkillEffect::Status {
            kind: StatusKind::Stunned,
            duration: 2,
            value: None,
        })
        .with_rule(Rule::always(0))
}

pub fn heal() -> Skill {
    Skill::new("heal", "Heal", 1, TargetingMode::AllyLowestHp)
        .with_effect(SkillEffect::Heal { amount: 20 })
        .with_rule(Rule::always(0))
}

/// Heal that only fires for allies under 60% HP.
pub fn triage() -> Skill {
    let mut skill = heal();
    skill.set_rules(vec![Rule::new(10).when(Condition::AllyHpBelow(60))]);
    skill
}

pub fn revive() -> Skill {
    Skill::new("revive", "Revive", 1, TargetingMode::AllyDead)
        .with_effect(SkillEffect::Revive { amount: 30 })
        .with_rule(Rule::always(0))
}

pub fn status(kind: StatusKind, duration: u32) -> StatusEffect {
    StatusEffect::new(kind, duration)
}

pub fn battle(players: Vec<Character>, enemies: Vec<Character>) -> CombatState {
    CombatState::new(players, enemies).expect("valid roster")
}

pub fn hp(state: &CombatState, id: u32) -> i32 {
    state
        .character(CharacterId(id))
        .expect("character exists")
        .current_hp
}

/// A mixed 3v3 that exercises every effect kind.
pub fn skirmish() -> CombatState {
    let players = vec![
        Character::player(1, "Knight", 120).with_skill(strike()),
        Character::player(2, "Cleric", 80)
            .with_skill(triage())
            .with_skill(revive())
            .with_skill(strike()),
        Character::player(3, "Rogue", 70)
            .with_skill(bash())
            .with_status(status(StatusKind::Enraged, 4).with_value(5)),
    ];
    let enemies = vec![
        Character::enemy(10, "Ogre", 150).with_skill(smash(TargetingMode::SingleEnemyLowestHp, 2)),
        Character::enemy(11, "Shaman", 60)
            .with_skill(stun_bolt())
            .with_status(status(StatusKind::Shielded, 6).with_value(25)),
        Character::enemy(12, "Spider", 40).with_skill(
            Skill::new("venom", "Venom", 2, TargetingMode::AllEnemies)
                .with_effect(SkillEffect::Status {
                    kind: StatusKind::Poisoned,
                    duration: 3,
                    value: Some(3),
                })
                .with_rule(Rule::always(0)),
        ),
    ];
    battle(players, enemies)
}
