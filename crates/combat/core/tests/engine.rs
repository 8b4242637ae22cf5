//! Engine entry points: the plain and debug paths, catalogs, the tick cap, and errors.

mod common;

use combat_core::{
    Action, BattleStatus, Character, CharacterId, CombatConfig, CombatEngine, CombatEnv,
    CombatError, EngineError, EventKind, Rule, RuleOutcome, Skill, SkillEffect, SkillId,
    StatusKind, SubstepKind, TargetingMode, Tick, execute_tick, execute_tick_with_debug,
    run_battle,
};
use common::*;

// ============================================================================
// Tick lifecycle
// ============================================================================

#[test]
fn test_tick_does_not_touch_input() {
    let state = skirmish();
    let before = state.clone();

    let outcome = execute_tick(&state).expect("tick succeeds");

    assert_eq!(state, before);
    assert_ne!(outcome.state, before);
    assert_eq!(outcome.state.tick, Tick(1));
}

#[test]
fn test_events_are_appended_to_log() {
    let state = skirmish();
    let first = execute_tick(&state).expect("tick 1");
    let second = execute_tick(&first.state).expect("tick 2");

    assert_eq!(first.state.event_log, first.events);
    let mut expected = first.events.clone();
    expected.extend(second.events.iter().cloned());
    assert_eq!(second.state.event_log, expected);
}

#[test]
fn test_finished_battle_is_a_no_op() {
    let state = battle(
        vec![Character::player(1, "Knight", 100).with_skill(strike())],
        vec![Character::enemy(10, "Goblin", 10)],
    );
    let ended = execute_tick(&state).expect("tick succeeds");
    assert_eq!(ended.state.battle_status, BattleStatus::Victory);

    let again = execute_tick(&ended.state).expect("tick succeeds");

    assert_eq!(again.state, ended.state);
    assert!(again.events.is_empty());
    assert!(again.battle_ended);
}

#[test]
fn test_run_battle_stops_at_cap() {
    let state = battle(
        vec![Character::player(1, "Knight", 100)],
        vec![Character::enemy(10, "Goblin", 40)],
    );

    let end = run_battle(state, 5).expect("battle runs");

    assert_eq!(end.tick, Tick(5));
    assert_eq!(end.battle_status, BattleStatus::Ongoing);
}

#[test]
fn test_run_battle_reaches_victory() {
    let state = battle(
        vec![Character::player(1, "Knight", 100).with_skill(strike())],
        vec![Character::enemy(10, "Goblin", 40)],
    );

    let end = run_battle(state, CombatConfig::DEFAULT_MAX_TICKS).expect("battle runs");

    // 40 HP at 15 per tick.
    assert_eq!(end.tick, Tick(3));
    assert_eq!(end.battle_status, BattleStatus::Victory);
}

#[test]
fn test_engine_run_uses_configured_cap() {
    let env = CombatEnv::empty().with_config(CombatConfig::new().with_max_ticks(7));
    let engine = CombatEngine::new(env);
    let state = battle(
        vec![Character::player(1, "Knight", 100)],
        vec![Character::enemy(10, "Goblin", 40)],
    );

    let end = engine.run(state).expect("battle runs");
    assert_eq!(end.tick, Tick(7));
}

#[test]
fn test_defend_percent_is_configurable() {
    let env = CombatEnv::empty().with_config(CombatConfig::new().with_defend_percent(20));
    let engine = CombatEngine::new(env);
    let state = battle(
        vec![Character::player(1, "Knight", 100).with_skill(strike())],
        vec![
            Character::enemy(10, "Dummy", 100)
                .with_status(status(combat_core::StatusKind::Defending, 3)),
        ],
    );

    let outcome = engine.execute_tick(&state).expect("tick succeeds");
    assert_eq!(hp(&outcome.state, 10), 97);
}

// ============================================================================
// Skill lookup
// ============================================================================

#[test]
fn test_unknown_skill_is_an_error() {
    let mut state = battle(
        vec![Character::player(1, "Knight", 100)],
        vec![Character::enemy(10, "Goblin", 40)],
    );
    state
        .enqueue_action(Action::new("meteor", CharacterId(1), vec![CharacterId(10)], 0))
        .expect("knight exists");

    let err = execute_tick(&state).expect_err("meteor is unknown");

    assert_eq!(
        err,
        EngineError::UnknownSkill {
            skill: SkillId::new("meteor"),
            caster: CharacterId(1),
        }
    );
    assert_eq!(err.error_code(), "ENGINE_UNKNOWN_SKILL");
}

#[test]
fn test_catalog_resolves_unequipped_skill() {
    let catalog = vec![strike()];
    let engine = CombatEngine::new(CombatEnv::with_catalog(&catalog));
    let mut state = battle(
        vec![Character::player(1, "Knight", 100)],
        vec![Character::enemy(10, "Goblin", 40)],
    );
    state
        .enqueue_action(Action::new("strike", CharacterId(1), vec![CharacterId(10)], 0))
        .expect("knight exists");

    let outcome = engine.execute_tick(&state).expect("catalog has strike");

    assert_eq!(hp(&outcome.state, 10), 25);
}

#[test]
fn test_fallen_caster_action_is_dropped() {
    let mut state = battle(
        vec![Character::player(1, "Knight", 100).with_hp(0)],
        vec![Character::enemy(10, "Goblin", 40)],
    );
    state.players.push(Character::player(2, "Squire", 100));
    state
        .enqueue_action(Action::new("meteor", CharacterId(1), vec![CharacterId(10)], 0))
        .expect("knight exists");

    let outcome = execute_tick(&state).expect("fallen caster is skipped");

    assert_eq!(hp(&outcome.state, 10), 40);
    assert!(outcome.state.action_queue.is_empty());
}

// ============================================================================
// Debug path
// ============================================================================

#[test]
fn test_debug_path_matches_plain_path() {
    let mut state = skirmish();
    for _ in 0..40 {
        let plain = execute_tick(&state).expect("plain tick");
        let debug = execute_tick_with_debug(&state).expect("debug tick");

        assert_eq!(debug.outcome, plain);
        assert_eq!(debug.debug_info.tick, plain.state.tick);
        if plain.battle_ended {
            break;
        }
        state = plain.state;
    }
}

#[test]
fn test_debug_records_rules_targeting_and_substeps() {
    let state = battle(
        vec![
            Character::player(1, "Knight", 100).with_skill(strike()),
            Character::player(2, "Cleric", 100).with_skill(triage()),
        ],
        vec![Character::enemy(10, "Goblin", 40)],
    );

    let debug = execute_tick_with_debug(&state).expect("tick succeeds");
    let info = &debug.debug_info;

    assert_eq!(info.tick, Tick(1));
    assert_eq!(info.rule_evaluations.len(), 3);

    let cleric = info
        .rule_evaluations
        .iter()
        .find(|e| e.caster == CharacterId(2))
        .expect("cleric evaluated");
    assert!(cleric.selected.is_none());
    assert_eq!(cleric.checks[0].outcome, RuleOutcome::ConditionFailed);
    assert!(!cleric.checks[0].conditions[0].passed);

    assert_eq!(info.targeting_decisions.len(), 1);
    let decision = &info.targeting_decisions[0];
    assert_eq!(decision.caster, CharacterId(1));
    assert_eq!(decision.mode, TargetingMode::NearestEnemy);
    assert_eq!(decision.final_targets, vec![CharacterId(10)]);

    let damage = info
        .substep(SubstepKind::DamageCalculation)
        .expect("damage substep recorded");
    assert_eq!(damage.details.len(), 1);
    assert_eq!(damage.details[0].value, 15);
    assert!(info.substep(SubstepKind::ActionCancellation).is_some());
}

#[test]
fn test_targeting_is_recorded_on_the_resolve_tick() {
    let state = battle(
        vec![Character::player(1, "Knight", 100).with_skill(smash(TargetingMode::NearestEnemy, 3))],
        vec![Character::enemy(10, "Goblin", 100)],
    );

    let queued = execute_tick_with_debug(&state).expect("tick 1");
    assert_eq!(queued.debug_info.rule_evaluations.len(), 2);
    assert!(queued.debug_info.targeting_decisions.is_empty());

    let waiting = execute_tick_with_debug(&queued.outcome.state).expect("tick 2");
    assert!(waiting.debug_info.targeting_decisions.is_empty());

    let resolved = execute_tick_with_debug(&waiting.outcome.state).expect("tick 3");
    assert_eq!(resolved.debug_info.tick, Tick(3));
    assert_eq!(resolved.debug_info.targeting_decisions.len(), 1);
    let decision = &resolved.debug_info.targeting_decisions[0];
    assert_eq!(decision.caster, CharacterId(1));
    assert_eq!(decision.skill_id, SkillId::new("smash"));
    assert_eq!(decision.final_targets, vec![CharacterId(10)]);
    assert_eq!(hp(&resolved.outcome.state, 10), 80);
}

#[test]
fn test_one_targeting_decision_per_resolved_action() {
    let mut state = skirmish();
    for _ in 0..60 {
        let debug = execute_tick_with_debug(&state).expect("debug tick");
        let resolved: Vec<CharacterId> = debug
            .outcome
            .events
            .iter()
            .filter(|e| e.kind == EventKind::ActionResolved)
            .filter_map(|e| e.actor)
            .collect();
        let targeted: Vec<CharacterId> = debug
            .debug_info
            .targeting_decisions
            .iter()
            .map(|d| d.caster)
            .collect();

        assert_eq!(targeted, resolved, "tick {}", debug.debug_info.tick);
        if debug.outcome.battle_ended {
            break;
        }
        state = debug.outcome.state;
    }
}

#[test]
fn test_scripted_action_records_its_target_list() {
    let mut state = battle(
        vec![Character::player(1, "Knight", 100).with_skill(strike())],
        vec![Character::enemy(10, "Goblin", 40), Character::enemy(11, "Orc", 40)],
    );
    state
        .enqueue_action(Action::new("strike", CharacterId(1), vec![CharacterId(11)], 0))
        .expect("knight exists");

    let debug = execute_tick_with_debug(&state).expect("tick succeeds");

    assert_eq!(debug.debug_info.targeting_decisions.len(), 1);
    let decision = &debug.debug_info.targeting_decisions[0];
    assert_eq!(decision.mode, TargetingMode::NearestEnemy);
    assert_eq!(decision.raw_candidates, vec![CharacterId(11)]);
    assert_eq!(decision.final_targets, vec![CharacterId(11)]);
    assert!(decision.filters.is_empty());
}

#[test]
fn test_long_counts_saturate_trace_values() {
    let hex = Skill::new("hex", "Hex", 1, TargetingMode::NearestEnemy)
        .with_effect(SkillEffect::Status {
            kind: StatusKind::Stunned,
            duration: u32::MAX,
            value: None,
        })
        .with_rule(Rule::always(0));
    let mut state = battle(
        vec![Character::player(1, "Witch", 100).with_skill(hex)],
        vec![Character::enemy(10, "Ogre", 100).with_skill(smash(TargetingMode::NearestEnemy, 1))],
    );
    state
        .enqueue_action(Action::new("smash", CharacterId(10), vec![CharacterId(1)], u32::MAX))
        .expect("ogre exists");

    let debug = execute_tick_with_debug(&state).expect("tick succeeds");
    let info = &debug.debug_info;

    let applied = info
        .substep(SubstepKind::StatusApplication)
        .expect("status substep recorded");
    assert_eq!(applied.details.len(), 1);
    assert_eq!(applied.details[0].value, i32::MAX);

    let cancelled = info
        .substep(SubstepKind::ActionCancellation)
        .expect("cancel substep recorded");
    assert_eq!(cancelled.details.len(), 1);
    assert_eq!(cancelled.details[0].value, i32::MAX);
    assert!(debug.outcome.state.action_queue.is_empty());
}

#[test]
fn test_debug_on_finished_battle_is_empty() {
    let state = battle(
        vec![Character::player(1, "Knight", 100).with_skill(strike())],
        vec![Character::enemy(10, "Goblin", 10)],
    );
    let ended = execute_tick(&state).expect("tick succeeds").state;

    let debug = execute_tick_with_debug(&ended).expect("tick succeeds");

    assert!(debug.debug_info.is_empty());
    assert_eq!(debug.debug_info.tick, ended.tick);
    assert!(debug.outcome.events.is_empty());
}

#[test]
fn test_knockout_event_names_character() {
    let state = battle(
        vec![Character::player(1, "Knight", 100).with_skill(strike())],
        vec![Character::enemy(10, "Goblin", 10)],
    );

    let outcome = execute_tick(&state).expect("tick succeeds");
    let knockout = outcome
        .events
        .iter()
        .find(|e| e.kind == EventKind::Knockout)
        .expect("knockout event");

    assert_eq!(knockout.target, Some(CharacterId(10)));
    assert!(knockout.message.contains("Goblin"));
}
