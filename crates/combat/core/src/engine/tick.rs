//! The five-phase tick pipeline.
//!
//! There is exactly one pipeline; plain and debug execution differ only in
//! the [`TraceSink`] passed in. The input state is cloned once and all
//! mutation happens on the clone through a [`StateReducer`].

use crate::ai::evaluate_rules;
use crate::env::CombatEnv;
use crate::event::CombatEvent;
use crate::state::{Action, BattleStatus, CharacterId, CombatState, Side, Tick};
use crate::trace::TraceSink;

use super::errors::{EngineError, TickPhase};
use super::reducer::StateReducer;
use super::resolve::resolve_ready;
use super::status::process_statuses;
use super::TickOutcome;

pub(crate) fn run_tick<S: TraceSink>(
    state: &CombatState,
    env: &CombatEnv<'_>,
    sink: &mut S,
) -> Result<TickOutcome, EngineError> {
    if state.is_over() {
        return Ok(TickOutcome {
            state: state.clone(),
            events: Vec::new(),
            battle_ended: true,
            cancelled_actions: Vec::new(),
        });
    }

    let tick = state.tick.next();
    let span = tracing::debug_span!("tick", tick = tick.0);
    let _enter = span.enter();

    let mut next = state.clone();
    let mut reducer = StateReducer::new(&mut next);
    reducer.advance_tick(tick);
    reducer.sync_current_actions();

    let mut events = Vec::new();

    // Phase 1
    tracing::debug!(phase = %TickPhase::RuleEvaluation);
    events.extend(evaluate_idle(&mut reducer, tick, sink));

    // Phase 2
    let decremented = reducer.queue().countdown();
    tracing::debug!(phase = %TickPhase::Countdown, decremented);

    // Phase 3
    let ready = reducer.queue().take_ready();
    tracing::debug!(phase = %TickPhase::Resolution, ready = ready.len());
    let resolution = resolve_ready(&mut reducer, ready, env, tick, sink)?;
    events.extend(resolution.events);

    // Phase 4
    tracing::debug!(phase = %TickPhase::StatusProcessing);
    events.extend(process_statuses(&mut reducer, tick));

    // Phase 5
    tracing::debug!(phase = %TickPhase::Cleanup);
    if let Some(event) = settle_battle(&mut reducer, tick) {
        events.push(event);
    }

    reducer.append_events(&events);
    let battle_ended = reducer.state().is_over();

    Ok(TickOutcome {
        state: next,
        events,
        battle_ended,
        cancelled_actions: resolution.cancelled,
    })
}

/// Phase 1: every living, unstunned character without an action picks one.
fn evaluate_idle<S: TraceSink>(
    reducer: &mut StateReducer<'_>,
    tick: Tick,
    sink: &mut S,
) -> Vec<CombatEvent> {
    let idle: Vec<CharacterId> = reducer
        .state()
        .characters()
        .filter(|c| c.is_idle())
        .map(|c| c.id)
        .collect();

    let mut events = Vec::new();
    for id in idle {
        let Some(caster) = reducer.state().character(id) else {
            continue;
        };
        let evaluation = evaluate_rules(caster, reducer.state());

        if let Some(selected) = evaluation.selected.as_ref() {
            tracing::debug!(
                caster = %id,
                skill = %selected.skill_id,
                priority = selected.priority,
                targets = selected.targets.len(),
                "action queued"
            );
            events.push(CombatEvent::action_queued(
                tick,
                caster,
                &selected.skill_name,
                selected.base_duration,
            ));

            let mut action = Action::new(
                selected.skill_id.clone(),
                id,
                selected.targets.clone(),
                selected.base_duration,
            );
            if let Some(resolution) = evaluation
                .selected_check()
                .and_then(|check| check.targeting.clone())
            {
                action = action.with_targeting(resolution);
            }

            reducer.queue().push(action);
        }

        sink.rule_evaluated(evaluation);
    }

    reducer.sync_current_actions();
    events
}

/// Phase 5: victory when every enemy is down (checked first), defeat when
/// every player is down.
fn settle_battle(reducer: &mut StateReducer<'_>, tick: Tick) -> Option<CombatEvent> {
    let state = reducer.state();
    let (status, event) = if state.side_defeated(Side::Enemy) {
        (BattleStatus::Victory, CombatEvent::victory(tick))
    } else if state.side_defeated(Side::Player) {
        (BattleStatus::Defeat, CombatEvent::defeat(tick))
    } else {
        return None;
    };

    tracing::debug!(%status, "battle over");
    reducer.finish_battle(status);
    Some(event)
}
