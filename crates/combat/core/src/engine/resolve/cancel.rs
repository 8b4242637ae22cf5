//! Action cancellation (substep 6).

use crate::env::CombatEnv;
use crate::event::CombatEvent;
use crate::state::{Action, Character, Tick};
use crate::trace::{ResolutionSubstep, SubstepDetail};

use super::super::reducer::StateReducer;
use super::Resolving;

/// Removes the queued action of every living target hit by an interrupt or a
/// newly applied stun, however many ticks it had left.
///
/// Actions resolving this same tick have already left the queue and cannot
/// be cancelled.
pub(crate) fn apply(
    reducer: &mut StateReducer<'_>,
    resolving: &[Resolving],
    env: &CombatEnv<'_>,
    tick: Tick,
    cancelled: &mut Vec<Action>,
    trace: &mut ResolutionSubstep,
) -> Vec<CombatEvent> {
    let mut events = Vec::new();

    for entry in resolving {
        for (effect, target_id) in entry.effect_targets() {
            if !effect.cancels_action() {
                continue;
            }
            let Some(target) = reducer
                .state()
                .character(target_id)
                .filter(|t| t.is_alive())
                .cloned()
            else {
                continue;
            };
            let Some(action) = reducer.queue().remove(target_id) else {
                continue;
            };

            let label = skill_label(&target, &action, env);
            tracing::debug!(
                caster = %entry.caster.id,
                target = %target_id,
                skill = %action.skill_id,
                ticks_remaining = action.ticks_remaining,
                "action cancelled"
            );
            trace.push(
                SubstepDetail::new(
                    target_id,
                    i32::try_from(action.ticks_remaining).unwrap_or(i32::MAX),
                    format!(
                        "{effect_kind} cancels {label} with {} ticks left",
                        action.ticks_remaining,
                        effect_kind = effect.kind()
                    ),
                )
                .by(entry.caster.id, entry.skill.name.clone()),
            );
            events.push(CombatEvent::action_cancelled(
                tick,
                &entry.caster,
                &target,
                &label,
            ));
            cancelled.push(action);
        }
    }

    events
}

/// Display name of a queued skill; falls back to the raw id.
fn skill_label(owner: &Character, action: &Action, env: &CombatEnv<'_>) -> String {
    owner
        .skill(&action.skill_id)
        .map(|s| s.name.clone())
        .or_else(|| env.skill(&action.skill_id).ok().map(|s| s.name))
        .unwrap_or_else(|| action.skill_id.to_string())
}
