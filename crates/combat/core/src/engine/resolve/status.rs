//! Status application (substep 5).

use crate::event::CombatEvent;
use crate::skill::SkillEffect;
use crate::state::{StatusEffect, StatusKind, Tick};
use crate::trace::{ResolutionSubstep, SubstepDetail};

use super::super::reducer::StateReducer;
use super::Resolving;

/// Sets or replaces the statuses of every resolving skill on targets that are
/// alive after the health update. Returns the narrated applications.
pub(crate) fn apply(
    reducer: &mut StateReducer<'_>,
    resolving: &[Resolving],
    tick: Tick,
    trace: &mut ResolutionSubstep,
) -> Vec<CombatEvent> {
    let mut events = Vec::new();

    for entry in resolving {
        for (effect, target_id) in entry.effect_targets() {
            let status = match *effect {
                SkillEffect::Shield { amount, duration } => {
                    StatusEffect::new(StatusKind::Shielded, duration).with_value(amount)
                }
                SkillEffect::Status {
                    kind,
                    duration,
                    value,
                } => StatusEffect {
                    kind,
                    duration,
                    value,
                },
                _ => continue,
            };

            let Some(target) = reducer
                .state()
                .character(target_id)
                .filter(|t| t.is_alive())
                .cloned()
            else {
                continue;
            };

            reducer.roster().apply_status(target_id, status);

            let replaced = if target.has_status(status.kind) {
                " (replaced)"
            } else {
                ""
            };
            trace.push(
                SubstepDetail::new(
                    target_id,
                    status
                        .value
                        .unwrap_or_else(|| i32::try_from(status.duration).unwrap_or(i32::MAX)),
                    format!(
                        "{} for {} ticks{replaced}",
                        status.kind, status.duration
                    ),
                )
                .by(entry.caster.id, entry.skill.name.clone()),
            );
            events.push(CombatEvent::status_applied(
                tick,
                &entry.caster,
                &target,
                &entry.skill.name,
                status.kind,
                status.duration,
            ));
        }
    }

    events
}
