//! Damage calculation and shield absorption (substeps 1 and 3).

use std::collections::BTreeMap;

use crate::config::CombatConfig;
use crate::skill::SkillEffect;
use crate::state::{CharacterId, StatusKind};
use crate::trace::{ResolutionSubstep, SubstepDetail};

use super::super::reducer::StateReducer;
use super::{Resolving, Snapshot};

/// One damage effect landing on one target.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct DamageInstance {
    pub caster: CharacterId,
    pub target: CharacterId,
    pub skill_name: String,
    /// Base plus the caster's enraged bonus.
    pub raw: i32,
    /// After the target's defending reduction.
    pub adjusted: i32,
    pub absorbed: i32,
    /// Damage that reaches HP.
    pub overflow: i32,
}

/// Substep 1: computes every damage instance from pre-tick values.
///
/// `raw = base + enraged bonus`, then `adjusted = raw * defend_percent / 100`
/// (rounded down) against a defending target. Knocked-out targets take no
/// damage.
pub(crate) fn calculate(
    resolving: &[Resolving],
    snapshot: &Snapshot,
    config: &CombatConfig,
    trace: &mut ResolutionSubstep,
) -> Vec<DamageInstance> {
    let mut instances = Vec::new();

    for entry in resolving {
        let bonus = entry
            .caster
            .status_effects
            .value_of(StatusKind::Enraged)
            .unwrap_or(0);

        for (effect, target_id) in entry.effect_targets() {
            let SkillEffect::Damage { amount } = *effect else {
                continue;
            };
            let Some(target) = snapshot.character(target_id).filter(|t| t.is_alive()) else {
                continue;
            };

            let raw = amount.saturating_add(bonus).max(0);
            let defending = target.has_status(StatusKind::Defending);
            let adjusted = if defending {
                let reduced = i64::from(raw) * i64::from(config.defend_percent) / 100;
                i32::try_from(reduced).unwrap_or(i32::MAX)
            } else {
                raw
            };

            let description = match (bonus, defending) {
                (0, false) => format!("base {amount}"),
                (_, false) => format!("base {amount} + enraged {bonus} = {raw}"),
                (0, true) => format!(
                    "base {amount}, defending {}% -> {adjusted}",
                    config.defend_percent
                ),
                (_, true) => format!(
                    "base {amount} + enraged {bonus} = {raw}, defending {}% -> {adjusted}",
                    config.defend_percent
                ),
            };
            trace.push(
                SubstepDetail::new(target_id, adjusted, description)
                    .by(entry.caster.id, entry.skill.name.clone()),
            );

            instances.push(DamageInstance {
                caster: entry.caster.id,
                target: target_id,
                skill_name: entry.skill.name.clone(),
                raw,
                adjusted,
                absorbed: 0,
                overflow: adjusted,
            });
        }
    }

    instances
}

/// Substep 3: runs every instance through its target's shield pool.
///
/// Instances against the same target drain one shared pool in resolution
/// order. A drained shield stays on the target with a zero pool.
pub(crate) fn absorb(
    instances: &mut [DamageInstance],
    snapshot: &Snapshot,
    reducer: &mut StateReducer<'_>,
    trace: &mut ResolutionSubstep,
) {
    let mut pools: BTreeMap<CharacterId, i32> = BTreeMap::new();

    for hit in instances.iter_mut() {
        let shield = snapshot
            .character(hit.target)
            .and_then(|t| t.status_effects.get(StatusKind::Shielded));
        let Some(shield) = shield else {
            continue;
        };

        let pool = pools
            .entry(hit.target)
            .or_insert_with(|| shield.value.unwrap_or(0).max(0));
        let before = *pool;
        hit.absorbed = before.min(hit.adjusted);
        hit.overflow = hit.adjusted - hit.absorbed;
        *pool = before - hit.absorbed;

        trace.push(
            SubstepDetail::new(
                hit.target,
                hit.absorbed,
                format!(
                    "shield {before} absorbs {}, {} overflows, {} left",
                    hit.absorbed, hit.overflow, *pool
                ),
            )
            .by(hit.caster, hit.skill_name.clone()),
        );
    }

    let mut roster = reducer.roster();
    for (target, pool) in pools {
        roster.set_shield_pool(target, pool);
    }
}
