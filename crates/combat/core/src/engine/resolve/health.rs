//! Health update (substep 4).

use crate::state::CharacterId;
use crate::trace::{ResolutionSubstep, SubstepDetail};

use super::super::reducer::StateReducer;
use super::Snapshot;
use super::damage::DamageInstance;
use super::healing::HealInstance;

/// Sums every HP delta per character and applies them at once, clamped into
/// `0..=max_hp`. Characters are updated in roster order.
///
/// Sums are taken in `i64` so any number of hits on one target cannot wrap.
pub(crate) fn apply(
    reducer: &mut StateReducer<'_>,
    snapshot: &Snapshot,
    hits: &[DamageInstance],
    heals: &[HealInstance],
    trace: &mut ResolutionSubstep,
) {
    let ids: Vec<CharacterId> = snapshot.characters().map(|c| c.id).collect();

    for id in ids {
        let damage: i64 = hits
            .iter()
            .filter(|h| h.target == id)
            .map(|h| i64::from(h.overflow))
            .sum();
        let healing: i64 = heals
            .iter()
            .filter(|h| h.target == id)
            .map(|h| i64::from(h.amount))
            .sum();
        let touched = hits.iter().any(|h| h.target == id) || heals.iter().any(|h| h.target == id);
        if !touched {
            continue;
        }

        let delta = (healing - damage).clamp(i64::from(i32::MIN), i64::from(i32::MAX));
        let delta = i32::try_from(delta).unwrap_or_default();
        if let Some((before, after)) = reducer.roster().adjust_hp(id, delta) {
            trace.push(SubstepDetail::new(
                id,
                after - before,
                format!("{before} -> {after} (-{damage} +{healing})"),
            ));
        }
    }
}
