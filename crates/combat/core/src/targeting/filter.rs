//! Target filter chain.
//!
//! Filters run in a fixed order over the selector's candidates:
//!
//! 1. **Dead-exclusion** drops candidates with `current_hp <= 0`. Skipped for
//!    `ally-dead`, whose whole point is selecting knocked-out characters.
//! 2. **Taunt-forcing** applies only to hostile modes cast by an enemy: if a
//!    living player has an active `taunting` status, the whole list becomes
//!    the leftmost such player. Player casters are never redirected.

use crate::skill::TargetingMode;
use crate::state::{Character, CharacterId, CombatState, Side, StatusKind};

/// Filter identifiers, in application order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::IntoStaticStr)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
#[strum(serialize_all = "kebab-case")]
pub enum FilterKind {
    DeadExclusion,
    TauntForcing,
}

/// What one filter did to the candidate list.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FilterStep {
    pub filter: FilterKind,
    /// False when the filter did not apply to this cast at all.
    pub applied: bool,
    pub removed: Vec<CharacterId>,
    /// Character forced into the list (taunt-forcing only).
    pub forced: Option<CharacterId>,
}

impl FilterStep {
    fn skipped(filter: FilterKind) -> Self {
        Self {
            filter,
            applied: false,
            removed: Vec::new(),
            forced: None,
        }
    }
}

/// Runs the filter chain, returning the final targets and one step per filter.
pub fn apply_filters(
    mode: TargetingMode,
    caster: &Character,
    candidates: Vec<CharacterId>,
    state: &CombatState,
) -> (Vec<CharacterId>, Vec<FilterStep>) {
    let (targets, dead_step) = exclude_dead(mode, candidates, state);
    let (targets, taunt_step) = force_taunt(mode, caster, targets, state);
    (targets, vec![dead_step, taunt_step])
}

fn exclude_dead(
    mode: TargetingMode,
    candidates: Vec<CharacterId>,
    state: &CombatState,
) -> (Vec<CharacterId>, FilterStep) {
    if mode.selects_knocked_out() {
        return (candidates, FilterStep::skipped(FilterKind::DeadExclusion));
    }

    let (kept, removed): (Vec<_>, Vec<_>) = candidates
        .into_iter()
        .partition(|id| state.character(*id).is_some_and(Character::is_alive));

    let step = FilterStep {
        filter: FilterKind::DeadExclusion,
        applied: true,
        removed,
        forced: None,
    };
    (kept, step)
}

fn force_taunt(
    mode: TargetingMode,
    caster: &Character,
    targets: Vec<CharacterId>,
    state: &CombatState,
) -> (Vec<CharacterId>, FilterStep) {
    if caster.side != Side::Enemy || !mode.is_hostile() {
        return (targets, FilterStep::skipped(FilterKind::TauntForcing));
    }

    let taunter = state
        .players
        .iter()
        .find(|p| p.is_alive() && p.has_status(StatusKind::Taunting));

    let Some(taunter) = taunter else {
        return (
            targets,
            FilterStep {
                filter: FilterKind::TauntForcing,
                applied: true,
                removed: Vec::new(),
                forced: None,
            },
        );
    };

    let removed = targets.into_iter().filter(|id| *id != taunter.id).collect();
    let step = FilterStep {
        filter: FilterKind::TauntForcing,
        applied: true,
        removed,
        forced: Some(taunter.id),
    };
    (vec![taunter.id], step)
}
