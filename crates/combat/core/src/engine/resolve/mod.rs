//! Simultaneous action resolution (phase 3).
//!
//! Every action whose countdown reached zero resolves in one batch. Players
//! resolve before enemies, each side in roster order. All numbers are
//! computed from the HP and statuses the batch started with, so one actor's
//! damage this tick never changes another actor's numbers this tick.
//!
//! # Substeps
//!
//! 1. Damage calculation
//! 2. Healing calculation
//! 3. Shield absorption
//! 4. Health update
//! 5. Status application
//! 6. Action cancellation
//!
//! followed by knockout cleanup of every character left at zero HP.
mod cancel;
mod damage;
mod healing;
mod health;
mod status;

use crate::env::CombatEnv;
use crate::error::CombatError;
use crate::event::CombatEvent;
use crate::skill::{Skill, SkillEffect};
use crate::state::{Action, Character, CharacterId, CombatState, Tick};
use crate::targeting::TargetResolution;
use crate::trace::{
    ResolutionSubstep, SubstepDetail, SubstepKind, TargetingDecision, TraceSink,
};

use super::errors::EngineError;
use super::reducer::StateReducer;

/// Events and cancellations produced by one resolution batch.
#[derive(Debug, Default)]
pub(crate) struct Resolution {
    pub events: Vec<CombatEvent>,
    pub cancelled: Vec<Action>,
}

/// A ready action paired with its skill and the caster as it stood when the
/// batch started.
#[derive(Clone, Debug)]
pub(crate) struct Resolving {
    pub action: Action,
    pub skill: Skill,
    pub caster: Character,
}

impl Resolving {
    /// Effect/target pairs in effect order, then target order.
    pub fn effect_targets(&self) -> impl Iterator<Item = (&SkillEffect, CharacterId)> + '_ {
        self.skill.effects.iter().flat_map(move |effect| {
            self.action
                .targets
                .iter()
                .map(move |target| (effect, *target))
        })
    }
}

/// Rosters as they stood when the batch started.
pub(crate) struct Snapshot {
    characters: Vec<Character>,
}

impl Snapshot {
    pub fn capture(state: &CombatState) -> Self {
        Self {
            characters: state.characters().cloned().collect(),
        }
    }

    pub fn character(&self, id: CharacterId) -> Option<&Character> {
        self.characters.iter().find(|c| c.id == id)
    }

    /// Players first, then enemies, each in roster order.
    pub fn characters(&self) -> impl Iterator<Item = &Character> {
        self.characters.iter()
    }
}

/// Resolves every ready action and performs knockout cleanup.
///
/// # Errors
///
/// Returns `EngineError::UnknownSkill` if a ready action names a skill that
/// is neither equipped by its caster nor in the catalog, and
/// `EngineError::UnknownCharacter` if its caster left the rosters.
pub(crate) fn resolve_ready<S: TraceSink>(
    reducer: &mut StateReducer<'_>,
    ready: Vec<Action>,
    env: &CombatEnv<'_>,
    tick: Tick,
    sink: &mut S,
) -> Result<Resolution, EngineError> {
    let snapshot = Snapshot::capture(reducer.state());
    let resolving = prepare(ready, reducer.state(), &snapshot, env)?;
    if resolving.is_empty() {
        return Ok(Resolution::default());
    }

    let mut events = Vec::with_capacity(resolving.len());
    for entry in &resolving {
        tracing::debug!(
            caster = %entry.caster.id,
            skill = %entry.skill.id,
            targets = entry.action.targets.len(),
            "resolving action"
        );
        let resolution = entry.action.targeting.clone().unwrap_or_else(|| {
            TargetResolution::scripted(entry.skill.targeting, entry.action.targets.clone())
        });
        sink.action_targeted(TargetingDecision::new(
            entry.caster.id,
            entry.skill.id.clone(),
            resolution,
        ));
        events.push(CombatEvent::action_resolved(
            tick,
            &entry.caster,
            &entry.skill.name,
        ));
    }

    // Substeps 1-3 only compute; nothing is written before substep 3's pools.
    let mut damage_trace = ResolutionSubstep::new(SubstepKind::DamageCalculation);
    let mut hits = damage::calculate(&resolving, &snapshot, env.config(), &mut damage_trace);

    let mut healing_trace = ResolutionSubstep::new(SubstepKind::HealingCalculation);
    let heals = healing::calculate(&resolving, &snapshot, &mut healing_trace);

    let mut shield_trace = ResolutionSubstep::new(SubstepKind::ShieldAbsorption);
    damage::absorb(&mut hits, &snapshot, reducer, &mut shield_trace);

    for hit in &hits {
        tracing::trace!(
            caster = %hit.caster,
            target = %hit.target,
            raw = hit.raw,
            adjusted = hit.adjusted,
            absorbed = hit.absorbed,
            "damage"
        );
        if let (Some(caster), Some(target)) =
            (snapshot.character(hit.caster), snapshot.character(hit.target))
        {
            events.push(CombatEvent::damage(
                tick,
                caster,
                target,
                &hit.skill_name,
                hit.overflow,
                hit.absorbed,
            ));
        }
    }
    for heal in &heals {
        tracing::trace!(
            caster = %heal.caster,
            target = %heal.target,
            amount = heal.amount,
            revive = heal.revive,
            "healing"
        );
        if let (Some(caster), Some(target)) =
            (snapshot.character(heal.caster), snapshot.character(heal.target))
        {
            events.push(CombatEvent::healing(
                tick,
                caster,
                target,
                &heal.skill_name,
                heal.amount,
            ));
        }
    }
    for (entry, target) in lost_targets(&resolving, &snapshot) {
        events.push(CombatEvent::target_lost(
            tick,
            &entry.caster,
            target,
            &entry.skill.name,
        ));
    }

    let mut health_trace = ResolutionSubstep::new(SubstepKind::HealthUpdate);
    health::apply(reducer, &snapshot, &hits, &heals, &mut health_trace);

    let mut status_trace = ResolutionSubstep::new(SubstepKind::StatusApplication);
    events.extend(status::apply(reducer, &resolving, tick, &mut status_trace));

    let mut cancel_trace = ResolutionSubstep::new(SubstepKind::ActionCancellation);
    let mut cancelled = Vec::new();
    events.extend(cancel::apply(
        reducer,
        &resolving,
        env,
        tick,
        &mut cancelled,
        &mut cancel_trace,
    ));

    let mut knockout_trace = ResolutionSubstep::new(SubstepKind::KnockoutCleanup);
    events.extend(knockout_cleanup(reducer, &snapshot, tick, &mut knockout_trace));
    reducer.sync_current_actions();

    for substep in [
        damage_trace,
        healing_trace,
        shield_trace,
        health_trace,
        status_trace,
        cancel_trace,
        knockout_trace,
    ] {
        sink.substep(substep);
    }

    Ok(Resolution { events, cancelled })
}

/// Orders the batch and looks up each skill. Actions of casters already
/// knocked out are dropped without effect.
fn prepare(
    ready: Vec<Action>,
    state: &CombatState,
    snapshot: &Snapshot,
    env: &CombatEnv<'_>,
) -> Result<Vec<Resolving>, EngineError> {
    let mut ordered = Vec::with_capacity(ready.len());
    for action in ready {
        let (side, index) = state
            .roster_position(action.caster)
            .ok_or(EngineError::UnknownCharacter(action.caster))?;
        ordered.push(((side.rank(), index), action));
    }
    ordered.sort_by_key(|(key, _)| *key);

    let mut resolving = Vec::with_capacity(ordered.len());
    for (_, action) in ordered {
        let Some(caster) = snapshot.character(action.caster) else {
            return Err(EngineError::UnknownCharacter(action.caster));
        };
        if caster.is_knocked_out() {
            tracing::debug!(caster = %caster.id, skill = %action.skill_id, "caster down, action dropped");
            continue;
        }

        let skill = match caster.skill(&action.skill_id) {
            Some(skill) => skill.clone(),
            None => env.skill(&action.skill_id).map_err(|err| {
                tracing::debug!(code = err.error_code(), "{err}");
                EngineError::UnknownSkill {
                    skill: action.skill_id.clone(),
                    caster: action.caster,
                }
            })?,
        };

        resolving.push(Resolving {
            action,
            skill,
            caster: caster.clone(),
        });
    }

    Ok(resolving)
}

/// Target pairs on which no effect of the skill applies: non-revive effects
/// need a target that was alive when the batch started, revive needs one that
/// was knocked out.
fn lost_targets<'a>(
    resolving: &'a [Resolving],
    snapshot: &'a Snapshot,
) -> Vec<(&'a Resolving, &'a Character)> {
    let mut lost = Vec::new();
    for entry in resolving {
        for &target_id in &entry.action.targets {
            let Some(target) = snapshot.character(target_id) else {
                continue;
            };
            let applicable = entry.skill.effects.iter().any(|effect| {
                if effect.targets_knocked_out() {
                    target.is_knocked_out()
                } else {
                    target.is_alive()
                }
            });
            if !applicable {
                lost.push((entry, target));
            }
        }
    }
    lost
}

/// Clears statuses and queued actions of every character at zero HP. Only
/// characters that were alive when the batch started are narrated.
fn knockout_cleanup(
    reducer: &mut StateReducer<'_>,
    snapshot: &Snapshot,
    tick: Tick,
    trace: &mut ResolutionSubstep,
) -> Vec<CombatEvent> {
    let fallen: Vec<Character> = reducer
        .state()
        .characters()
        .filter(|c| c.is_knocked_out())
        .cloned()
        .collect();

    let mut events = Vec::new();
    for character in fallen {
        let removed = reducer.knock_out(character.id);
        let newly = snapshot
            .character(character.id)
            .is_some_and(Character::is_alive);
        if !newly {
            continue;
        }

        tracing::debug!(character = %character.id, "knocked out");
        let description = match removed {
            Some(action) => format!("knocked out, {} dropped", action.skill_id),
            None => "knocked out".to_owned(),
        };
        trace.push(SubstepDetail::new(character.id, 0, description));
        events.push(CombatEvent::knockout(tick, &character));
    }
    events
}
