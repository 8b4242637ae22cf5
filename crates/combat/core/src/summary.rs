//! Post-battle statistics derived from the event log.

use std::collections::BTreeMap;

use crate::event::EventKind;
use crate::state::{BattleStatus, CharacterId, CombatState, Side, Tick};

/// Per-character totals.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CharacterTally {
    pub name: String,
    pub side: Option<Side>,
    pub damage_dealt: i64,
    pub damage_taken: i64,
    pub healing_done: i64,
    pub actions_resolved: u32,
    pub knockouts_scored: u32,
    pub knocked_out: bool,
}

/// Aggregate view of a finished (or capped) battle.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BattleSummary {
    pub status: BattleStatus,
    pub ticks: Tick,
    pub tallies: BTreeMap<CharacterId, CharacterTally>,
}

impl BattleSummary {
    /// Replays the event log of `state` into per-character totals.
    ///
    /// A knockout is credited to the actor of the last damage event that hit
    /// the fallen character earlier in the same tick, if any.
    pub fn from_state(state: &CombatState) -> Self {
        let mut tallies: BTreeMap<CharacterId, CharacterTally> = state
            .characters()
            .map(|c| {
                (
                    c.id,
                    CharacterTally {
                        name: c.name.clone(),
                        side: Some(c.side),
                        knocked_out: c.is_knocked_out(),
                        ..CharacterTally::default()
                    },
                )
            })
            .collect();

        for (index, event) in state.event_log.iter().enumerate() {
            let value = i64::from(event.value.unwrap_or(0));
            match event.kind {
                EventKind::ActionResolved => {
                    if let Some(tally) = event.actor.and_then(|id| tallies.get_mut(&id)) {
                        tally.actions_resolved += 1;
                    }
                }
                EventKind::Damage => {
                    if let Some(tally) = event.actor.and_then(|id| tallies.get_mut(&id)) {
                        tally.damage_dealt += value;
                    }
                    if let Some(tally) = event.target.and_then(|id| tallies.get_mut(&id)) {
                        tally.damage_taken += value;
                    }
                }
                EventKind::Healing => {
                    if let Some(tally) = event.actor.and_then(|id| tallies.get_mut(&id)) {
                        tally.healing_done += value;
                    }
                }
                EventKind::Knockout => {
                    let finisher = state.event_log[..index]
                        .iter()
                        .rev()
                        .take_while(|e| e.tick == event.tick)
                        .find(|e| {
                            e.kind == EventKind::Damage && e.target == event.target && e.value > Some(0)
                        })
                        .and_then(|e| e.actor);
                    if let Some(tally) = finisher.and_then(|id| tallies.get_mut(&id)) {
                        tally.knockouts_scored += 1;
                    }
                }
                _ => {}
            }
        }

        Self {
            status: state.battle_status,
            ticks: state.tick,
            tallies,
        }
    }

    pub fn tally(&self, id: CharacterId) -> Option<&CharacterTally> {
        self.tallies.get(&id)
    }

    /// Character with the highest damage dealt, lowest id on ties.
    pub fn top_damage(&self) -> Option<(CharacterId, &CharacterTally)> {
        self.tallies
            .iter()
            .filter(|(_, t)| t.damage_dealt > 0)
            .fold(None, |best: Option<(CharacterId, &CharacterTally)>, (id, t)| match best {
                Some((_, b)) if b.damage_dealt >= t.damage_dealt => best,
                _ => Some((*id, t)),
            })
    }
}
