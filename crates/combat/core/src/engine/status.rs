//! Status effect processing (phase 4).
//!
//! For every living character, in roster order: recurring effects fire
//! first (poison deals its stored value), then every duration drops by one
//! and effects reaching zero expire. Shield pools are consumed by absorption,
//! not by time; only their duration ticks here.

use crate::event::{CombatEvent, EventKind};
use crate::state::{CharacterId, StatusKind, Tick};

use super::reducer::StateReducer;

pub(crate) fn process_statuses(reducer: &mut StateReducer<'_>, tick: Tick) -> Vec<CombatEvent> {
    let ids: Vec<CharacterId> = reducer
        .state()
        .characters()
        .filter(|c| c.is_alive() && !c.status_effects.is_empty())
        .map(|c| c.id)
        .collect();

    let mut events = Vec::new();
    for id in ids {
        if let Some(event) = apply_poison(reducer, id, tick) {
            let knocked_out = reducer
                .state()
                .character(id)
                .is_some_and(|c| c.is_knocked_out());
            events.push(event);

            if knocked_out {
                reducer.knock_out(id);
                if let Some(character) = reducer.state().character(id) {
                    tracing::debug!(character = %id, "knocked out by poison");
                    events.push(CombatEvent::knockout(tick, character));
                }
                continue;
            }
        }

        let expired = reducer.roster().tick_statuses(id);
        if let Some(character) = reducer.state().character(id) {
            for kind in expired {
                events.push(CombatEvent::status_expired(tick, character, kind));
            }
        }
    }

    reducer.sync_current_actions();
    events
}

fn apply_poison(reducer: &mut StateReducer<'_>, id: CharacterId, tick: Tick) -> Option<CombatEvent> {
    let amount = reducer
        .state()
        .character(id)?
        .status_effects
        .value_of(StatusKind::Poisoned)
        .filter(|v| *v > 0)?;

    let (before, after) = reducer.roster().adjust_hp(id, -amount)?;
    let character = reducer.state().character(id)?;
    let lost = before - after;

    Some(
        CombatEvent::new(
            tick,
            EventKind::Damage,
            format!("{} takes {lost} poison damage", character.name),
        )
        .with_target(id)
        .with_value(lost)
        .with_status(StatusKind::Poisoned),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{Character, CombatState, StatusEffect};

    fn poisoned(hp: i32, dot: i32, turns: u32) -> Character {
        Character::player(1, "Rogue", 50)
            .with_hp(hp)
            .with_status(StatusEffect::new(StatusKind::Poisoned, turns).with_value(dot))
    }

    #[test]
    fn poison_damages_then_decrements() {
        let mut state = CombatState::new(
            vec![poisoned(30, 4, 2)],
            vec![Character::enemy(2, "Spider", 20)],
        )
        .unwrap();

        let events = process_statuses(&mut StateReducer::new(&mut state), Tick(1));
        let rogue = state.character(CharacterId(1)).unwrap();
        assert_eq!(rogue.current_hp, 26);
        assert_eq!(
            rogue.status_effects.get(StatusKind::Poisoned).unwrap().duration,
            1
        );
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].value, Some(4));
    }

    #[test]
    fn poison_knockout_clears_everything() {
        let rogue = poisoned(3, 5, 3).with_status(StatusEffect::new(StatusKind::Defending, 2));
        let mut state =
            CombatState::new(vec![rogue], vec![Character::enemy(2, "Spider", 20)]).unwrap();

        let events = process_statuses(&mut StateReducer::new(&mut state), Tick(1));
        let rogue = state.character(CharacterId(1)).unwrap();
        assert_eq!(rogue.current_hp, 0);
        assert!(rogue.status_effects.is_empty());

        let kinds: Vec<_> = events.iter().map(|e| e.kind).collect();
        assert_eq!(kinds, vec![EventKind::Damage, EventKind::Knockout]);
        assert_eq!(events[0].value, Some(3));
    }

    #[test]
    fn expiry_is_narrated() {
        let hero = Character::player(1, "Hero", 50)
            .with_status(StatusEffect::new(StatusKind::Taunting, 1));
        let mut state =
            CombatState::new(vec![hero], vec![Character::enemy(2, "Spider", 20)]).unwrap();

        let events = process_statuses(&mut StateReducer::new(&mut state), Tick(7));
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].kind, EventKind::StatusExpired);
        assert_eq!(events[0].status, Some(StatusKind::Taunting));
        assert_eq!(events[0].tick, Tick(7));
    }
}
