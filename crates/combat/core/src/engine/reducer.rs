use crate::event::CombatEvent;
use crate::state::{
    Action, BattleStatus, Character, CharacterId, CombatState, StatusEffect, StatusKind, Tick,
};

/// Wraps mutable access to the working [`CombatState`] of a tick with
/// structured sub-reducers. Every phase mutates state through it.
pub(crate) struct StateReducer<'a> {
    state: &'a mut CombatState,
}

impl<'a> StateReducer<'a> {
    pub fn new(state: &'a mut CombatState) -> Self {
        Self { state }
    }

    pub fn state(&self) -> &CombatState {
        self.state
    }

    pub fn queue(&mut self) -> QueueReducer<'_> {
        QueueReducer {
            queue: &mut self.state.action_queue,
        }
    }

    pub fn roster(&mut self) -> RosterReducer<'_> {
        RosterReducer {
            players: &mut self.state.players,
            enemies: &mut self.state.enemies,
        }
    }

    pub fn advance_tick(&mut self, next: Tick) {
        debug_assert!(next > self.state.tick);
        self.state.tick = next;
    }

    pub fn finish_battle(&mut self, status: BattleStatus) {
        debug_assert!(!self.state.battle_status.is_over());
        self.state.battle_status = status;
    }

    pub fn append_events(&mut self, events: &[CombatEvent]) {
        self.state.event_log.extend_from_slice(events);
    }

    /// Knocks a character out: HP to zero, statuses and queued action gone.
    ///
    /// Returns the removed queue entry, if any.
    pub fn knock_out(&mut self, id: CharacterId) -> Option<Action> {
        if let Some(character) = self.roster().character_mut(id) {
            character.clear_on_knockout();
        }
        self.queue().remove(id)
    }

    pub fn sync_current_actions(&mut self) {
        self.state.sync_current_actions();
    }
}

pub(crate) struct QueueReducer<'a> {
    queue: &'a mut Vec<Action>,
}

impl<'a> QueueReducer<'a> {
    pub fn push(&mut self, action: Action) {
        self.queue.retain(|a| a.caster != action.caster);
        self.queue.push(action);
    }

    /// Decrements every countdown still above zero.
    pub fn countdown(&mut self) -> usize {
        let mut decremented = 0;
        for action in self.queue.iter_mut().filter(|a| a.ticks_remaining > 0) {
            action.ticks_remaining -= 1;
            decremented += 1;
        }
        decremented
    }

    /// Removes and returns every action whose countdown reached zero, in
    /// queue order.
    pub fn take_ready(&mut self) -> Vec<Action> {
        let (ready, waiting): (Vec<_>, Vec<_>) =
            self.queue.drain(..).partition(Action::is_ready);
        *self.queue = waiting;
        ready
    }

    /// Removes the caster's queued action.
    pub fn remove(&mut self, caster: CharacterId) -> Option<Action> {
        let index = self.queue.iter().position(|a| a.caster == caster)?;
        Some(self.queue.remove(index))
    }
}

pub(crate) struct RosterReducer<'a> {
    players: &'a mut Vec<Character>,
    enemies: &'a mut Vec<Character>,
}

impl<'a> RosterReducer<'a> {
    pub fn character_mut(&mut self, id: CharacterId) -> Option<&mut Character> {
        self.players
            .iter_mut()
            .chain(self.enemies.iter_mut())
            .find(|c| c.id == id)
    }

    /// Adds `delta` to current HP, clamped into `0..=max_hp`.
    ///
    /// Returns `(before, after)`.
    pub fn adjust_hp(&mut self, id: CharacterId, delta: i32) -> Option<(i32, i32)> {
        let character = self.character_mut(id)?;
        let before = character.current_hp;
        character.current_hp = before.saturating_add(delta).clamp(0, character.max_hp);
        Some((before, character.current_hp))
    }

    pub fn apply_status(&mut self, id: CharacterId, effect: StatusEffect) -> bool {
        match self.character_mut(id) {
            Some(character) => {
                character.status_effects.apply(effect);
                true
            }
            None => false,
        }
    }

    /// Overwrites the remaining pool of an active shield. A drained shield
    /// keeps its duration with a zero pool.
    pub fn set_shield_pool(&mut self, id: CharacterId, pool: i32) {
        if let Some(shield) = self
            .character_mut(id)
            .and_then(|c| c.status_effects.get_mut(StatusKind::Shielded))
        {
            shield.value = Some(pool);
        }
    }

    /// Decrements status durations of one character, returning expired kinds.
    pub fn tick_statuses(&mut self, id: CharacterId) -> Vec<StatusKind> {
        self.character_mut(id)
            .map(|c| c.status_effects.tick_down())
            .unwrap_or_default()
    }
}
