//! Authoritative combat state representation.
//!
//! This module owns the data structures that describe both rosters, the action
//! queue, the event log, and the battle outcome. Callers build a state once at
//! battle start; every tick the engine returns a new, structurally independent
//! state and never touches the one it was given.
#[cfg(feature = "serde")]
mod digest;
pub mod types;

pub use types::{
    Action, Character, CharacterId, Position, Side, SkillId, StatusEffect, StatusEffects,
    StatusKind, Tick,
};

use crate::engine::EngineError;
use crate::event::CombatEvent;

/// Overall battle outcome. Once it leaves `Ongoing` it never changes again.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, strum::Display, strum::IntoStaticStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
#[strum(serialize_all = "kebab-case")]
pub enum BattleStatus {
    #[default]
    Ongoing,
    Victory,
    Defeat,
}

impl BattleStatus {
    pub const fn is_over(self) -> bool {
        !matches!(self, Self::Ongoing)
    }
}

/// Canonical snapshot of one battle.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CombatState {
    /// Player roster in left-to-right order.
    pub players: Vec<Character>,
    /// Enemy roster in left-to-right order.
    pub enemies: Vec<Character>,
    /// Number of ticks executed so far.
    pub tick: Tick,
    /// Actions in flight, in the order they were queued.
    pub action_queue: Vec<Action>,
    /// Append-only narration of everything that happened.
    pub event_log: Vec<CombatEvent>,
    pub battle_status: BattleStatus,
}

impl CombatState {
    /// Creates the opening state of a battle.
    ///
    /// Characters are re-tagged with the side of the roster they were placed
    /// in. Any action already set as `current_action` is carried into the
    /// queue.
    ///
    /// # Errors
    ///
    /// Returns `EngineError::DuplicateCharacter` if two characters share an id.
    pub fn new(players: Vec<Character>, enemies: Vec<Character>) -> Result<Self, EngineError> {
        let mut players = players;
        let mut enemies = enemies;
        for player in players.iter_mut() {
            player.side = Side::Player;
        }
        for enemy in enemies.iter_mut() {
            enemy.side = Side::Enemy;
        }

        let mut seen = std::collections::BTreeSet::new();
        for character in players.iter().chain(enemies.iter()) {
            if !seen.insert(character.id) {
                return Err(EngineError::DuplicateCharacter(character.id));
            }
        }

        let action_queue = players
            .iter()
            .chain(enemies.iter())
            .filter_map(|c| c.current_action.clone())
            .collect();

        Ok(Self {
            players,
            enemies,
            tick: Tick::ZERO,
            action_queue,
            event_log: Vec::new(),
            battle_status: BattleStatus::Ongoing,
        })
    }

    /// Iterates every character, players first, each side in roster order.
    pub fn characters(&self) -> impl Iterator<Item = &Character> {
        self.players.iter().chain(self.enemies.iter())
    }

    pub(crate) fn characters_mut(&mut self) -> impl Iterator<Item = &mut Character> {
        self.players.iter_mut().chain(self.enemies.iter_mut())
    }

    /// Looks up a character by id on either side.
    pub fn character(&self, id: CharacterId) -> Option<&Character> {
        self.characters().find(|c| c.id == id)
    }

    pub(crate) fn character_mut(&mut self, id: CharacterId) -> Option<&mut Character> {
        self.characters_mut().find(|c| c.id == id)
    }

    /// Returns `(side, roster index)` of a character.
    pub fn roster_position(&self, id: CharacterId) -> Option<(Side, usize)> {
        if let Some(index) = self.players.iter().position(|c| c.id == id) {
            return Some((Side::Player, index));
        }
        self.enemies
            .iter()
            .position(|c| c.id == id)
            .map(|index| (Side::Enemy, index))
    }

    /// Returns the roster of the given side.
    pub fn roster(&self, side: Side) -> &[Character] {
        match side {
            Side::Player => &self.players,
            Side::Enemy => &self.enemies,
        }
    }

    /// Returns `(allies, enemies)` from the point of view of `side`.
    /// Allies include the character itself.
    pub fn sides_of(&self, side: Side) -> (&[Character], &[Character]) {
        (self.roster(side), self.roster(side.opponent()))
    }

    /// Returns the queued action of a caster, if any.
    pub fn queued_action(&self, caster: CharacterId) -> Option<&Action> {
        self.action_queue.iter().find(|a| a.caster == caster)
    }

    /// Queues a scripted action, replacing any action the caster already has.
    ///
    /// # Errors
    ///
    /// Returns `EngineError::UnknownCharacter` if the caster is not on either
    /// roster.
    pub fn enqueue_action(&mut self, action: Action) -> Result<(), EngineError> {
        if self.character(action.caster).is_none() {
            return Err(EngineError::UnknownCharacter(action.caster));
        }
        self.action_queue.retain(|a| a.caster != action.caster);
        self.action_queue.push(action);
        self.sync_current_actions();
        Ok(())
    }

    /// Returns true once either side has won.
    pub fn is_over(&self) -> bool {
        self.battle_status.is_over()
    }

    /// Returns true if every character of `side` is knocked out.
    pub fn side_defeated(&self, side: Side) -> bool {
        self.roster(side).iter().all(Character::is_knocked_out)
    }

    /// Rewrites every `current_action` mirror from the action queue.
    pub(crate) fn sync_current_actions(&mut self) {
        let queue = &self.action_queue;
        for character in self.players.iter_mut().chain(self.enemies.iter_mut()) {
            character.current_action = queue.iter().find(|a| a.caster == character.id).cloned();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn roster() -> (Vec<Character>, Vec<Character>) {
        (
            vec![Character::player(1, "Knight", 100), Character::player(2, "Cleric", 80)],
            vec![Character::enemy(10, "Goblin", 50)],
        )
    }

    #[test]
    fn new_rejects_duplicate_ids() {
        let players = vec![Character::player(1, "A", 10), Character::player(1, "B", 10)];
        let result = CombatState::new(players, vec![]);
        assert!(matches!(
            result,
            Err(EngineError::DuplicateCharacter(CharacterId(1)))
        ));
    }

    #[test]
    fn roster_position_reports_side_and_index() {
        let (players, enemies) = roster();
        let state = CombatState::new(players, enemies).unwrap();
        assert_eq!(
            state.roster_position(CharacterId(2)),
            Some((Side::Player, 1))
        );
        assert_eq!(
            state.roster_position(CharacterId(10)),
            Some((Side::Enemy, 0))
        );
        assert_eq!(state.roster_position(CharacterId(99)), None);
    }

    #[test]
    fn enqueue_action_replaces_and_mirrors() {
        let (players, enemies) = roster();
        let mut state = CombatState::new(players, enemies).unwrap();

        let first = Action::new("strike", CharacterId(1), vec![CharacterId(10)], 2);
        let second = Action::new("heavy-strike", CharacterId(1), vec![CharacterId(10)], 3);
        state.enqueue_action(first).unwrap();
        state.enqueue_action(second.clone()).unwrap();

        assert_eq!(state.action_queue, vec![second.clone()]);
        assert_eq!(
            state.character(CharacterId(1)).unwrap().current_action,
            Some(second)
        );
    }

    #[test]
    fn enqueue_action_rejects_unknown_caster() {
        let (players, enemies) = roster();
        let mut state = CombatState::new(players, enemies).unwrap();
        let action = Action::new("strike", CharacterId(42), vec![], 1);
        assert!(matches!(
            state.enqueue_action(action),
            Err(EngineError::UnknownCharacter(CharacterId(42)))
        ));
    }
}
