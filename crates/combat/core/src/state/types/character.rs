use crate::skill::Skill;

use super::action::Action;
use super::common::{CharacterId, Position, Side, SkillId};
use super::status::{StatusEffect, StatusEffects, StatusKind};

/// A combatant on either side of the battle.
///
/// Invariant: `0 <= current_hp <= max_hp` after every tick. Rosters are built
/// outside the engine; the engine only mutates HP, statuses and the current
/// action.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Character {
    pub id: CharacterId,
    pub name: String,
    pub side: Side,
    pub max_hp: i32,
    pub current_hp: i32,
    /// Equipped skills in loadout order; each carries its own rule list.
    pub skills: Vec<Skill>,
    pub status_effects: StatusEffects,
    /// Mirror of this character's entry in the action queue.
    pub current_action: Option<Action>,
    pub position: Option<Position>,
}

impl Character {
    /// Creates a character at full health with no skills.
    pub fn new(id: CharacterId, name: impl Into<String>, side: Side, max_hp: i32) -> Self {
        let max_hp = max_hp.max(0);
        Self {
            id,
            name: name.into(),
            side,
            max_hp,
            current_hp: max_hp,
            skills: Vec::new(),
            status_effects: StatusEffects::empty(),
            current_action: None,
            position: None,
        }
    }

    /// Creates a player-side character.
    pub fn player(id: u32, name: impl Into<String>, max_hp: i32) -> Self {
        Self::new(CharacterId(id), name, Side::Player, max_hp)
    }

    /// Creates an enemy-side character.
    pub fn enemy(id: u32, name: impl Into<String>, max_hp: i32) -> Self {
        Self::new(CharacterId(id), name, Side::Enemy, max_hp)
    }

    /// Sets current HP, clamped into `0..=max_hp`.
    pub fn with_hp(mut self, current_hp: i32) -> Self {
        self.current_hp = current_hp.clamp(0, self.max_hp);
        self
    }

    pub fn with_skill(mut self, skill: Skill) -> Self {
        self.skills.push(skill);
        self
    }

    pub fn with_skills(mut self, skills: impl IntoIterator<Item = Skill>) -> Self {
        self.skills.extend(skills);
        self
    }

    pub fn with_status(mut self, effect: StatusEffect) -> Self {
        self.status_effects.apply(effect);
        self
    }

    pub fn with_position(mut self, position: Position) -> Self {
        self.position = Some(position);
        self
    }

    /// Living means strictly positive HP.
    pub const fn is_alive(&self) -> bool {
        self.current_hp > 0
    }

    pub const fn is_knocked_out(&self) -> bool {
        self.current_hp <= 0
    }

    pub fn is_stunned(&self) -> bool {
        self.status_effects.has(StatusKind::Stunned)
    }

    pub fn has_status(&self, kind: StatusKind) -> bool {
        self.status_effects.has(kind)
    }

    /// Returns true if the character may pick a new action this tick.
    pub fn is_idle(&self) -> bool {
        self.is_alive() && !self.is_stunned() && self.current_action.is_none()
    }

    /// HP still missing before the character is back at full health.
    pub const fn missing_hp(&self) -> i32 {
        let missing = self.max_hp - self.current_hp;
        if missing > 0 { missing } else { 0 }
    }

    /// Looks up an equipped skill by id.
    pub fn skill(&self, id: &SkillId) -> Option<&Skill> {
        self.skills.iter().find(|s| &s.id == id)
    }

    /// Knockout cleanup: statuses and the current action are dropped.
    pub(crate) fn clear_on_knockout(&mut self) {
        self.current_hp = 0;
        self.status_effects.clear();
        self.current_action = None;
    }
}
