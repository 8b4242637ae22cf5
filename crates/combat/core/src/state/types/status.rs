//! Status effect system for characters.
//!
//! Status effects are temporary conditions that modify how a character deals
//! or receives damage, or restrict what it can do.
//!
//! # Tick-based Duration
//!
//! Effects store the number of ticks they remain active. The status processor
//! decrements every duration once per tick and removes an effect once its
//! duration reaches zero. A duration of zero means inactive.
//!
//! # Replacement
//!
//! At most one effect of each kind exists per character. Applying an effect of
//! a kind that is already present overwrites its duration and value.

use arrayvec::ArrayVec;

use crate::config::CombatConfig;

/// Active status effects on a character.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StatusEffects {
    effects: ArrayVec<StatusEffect, { CombatConfig::MAX_STATUS_EFFECTS }>,
}

/// A single status effect with its remaining duration.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StatusEffect {
    pub kind: StatusKind,
    /// Ticks remaining; `> 0` means active.
    pub duration: u32,
    /// Shield pool, poison damage per tick, or enraged bonus damage.
    pub value: Option<i32>,
}

impl StatusEffect {
    pub const fn new(kind: StatusKind, duration: u32) -> Self {
        Self {
            kind,
            duration,
            value: None,
        }
    }

    pub const fn with_value(mut self, value: i32) -> Self {
        self.value = Some(value);
        self
    }

    /// Returns true while the effect still has ticks remaining.
    pub const fn is_active(&self) -> bool {
        self.duration > 0
    }
}

/// Types of status effects.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::IntoStaticStr,
    strum::EnumIter,
    strum::EnumCount,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
#[strum(serialize_all = "kebab-case")]
pub enum StatusKind {
    /// Takes `value` damage at the end of every tick.
    Poisoned,

    /// Cannot start a new action; applying it cancels the current one.
    Stunned,

    /// Absorbs incoming damage from a `value` pool before HP is touched.
    Shielded,

    /// Forces every hostile action cast by an enemy onto this player.
    Taunting,

    /// Incoming damage is reduced to the configured percentage.
    Defending,

    /// Adds `value` to each damage instance this character deals.
    Enraged,
}

impl StatusKind {
    /// Returns the kebab-case tag of this status.
    pub fn tag(self) -> &'static str {
        self.into()
    }
}

impl StatusEffects {
    /// Creates an empty status effect set.
    pub fn empty() -> Self {
        Self {
            effects: ArrayVec::new(),
        }
    }

    /// Returns the active effect of the given kind, if any.
    pub fn get(&self, kind: StatusKind) -> Option<&StatusEffect> {
        self.effects
            .iter()
            .find(|e| e.kind == kind && e.is_active())
    }

    pub(crate) fn get_mut(&mut self, kind: StatusKind) -> Option<&mut StatusEffect> {
        self.effects
            .iter_mut()
            .find(|e| e.kind == kind && e.is_active())
    }

    /// Checks if a specific status effect is active.
    pub fn has(&self, kind: StatusKind) -> bool {
        self.get(kind).is_some()
    }

    /// Returns the value carried by an active effect, if both exist.
    pub fn value_of(&self, kind: StatusKind) -> Option<i32> {
        self.get(kind).and_then(|e| e.value)
    }

    /// Sets or replaces the effect of the same kind.
    ///
    /// Replacement overwrites duration and value; effects never stack.
    pub fn apply(&mut self, effect: StatusEffect) {
        if let Some(existing) = self.effects.iter_mut().find(|e| e.kind == effect.kind) {
            *existing = effect;
            return;
        }

        // One slot exists per kind, so this cannot overflow.
        let _ = self.effects.try_push(effect);
    }

    /// Removes a status effect immediately.
    pub fn remove(&mut self, kind: StatusKind) {
        self.effects.retain(|e| e.kind != kind);
    }

    /// Removes every effect (used on knockout).
    pub fn clear(&mut self) {
        self.effects.clear();
    }

    /// Decrements every duration by one and removes effects that reach zero.
    ///
    /// Returns the kinds that expired, in storage order.
    pub fn tick_down(&mut self) -> Vec<StatusKind> {
        for effect in self.effects.iter_mut() {
            effect.duration = effect.duration.saturating_sub(1);
        }

        let expired = self
            .effects
            .iter()
            .filter(|e| e.duration == 0)
            .map(|e| e.kind)
            .collect();
        self.effects.retain(|e| e.duration > 0);
        expired
    }

    /// Returns an iterator over all stored effects.
    pub fn iter(&self) -> impl Iterator<Item = &StatusEffect> {
        self.effects.iter()
    }

    /// Returns an iterator over active effects only.
    pub fn active(&self) -> impl Iterator<Item = &StatusEffect> + '_ {
        self.effects.iter().filter(|e| e.is_active())
    }

    /// Returns true if no effects are stored at all.
    pub fn is_empty(&self) -> bool {
        self.effects.is_empty()
    }

    pub fn len(&self) -> usize {
        self.effects.len()
    }
}

impl FromIterator<StatusEffect> for StatusEffects {
    fn from_iter<T: IntoIterator<Item = StatusEffect>>(iter: T) -> Self {
        let mut effects = Self::empty();
        for effect in iter {
            effects.apply(effect);
        }
        effects
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::EnumCount;

    #[test]
    fn capacity_covers_every_kind() {
        assert_eq!(CombatConfig::MAX_STATUS_EFFECTS, StatusKind::COUNT);
    }

    #[test]
    fn apply_replaces_instead_of_stacking() {
        let mut effects = StatusEffects::empty();
        effects.apply(StatusEffect::new(StatusKind::Poisoned, 3).with_value(5));
        effects.apply(StatusEffect::new(StatusKind::Poisoned, 1).with_value(2));

        assert_eq!(effects.len(), 1);
        let poison = effects.get(StatusKind::Poisoned).unwrap();
        assert_eq!(poison.duration, 1);
        assert_eq!(poison.value, Some(2));
    }

    #[test]
    fn tick_down_expires_finished_effects() {
        let mut effects: StatusEffects = [
            StatusEffect::new(StatusKind::Stunned, 1),
            StatusEffect::new(StatusKind::Defending, 2),
        ]
        .into_iter()
        .collect();

        let expired = effects.tick_down();
        assert_eq!(expired, vec![StatusKind::Stunned]);
        assert!(!effects.has(StatusKind::Stunned));
        assert_eq!(effects.get(StatusKind::Defending).unwrap().duration, 1);
    }

    #[test]
    fn zero_duration_effect_is_inactive() {
        let mut effects = StatusEffects::empty();
        effects.apply(StatusEffect::new(StatusKind::Taunting, 0));
        assert!(!effects.has(StatusKind::Taunting));
        assert_eq!(effects.tick_down(), vec![StatusKind::Taunting]);
        assert!(effects.is_empty());
    }

    #[test]
    fn tags_round_trip_through_strum() {
        use std::str::FromStr;
        assert_eq!(StatusKind::from_str("enraged").unwrap(), StatusKind::Enraged);
        assert_eq!(StatusKind::Shielded.tag(), "shielded");
        assert!(StatusKind::from_str("confused").is_err());
    }
}
