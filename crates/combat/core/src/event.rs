//! Narrated combat events.
//!
//! Every observable occurrence of a tick becomes one [`CombatEvent`]. Events
//! are appended to the state's event log and returned from each tick so
//! presentation layers never need to diff states.

use crate::state::{Character, CharacterId, StatusKind, Tick};

/// Kinds of combat events.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::IntoStaticStr,
    strum::EnumIter,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
#[strum(serialize_all = "kebab-case")]
pub enum EventKind {
    ActionQueued,
    ActionResolved,
    Damage,
    Healing,
    StatusApplied,
    StatusExpired,
    ActionCancelled,
    TargetLost,
    Knockout,
    Victory,
    Defeat,
}

/// One narrated event.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CombatEvent {
    /// Tick the event happened in (the post-increment tick number).
    pub tick: Tick,
    pub kind: EventKind,
    pub actor: Option<CharacterId>,
    pub target: Option<CharacterId>,
    pub value: Option<i32>,
    pub skill_name: Option<String>,
    pub status: Option<StatusKind>,
    pub message: String,
}

impl CombatEvent {
    pub fn new(tick: Tick, kind: EventKind, message: impl Into<String>) -> Self {
        Self {
            tick,
            kind,
            actor: None,
            target: None,
            value: None,
            skill_name: None,
            status: None,
            message: message.into(),
        }
    }

    pub fn with_actor(mut self, actor: CharacterId) -> Self {
        self.actor = Some(actor);
        self
    }

    pub fn with_target(mut self, target: CharacterId) -> Self {
        self.target = Some(target);
        self
    }

    pub fn with_value(mut self, value: i32) -> Self {
        self.value = Some(value);
        self
    }

    pub fn with_skill(mut self, skill_name: impl Into<String>) -> Self {
        self.skill_name = Some(skill_name.into());
        self
    }

    pub fn with_status(mut self, status: StatusKind) -> Self {
        self.status = Some(status);
        self
    }

    // ========================================================================
    // Narration
    // ========================================================================

    pub(crate) fn action_queued(tick: Tick, caster: &Character, skill: &str, ticks: u32) -> Self {
        Self::new(
            tick,
            EventKind::ActionQueued,
            format!("{} begins {skill} ({ticks} ticks)", caster.name),
        )
        .with_actor(caster.id)
        .with_value(i32::try_from(ticks).unwrap_or(i32::MAX))
        .with_skill(skill)
    }

    pub(crate) fn action_resolved(tick: Tick, caster: &Character, skill: &str) -> Self {
        Self::new(
            tick,
            EventKind::ActionResolved,
            format!("{} uses {skill}", caster.name),
        )
        .with_actor(caster.id)
        .with_skill(skill)
    }

    pub(crate) fn damage(
        tick: Tick,
        caster: &Character,
        target: &Character,
        skill: &str,
        amount: i32,
        absorbed: i32,
    ) -> Self {
        let message = if absorbed > 0 {
            format!(
                "{} hits {} with {skill} for {amount} damage ({absorbed} absorbed)",
                caster.name, target.name
            )
        } else {
            format!(
                "{} hits {} with {skill} for {amount} damage",
                caster.name, target.name
            )
        };
        Self::new(tick, EventKind::Damage, message)
            .with_actor(caster.id)
            .with_target(target.id)
            .with_value(amount)
            .with_skill(skill)
    }

    pub(crate) fn healing(
        tick: Tick,
        caster: &Character,
        target: &Character,
        skill: &str,
        amount: i32,
    ) -> Self {
        Self::new(
            tick,
            EventKind::Healing,
            format!(
                "{} restores {amount} HP to {} with {skill}",
                caster.name, target.name
            ),
        )
        .with_actor(caster.id)
        .with_target(target.id)
        .with_value(amount)
        .with_skill(skill)
    }

    pub(crate) fn status_applied(
        tick: Tick,
        caster: &Character,
        target: &Character,
        skill: &str,
        status: StatusKind,
        duration: u32,
    ) -> Self {
        Self::new(
            tick,
            EventKind::StatusApplied,
            format!(
                "{} is {status} for {duration} ticks ({skill})",
                target.name
            ),
        )
        .with_actor(caster.id)
        .with_target(target.id)
        .with_value(i32::try_from(duration).unwrap_or(i32::MAX))
        .with_skill(skill)
        .with_status(status)
    }

    pub(crate) fn status_expired(tick: Tick, target: &Character, status: StatusKind) -> Self {
        Self::new(
            tick,
            EventKind::StatusExpired,
            format!("{} is no longer {status}", target.name),
        )
        .with_target(target.id)
        .with_status(status)
    }

    pub(crate) fn action_cancelled(
        tick: Tick,
        caster: &Character,
        target: &Character,
        cancelled_skill: &str,
    ) -> Self {
        Self::new(
            tick,
            EventKind::ActionCancelled,
            format!("{} interrupts {}'s {cancelled_skill}", caster.name, target.name),
        )
        .with_actor(caster.id)
        .with_target(target.id)
        .with_skill(cancelled_skill)
    }

    pub(crate) fn target_lost(
        tick: Tick,
        caster: &Character,
        target: &Character,
        skill: &str,
    ) -> Self {
        Self::new(
            tick,
            EventKind::TargetLost,
            format!("{}'s {skill} finds no effect on {}", caster.name, target.name),
        )
        .with_actor(caster.id)
        .with_target(target.id)
        .with_skill(skill)
    }

    pub(crate) fn knockout(tick: Tick, target: &Character) -> Self {
        Self::new(
            tick,
            EventKind::Knockout,
            format!("{} is knocked out", target.name),
        )
        .with_target(target.id)
    }

    pub(crate) fn victory(tick: Tick) -> Self {
        Self::new(tick, EventKind::Victory, "Victory! All enemies are defeated")
    }

    pub(crate) fn defeat(tick: Tick) -> Self {
        Self::new(tick, EventKind::Defeat, "Defeat. All players are knocked out")
    }
}
