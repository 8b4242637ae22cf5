mod action;
mod character;
mod common;
mod status;

pub use action::Action;
pub use character::Character;
pub use common::{CharacterId, Position, Side, SkillId, Tick};
pub use status::{StatusEffect, StatusEffects, StatusKind};
