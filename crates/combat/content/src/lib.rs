//! Static combat content.
//!
//! This crate houses the built-in skill library, the rule presets that turn
//! library skills into a fighting style, and ready-made rosters:
//! - [`SkillLibrary`]: the skill catalog oracle handed to the engine
//! - [`Archetype`]: equipped skills plus rules for one kind of combatant
//! - [`Matchup`]: named player-vs-enemy rosters for demos and tests
//!
//! Content is consumed through `combat-core`'s public API only and never
//! appears inside engine logic.

pub mod error;
pub mod presets;
pub mod rosters;
pub mod skills;

pub use error::ContentError;
pub use presets::{Archetype, Loadout};
pub use rosters::Matchup;
pub use skills::SkillLibrary;
