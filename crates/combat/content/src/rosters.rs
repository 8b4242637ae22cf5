//! Named matchups.

use combat_core::{Character, CombatState, Position};
use strum::IntoEnumIterator;

use crate::error::ContentError;
use crate::presets::Archetype;
use crate::skills::SkillLibrary;

/// Ready-made player-vs-enemy rosters.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::IntoStaticStr,
    strum::EnumIter,
)]
#[strum(serialize_all = "kebab-case")]
pub enum Matchup {
    /// Four-hero party against a mixed pack, on a grid.
    #[default]
    Skirmish,
    /// One warrior against one brute.
    Duel,
    /// Tank and healer against a warlord with goblin escorts.
    Siege,
    /// Rogue and cleric against poisoners.
    Attrition,
}

impl Matchup {
    /// Every matchup, in declaration order.
    pub fn all() -> impl Iterator<Item = Self> {
        Self::iter()
    }

    pub fn description(self) -> &'static str {
        match self {
            Self::Skirmish => "warrior, guardian, cleric and rogue vs brute, shaman and spiders",
            Self::Duel => "warrior vs brute",
            Self::Siege => "guardian and cleric vs warlord and two goblins",
            Self::Attrition => "rogue and cleric vs three spiders",
        }
    }

    /// Assembles the rosters with skills equipped from `library`.
    ///
    /// # Errors
    ///
    /// Returns `ContentError::Catalog` if a loadout names a skill the library
    /// lacks, `ContentError::Roster` if the rosters are invalid.
    pub fn build(self, library: &SkillLibrary) -> Result<CombatState, ContentError> {
        use Archetype::*;

        let (players, enemies): (Vec<Character>, Vec<Character>) = match self {
            Self::Skirmish => (
                vec![
                    Warrior
                        .player(1, "Aldric", library)?
                        .with_position(Position::new(0, 1)),
                    Guardian
                        .player(2, "Brenna", library)?
                        .with_position(Position::new(0, 2)),
                    Cleric
                        .player(3, "Corwin", library)?
                        .with_position(Position::new(-1, 1)),
                    Rogue
                        .player(4, "Dara", library)?
                        .with_position(Position::new(-1, 3)),
                ],
                vec![
                    Brute
                        .enemy(101, "Grol", library)?
                        .with_position(Position::new(4, 2)),
                    Shaman
                        .enemy(102, "Vex", library)?
                        .with_position(Position::new(6, 1)),
                    Spider
                        .enemy(103, "Skitter", library)?
                        .with_position(Position::new(3, 0)),
                    Spider
                        .enemy(104, "Creep", library)?
                        .with_position(Position::new(5, 4)),
                ],
            ),
            Self::Duel => (
                vec![Warrior.player(1, "Aldric", library)?],
                vec![Brute.enemy(101, "Grol", library)?],
            ),
            Self::Siege => (
                vec![
                    Guardian.player(1, "Brenna", library)?,
                    Cleric.player(2, "Corwin", library)?,
                ],
                vec![
                    Goblin.enemy(101, "Snik", library)?,
                    Warlord.enemy(102, "Ugor", library)?,
                    Goblin.enemy(103, "Nab", library)?,
                ],
            ),
            Self::Attrition => (
                vec![
                    Rogue.player(1, "Dara", library)?,
                    Cleric.player(2, "Corwin", library)?,
                ],
                vec![
                    Spider.enemy(101, "Skitter", library)?,
                    Spider.enemy(102, "Creep", library)?,
                    Spider.enemy(103, "Widow", library)?,
                ],
            ),
        };

        tracing::debug!(
            matchup = %self,
            players = players.len(),
            enemies = enemies.len(),
            "matchup assembled"
        );
        Ok(CombatState::new(players, enemies)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use combat_core::{BattleStatus, CombatConfig, CombatEngine, CombatEnv};

    #[test]
    fn every_matchup_builds() {
        let library = SkillLibrary::builtin();
        for matchup in Matchup::all() {
            let state = matchup.build(&library).expect("matchup builds");
            assert!(!state.players.is_empty(), "{matchup} has no players");
            assert!(!state.enemies.is_empty(), "{matchup} has no enemies");
            assert!(state.characters().all(|c| !c.skills.is_empty()));
        }
    }

    #[test]
    fn every_matchup_finishes() {
        let library = SkillLibrary::builtin();
        let engine = CombatEngine::new(CombatEnv::with_catalog(&library));
        for matchup in Matchup::all() {
            let state = matchup.build(&library).expect("matchup builds");
            let end = engine
                .run_battle(state, CombatConfig::DEFAULT_MAX_TICKS)
                .expect("battle runs");
            assert_ne!(end.battle_status, BattleStatus::Ongoing, "{matchup} stalled");
        }
    }

    #[test]
    fn matchups_are_deterministic() {
        let library = SkillLibrary::builtin();
        let engine = CombatEngine::new(CombatEnv::with_catalog(&library));
        let run = || {
            let state = Matchup::Skirmish.build(&library).expect("skirmish builds");
            engine.run_battle(state, 300).expect("battle runs")
        };

        assert_eq!(run(), run());
    }

    #[test]
    fn matchup_names_parse() {
        assert_eq!("attrition".parse::<Matchup>(), Ok(Matchup::Attrition));
        assert_eq!(Matchup::default().to_string(), "skirmish");
        assert!("melee".parse::<Matchup>().is_err());
    }
}
