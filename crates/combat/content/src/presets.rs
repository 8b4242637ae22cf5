//! Rule presets.
//!
//! A [`Loadout`] is an ordered list of library skill ids, each with the rules
//! that decide when the AI uses it. Rule evaluation walks skills in equipped
//! order, so situational skills are listed before fallbacks.
//!
//! [`Archetype`] bundles a loadout with base stats for each kind of
//! combatant the rosters use.

use combat_core::{
    CatalogError, Character, Condition, Rule, Skill, SkillId, StatusKind, TargetingMode,
};

use crate::skills::SkillLibrary;

/// Skill ids paired with the rules to equip them with.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Loadout {
    entries: Vec<(SkillId, Vec<Rule>)>,
}

impl Loadout {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a skill with its rules.
    pub fn skill(mut self, id: &str, rules: impl IntoIterator<Item = Rule>) -> Self {
        self.entries
            .push((SkillId::new(id), rules.into_iter().collect()));
        self
    }

    pub fn skill_ids(&self) -> impl Iterator<Item = &SkillId> {
        self.entries.iter().map(|(id, _)| id)
    }

    pub fn rules(&self) -> impl Iterator<Item = (&SkillId, &[Rule])> {
        self.entries.iter().map(|(id, rules)| (id, rules.as_slice()))
    }

    /// Copies each library skill and attaches this loadout's rules.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::SkillNotFound` for the first id the library
    /// does not define.
    pub fn equip(&self, library: &SkillLibrary) -> Result<Vec<Skill>, CatalogError> {
        self.entries
            .iter()
            .map(|(id, rules)| {
                let mut skill = library.require(id)?.clone();
                skill.set_rules(rules.clone());
                Ok(skill)
            })
            .collect()
    }
}

/// Kinds of combatant with a preset loadout.
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
#[strum(serialize_all = "kebab-case")]
pub enum Archetype {
    // Players
    Warrior,
    Guardian,
    Cleric,
    Rogue,
    // Enemies
    Brute,
    Shaman,
    Spider,
    Goblin,
    Warlord,
}

impl Archetype {
    pub const fn max_hp(self) -> i32 {
        match self {
            Self::Warrior => 120,
            Self::Guardian => 150,
            Self::Cleric => 80,
            Self::Rogue => 90,
            Self::Brute => 160,
            Self::Shaman => 70,
            Self::Spider => 50,
            Self::Goblin => 45,
            Self::Warlord => 220,
        }
    }

    pub fn loadout(self) -> Loadout {
        match self {
            Self::Warrior => Loadout::new()
                .skill(
                    "enrage",
                    [Rule::new(30)
                        .when(Condition::SelfLacksStatus(StatusKind::Enraged))
                        .when(Condition::EnemyCount(2))],
                )
                .skill(
                    "heavy-strike",
                    [Rule::new(20).when(Condition::EnemyHpBelow(40))],
                )
                .skill("cleave", [Rule::new(10).when(Condition::EnemyCount(3))])
                .skill("strike", [Rule::always(0)]),

            Self::Guardian => Loadout::new()
                .skill(
                    "taunt",
                    [Rule::new(30)
                        .when(Condition::SelfLacksStatus(StatusKind::Taunting))
                        .when(Condition::HpAbove(40))],
                )
                .skill(
                    "defend",
                    [Rule::new(20)
                        .when(Condition::HpBelow(50))
                        .when(Condition::SelfLacksStatus(StatusKind::Defending))],
                )
                .skill("bash", [Rule::always(0)]),

            Self::Cleric => Loadout::new()
                .skill("revive", [Rule::new(40).when(Condition::AllyDead)])
                .skill("heal", [Rule::new(30).when(Condition::AllyHpBelow(50))])
                .skill("mend", [Rule::new(20).when(Condition::AllyHpBelow(80))])
                .skill(
                    "shield",
                    [Rule::new(10).when(Condition::AllyHasStatus(StatusKind::Taunting))],
                )
                .skill("strike", [Rule::always(0)]),

            Self::Rogue => Loadout::new()
                .skill(
                    "poison",
                    [Rule::new(20).when(Condition::EnemyLacksStatus(StatusKind::Poisoned))],
                )
                .skill(
                    "strike",
                    [
                        Rule::new(10)
                            .when(Condition::EnemyHpBelow(30))
                            .targeting(TargetingMode::SingleEnemyLowestHp),
                        Rule::always(0),
                    ],
                ),

            Self::Brute => Loadout::new()
                .skill(
                    "enrage",
                    [Rule::new(20)
                        .when(Condition::HpBelow(50))
                        .when(Condition::SelfLacksStatus(StatusKind::Enraged))],
                )
                .skill("heavy-strike", [Rule::always(0)]),

            Self::Shaman => Loadout::new()
                .skill("stun", [Rule::new(20).when(Condition::EnemyCount(2))])
                .skill("heal", [Rule::new(10).when(Condition::AllyHpBelow(60))])
                .skill("interrupt", [Rule::always(0)]),

            Self::Spider => Loadout::new()
                .skill(
                    "poison",
                    [Rule::new(10).when(Condition::EnemyLacksStatus(StatusKind::Poisoned))],
                )
                .skill("strike", [Rule::always(0)]),

            Self::Goblin => Loadout::new().skill("strike", [Rule::always(0)]),

            Self::Warlord => Loadout::new()
                .skill("cleave", [Rule::new(20).when(Condition::EnemyCount(2))])
                .skill(
                    "defend",
                    [Rule::new(10)
                        .when(Condition::HpBelow(30))
                        .when(Condition::SelfLacksStatus(StatusKind::Defending))],
                )
                .skill("heavy-strike", [Rule::always(0)]),
        }
    }

    /// Builds a player-side character of this archetype.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::SkillNotFound` if the loadout names a skill the
    /// library lacks.
    pub fn player(
        self,
        id: u32,
        name: &str,
        library: &SkillLibrary,
    ) -> Result<Character, CatalogError> {
        Ok(Character::player(id, name, self.max_hp()).with_skills(self.loadout().equip(library)?))
    }

    /// Builds an enemy-side character of this archetype.
    ///
    /// # Errors
    ///
    /// Same as [`Archetype::player`].
    pub fn enemy(
        self,
        id: u32,
        name: &str,
        library: &SkillLibrary,
    ) -> Result<Character, CatalogError> {
        Ok(Character::enemy(id, name, self.max_hp()).with_skills(self.loadout().equip(library)?))
    }
}
