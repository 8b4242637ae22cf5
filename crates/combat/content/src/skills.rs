//! Built-in skill library.
//!
//! Library skills carry no rules: a skill only acts on its own once a
//! [`Loadout`](crate::Loadout) equips it with rules. The library is also the
//! catalog the engine falls back to for scripted actions.

use std::collections::BTreeMap;

use combat_core::{
    CatalogError, Skill, SkillCatalog, SkillEffect, SkillId, StatusKind, TargetingMode,
};

/// Skill definitions keyed by id.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SkillLibrary {
    skills: BTreeMap<SkillId, Skill>,
}

impl SkillLibrary {
    /// Builds a library from skill definitions.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::DuplicateSkill` if two definitions share an id.
    pub fn from_skills(skills: impl IntoIterator<Item = Skill>) -> Result<Self, CatalogError> {
        let mut map = BTreeMap::new();
        for skill in skills {
            if map.contains_key(&skill.id) {
                return Err(CatalogError::DuplicateSkill(skill.id));
            }
            map.insert(skill.id.clone(), skill);
        }
        Ok(Self { skills: map })
    }

    /// The standard library shipped with the engine.
    pub fn builtin() -> Self {
        let skills = builtin_skills()
            .into_iter()
            .map(|skill| (skill.id.clone(), skill))
            .collect();
        Self { skills }
    }

    pub fn get(&self, id: &SkillId) -> Option<&Skill> {
        self.skills.get(id)
    }

    /// Returns the definition for `id`.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::SkillNotFound` if the library lacks it.
    pub fn require(&self, id: &SkillId) -> Result<&Skill, CatalogError> {
        self.get(id)
            .ok_or_else(|| CatalogError::SkillNotFound(id.clone()))
    }

    pub fn iter(&self) -> impl Iterator<Item = &Skill> {
        self.skills.values()
    }

    pub fn len(&self) -> usize {
        self.skills.len()
    }

    pub fn is_empty(&self) -> bool {
        self.skills.is_empty()
    }
}

impl SkillCatalog for SkillLibrary {
    fn skill(&self, id: &SkillId) -> Option<Skill> {
        self.get(id).cloned()
    }

    fn skill_ids(&self) -> Vec<SkillId> {
        self.skills.keys().cloned().collect()
    }
}

// ============================================================================
// Built-in definitions
// ============================================================================

fn builtin_skills() -> Vec<Skill> {
    vec![
        Skill::new("strike", "Strike", 1, TargetingMode::NearestEnemy)
            .with_effect(SkillEffect::Damage { amount: 12 }),
        Skill::new(
            "heavy-strike",
            "Heavy Strike",
            3,
            TargetingMode::SingleEnemyLowestHp,
        )
        .with_effect(SkillEffect::Damage { amount: 30 }),
        Skill::new("cleave", "Cleave", 2, TargetingMode::AllEnemies)
            .with_effect(SkillEffect::Damage { amount: 8 }),
        Skill::new("heal", "Heal", 2, TargetingMode::AllyLowestHp)
            .with_effect(SkillEffect::Heal { amount: 25 }),
        Skill::new("mend", "Mend", 3, TargetingMode::AllAllies)
            .with_effect(SkillEffect::Heal { amount: 10 }),
        Skill::new("defend", "Defend", 1, TargetingMode::SelfOnly).with_effect(
            SkillEffect::Status {
                kind: StatusKind::Defending,
                duration: 3,
                value: None,
            },
        ),
        Skill::new("poison", "Poison Dart", 2, TargetingMode::SingleEnemyHighestHp).with_effect(
            SkillEffect::Status {
                kind: StatusKind::Poisoned,
                duration: 4,
                value: Some(4),
            },
        ),
        Skill::new("shield", "Barrier", 2, TargetingMode::AllyLowestHp).with_effect(
            SkillEffect::Shield {
                amount: 20,
                duration: 4,
            },
        ),
        Skill::new("taunt", "Taunt", 1, TargetingMode::SelfOnly).with_effect(
            SkillEffect::Status {
                kind: StatusKind::Taunting,
                duration: 3,
                value: None,
            },
        ),
        Skill::new("bash", "Shield Bash", 2, TargetingMode::NearestEnemy)
            .with_effect(SkillEffect::Damage { amount: 6 })
            .with_effect(SkillEffect::Interrupt),
        Skill::new("stun", "Stun", 3, TargetingMode::SingleEnemyHighestHp).with_effect(
            SkillEffect::Status {
                kind: StatusKind::Stunned,
                duration: 2,
                value: None,
            },
        ),
        Skill::new("interrupt", "Interrupt", 1, TargetingMode::NearestEnemy)
            .with_effect(SkillEffect::Interrupt),
        Skill::new("revive", "Revive", 3, TargetingMode::AllyDead)
            .with_effect(SkillEffect::Revive { amount: 40 }),
        Skill::new("enrage", "Enrage", 1, TargetingMode::SelfOnly).with_effect(
            SkillEffect::Status {
                kind: StatusKind::Enraged,
                duration: 4,
                value: Some(8),
            },
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use combat_core::EffectKind;

    #[test]
    fn builtin_library_has_unique_ids() {
        let library = SkillLibrary::builtin();
        let rebuilt = SkillLibrary::from_skills(builtin_skills()).expect("no duplicates");

        assert_eq!(library, rebuilt);
        assert_eq!(library.len(), builtin_skills().len());
    }

    #[test]
    fn duplicate_ids_are_rejected() {
        let strike = Skill::new("strike", "Strike", 1, TargetingMode::NearestEnemy);
        let err = SkillLibrary::from_skills([strike.clone(), strike]).unwrap_err();

        assert_eq!(err, CatalogError::DuplicateSkill(SkillId::new("strike")));
    }

    #[test]
    fn library_skills_have_effects_and_no_rules() {
        for skill in SkillLibrary::builtin().iter() {
            assert!(!skill.effects.is_empty(), "{} does nothing", skill.id);
            assert!(skill.rules.is_empty(), "{} ships with rules", skill.id);
        }
    }

    #[test]
    fn catalog_lookup() {
        let library = SkillLibrary::builtin();
        let bash = library.skill(&SkillId::new("bash")).expect("bash exists");

        assert!(bash.has_effect(EffectKind::Interrupt));
        assert!(library.skill(&SkillId::new("meteor")).is_none());
        assert_eq!(
            library.require(&SkillId::new("meteor")).unwrap_err(),
            CatalogError::SkillNotFound(SkillId::new("meteor"))
        );
        assert_eq!(library.skill_ids().len(), library.len());
    }
}
