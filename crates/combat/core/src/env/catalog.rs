//! Skill catalog oracle.
//!
//! The catalog is the authoritative source for skills that are referenced by
//! id but not equipped by the caster (scripted actions, content tooling).

use crate::error::{CombatError, ErrorSeverity};
use crate::skill::Skill;
use crate::state::SkillId;

/// Read-only skill lookup.
pub trait SkillCatalog: Send + Sync {
    /// Returns the skill definition for `id`, if the catalog knows it.
    fn skill(&self, id: &SkillId) -> Option<Skill>;

    /// Ids of every skill in the catalog, in a stable order.
    fn skill_ids(&self) -> Vec<SkillId>;
}

/// Errors that occur when accessing catalog data.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CatalogError {
    /// No catalog was attached to the environment.
    #[error("skill catalog not available")]
    CatalogNotAvailable,

    /// The catalog does not define the requested skill.
    #[error("skill '{0}' not found in catalog")]
    SkillNotFound(SkillId),

    /// Two catalog entries share an id.
    #[error("skill '{0}' defined more than once")]
    DuplicateSkill(SkillId),
}

impl CombatError for CatalogError {
    fn severity(&self) -> ErrorSeverity {
        use CatalogError::*;
        match self {
            CatalogNotAvailable => ErrorSeverity::Fatal,
            SkillNotFound(_) | DuplicateSkill(_) => ErrorSeverity::Validation,
        }
    }

    fn error_code(&self) -> &'static str {
        use CatalogError::*;
        match self {
            CatalogNotAvailable => "CATALOG_NOT_AVAILABLE",
            SkillNotFound(_) => "CATALOG_SKILL_NOT_FOUND",
            DuplicateSkill(_) => "CATALOG_DUPLICATE_SKILL",
        }
    }
}

impl<T: SkillCatalog + ?Sized> SkillCatalog for &T {
    fn skill(&self, id: &SkillId) -> Option<Skill> {
        (**self).skill(id)
    }

    fn skill_ids(&self) -> Vec<SkillId> {
        (**self).skill_ids()
    }
}

/// Slice of skills used as a catalog (tests and small tools).
impl SkillCatalog for [Skill] {
    fn skill(&self, id: &SkillId) -> Option<Skill> {
        self.iter().find(|s| &s.id == id).cloned()
    }

    fn skill_ids(&self) -> Vec<SkillId> {
        self.iter().map(|s| s.id.clone()).collect()
    }
}

impl SkillCatalog for Vec<Skill> {
    fn skill(&self, id: &SkillId) -> Option<Skill> {
        self.as_slice().skill(id)
    }

    fn skill_ids(&self) -> Vec<SkillId> {
        self.as_slice().skill_ids()
    }
}
