//! Read-only collaborators of the engine.
//!
//! [`CombatEnv`] bundles the skill catalog oracle with the tunable
//! [`CombatConfig`] so the engine can reach everything it needs without hard
//! coupling to a concrete content crate.
mod catalog;

pub use catalog::{CatalogError, SkillCatalog};

use crate::config::CombatConfig;
use crate::skill::Skill;
use crate::state::SkillId;

/// Aggregates the oracles consulted by the tick pipeline.
#[derive(Clone, Copy)]
pub struct CombatEnv<'a> {
    catalog: Option<&'a dyn SkillCatalog>,
    config: CombatConfig,
}

impl<'a> CombatEnv<'a> {
    pub fn new(catalog: Option<&'a dyn SkillCatalog>, config: CombatConfig) -> Self {
        Self { catalog, config }
    }

    /// Environment with a catalog and default configuration.
    pub fn with_catalog(catalog: &'a dyn SkillCatalog) -> Self {
        Self::new(Some(catalog), CombatConfig::default())
    }

    /// Environment without a catalog; only equipped skills resolve.
    pub fn empty() -> Self {
        Self::new(None, CombatConfig::default())
    }

    pub fn with_config(mut self, config: CombatConfig) -> Self {
        self.config = config;
        self
    }

    pub fn config(&self) -> &CombatConfig {
        &self.config
    }

    /// Returns the catalog, or an error if not available.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::CatalogNotAvailable` if no catalog was provided.
    pub fn catalog(&self) -> Result<&'a dyn SkillCatalog, CatalogError> {
        self.catalog.ok_or(CatalogError::CatalogNotAvailable)
    }

    /// Looks a skill up in the catalog.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::CatalogNotAvailable` without a catalog and
    /// `CatalogError::SkillNotFound` for an unknown id.
    pub fn skill(&self, id: &SkillId) -> Result<Skill, CatalogError> {
        self.catalog()?
            .skill(id)
            .ok_or_else(|| CatalogError::SkillNotFound(id.clone()))
    }
}

impl Default for CombatEnv<'_> {
    fn default() -> Self {
        Self::empty()
    }
}

impl std::fmt::Debug for CombatEnv<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CombatEnv")
            .field("catalog", &self.catalog.map(|c| c.skill_ids().len()))
            .field("config", &self.config)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::skill::TargetingMode;

    #[test]
    fn empty_env_reports_missing_catalog() {
        let env = CombatEnv::empty();
        assert_eq!(
            env.skill(&SkillId::new("strike")),
            Err(CatalogError::CatalogNotAvailable)
        );
    }

    #[test]
    fn vec_catalog_resolves_by_id() {
        let skills = vec![Skill::new("strike", "Strike", 1, TargetingMode::NearestEnemy)];
        let env = CombatEnv::with_catalog(&skills);

        assert_eq!(env.skill(&SkillId::new("strike")).unwrap().name, "Strike");
        assert_eq!(
            env.skill(&SkillId::new("fireball")),
            Err(CatalogError::SkillNotFound(SkillId::new("fireball")))
        );
    }
}
