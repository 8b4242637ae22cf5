use combat_core::{CatalogError, CombatError, EngineError, ErrorSeverity};

/// Errors raised while assembling content into a battle.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ContentError {
    /// A loadout names a skill the library does not define.
    #[error(transparent)]
    Catalog(#[from] CatalogError),

    /// The assembled rosters were rejected by the engine.
    #[error(transparent)]
    Roster(#[from] EngineError),
}

impl CombatError for ContentError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::Catalog(err) => err.severity(),
            Self::Roster(err) => err.severity(),
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::Catalog(err) => err.error_code(),
            Self::Roster(err) => err.error_code(),
        }
    }
}
