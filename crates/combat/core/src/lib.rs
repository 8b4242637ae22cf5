//! Deterministic tick-based party combat.
//!
//! `combat-core` defines the canonical combat rules (state, skills, AI rules,
//! targeting, resolution) and exposes pure APIs: every tick is a function
//! from one [`CombatState`] to a new one. All state mutation flows through
//! [`engine::CombatEngine`]; content crates and front-ends depend on the
//! types re-exported here.
pub mod ai;
pub mod config;
pub mod engine;
pub mod env;
pub mod error;
pub mod event;
pub mod skill;
pub mod state;
pub mod summary;
pub mod targeting;
pub mod trace;

pub use ai::{
    ConditionCheck, ConditionContext, RuleCheck, RuleEvaluation, RuleOutcome, SelectedRule,
};
pub use config::CombatConfig;
pub use engine::{
    CombatEngine, DebugTickOutcome, EngineError, TickOutcome, TickPhase, execute_tick,
    execute_tick_with_debug, run_battle,
};
pub use env::{CatalogError, CombatEnv, SkillCatalog};
pub use error::{CombatError, ErrorSeverity, ParseError};
pub use event::{CombatEvent, EventKind};
pub use skill::{Condition, ConditionTag, EffectKind, Rule, Skill, SkillEffect, TargetingMode};
pub use state::{
    Action, BattleStatus, Character, CharacterId, CombatState, Position, Side, SkillId,
    StatusEffect, StatusEffects, StatusKind, Tick,
};
pub use summary::{BattleSummary, CharacterTally};
pub use targeting::{FilterKind, FilterStep, TargetResolution};
pub use trace::{
    DebugInfo, DebugRecorder, NoTrace, ResolutionSubstep, SubstepDetail, SubstepKind,
    TargetingDecision, TraceSink,
};
