//! Target resolution: selector followed by the filter chain.
mod filter;
mod selector;

pub use filter::{FilterKind, FilterStep, apply_filters};
pub use selector::{Selection, select_candidates};

use crate::skill::TargetingMode;
use crate::state::{Character, CharacterId, CombatState};

/// Full account of how a cast's targets were chosen.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TargetResolution {
    pub mode: TargetingMode,
    pub raw_candidates: Vec<CharacterId>,
    pub filters: Vec<FilterStep>,
    pub targets: Vec<CharacterId>,
    pub tie_break: String,
}

impl TargetResolution {
    pub fn is_empty(&self) -> bool {
        self.targets.is_empty()
    }

    /// Account for a target list supplied by the caller instead of chosen
    /// by the selector.
    pub fn scripted(mode: TargetingMode, targets: Vec<CharacterId>) -> Self {
        Self {
            mode,
            raw_candidates: targets.clone(),
            filters: Vec::new(),
            targets,
            tie_break: "scripted target list".to_owned(),
        }
    }
}

/// Selects and filters targets for `caster` using `mode`.
pub fn resolve_targets(
    mode: TargetingMode,
    caster: &Character,
    state: &CombatState,
) -> TargetResolution {
    let Selection {
        candidates,
        tie_break,
    } = select_candidates(mode, caster, state);
    let (targets, filters) = apply_filters(mode, caster, candidates.clone(), state);

    TargetResolution {
        mode,
        raw_candidates: candidates,
        filters,
        targets,
        tie_break,
    }
}
