use super::common::{CharacterId, SkillId};
use crate::targeting::TargetResolution;

/// A skill use in flight: queued by the rule evaluator (or a script) and
/// resolved once `ticks_remaining` reaches zero.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Action {
    pub skill_id: SkillId,
    pub caster: CharacterId,
    /// Targets resolved when the action was queued, in selection order.
    pub targets: Vec<CharacterId>,
    pub ticks_remaining: u32,
    /// How the rule evaluator chose `targets`; `None` for scripted actions.
    #[cfg_attr(feature = "serde", serde(default))]
    pub targeting: Option<TargetResolution>,
}

impl Action {
    pub fn new(
        skill_id: impl Into<SkillId>,
        caster: CharacterId,
        targets: Vec<CharacterId>,
        ticks_remaining: u32,
    ) -> Self {
        Self {
            skill_id: skill_id.into(),
            caster,
            targets,
            ticks_remaining,
            targeting: None,
        }
    }

    pub fn with_targeting(mut self, resolution: TargetResolution) -> Self {
        self.targeting = Some(resolution);
        self
    }

    /// Returns true once the countdown has finished.
    pub const fn is_ready(&self) -> bool {
        self.ticks_remaining == 0
    }
}
