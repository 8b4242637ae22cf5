use super::condition::Condition;
use super::targeting::TargetingMode;

/// One AI instruction attached to a skill.
///
/// A rule fires when every condition passes (AND semantics, an empty list
/// always passes). Higher `priority` is evaluated first.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Rule {
    pub priority: i32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub conditions: Vec<Condition>,
    /// Replaces the skill's own targeting mode when this rule fires.
    #[cfg_attr(feature = "serde", serde(default))]
    pub targeting_override: Option<TargetingMode>,
    /// Disabled rules stay in the loadout but are never selected.
    #[cfg_attr(feature = "serde", serde(default = "enabled_by_default"))]
    pub enabled: bool,
}

#[cfg(feature = "serde")]
const fn enabled_by_default() -> bool {
    true
}

impl Rule {
    pub fn new(priority: i32) -> Self {
        Self {
            priority,
            conditions: Vec::new(),
            targeting_override: None,
            enabled: true,
        }
    }

    /// A rule with no conditions: fires whenever targets exist.
    pub fn always(priority: i32) -> Self {
        Self::new(priority)
    }

    pub fn when(mut self, condition: Condition) -> Self {
        self.conditions.push(condition);
        self
    }

    pub fn targeting(mut self, mode: TargetingMode) -> Self {
        self.targeting_override = Some(mode);
        self
    }

    pub fn disabled(mut self) -> Self {
        self.enabled = false;
        self
    }

    /// Targeting used when this rule fires on `skill_targeting`.
    pub fn effective_targeting(&self, skill_targeting: TargetingMode) -> TargetingMode {
        self.targeting_override.unwrap_or(skill_targeting)
    }
}

/// Orders rules by descending priority; ties keep their original order.
///
/// Each rule is paired with its index in `rules`.
pub fn by_priority(rules: &[Rule]) -> Vec<(usize, &Rule)> {
    let mut ordered: Vec<(usize, &Rule)> = rules.iter().enumerate().collect();
    ordered.sort_by(|(_, a), (_, b)| b.priority.cmp(&a.priority));
    ordered
}
