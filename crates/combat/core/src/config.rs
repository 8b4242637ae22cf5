/// Combat configuration constants and tunable parameters.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CombatConfig {
    /// Percentage of incoming damage a `defending` target still takes.
    /// Applied after the caster's enraged bonus, rounded down.
    pub defend_percent: u32,

    /// Tick cap used by `run_battle` when the caller does not supply one.
    pub max_ticks: u32,
}

impl CombatConfig {
    // ===== compile-time constants used as type parameters =====
    /// One slot per status kind; a character never holds two of the same kind.
    pub const MAX_STATUS_EFFECTS: usize = 6;

    // ===== runtime-tunable defaults =====
    pub const DEFAULT_DEFEND_PERCENT: u32 = 50;
    pub const DEFAULT_MAX_TICKS: u32 = 1000;

    pub const fn new() -> Self {
        Self {
            defend_percent: Self::DEFAULT_DEFEND_PERCENT,
            max_ticks: Self::DEFAULT_MAX_TICKS,
        }
    }

    pub const fn with_defend_percent(mut self, defend_percent: u32) -> Self {
        self.defend_percent = defend_percent;
        self
    }

    pub const fn with_max_ticks(mut self, max_ticks: u32) -> Self {
        self.max_ticks = max_ticks;
        self
    }
}

impl Default for CombatConfig {
    fn default() -> Self {
        Self::new()
    }
}
