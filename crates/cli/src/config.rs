//! Run configuration for the `skirmish` binary.
use std::env;

use combat_core::CombatConfig;

/// Settings for one battle run.
///
/// Resolved in three layers: built-in defaults, environment variables
/// (a `.env` file is loaded first), then command-line flags.
#[derive(Clone, Debug, Default)]
pub struct CliConfig {
    pub combat: CombatConfig,
    /// Print the per-tick decision trace.
    pub debug: bool,
}

impl CliConfig {
    /// Construct configuration from environment variables.
    ///
    /// Environment variables:
    /// - `SKIRMISH_MAX_TICKS` - Tick cap for the battle (default: 1000)
    /// - `SKIRMISH_DEFEND_PERCENT` - Damage share a defending target takes (default: 50)
    /// - `SKIRMISH_DEBUG` - `1`/`true` prints the decision trace (default: off)
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Some(max_ticks) = read_env::<u32>("SKIRMISH_MAX_TICKS") {
            config.combat = config.combat.with_max_ticks(max_ticks.max(1));
        }
        if let Some(percent) = read_env::<u32>("SKIRMISH_DEFEND_PERCENT") {
            config.combat = config.combat.with_defend_percent(percent.min(100));
        }
        if let Some(debug) = read_flag("SKIRMISH_DEBUG") {
            config.debug = debug;
        }

        config
    }

    /// Applies command-line overrides on top of the environment.
    pub fn with_overrides(
        mut self,
        max_ticks: Option<u32>,
        defend_percent: Option<u32>,
        debug: bool,
    ) -> Self {
        if let Some(max_ticks) = max_ticks {
            self.combat = self.combat.with_max_ticks(max_ticks.max(1));
        }
        if let Some(percent) = defend_percent {
            self.combat = self.combat.with_defend_percent(percent.min(100));
        }
        self.debug |= debug;
        self
    }
}

fn read_env<T>(key: &str) -> Option<T>
where
    T: std::str::FromStr,
{
    env::var(key).ok()?.parse().ok()
}

fn read_flag(key: &str) -> Option<bool> {
    let value = env::var(key).ok()?;
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn overrides_win_over_defaults() {
        let config = CliConfig::default().with_overrides(Some(40), Some(150), true);

        assert_eq!(config.combat.max_ticks, 40);
        assert_eq!(config.combat.defend_percent, 100);
        assert!(config.debug);
    }

    #[test]
    fn absent_overrides_keep_values() {
        let config = CliConfig::default().with_overrides(None, None, false);

        assert_eq!(config.combat, CombatConfig::default());
        assert!(!config.debug);
    }
}
