//! Rule conditions.
//!
//! A condition is a named predicate with a threshold or status parameter.
//! Evaluation lives in [`crate::ai::conditions`]; this module only defines the
//! vocabulary and how it is parsed from `(type, parameter)` tag pairs.

use std::fmt;
use std::str::FromStr;

use crate::error::ParseError;
use crate::state::StatusKind;

/// A single predicate of a rule. All conditions of a rule must pass.
///
/// Percent thresholds compare against `current_hp * 100 / max_hp` without
/// rounding (`current * 100 < pct * max`).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(
    feature = "serde",
    serde(tag = "type", content = "param", rename_all = "kebab-case")
)]
pub enum Condition {
    /// Caster HP is below the given percentage of its maximum.
    HpBelow(u32),
    /// Caster HP is above the given percentage of its maximum.
    HpAbove(u32),
    /// Some living ally other than the caster is below the percentage.
    AllyHpBelow(u32),
    /// Some living enemy is below the percentage.
    EnemyHpBelow(u32),
    /// At least this many living allies besides the caster.
    AllyCount(u32),
    /// At least this many living enemies.
    EnemyCount(u32),
    /// Some ally (or the caster's side in general) is knocked out.
    AllyDead,
    /// Caster has the status active.
    SelfHasStatus(StatusKind),
    /// Caster does not have the status active.
    SelfLacksStatus(StatusKind),
    /// Some living ally other than the caster has the status active.
    AllyHasStatus(StatusKind),
    /// Some living enemy has the status active.
    EnemyHasStatus(StatusKind),
    /// No living enemy has the status active.
    EnemyLacksStatus(StatusKind),
}

/// Tag half of a condition, used for parsing and display.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::IntoStaticStr,
    strum::EnumIter,
)]
#[strum(serialize_all = "kebab-case")]
pub enum ConditionTag {
    HpBelow,
    HpAbove,
    AllyHpBelow,
    EnemyHpBelow,
    AllyCount,
    EnemyCount,
    AllyDead,
    SelfHasStatus,
    SelfLacksStatus,
    AllyHasStatus,
    EnemyHasStatus,
    EnemyLacksStatus,
}

impl Condition {
    /// Returns the tag of this condition.
    pub const fn tag(&self) -> ConditionTag {
        match self {
            Self::HpBelow(_) => ConditionTag::HpBelow,
            Self::HpAbove(_) => ConditionTag::HpAbove,
            Self::AllyHpBelow(_) => ConditionTag::AllyHpBelow,
            Self::EnemyHpBelow(_) => ConditionTag::EnemyHpBelow,
            Self::AllyCount(_) => ConditionTag::AllyCount,
            Self::EnemyCount(_) => ConditionTag::EnemyCount,
            Self::AllyDead => ConditionTag::AllyDead,
            Self::SelfHasStatus(_) => ConditionTag::SelfHasStatus,
            Self::SelfLacksStatus(_) => ConditionTag::SelfLacksStatus,
            Self::AllyHasStatus(_) => ConditionTag::AllyHasStatus,
            Self::EnemyHasStatus(_) => ConditionTag::EnemyHasStatus,
            Self::EnemyLacksStatus(_) => ConditionTag::EnemyLacksStatus,
        }
    }

    /// Parses a condition from its type tag and optional parameter.
    ///
    /// ```
    /// use combat_core::{Condition, StatusKind};
    ///
    /// assert_eq!(Condition::parse("hp-below", Some("30")).unwrap(), Condition::HpBelow(30));
    /// assert_eq!(
    ///     Condition::parse("enemy-has-status", Some("taunting")).unwrap(),
    ///     Condition::EnemyHasStatus(StatusKind::Taunting),
    /// );
    /// assert!(Condition::parse("moon-phase", None).is_err());
    /// ```
    ///
    /// # Errors
    ///
    /// Fails fast on an unknown tag, a missing parameter, or a parameter that
    /// is not a non-negative integer / known status.
    pub fn parse(tag: &str, param: Option<&str>) -> Result<Self, ParseError> {
        let kind =
            ConditionTag::from_str(tag).map_err(|_| ParseError::UnknownCondition(tag.to_owned()))?;

        let threshold = || -> Result<u32, ParseError> {
            let raw = param.ok_or_else(|| ParseError::MissingParameter {
                tag: tag.to_owned(),
            })?;
            raw.trim()
                .parse::<u32>()
                .map_err(|_| ParseError::InvalidParameter {
                    tag: tag.to_owned(),
                    value: raw.to_owned(),
                })
        };
        let status = || -> Result<StatusKind, ParseError> {
            let raw = param.ok_or_else(|| ParseError::MissingParameter {
                tag: tag.to_owned(),
            })?;
            StatusKind::from_str(raw.trim()).map_err(|_| ParseError::UnknownStatus(raw.to_owned()))
        };

        Ok(match kind {
            ConditionTag::HpBelow => Self::HpBelow(threshold()?),
            ConditionTag::HpAbove => Self::HpAbove(threshold()?),
            ConditionTag::AllyHpBelow => Self::AllyHpBelow(threshold()?),
            ConditionTag::EnemyHpBelow => Self::EnemyHpBelow(threshold()?),
            ConditionTag::AllyCount => Self::AllyCount(threshold()?),
            ConditionTag::EnemyCount => Self::EnemyCount(threshold()?),
            ConditionTag::AllyDead => Self::AllyDead,
            ConditionTag::SelfHasStatus => Self::SelfHasStatus(status()?),
            ConditionTag::SelfLacksStatus => Self::SelfLacksStatus(status()?),
            ConditionTag::AllyHasStatus => Self::AllyHasStatus(status()?),
            ConditionTag::EnemyHasStatus => Self::EnemyHasStatus(status()?),
            ConditionTag::EnemyLacksStatus => Self::EnemyLacksStatus(status()?),
        })
    }
}

impl fmt::Display for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let tag = self.tag();
        match self {
            Self::HpBelow(pct) | Self::HpAbove(pct) | Self::AllyHpBelow(pct)
            | Self::EnemyHpBelow(pct) => write!(f, "{tag}({pct}%)"),
            Self::AllyCount(n) | Self::EnemyCount(n) => write!(f, "{tag}({n})"),
            Self::AllyDead => write!(f, "{tag}"),
            Self::SelfHasStatus(status)
            | Self::SelfLacksStatus(status)
            | Self::AllyHasStatus(status)
            | Self::EnemyHasStatus(status)
            | Self::EnemyLacksStatus(status) => write!(f, "{tag}({status})"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn parses_threshold_conditions() {
        assert_eq!(
            Condition::parse("ally-count", Some(" 2 ")).unwrap(),
            Condition::AllyCount(2)
        );
        assert_eq!(
            Condition::parse("hp-above", Some("75")).unwrap(),
            Condition::HpAbove(75)
        );
    }

    #[test]
    fn rejects_malformed_conditions() {
        assert_eq!(
            Condition::parse("hp-below", None),
            Err(ParseError::MissingParameter {
                tag: "hp-below".into()
            })
        );
        assert_eq!(
            Condition::parse("hp-below", Some("-3")),
            Err(ParseError::InvalidParameter {
                tag: "hp-below".into(),
                value: "-3".into()
            })
        );
        assert_eq!(
            Condition::parse("self-has-status", Some("sleepy")),
            Err(ParseError::UnknownStatus("sleepy".into()))
        );
    }

    #[test]
    fn ally_dead_ignores_parameter() {
        assert_eq!(
            Condition::parse("ally-dead", Some("ignored")).unwrap(),
            Condition::AllyDead
        );
    }

    #[test]
    fn every_tag_is_parseable() {
        for tag in ConditionTag::iter() {
            let param = match tag {
                ConditionTag::SelfHasStatus
                | ConditionTag::SelfLacksStatus
                | ConditionTag::AllyHasStatus
                | ConditionTag::EnemyHasStatus
                | ConditionTag::EnemyLacksStatus => Some("poisoned"),
                _ => Some("1"),
            };
            let parsed = Condition::parse(tag.into(), param).unwrap();
            assert_eq!(parsed.tag(), tag);
        }
    }

    #[test]
    fn display_includes_parameter() {
        assert_eq!(Condition::HpBelow(30).to_string(), "hp-below(30%)");
        assert_eq!(
            Condition::EnemyHasStatus(StatusKind::Taunting).to_string(),
            "enemy-has-status(taunting)"
        );
    }
}
