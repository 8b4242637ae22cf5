//! Targeting modes for skills.
//!
//! A targeting mode only names *which* characters a skill wants; the selector
//! in [`crate::targeting`] turns it into concrete ids against a state.

use std::str::FromStr;

use crate::error::ParseError;

/// How a skill selects its targets.
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
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
#[strum(serialize_all = "kebab-case")]
pub enum TargetingMode {
    /// The caster only.
    #[strum(serialize = "self")]
    #[cfg_attr(feature = "serde", serde(rename = "self"))]
    SelfOnly,

    /// Nearest living enemy by distance, or the first living one without positions.
    NearestEnemy,

    /// Living enemy with the lowest HP, leftmost on ties.
    SingleEnemyLowestHp,

    /// Living enemy with the highest HP, leftmost on ties.
    SingleEnemyHighestHp,

    /// Every living enemy in roster order.
    AllEnemies,

    /// Living ally with the lowest HP, excluding the caster, leftmost on ties.
    AllyLowestHp,

    /// Leftmost knocked-out character on the caster's side.
    AllyDead,

    /// Every living ally including the caster.
    AllAllies,
}

impl TargetingMode {
    /// Returns true if the mode picks characters from the opposing side.
    pub const fn is_hostile(self) -> bool {
        matches!(
            self,
            Self::NearestEnemy
                | Self::SingleEnemyLowestHp
                | Self::SingleEnemyHighestHp
                | Self::AllEnemies
        )
    }

    /// Returns true if the mode selects knocked-out characters on purpose.
    pub const fn selects_knocked_out(self) -> bool {
        matches!(self, Self::AllyDead)
    }

    /// Returns the kebab-case tag of this mode.
    pub fn tag(self) -> &'static str {
        self.into()
    }

    /// Parses a targeting tag such as `"all-enemies"`.
    ///
    /// # Errors
    ///
    /// Returns `ParseError::UnknownTargeting` for any unrecognized tag.
    pub fn parse(tag: &str) -> Result<Self, ParseError> {
        Self::from_str(tag).map_err(|_| ParseError::UnknownTargeting(tag.to_owned()))
    }
}
