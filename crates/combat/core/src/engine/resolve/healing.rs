//! Healing calculation (substep 2).

use crate::skill::SkillEffect;
use crate::state::CharacterId;
use crate::trace::{ResolutionSubstep, SubstepDetail};

use super::{Resolving, Snapshot};

/// One heal or revive landing on one target.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct HealInstance {
    pub caster: CharacterId,
    pub target: CharacterId,
    pub skill_name: String,
    pub amount: i32,
    pub revive: bool,
}

/// Computes every heal from pre-tick HP.
///
/// A heal restores `min(base, missing HP)` to a living target and nothing to
/// a knocked-out one. A revive restores its fixed amount to knocked-out
/// targets only. Inapplicable pairs are reported as lost targets elsewhere.
pub(crate) fn calculate(
    resolving: &[Resolving],
    snapshot: &Snapshot,
    trace: &mut ResolutionSubstep,
) -> Vec<HealInstance> {
    let mut heals = Vec::new();

    for entry in resolving {
        for (effect, target_id) in entry.effect_targets() {
            let Some(target) = snapshot.character(target_id) else {
                continue;
            };

            let (amount, revive, description) = match *effect {
                SkillEffect::Heal { amount } if target.is_alive() => {
                    let healed = amount.min(target.missing_hp()).max(0);
                    (
                        healed,
                        false,
                        format!("heal {amount}, missing {} -> {healed}", target.missing_hp()),
                    )
                }
                SkillEffect::Revive { amount } if target.is_knocked_out() => {
                    let restored = amount.clamp(0, target.max_hp);
                    (restored, true, format!("revive with {restored} HP"))
                }
                _ => continue,
            };

            trace.push(
                SubstepDetail::new(target_id, amount, description)
                    .by(entry.caster.id, entry.skill.name.clone()),
            );
            heals.push(HealInstance {
                caster: entry.caster.id,
                target: target_id,
                skill_name: entry.skill.name.clone(),
                amount,
                revive,
            });
        }
    }

    heals
}
