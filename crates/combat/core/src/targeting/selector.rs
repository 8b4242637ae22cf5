//! Raw candidate selection per targeting mode.
//!
//! Roster order is the tie-break everywhere: when two candidates are equally
//! good, the one further left in its roster wins. "Living" means strictly
//! positive HP.

use crate::skill::TargetingMode;
use crate::state::{Character, CharacterId, CombatState};

/// Candidates chosen by the selector plus a readable account of the choice.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Selection {
    pub candidates: Vec<CharacterId>,
    pub tie_break: String,
}

impl Selection {
    fn new(candidates: Vec<CharacterId>, tie_break: impl Into<String>) -> Self {
        Self {
            candidates,
            tie_break: tie_break.into(),
        }
    }

    fn none(reason: &str) -> Self {
        Self::new(Vec::new(), reason)
    }
}

/// Computes raw candidates for `mode` from the caster's point of view.
///
/// Ally-only modes exclude the caster here (`ally-lowest-hp`), not in the
/// filter chain.
pub fn select_candidates(
    mode: TargetingMode,
    caster: &Character,
    state: &CombatState,
) -> Selection {
    let (allies, enemies) = state.sides_of(caster.side);

    match mode {
        TargetingMode::SelfOnly => Selection::new(vec![caster.id], "caster only"),
        TargetingMode::NearestEnemy => nearest(caster, enemies),
        TargetingMode::SingleEnemyLowestHp => extremal(
            enemies.iter().filter(|c| c.is_alive()),
            Extreme::Lowest,
            "enemy",
        ),
        TargetingMode::SingleEnemyHighestHp => extremal(
            enemies.iter().filter(|c| c.is_alive()),
            Extreme::Highest,
            "enemy",
        ),
        TargetingMode::AllEnemies => all_living(enemies, "living enemies"),
        TargetingMode::AllyLowestHp => extremal(
            allies.iter().filter(|c| c.is_alive() && c.id != caster.id),
            Extreme::Lowest,
            "ally",
        ),
        TargetingMode::AllyDead => match allies.iter().find(|c| c.is_knocked_out()) {
            Some(fallen) => Selection::new(
                vec![fallen.id],
                format!("leftmost knocked-out ally {}", fallen.id),
            ),
            None => Selection::none("no knocked-out ally"),
        },
        TargetingMode::AllAllies => all_living(allies, "living allies including caster"),
    }
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Extreme {
    Lowest,
    Highest,
}

fn extremal<'a>(
    living: impl Iterator<Item = &'a Character>,
    extreme: Extreme,
    who: &str,
) -> Selection {
    let living: Vec<&Character> = living.collect();

    // Strict comparison keeps the leftmost candidate on ties.
    let mut best: Option<&Character> = None;
    for &candidate in &living {
        let better = match best {
            None => true,
            Some(current) => match extreme {
                Extreme::Lowest => candidate.current_hp < current.current_hp,
                Extreme::Highest => candidate.current_hp > current.current_hp,
            },
        };
        if better {
            best = Some(candidate);
        }
    }

    let Some(best) = best else {
        return Selection::none(&format!("no living {who}"));
    };

    let label = match extreme {
        Extreme::Lowest => "lowest",
        Extreme::Highest => "highest",
    };
    let tied: Vec<String> = living
        .iter()
        .filter(|c| c.current_hp == best.current_hp)
        .map(|c| c.id.to_string())
        .collect();
    let tie_break = if tied.len() > 1 {
        format!(
            "{label} HP {} shared by {}; leftmost {} chosen",
            best.current_hp,
            tied.join(", "),
            best.id
        )
    } else {
        format!("{label} HP {} is {}", best.current_hp, best.id)
    };

    Selection::new(vec![best.id], tie_break)
}

fn nearest(caster: &Character, enemies: &[Character]) -> Selection {
    let living: Vec<&Character> = enemies.iter().filter(|c| c.is_alive()).collect();
    let Some(first) = living.first() else {
        return Selection::none("no living enemy");
    };

    let positioned = caster.position.and_then(|origin| {
        living
            .iter()
            .map(|c| c.position.map(|p| (*c, origin.distance_squared(p))))
            .collect::<Option<Vec<_>>>()
    });

    match positioned {
        Some(distances) => {
            let mut best = distances[0];
            for &(candidate, distance) in &distances[1..] {
                if distance < best.1 {
                    best = (candidate, distance);
                }
            }
            Selection::new(
                vec![best.0.id],
                format!("nearest {} at squared distance {}", best.0.id, best.1),
            )
        }
        None => Selection::new(
            vec![first.id],
            format!("positions unavailable; first living enemy {}", first.id),
        ),
    }
}

fn all_living(roster: &[Character], what: &str) -> Selection {
    let candidates: Vec<CharacterId> = roster
        .iter()
        .filter(|c| c.is_alive())
        .map(|c| c.id)
        .collect();
    if candidates.is_empty() {
        return Selection::none(&format!("no {what}"));
    }
    Selection::new(candidates, format!("all {what} in roster order"))
}
