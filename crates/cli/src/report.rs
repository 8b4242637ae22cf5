//! Terminal rendering of a battle run.

use console::style;

use combat_core::{
    BattleStatus, BattleSummary, CombatEvent, CombatState, DebugInfo, EventKind, RuleOutcome,
};

pub fn print_roster(state: &CombatState) {
    println!("{}", style("=== Rosters ===").bold().green());
    for character in state.characters() {
        let skills: Vec<&str> = character.skills.iter().map(|s| s.name.as_str()).collect();
        println!(
            "  {:<6} {:<10} {:>4} HP  [{}]",
            character.side,
            style(&character.name).bold(),
            character.max_hp,
            skills.join(", ")
        );
    }
    println!();
}

pub fn print_events(events: &[CombatEvent]) {
    for event in events {
        let line = format!("[{:>4}] {}", event.tick, event.message);
        let line = match event.kind {
            EventKind::Damage => style(line).red(),
            EventKind::Healing => style(line).green(),
            EventKind::StatusApplied | EventKind::StatusExpired => style(line).cyan(),
            EventKind::ActionCancelled | EventKind::TargetLost => style(line).yellow(),
            EventKind::Knockout => style(line).red().bold(),
            EventKind::Victory | EventKind::Defeat => style(line).magenta().bold(),
            EventKind::ActionQueued | EventKind::ActionResolved => style(line).dim(),
        };
        println!("{line}");
    }
}

pub fn print_debug(info: &DebugInfo) {
    if info.is_empty() {
        return;
    }
    println!("{}", style(format!("  -- trace tick {} --", info.tick)).dim());

    for evaluation in &info.rule_evaluations {
        let choice = evaluation
            .selected
            .as_ref()
            .map_or_else(|| "idle".to_owned(), |s| s.skill_name.clone());
        println!("  {} -> {}", style(&evaluation.caster_name).bold(), choice);
        for check in &evaluation.checks {
            if check.outcome == RuleOutcome::Skipped {
                continue;
            }
            println!(
                "      {} rule #{} (p{}): {}",
                check.skill_name, check.rule_index, check.priority, check.outcome
            );
            for condition in &check.conditions {
                let mark = if condition.passed { "ok" } else { "no" };
                println!(
                    "        [{mark}] {} expected {}, got {}",
                    condition.condition, condition.expected, condition.actual
                );
            }
        }
    }

    for decision in &info.targeting_decisions {
        let ids = |list: &[combat_core::CharacterId]| {
            list.iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join(" ")
        };
        println!(
            "  target {} {} [{}]: raw [{}] -> final [{}] ({})",
            decision.caster,
            decision.skill_id,
            decision.mode.tag(),
            ids(&decision.raw_candidates),
            ids(&decision.final_targets),
            decision.tie_break
        );
        for step in decision.filters.iter().filter(|s| s.applied) {
            println!(
                "      {}: removed [{}]{}",
                step.filter,
                ids(&step.removed),
                step.forced
                    .map(|id| format!(", forced {id}"))
                    .unwrap_or_default()
            );
        }
    }

    for substep in &info.resolution_substeps {
        if substep.details.is_empty() {
            continue;
        }
        println!("  {}", style(substep.kind).underlined());
        for detail in &substep.details {
            println!("      {detail}");
        }
    }
}

pub fn print_summary(summary: &BattleSummary, digest: Option<[u8; 32]>) {
    println!();
    println!("{}", style("=== Summary ===").bold().green());
    let status = match summary.status {
        BattleStatus::Victory => style("victory").green().bold(),
        BattleStatus::Defeat => style("defeat").red().bold(),
        BattleStatus::Ongoing => style("unfinished").yellow().bold(),
    };
    println!("  Result: {status} after {} ticks", summary.ticks);
    println!(
        "  {:<10} {:>7} {:>7} {:>7} {:>7} {:>4}",
        "", "dealt", "taken", "healed", "actions", "KOs"
    );
    for tally in summary.tallies.values() {
        let name = if tally.knocked_out {
            style(tally.name.as_str()).dim()
        } else {
            style(tally.name.as_str()).bold()
        };
        println!(
            "  {:<10} {:>7} {:>7} {:>7} {:>7} {:>4}",
            name,
            tally.damage_dealt,
            tally.damage_taken,
            tally.healing_done,
            tally.actions_resolved,
            tally.knockouts_scored
        );
    }
    if let Some((id, tally)) = summary.top_damage() {
        println!("  Top damage: {} ({id}) with {}", tally.name, tally.damage_dealt);
    }
    if let Some(digest) = digest {
        println!("  State digest: {}", hex::encode(digest));
    }
}
