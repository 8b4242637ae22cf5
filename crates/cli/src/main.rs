//! `skirmish`: runs a named matchup to completion and narrates it.
mod config;
mod report;

use anyhow::{Context, Result};
use clap::Parser;
use console::style;

use combat_content::{Matchup, SkillLibrary};
use combat_core::{BattleSummary, CombatEngine, CombatEnv, CombatState, DebugInfo};

use config::CliConfig;

/// Run a deterministic party battle
#[derive(Parser)]
#[command(name = "skirmish")]
#[command(about = "Deterministic tick-based party combat", long_about = None)]
#[command(version)]
struct Cli {
    /// Matchup to run
    #[arg(value_name = "MATCHUP", default_value_t = Matchup::default())]
    matchup: Matchup,

    /// Tick cap (overrides SKIRMISH_MAX_TICKS)
    #[arg(short, long, value_name = "TICKS")]
    max_ticks: Option<u32>,

    /// Damage share in percent a defending target takes
    #[arg(long, value_name = "PERCENT")]
    defend_percent: Option<u32>,

    /// Print the decision trace of every tick
    #[arg(short, long)]
    debug: bool,

    /// Output format
    #[arg(short, long, value_enum, default_value = "text")]
    format: OutputFormat,

    /// List the available matchups and exit
    #[arg(long)]
    list: bool,
}

#[derive(Clone, Copy, clap::ValueEnum)]
enum OutputFormat {
    /// Narrated event log and summary
    Text,
    /// Final state, summary and traces as JSON
    Json,
}

fn main() -> Result<()> {
    // Load .env file if it exists (for SKIRMISH_* variables)
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    if cli.list {
        for matchup in Matchup::all() {
            println!("{:<10} {}", style(matchup).bold(), matchup.description());
        }
        return Ok(());
    }

    let config =
        CliConfig::from_env().with_overrides(cli.max_ticks, cli.defend_percent, cli.debug);
    tracing::info!(
        matchup = %cli.matchup,
        max_ticks = config.combat.max_ticks,
        debug = config.debug,
        "starting battle"
    );

    let library = SkillLibrary::builtin();
    let state = cli
        .matchup
        .build(&library)
        .with_context(|| format!("Failed to assemble matchup '{}'", cli.matchup))?;

    let engine = CombatEngine::new(CombatEnv::with_catalog(&library).with_config(config.combat));
    let text = matches!(cli.format, OutputFormat::Text);

    if text {
        report::print_roster(&state);
    }
    let (end, traces) = run(&engine, state, &config, text)?;

    let summary = BattleSummary::from_state(&end);
    let digest = end.digest().context("Failed to digest final state")?;
    tracing::info!(status = %end.battle_status, ticks = end.tick.0, "battle finished");

    match cli.format {
        OutputFormat::Text => report::print_summary(&summary, Some(digest)),
        OutputFormat::Json => {
            let output = serde_json::json!({
                "matchup": cli.matchup.to_string(),
                "digest": hex::encode(digest),
                "summary": summary,
                "state": end,
                "traces": traces,
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
    }

    Ok(())
}

/// Executes ticks until the battle ends or the cap is reached, printing as it
/// goes when `narrate` is set.
fn run(
    engine: &CombatEngine<'_>,
    mut state: CombatState,
    config: &CliConfig,
    narrate: bool,
) -> Result<(CombatState, Vec<DebugInfo>)> {
    let mut traces = Vec::new();

    for _ in 0..config.combat.max_ticks {
        if state.is_over() {
            break;
        }

        let outcome = if config.debug {
            let debug = engine.execute_tick_with_debug(&state)?;
            if narrate {
                report::print_debug(&debug.debug_info);
            }
            traces.push(debug.debug_info);
            debug.outcome
        } else {
            engine.execute_tick(&state)?
        };

        if narrate {
            report::print_events(&outcome.events);
        }
        state = outcome.state;
    }

    if !state.is_over() {
        tracing::warn!(
            max_ticks = config.combat.max_ticks,
            "battle still ongoing at tick cap"
        );
    }
    Ok((state, traces))
}
