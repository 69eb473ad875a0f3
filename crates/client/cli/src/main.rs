//! Operator tool for inspecting engine predictions.
//!
//! Reads a snapshot document (as the indexer emits them), runs the requested
//! preview, and prints the result. Used to debug prediction mismatches
//! against on-chain outcomes without spinning up the full client.
//!
//! ```text
//! sim-cli <snapshot.json> [explore|big|battle|flee|gold|json]
//! ```

use std::fs;

use anyhow::{bail, Context, Result};
use tracing_subscriber::EnvFilter;

use sim_core::{BattleSide, BigEncounter, Encounter, FleeOutcome};
use sim_runtime::{DecisionContext, Simulator};

fn main() -> Result<()> {
    // .env is optional; missing files are fine, parse errors are not fatal
    // either, matching how the rest of the tooling loads it.
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_target(false)
        .init();

    let mut args = std::env::args().skip(1);
    let Some(path) = args.next() else {
        bail!("usage: sim-cli <snapshot.json> [explore|big|battle|flee|gold|json]");
    };
    let mode = args.next().unwrap_or_else(|| "explore".to_owned());

    let document = fs::read_to_string(&path)
        .with_context(|| format!("failed to read snapshot {path}"))?;
    let context = DecisionContext::from_json(&document)
        .with_context(|| format!("failed to decode snapshot {path}"))?;
    let simulator = Simulator::from_env();

    match mode.as_str() {
        "explore" => print_explore(&simulator, &context),
        "big" => print_big(&simulator, &context),
        "battle" => print_battle(&simulator, &context)?,
        "flee" => print_flee(&simulator, &context)?,
        "gold" => {
            let gold = simulator.gold_preview(&context)?;
            println!("gold reward: {gold}");
        }
        "json" => {
            let rows = simulator.explore_preview(&context);
            println!("{}", serde_json::to_string_pretty(&rows)?);
        }
        other => bail!("unknown mode {other:?}"),
    }

    Ok(())
}

fn print_explore(simulator: &Simulator, context: &DecisionContext) {
    let rows = simulator.explore_preview(context);
    if rows.is_empty() {
        println!("no forecast (entropy not published yet?)");
        return;
    }

    println!(
        "{:>6} {:>4} {:<9} {:<28} {:>6} {:>6} {:>7}",
        "xp", "lvl", "kind", "what", "dodge", "damage", "next xp"
    );
    for row in rows {
        println!(
            "{:>6} {:>4} {:<9} {:<28} {:>6} {:>6} {:>7}",
            row.xp,
            row.adventurer_level,
            row.kind,
            row.summary,
            row.dodge_roll.map(|r| r.to_string()).unwrap_or_default(),
            row.damage
                .map(|d| {
                    if row.is_critical {
                        format!("{d}!")
                    } else {
                        d.to_string()
                    }
                })
                .unwrap_or_default(),
            row.next_xp,
        );
    }
}

fn print_big(simulator: &Simulator, context: &DecisionContext) {
    match simulator.next_big(context) {
        BigEncounter::LevelUp { next_xp } => {
            println!("level up before anything big (next xp {next_xp})");
        }
        BigEncounter::Found { xp, encounter } => match encounter {
            Encounter::Beast(beast) => println!(
                "beast #{} lv{} ({} health) at xp {xp}",
                beast.beast.id.get(),
                beast.beast.level,
                beast.beast.health
            ),
            Encounter::Obstacle(obstacle) => println!(
                "obstacle #{} lv{} at xp {xp}",
                obstacle.obstacle.id.get(),
                obstacle.obstacle.level
            ),
            Encounter::Discovery(_) => unreachable!("big-encounter scan skips discoveries"),
        },
    }
}

fn print_battle(simulator: &Simulator, context: &DecisionContext) -> Result<()> {
    let report = simulator.battle_preview(context)?;
    for (index, event) in report.events.iter().enumerate() {
        let actor = match event.side {
            BattleSide::Adventurer => "you hit",
            BattleSide::Beast => "beast hits",
        };
        let crit = if event.is_critical { " (critical)" } else { "" };
        let location = event
            .location
            .map(|slot| format!(" to the {slot}"))
            .unwrap_or_default();
        println!(
            "turn {:>2}: {actor} for {}{crit}{location}",
            index / 2 + 1,
            event.damage
        );
    }
    println!("outcome: {:?}", report.outcome);
    Ok(())
}

fn print_flee(simulator: &Simulator, context: &DecisionContext) -> Result<()> {
    let report = simulator.flee_preview(context)?;
    for event in &report.events {
        let crit = if event.is_critical { " (critical)" } else { "" };
        println!("beast hits for {}{crit}", event.damage);
    }
    match report.outcome {
        FleeOutcome::Fled { health_left } => {
            println!("escaped with {health_left} health");
        }
        FleeOutcome::AdventurerSlain => println!("the flee attempt is fatal"),
    }
    Ok(())
}
