//! Headless ChronoForce battle runner.
//!
//! Loads a roster (or the built-in demo), runs the battle schedule at a fixed
//! tick until the battle is decided and its closing script has played, then
//! prints the outcome and every combatant's HP.
//!
//! # Running
//!
//! ```sh
//! cargo run --release -- --auto --seed 42
//! RUST_LOG=debug cargo run -- --roster roster.json --dt 16
//! ```

use std::path::PathBuf;
use std::process::ExitCode;

use bevy_ecs::prelude::*;
use clap::Parser;

use chronoforce::components::combatant::Combatant;
use chronoforce::components::stats::Stats;
use chronoforce::game::{build_battle_schedule, end_battle, start_battle, tick};
use chronoforce::resources::battleconfig::BattleConfig;
use chronoforce::resources::battleengine::BattleEngine;
use chronoforce::resources::director::BattleDirector;
use chronoforce::resources::strategy::StrategyTable;
use chronoforce::roster::Roster;

/// ChronoForce battle core, headless.
#[derive(Parser)]
#[command(version, about = "Runs a ChronoForce battle without a renderer and prints the result.")]
struct Cli {
    /// JSON roster describing both parties. Defaults to a built-in demo.
    #[arg(long, value_name = "PATH")]
    roster: Option<PathBuf>,

    /// INI file with timer and director tuning.
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Tick length in milliseconds.
    #[arg(long, default_value_t = 16.0)]
    dt: f32,

    /// Give up after this many ticks.
    #[arg(long, default_value_t = 60_000)]
    max_ticks: u64,

    /// Seed for the readiness timers.
    #[arg(long)]
    seed: Option<u64>,

    /// Let the AI pick commands for player-controlled combatants too.
    #[arg(long)]
    auto: bool,
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => {
            let mut config = BattleConfig::with_path(path);
            if let Err(e) = config.load_from_file() {
                log::error!("{}", e);
                return ExitCode::FAILURE;
            }
            config
        }
        None => {
            let mut config = BattleConfig::new();
            config.load_from_file().ok(); // ignore errors, use defaults
            config
        }
    };
    if cli.seed.is_some() {
        config.seed = cli.seed;
    }

    let roster = match &cli.roster {
        Some(path) => match Roster::load_from_file(path) {
            Ok(roster) => roster,
            Err(e) => {
                log::error!("{}", e);
                return ExitCode::FAILURE;
            }
        },
        None => Roster::demo(),
    };

    let mut world = World::new();
    if cli.auto {
        world.insert_resource(StrategyTable::automatic());
    }
    if let Err(e) = start_battle(&mut world, &roster, config) {
        log::error!("Cannot start battle: {}", e);
        return ExitCode::FAILURE;
    }

    let mut schedule = build_battle_schedule();
    let mut ticks = 0;
    while ticks < cli.max_ticks {
        tick(&mut world, &mut schedule, cli.dt);
        ticks += 1;
        let over = world.resource::<BattleEngine>().is_over();
        let idle = world.resource::<BattleDirector>().director.is_idle();
        if over && idle {
            break;
        }
    }

    let mut query = world.query::<(&Combatant, &Stats)>();
    let mut standings: Vec<_> = query
        .iter(&world)
        .map(|(c, s)| (c.side, c.slot, c.name.clone(), s.hp, s.max_hp))
        .collect();
    standings.sort_by_key(|(side, slot, ..)| (side.is_enemy(), *slot));

    let outcome = end_battle(&mut world);
    let seconds = ticks as f32 * cli.dt / 1000.0;
    match outcome {
        Some(outcome) => println!("{:?} after {} ticks ({:.1}s)", outcome, ticks, seconds),
        None => println!("Undecided after {} ticks ({:.1}s)", ticks, seconds),
    }
    for (side, _, name, hp, max_hp) in standings {
        let side = format!("{:?}", side);
        println!("  {:<6} {:<10} {:>4}/{}", side, name, hp, max_hp);
    }
    ExitCode::SUCCESS
}
