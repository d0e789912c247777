//! Lattica - headless simulation driver
//!
//! Builds a scenario (a built-in preset or a TOML file), runs the requested
//! number of generations, and prints textual board dumps along the way.
//! Rendering and pacing beyond an optional sleep stay out of the engine.

use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;

use lattica::scenario::Scenario;
use lattica::{LatticaError, Result};

/// Headless cellular-automaton runner
#[derive(Parser, Debug)]
#[command(name = "lattica")]
#[command(about = "Run a cellular-automaton scenario and dump the board as text")]
struct Args {
    /// Built-in preset: life or forest-fire
    #[arg(long, default_value = "life")]
    preset: String,

    /// TOML scenario file (takes precedence over --preset)
    #[arg(long)]
    scenario: Option<PathBuf>,

    /// Number of generations to run
    #[arg(long, default_value_t = 100)]
    generations: u64,

    /// Print the board every N generations (0 = only at the end)
    #[arg(long, default_value_t = 0)]
    show_every: u64,

    /// Random seed override for deterministic runs
    #[arg(long)]
    seed: Option<u64>,

    /// Pause between generations in milliseconds
    #[arg(long, default_value_t = 0)]
    pause_ms: u64,

    /// Tree growth probability for the forest-fire preset
    #[arg(long, default_value_t = 0.01)]
    growth: f64,

    /// Lightning probability for the forest-fire preset
    #[arg(long, default_value_t = 0.0001)]
    ignition: f64,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter("lattica=info")
        .init();

    let args = Args::parse();

    let mut scenario = match &args.scenario {
        Some(path) => Scenario::load(path)?,
        None => match args.preset.as_str() {
            "life" => Scenario::life()?,
            "forest-fire" => Scenario::forest_fire(args.growth, args.ignition)?,
            other => {
                return Err(LatticaError::Scenario(format!(
                    "unknown preset {:?}, expected life or forest-fire",
                    other
                )))
            }
        },
    };
    if let Some(seed) = args.seed {
        scenario.seed = seed;
    }

    tracing::info!(
        "running scenario {:?}: {}x{}, seed {}",
        scenario.name,
        scenario.width,
        scenario.height,
        scenario.seed
    );
    for state in scenario.config.states() {
        if let Some(name) = scenario.config.state_name(state) {
            tracing::info!("state {} = {}", state, name);
        }
    }

    let mut board = scenario.build()?;

    for generation in 1..=args.generations {
        board.update();
        if args.show_every > 0 && generation % args.show_every == 0 {
            println!("--- generation {} ---", generation);
            print!("{}", board);
        }
        if args.pause_ms > 0 {
            std::thread::sleep(Duration::from_millis(args.pause_ms));
        }
    }

    print!("{}", board);
    tracing::info!("generations run: {}", board.generation());
    Ok(())
}
