//! arena_sim - Run a scenario and print a JSON report
//!
//! Usage: `arena_sim [SCENARIO.toml] [--seed N] [--events]`

use arena_sim::{default_scenario, Scenario, SimError, Simulation};
use clap::Parser;
use std::path::PathBuf;

/// Headless lane simulation
#[derive(Debug, Parser)]
#[command(name = "arena_sim")]
#[command(about = "Run an arena scenario and print a JSON report", long_about = None)]
#[command(version)]
struct Cli {
    /// Scenario file (defaults to the embedded lane scenario)
    scenario: Option<PathBuf>,

    /// Override the scenario's RNG seed
    #[arg(long)]
    seed: Option<u64>,

    /// Also print the full event log
    #[arg(long = "events")]
    dump_events: bool,
}

fn main() -> Result<(), SimError> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let mut scenario = match &cli.scenario {
        Some(path) => Scenario::load(path)?,
        None => default_scenario(),
    };
    if let Some(seed) = cli.seed {
        scenario.seed = seed;
    }

    let mut simulation = Simulation::from_scenario(&scenario)?;
    let report = simulation.run();
    println!("{}", serde_json::to_string_pretty(&report)?);

    if cli.dump_events {
        println!("{}", simulation.game.sink().to_json()?);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let cli = Cli::try_parse_from(["arena_sim"]).unwrap();
        assert!(cli.scenario.is_none());
        assert!(cli.seed.is_none());
        assert!(!cli.dump_events);
    }

    #[test]
    fn test_all_options() {
        let cli = Cli::try_parse_from(["arena_sim", "lane.toml", "--seed", "9", "--events"]).unwrap();
        assert_eq!(cli.scenario, Some(PathBuf::from("lane.toml")));
        assert_eq!(cli.seed, Some(9));
        assert!(cli.dump_events);
    }

    #[test]
    fn test_bad_seed_rejected() {
        assert!(Cli::try_parse_from(["arena_sim", "--seed", "abc"]).is_err());
        assert!(Cli::try_parse_from(["arena_sim", "--turbo"]).is_err());
    }
}
