use anyhow::Result;
use clap::Parser;
use snare_lib::app::{App, RunOptions};
use snare_lib::model::world::DEFAULT_MAX_ENTITIES;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Trap config file path
    #[arg(short, long, default_value = snare_io::DEFAULT_CONFIG_FILE)]
    config: PathBuf,

    /// Number of ticks to simulate
    #[arg(short, long, default_value_t = 1200)]
    ticks: u64,

    /// World seed
    #[arg(short, long, default_value_t = 42)]
    seed: u64,

    /// Creatures scattered over the field at start
    #[arg(
        long,
        default_value_t = 200,
        value_parser = clap::value_parser!(u64).range(..=DEFAULT_MAX_ENTITIES as u64)
    )]
    creatures: u64,

    /// Print the run summary as JSON
    #[arg(long)]
    json: bool,
}

fn main() -> Result<()> {
    snare_core::init_logging();
    let args = Args::parse();

    snare_io::ConfigStore::new(&args.config).load_and_save();
    let mut app = App::new(RunOptions {
        config: args.config,
        ticks: args.ticks,
        seed: args.seed,
        creatures: args.creatures as usize,
    })?;
    let summary = app.run()?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        println!("Ran {} ticks with seed {}", summary.ticks, summary.seed);
        println!(
            "Sources tagged: {} ({} still armed)",
            summary.sources_tagged, summary.sources_remaining
        );
        println!(
            "Triggers: {}, batch creatures: {}, skipped steps: {}",
            summary.triggers, summary.batch_spawned, summary.failed_steps
        );
        println!("Population: {}", summary.population);
    }
    Ok(())
}
