//! Sondeo CLI - experiment driver for acoustic time-of-flight ranging.

mod commands;
mod config;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "sondeo")]
#[command(author, version, about = "Acoustic time-of-flight ranging toolkit", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate an excitation waveform
    Generate(commands::generate::GenerateArgs),

    /// Simulate the full ranging chain and recover the distance
    Simulate(commands::simulate::SimulateArgs),

    /// Correlate every slice of a binary capture in parallel
    Batch(commands::batch::BatchArgs),
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Generate(args) => commands::generate::run(args),
        Commands::Simulate(args) => commands::simulate::run(args),
        Commands::Batch(args) => commands::batch::run(args),
    }
}
