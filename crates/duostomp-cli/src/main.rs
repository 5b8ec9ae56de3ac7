//! Duostomp CLI - host-side tooling for the duostomp pedal's control core.

mod commands;
mod scenario;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "duostomp")]
#[command(author, version, about = "Duostomp pedal simulator and config tools", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a scripted scenario through the control core
    Simulate(commands::simulate::SimulateArgs),

    /// Show, validate or create pedal config files
    Config(commands::config::ConfigArgs),

    /// List the slots, their variants and the control layout
    Variants(commands::variants::VariantsArgs),
}

fn main() -> anyhow::Result<()> {
    // Logs go to stderr so frames and telemetry on stdout stay parseable
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Simulate(args) => commands::simulate::run(args),
        Commands::Config(args) => commands::config::run(args),
        Commands::Variants(args) => commands::variants::run(args),
    }
}
