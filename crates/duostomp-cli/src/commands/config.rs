//! Pedal config commands.
//!
//! Provides commands to show, validate and create config files.

use std::path::{Path, PathBuf};

use anyhow::bail;
use clap::{Args, Subcommand};
use duostomp_config::{PedalConfig, ValidationError};

#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    command: ConfigCommand,
}

#[derive(Subcommand)]
enum ConfigCommand {
    /// Print a config as TOML with every default filled in
    Show {
        /// Config file (stock settings if omitted)
        path: Option<PathBuf>,
    },

    /// Check a config file and list every problem found
    Validate {
        /// Config file
        path: PathBuf,
    },

    /// Write the stock settings to a new config file
    Init {
        /// Destination file
        path: PathBuf,

        /// Name stored in the file
        #[arg(short, long)]
        name: Option<String>,

        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

/// Run the config command.
pub fn run(args: ConfigArgs) -> anyhow::Result<()> {
    match args.command {
        ConfigCommand::Show { path } => show(path),
        ConfigCommand::Validate { path } => validate(&path),
        ConfigCommand::Init { path, name, force } => init(path, name, force),
    }
}

fn show(path: Option<PathBuf>) -> anyhow::Result<()> {
    let config = match path {
        Some(path) => PedalConfig::load(&path)?,
        None => PedalConfig::default(),
    };
    print!("{}", config.to_toml()?);
    Ok(())
}

fn validate(path: &Path) -> anyhow::Result<()> {
    let config = PedalConfig::load(path)?;
    match duostomp_config::validate_settings(&config.settings) {
        Ok(()) => {
            println!("{}: ok", path.display());
            Ok(())
        }
        Err(err) => {
            let problems = match err {
                ValidationError::Multiple(errors) => errors,
                single => vec![single],
            };
            println!("{}: {} problem(s)", path.display(), problems.len());
            for problem in &problems {
                println!("  - {problem}");
            }
            bail!("config '{}' is invalid", path.display());
        }
    }
}

fn init(path: PathBuf, name: Option<String>, force: bool) -> anyhow::Result<()> {
    if path.exists() && !force {
        bail!(
            "'{}' already exists. Use --force to overwrite.",
            path.display()
        );
    }
    let config = match name {
        Some(name) => PedalConfig::new(name),
        None => PedalConfig::default(),
    };
    config.save(&path)?;
    tracing::info!(path = %path.display(), "wrote config");
    println!("Wrote {}", path.display());
    Ok(())
}
