//! zonelens CLI
//!
//! Runs the zone conversion model from the command line: single
//! conversions, seed import, stored record display, and scenario suites.

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use zonelens_core::logging_facility::{init, Profile};

mod commands;
mod config;

#[derive(Debug, Parser)]
#[command(name = "zonelens")]
#[command(about = "zonelens - time zone conversion over zone-naive storage", long_about = None)]
struct Cli {
    /// Config file [default: ./zonelens.toml when present]
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Logging profile: dev, prod or test [default: prod]
    #[arg(long, global = true)]
    log: Option<Profile>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Convert a single value
    Convert(commands::convert::ConvertArgs),
    /// Seed import operations
    Seed(commands::seed::SeedArgs),
    /// Show a stored record as a client would see it
    Show(commands::show::ShowArgs),
    /// Run a scenario suite
    Verify(commands::verify::VerifyArgs),
}

fn run(cli: Cli) -> commands::CliResult {
    let settings = config::Settings::load(cli.config.as_deref())?;

    let profile = match (cli.log, settings.logging.profile.as_deref()) {
        (Some(profile), _) => profile,
        (None, Some(name)) => name.parse()?,
        (None, None) => Profile::Production,
    };
    init(profile);

    match cli.command {
        Commands::Convert(args) => commands::convert::execute(args, &settings),
        Commands::Seed(args) => commands::seed::execute(args, &settings),
        Commands::Show(args) => commands::show::execute(args, &settings),
        Commands::Verify(args) => commands::verify::execute(args, &settings),
    }
}

fn main() {
    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
