//! Seed import command
//!
//! Usage: zonelens seed import <PATH> [--db <PATH>]

use clap::{Args, Subcommand};
use std::path::{Path, PathBuf};

use super::{CliResult, DbArgs};
use crate::config::Settings;

#[derive(Debug, Args)]
pub struct SeedArgs {
    #[command(subcommand)]
    pub command: SeedCommand,
}

#[derive(Debug, Subcommand)]
pub enum SeedCommand {
    /// Import a seed file, or every seed in a directory, into the database
    Import(ImportArgs),
}

#[derive(Debug, Args)]
pub struct ImportArgs {
    /// Path to seed YAML file or directory
    pub path: PathBuf,

    #[command(flatten)]
    pub db: DbArgs,
}

/// Execute seed command
pub fn execute(args: SeedArgs, settings: &Settings) -> CliResult {
    match args.command {
        SeedCommand::Import(import_args) => execute_import(import_args, settings),
    }
}

fn seed_files(dir: &Path) -> std::io::Result<Vec<PathBuf>> {
    let mut files: Vec<PathBuf> = std::fs::read_dir(dir)?
        .filter_map(|e| e.ok())
        .map(|e| e.path())
        .filter(|p| {
            p.extension()
                .map(|ext| ext == "yaml" || ext == "yml")
                .unwrap_or(false)
        })
        .collect();
    // Sorted for a deterministic import order
    files.sort();
    Ok(files)
}

fn execute_import(args: ImportArgs, settings: &Settings) -> CliResult {
    let mut conn = zonelens_store::db::open(args.db.path(settings))?;
    zonelens_store::migrations::apply_migrations(&mut conn)?;

    let files = if args.path.is_dir() {
        seed_files(&args.path)?
    } else {
        vec![args.path]
    };

    for seed_file in files {
        println!("Importing {}...", seed_file.display());
        let import = zonelens_store::seed::import_seed(&seed_file, &mut conn)?;
        println!(
            "✓ Imported {} record(s) (digest: {})",
            import.records, import.digest
        );
    }

    Ok(())
}
