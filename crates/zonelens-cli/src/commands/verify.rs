//! Verify command
//!
//! Usage: zonelens verify <SUITE> [--sqlite [--db <PATH>]] [--format text|json]
//!
//! Without `--sqlite` the suite's records are loaded into a fresh in-memory
//! store. With it, scenarios run against the configured database and the
//! suite's records are not written.

use clap::Args;
use std::path::PathBuf;
use zonelens_core::{
    MemoryStore, RoundTripVerifier, SuiteCase, SuiteReport, WallClockStore, ZoneRegistry,
};
use zonelens_store::seed::{load_records, parse_seed_file, parse_seed_file_with_db};
use zonelens_store::SqliteWallClockStore;

use super::{CliResult, DbArgs, OutputFormat};
use crate::config::Settings;

#[derive(Debug, Args)]
pub struct VerifyArgs {
    /// Scenario suite (seed format)
    pub suite: PathBuf,

    /// Run against the SQLite database instead of an in-memory store
    #[arg(long)]
    pub sqlite: bool,

    #[command(flatten)]
    pub db: DbArgs,

    #[arg(long, value_enum, default_value_t)]
    pub format: OutputFormat,
}

fn run<S: WallClockStore>(store: S, cases: &[SuiteCase]) -> Result<SuiteReport, Box<dyn std::error::Error>> {
    let mut verifier = RoundTripVerifier::new(ZoneRegistry::global(), store);
    Ok(verifier.verify_suite(cases)?)
}

pub fn execute(args: VerifyArgs, settings: &Settings) -> CliResult {
    let report = if args.sqlite {
        let store = SqliteWallClockStore::open(args.db.path(settings))?;
        let suite = parse_seed_file_with_db(&args.suite, Some(store.connection()))?;
        run(store, &suite.suite_cases()?)?
    } else {
        let suite = parse_seed_file(&args.suite)?;
        let mut store = MemoryStore::new();
        load_records(&suite, &mut store)?;
        run(store, &suite.suite_cases()?)?
    };

    match args.format {
        OutputFormat::Text => print_text(&report),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&report)?),
    }

    if report.all_passed() {
        Ok(())
    } else {
        Err(format!(
            "{} of {} scenario(s) failed",
            report.failed(),
            report.outcomes.len()
        )
        .into())
    }
}

fn print_text(report: &SuiteReport) {
    for outcome in &report.outcomes {
        let mark = if outcome.passed { "✓" } else { "✗" };
        println!(
            "{} {}: stored {} shown {} expected {}",
            mark, outcome.scenario, outcome.stored_digits, outcome.displayed, outcome.expected
        );
    }
    println!(
        "{} passed, {} failed (trace {})",
        report.passed(),
        report.failed(),
        report.trace_id
    );
}
