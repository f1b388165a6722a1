//! Show command
//!
//! Usage: zonelens show <ID> [--db <PATH>] [zone flags]

use clap::Args;
use serde::Serialize;
use zonelens_core::{RecordId, StoredRecord, TemporalCodec, WallClockStore, WallClockValue};
use zonelens_store::SqliteWallClockStore;

use super::{profile_summary, CliResult, DbArgs, OutputFormat, ZoneArgs};
use crate::config::Settings;

#[derive(Debug, Args)]
pub struct ShowArgs {
    /// Record id
    pub id: i64,

    #[command(flatten)]
    pub db: DbArgs,

    #[command(flatten)]
    pub zones: ZoneArgs,

    #[arg(long, value_enum, default_value_t)]
    pub format: OutputFormat,
}

#[derive(Debug, Serialize)]
struct Shown {
    #[serde(flatten)]
    record: StoredRecord,
    client_zone: &'static str,
    wire_zone: &'static str,
    displayed: WallClockValue,
}

pub fn execute(args: ShowArgs, settings: &Settings) -> CliResult {
    let (client, profile) = args.zones.resolve(settings)?;
    let store = SqliteWallClockStore::open(args.db.path(settings))?;

    let record = store.get(RecordId(args.id))?;
    let displayed = TemporalCodec::from_stored_digits(record.wall_clock, client, &profile)?;

    match args.format {
        OutputFormat::Text => {
            println!("record {}", record.id);
            println!("  stored:    {}", record.wall_clock);
            println!("  displayed: {}  (client {}, {})", displayed, client, profile_summary(&profile));
            if let Some(url) = &record.url {
                println!("  url:       {}", url);
            }
        }
        OutputFormat::Json => {
            let shown = Shown {
                record,
                client_zone: client.name(),
                wire_zone: profile.effective_zone().name(),
                displayed,
            };
            println!("{}", serde_json::to_string_pretty(&shown)?);
        }
    }

    Ok(())
}
