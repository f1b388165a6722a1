//! Convert command
//!
//! Usage: zonelens convert write|read <VALUE> [--client Z] [--server Z] [--asserted Z]

use clap::{Args, Subcommand};
use serde::Serialize;
use zonelens_core::{LocalTimeKind, TemporalCodec, WallClockValue};

use super::{profile_summary, CliResult, OutputFormat, ZoneArgs};
use crate::config::Settings;

#[derive(Debug, Args)]
pub struct ConvertArgs {
    #[command(subcommand)]
    pub command: ConvertCommand,
}

#[derive(Debug, Subcommand)]
pub enum ConvertCommand {
    /// Client wall-clock value to the digits that would be stored
    Write(ConvertValueArgs),
    /// Stored digits to the value the client would see
    Read(ConvertValueArgs),
}

#[derive(Debug, Args)]
pub struct ConvertValueArgs {
    /// Wall-clock value, `YYYY-MM-DD HH:MM:SS`
    pub value: WallClockValue,

    #[command(flatten)]
    pub zones: ZoneArgs,

    #[arg(long, value_enum, default_value_t)]
    pub format: OutputFormat,
}

#[derive(Debug, Serialize)]
struct Conversion {
    direction: &'static str,
    input: WallClockValue,
    client_zone: &'static str,
    server_zone: &'static str,
    asserted_zone: Option<&'static str>,
    /// How the input sits in the zone it is interpreted in
    input_kind: LocalTimeKind,
    output: WallClockValue,
}

pub fn execute(args: ConvertArgs, settings: &Settings) -> CliResult {
    let (direction, value_args) = match args.command {
        ConvertCommand::Write(a) => ("write", a),
        ConvertCommand::Read(a) => ("read", a),
    };
    let (client, profile) = value_args.zones.resolve(settings)?;
    let input = value_args.value;

    let (input_kind, output) = if direction == "write" {
        (
            TemporalCodec::classify(input, client),
            TemporalCodec::to_stored_digits(input, client, &profile)?,
        )
    } else {
        (
            TemporalCodec::classify(input, profile.effective_zone()),
            TemporalCodec::from_stored_digits(input, client, &profile)?,
        )
    };

    match value_args.format {
        OutputFormat::Text => {
            println!(
                "{} -> {}  (client {}, {})",
                input,
                output,
                client,
                profile_summary(&profile)
            );
            if input_kind != LocalTimeKind::Unique {
                println!("note: input is {:?} in its zone", input_kind);
            }
        }
        OutputFormat::Json => {
            let conversion = Conversion {
                direction,
                input,
                client_zone: client.name(),
                server_zone: profile.server_zone().name(),
                asserted_zone: profile.asserted_zone().map(|z| z.name()),
                input_kind,
                output,
            };
            println!("{}", serde_json::to_string_pretty(&conversion)?);
        }
    }

    Ok(())
}
