//! Subcommands and the zone flags they share

pub mod convert;
pub mod seed;
pub mod show;
pub mod verify;

use clap::{Args, ValueEnum};
use std::path::PathBuf;
use zonelens_core::{ConnectionProfile, ZoneLabel};

use crate::config::Settings;

pub type CliResult = Result<(), Box<dyn std::error::Error>>;

/// Zone flags; each falls back to the `[zones]` config table
#[derive(Debug, Clone, Args)]
pub struct ZoneArgs {
    /// Client (system default) zone [default: host zone]
    #[arg(long)]
    pub client: Option<String>,

    /// Zone the server runs in [default: UTC]
    #[arg(long)]
    pub server: Option<String>,

    /// Zone asserted on the connection
    #[arg(long, conflicts_with = "url")]
    pub asserted: Option<String>,

    /// Connection URL; its serverTimezone parameter is the asserted zone
    #[arg(long)]
    pub url: Option<String>,
}

impl ZoneArgs {
    /// Resolve the client zone and connection profile
    ///
    /// The process registry is left alone; an unset client zone falls back
    /// to the host zone named by `TZ`.
    pub fn resolve(
        &self,
        settings: &Settings,
    ) -> Result<(ZoneLabel, ConnectionProfile), Box<dyn std::error::Error>> {
        let client = match self.client.as_ref().or(settings.zones.client.as_ref()) {
            Some(label) => ZoneLabel::parse(label)?,
            None => ZoneLabel::host_default()?,
        };

        let server = self
            .server
            .as_deref()
            .or(settings.zones.server.as_deref())
            .unwrap_or("UTC");

        let profile = match &self.url {
            Some(url) => ConnectionProfile::from_connection_url(url, server)?,
            None => {
                let asserted = self
                    .asserted
                    .as_deref()
                    .or(settings.zones.asserted.as_deref());
                ConnectionProfile::new(asserted, server)?
            }
        };

        tracing::debug!(
            client_zone = %client,
            server_zone = %profile.server_zone(),
            asserted_zone = ?profile.asserted_zone().map(|z| z.name()),
            "zones resolved"
        );
        Ok((client, profile))
    }
}

/// Database location flag; falls back to `[store] path`
#[derive(Debug, Clone, Args)]
pub struct DbArgs {
    /// SQLite database path
    #[arg(long)]
    pub db: Option<PathBuf>,
}

impl DbArgs {
    pub fn path(&self, settings: &Settings) -> PathBuf {
        self.db.clone().unwrap_or_else(|| settings.store.path.clone())
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

fn profile_summary(profile: &ConnectionProfile) -> String {
    match profile.asserted_zone() {
        Some(asserted) => format!("server {}, asserted {}", profile.server_zone(), asserted),
        None => format!("server {}", profile.server_zone()),
    }
}
