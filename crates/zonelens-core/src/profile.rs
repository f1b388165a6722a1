//! Connection profile: the zone settings of one logical connection

use serde::{Deserialize, Serialize};
use url::Url;

use crate::errors::{Result, ZoneLensError};
use crate::model::ZoneLabel;

/// Query parameter a JDBC-style URL uses to assert the server's zone
pub const SERVER_TIMEZONE_PARAM: &str = "serverTimezone";

/// Zone settings of a connection
///
/// `server_zone` is where the backing server actually runs. `asserted_zone`
/// is a client-side override of how digits are produced and interpreted on
/// the wire; it never changes what the server does.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConnectionProfile {
    asserted_zone: Option<ZoneLabel>,
    server_zone: ZoneLabel,
}

impl ConnectionProfile {
    /// Build a profile from labels, resolving both eagerly
    ///
    /// # Errors
    ///
    /// Returns `UnknownZone` for the first label that fails to resolve.
    pub fn new(asserted_zone: Option<&str>, server_zone: &str) -> Result<Self> {
        let server_zone = ZoneLabel::parse(server_zone)?;
        let asserted_zone = asserted_zone.map(ZoneLabel::parse).transpose()?;
        Ok(Self {
            asserted_zone,
            server_zone,
        })
    }

    pub fn from_labels(asserted_zone: Option<ZoneLabel>, server_zone: ZoneLabel) -> Self {
        Self {
            asserted_zone,
            server_zone,
        }
    }

    /// Profile with no wire assertion
    pub fn unasserted(server_zone: ZoneLabel) -> Self {
        Self::from_labels(None, server_zone)
    }

    /// Read the asserted zone from a connection URL
    ///
    /// Accepts `jdbc:`-prefixed URLs such as
    /// `jdbc:mysql://localhost:4406/testdb?serverTimezone=US/Eastern`. Only the
    /// `serverTimezone` parameter is consulted; a URL without it yields an
    /// unasserted profile.
    ///
    /// # Errors
    ///
    /// Returns `InvalidConnectionUrl` if the URL does not parse, or
    /// `UnknownZone` if either zone fails to resolve.
    pub fn from_connection_url(url: &str, server_zone: &str) -> Result<Self> {
        let server_zone = ZoneLabel::parse(server_zone)?;
        let without_prefix = url.strip_prefix("jdbc:").unwrap_or(url);
        let parsed = Url::parse(without_prefix).map_err(|e| ZoneLensError::InvalidConnectionUrl {
            url: url.to_string(),
            reason: e.to_string(),
        })?;

        let asserted_zone = parsed
            .query_pairs()
            .find(|(key, _)| key == SERVER_TIMEZONE_PARAM)
            .map(|(_, value)| ZoneLabel::parse(&value))
            .transpose()?;

        Ok(Self {
            asserted_zone,
            server_zone,
        })
    }

    /// Same server, with the wire assertion replaced
    pub fn with_asserted_zone(self, zone: ZoneLabel) -> Self {
        Self {
            asserted_zone: Some(zone),
            ..self
        }
    }

    /// Same server, with the wire assertion dropped
    pub fn without_assertion(self) -> Self {
        Self {
            asserted_zone: None,
            ..self
        }
    }

    pub fn asserted_zone(&self) -> Option<ZoneLabel> {
        self.asserted_zone
    }

    pub fn server_zone(&self) -> ZoneLabel {
        self.server_zone
    }

    /// The zone the conversion layer reads and writes digits in
    pub fn effective_zone(&self) -> ZoneLabel {
        self.asserted_zone.unwrap_or(self.server_zone)
    }
}
