//! CLI configuration
//!
//! Settings come from an optional `zonelens.toml`; command-line flags take
//! precedence over anything the file sets.
//!
//! ```toml
//! [store]
//! path = ".zonelens/store.db"
//!
//! [zones]
//! client = "Europe/Paris"
//! server = "Europe/London"
//! asserted = "US/Eastern"
//!
//! [logging]
//! profile = "dev"
//! ```

use serde::Deserialize;
use std::path::{Path, PathBuf};

pub const DEFAULT_CONFIG_FILE: &str = "zonelens.toml";
pub const DEFAULT_DB_PATH: &str = ".zonelens/store.db";

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    pub store: StoreSettings,
    pub zones: ZoneDefaults,
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct StoreSettings {
    pub path: PathBuf,
}

impl Default for StoreSettings {
    fn default() -> Self {
        Self {
            path: PathBuf::from(DEFAULT_DB_PATH),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ZoneDefaults {
    pub client: Option<String>,
    pub server: Option<String>,
    pub asserted: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LoggingSettings {
    pub profile: Option<String>,
}

impl Settings {
    /// Load settings
    ///
    /// An explicitly named file must exist. Without one, `zonelens.toml` in
    /// the working directory is used when present, defaults otherwise.
    pub fn load(explicit: Option<&Path>) -> Result<Self, Box<dyn std::error::Error>> {
        let path = match explicit {
            Some(path) => path.to_path_buf(),
            None => {
                let default = PathBuf::from(DEFAULT_CONFIG_FILE);
                if !default.exists() {
                    return Ok(Self::default());
                }
                default
            }
        };

        let content = std::fs::read_to_string(&path)
            .map_err(|e| format!("Failed to read config {}: {}", path.display(), e))?;
        Self::from_toml(&content).map_err(|e| format!("Invalid config {}: {}", path.display(), e).into())
    }

    pub fn from_toml(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }
}
