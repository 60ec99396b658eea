//! CLI settings loaded with Figment
//!
//! Sources are merged in precedence order (later sources override earlier ones):
//! 1. Default values
//! 2. `refapp-ats.toml`, `refapp-ats.yaml`, `refapp-ats.json` in the working directory
//! 3. `REFAPP_ATS_*` environment variables
//!
//! Command-line flags are applied on top by the caller.

use std::path::Path;

use figment::{
    providers::{Env, Format, Json, Serialized, Toml, Yaml},
    Figment,
};
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::cli::OutputFormat;

/// File stem of the settings files.
pub const SETTINGS_FILE_STEM: &str = "refapp-ats";

/// Prefix of settings environment variables.
pub const ENV_PREFIX: &str = "REFAPP_ATS_";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    /// Output format when `--format` is not given.
    #[serde(default)]
    pub format: OutputFormat,

    /// Config source used when a command is given none.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
}

impl Settings {
    /// Load settings, reading settings files from `dir`.
    pub fn load(dir: &Path) -> Result<Settings, figment::Error> {
        let settings: Settings = Self::figment(dir).extract()?;
        debug!(format = ?settings.format, source = ?settings.source, "settings loaded");
        Ok(settings)
    }

    fn figment(dir: &Path) -> Figment {
        let toml = dir.join(format!("{SETTINGS_FILE_STEM}.toml"));
        let yaml = dir.join(format!("{SETTINGS_FILE_STEM}.yaml"));
        let json = dir.join(format!("{SETTINGS_FILE_STEM}.json"));
        trace!(dir = %dir.display(), "building settings figment");

        Figment::from(Serialized::defaults(Settings::default()))
            .merge(Toml::file(toml))
            .merge(Yaml::file(yaml))
            .merge(Json::file(json))
            .merge(Env::prefixed(ENV_PREFIX))
    }
}
