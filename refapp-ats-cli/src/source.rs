//! Where a config document comes from: a file on disk or a built-in sample.

use std::fmt;
use std::fs;
use std::path::PathBuf;
use std::str::FromStr;

use anyhow::Context;
use refapp_ats_fields::{parse_document, ConfigDocument, FieldsError, SampleConfig};
use tracing::debug;

/// Prefix selecting a built-in sample instead of a file.
pub const SAMPLE_PREFIX: &str = "sample:";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    Sample(SampleConfig),
    File(PathBuf),
}

impl ConfigSource {
    /// Read and validate the document.
    pub fn load(&self) -> anyhow::Result<ConfigDocument> {
        debug!(source = %self, "loading config document");
        match self {
            ConfigSource::Sample(sample) => sample
                .load()
                .with_context(|| format!("loading sample {sample}")),
            ConfigSource::File(path) => {
                let text = fs::read_to_string(path)
                    .with_context(|| format!("reading {}", path.display()))?;
                parse_document(&text).with_context(|| format!("loading {}", path.display()))
            }
        }
    }
}

impl fmt::Display for ConfigSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigSource::Sample(sample) => write!(f, "{SAMPLE_PREFIX}{}", sample.name()),
            ConfigSource::File(path) => write!(f, "{}", path.display()),
        }
    }
}

impl FromStr for ConfigSource {
    type Err = FieldsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.strip_prefix(SAMPLE_PREFIX) {
            Some(name) => Ok(ConfigSource::Sample(name.parse()?)),
            None => Ok(ConfigSource::File(PathBuf::from(s))),
        }
    }
}
