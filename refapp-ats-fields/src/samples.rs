//! Built-in sample config documents.
//!
//! The sample UI offers a fixed set of static config files alongside the live
//! endpoint. They are embedded here and always go through the validator.

use std::fmt;
use std::str::FromStr;

use tracing::debug;

use crate::error::{FieldsError, Result};
use crate::types::ConfigDocument;
use crate::validation::parse_document;

/// The fixed set of sample config files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SampleConfig {
    Basic,
    AllFields,
    Alerts,
    Disabled,
}

impl SampleConfig {
    pub const ALL: [SampleConfig; 4] = [
        SampleConfig::Basic,
        SampleConfig::AllFields,
        SampleConfig::Alerts,
        SampleConfig::Disabled,
    ];

    pub fn file_name(self) -> &'static str {
        match self {
            SampleConfig::Basic => "basic.json",
            SampleConfig::AllFields => "all-fields.json",
            SampleConfig::Alerts => "alerts.json",
            SampleConfig::Disabled => "disabled.json",
        }
    }

    /// File name without the `.json` extension.
    pub fn name(self) -> &'static str {
        self.file_name().trim_end_matches(".json")
    }

    pub fn description(self) -> &'static str {
        match self {
            SampleConfig::Basic => "A header, a paragraph and one of each input",
            SampleConfig::AllFields => "Every field type, with nulls where a producer cannot omit keys",
            SampleConfig::Alerts => "Paragraphs covering each label-class",
            SampleConfig::Disabled => "Disabled inputs that keep their values",
        }
    }

    /// Raw JSON text of the sample.
    pub fn contents(self) -> &'static str {
        match self {
            SampleConfig::Basic => include_str!("../samples/basic.json"),
            SampleConfig::AllFields => include_str!("../samples/all-fields.json"),
            SampleConfig::Alerts => include_str!("../samples/alerts.json"),
            SampleConfig::Disabled => include_str!("../samples/disabled.json"),
        }
    }

    pub fn load(self) -> Result<ConfigDocument> {
        let doc = parse_document(self.contents())?;
        debug!(sample = self.file_name(), fields = doc.len(), "loaded sample config");
        Ok(doc)
    }
}

impl fmt::Display for SampleConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.file_name())
    }
}

impl FromStr for SampleConfig {
    type Err = FieldsError;

    /// Accepts either the file name (`basic.json`) or its stem (`basic`).
    fn from_str(s: &str) -> Result<Self> {
        SampleConfig::ALL
            .into_iter()
            .find(|sample| sample.file_name() == s || sample.name() == s)
            .ok_or_else(|| FieldsError::UnknownSample {
                name: s.to_string(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ConfigField;

    #[test]
    fn every_sample_validates() {
        for sample in SampleConfig::ALL {
            let doc = sample.load().unwrap_or_else(|e| panic!("{sample}: {e}"));
            assert!(!doc.is_empty(), "{sample} should have fields");
        }
    }

    #[test]
    fn samples_parse_by_file_name_or_stem() {
        assert_eq!("basic".parse::<SampleConfig>().unwrap(), SampleConfig::Basic);
        assert_eq!(
            "all-fields.json".parse::<SampleConfig>().unwrap(),
            SampleConfig::AllFields
        );
        let err = "nope".parse::<SampleConfig>().unwrap_err();
        assert_eq!(err.to_string(), "unknown sample config: nope");
    }

    #[test]
    fn all_fields_sample_normalizes_nulls() {
        let doc = SampleConfig::AllFields.load().unwrap();
        let Some(ConfigField::Checkbox(checkbox)) = doc.field("send-email") else {
            panic!("expected checkbox");
        };
        assert_eq!(checkbox.value, None);
        assert!(!checkbox.disabled);

        let Some(ConfigField::Select(location)) = doc.field("location") else {
            panic!("expected select");
        };
        assert!(location.options.is_empty());
    }
}
