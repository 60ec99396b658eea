//! Command-line definition for `refapp-ats`

use clap::{Parser, Subcommand, ValueEnum};
use serde::{Deserialize, Serialize};

/// Output format for commands that print documents
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Json,
    Yaml,
}

#[derive(Parser, Debug)]
#[command(name = "refapp-ats")]
#[command(version)]
#[command(about = "Validate and preview Refapp ATS config documents")]
#[command(long_about = "
refapp-ats loads an ATS config document ({\"config\": {\"fields\": [...]}}),
validates it, and shows how each field would render.

A SOURCE is either a path to a JSON file or sample:<name> for one of the
built-in samples (see `refapp-ats samples`). When SOURCE is omitted, the
`source` setting from refapp-ats.{toml,yaml,json} or REFAPP_ATS_SOURCE is used.

Example usage:
  refapp-ats validate config.json
  refapp-ats describe sample:alerts --format yaml
  refapp-ats envelope sample:basic --set requisition=REQ-42 --set notify-recruiter=false
")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Show trace output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Show debug output, including value coercion notices
    #[arg(short, long, global = true)]
    pub debug: bool,

    /// Only log errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Output format (overrides the `format` setting)
    #[arg(long, global = true, value_enum)]
    pub format: Option<OutputFormat>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Validate a config document and summarize it
    Validate {
        /// File path or sample:<name>
        source: Option<String>,
    },
    /// Print the control descriptor of every field
    Describe {
        /// File path or sample:<name>
        source: Option<String>,

        /// Leave out selects that have no options
        #[arg(long)]
        rendered_only: bool,
    },
    /// Print the webhook-data envelope a submission would carry
    Envelope {
        /// File path or sample:<name>
        source: Option<String>,

        /// Change a form value before printing
        #[arg(long = "set", value_name = "ID=VALUE", value_parser = parse_assignment)]
        set: Vec<(String, String)>,
    },
    /// List the built-in sample configs
    Samples,
}

/// Parse `id=value`. The value may itself contain `=`.
pub fn parse_assignment(raw: &str) -> Result<(String, String), String> {
    match raw.split_once('=') {
        Some((id, value)) if !id.is_empty() => Ok((id.to_string(), value.to_string())),
        _ => Err(format!("expected ID=VALUE, got '{raw}'")),
    }
}
