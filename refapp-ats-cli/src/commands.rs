//! Subcommand implementations.
//!
//! Every command writes its result to the given writer so tests can capture it.

use std::io::Write;

use refapp_ats_fields::{
    describe_document, duplicate_ids, ConfigDocument, FormState, SampleConfig,
};
use serde::Serialize;
use tracing::{info, warn};

use crate::cli::{Commands, OutputFormat};
use crate::error::{CliError, CliResult};
use crate::exit_codes::EXIT_ERROR;
use crate::settings::Settings;
use crate::source::ConfigSource;

/// Settings resolved from config files, environment and flags.
#[derive(Debug, Clone, PartialEq)]
pub struct CommandContext {
    pub format: OutputFormat,
    pub default_source: Option<String>,
}

impl CommandContext {
    /// `--format` overrides the `format` setting.
    pub fn new(settings: &Settings, format: Option<OutputFormat>) -> Self {
        Self {
            format: format.unwrap_or(settings.format),
            default_source: settings.source.clone(),
        }
    }

    fn resolve_source(&self, source: Option<String>) -> CliResult<ConfigSource> {
        let raw = source
            .or_else(|| self.default_source.clone())
            .ok_or_else(|| {
                CliError::usage("no config source given (pass a path or sample:<name>)")
            })?;
        raw.parse::<ConfigSource>()
            .map_err(|e| CliError::usage(e.to_string()))
    }

    fn load(&self, source: Option<String>) -> CliResult<ConfigDocument> {
        let source = self.resolve_source(source)?;
        let doc = source.load().map_err(CliError::from_load_error)?;
        let duplicates = duplicate_ids(&doc);
        if !duplicates.is_empty() {
            warn!(ids = ?duplicates, "config document reuses field ids");
        }
        info!(source = %source, fields = doc.len(), "config document loaded");
        Ok(doc)
    }
}

pub fn run(command: Commands, ctx: &CommandContext, out: &mut dyn Write) -> CliResult<()> {
    match command {
        Commands::Validate { source } => validate(ctx, source, out),
        Commands::Describe {
            source,
            rendered_only,
        } => describe(ctx, source, rendered_only, out),
        Commands::Envelope { source, set } => envelope(ctx, source, &set, out),
        Commands::Samples => samples(out),
    }
}

fn validate(ctx: &CommandContext, source: Option<String>, out: &mut dyn Write) -> CliResult<()> {
    let doc = ctx.load(source)?;
    let descriptors = describe_document(&doc);
    let rendered = descriptors.iter().filter(|d| d.is_rendered()).count();
    let inputs = descriptors.iter().filter(|d| d.is_input()).count();
    let line = format!(
        "valid: {} fields, {} rendered, {} form inputs",
        doc.len(),
        rendered,
        inputs
    );
    write_line(out, &line)
}

fn describe(
    ctx: &CommandContext,
    source: Option<String>,
    rendered_only: bool,
    out: &mut dyn Write,
) -> CliResult<()> {
    let doc = ctx.load(source)?;
    let descriptors: Vec<_> = describe_document(&doc)
        .into_iter()
        .filter(|d| !rendered_only || d.is_rendered())
        .collect();
    write_line(out, &render(&descriptors, ctx.format)?)
}

fn envelope(
    ctx: &CommandContext,
    source: Option<String>,
    assignments: &[(String, String)],
    out: &mut dyn Write,
) -> CliResult<()> {
    let doc = ctx.load(source)?;
    let mut state = FormState::from_descriptors(&describe_document(&doc));
    for (id, value) in assignments {
        state.set_from_str(id, value)?;
    }
    write_line(out, &render(&state.envelope(), ctx.format)?)
}

fn samples(out: &mut dyn Write) -> CliResult<()> {
    for sample in SampleConfig::ALL {
        let line = format!(
            "sample:{:<12} {:<18} {}",
            sample.name(),
            sample.file_name(),
            sample.description()
        );
        write_line(out, line.trim_end())?;
    }
    Ok(())
}

fn render<T: Serialize>(value: &T, format: OutputFormat) -> CliResult<String> {
    let rendered = match format {
        OutputFormat::Json => serde_json::to_string_pretty(value)
            .map_err(|e| CliError::new(format!("failed to render JSON: {e}"), EXIT_ERROR))?,
        OutputFormat::Yaml => serde_yaml_ng::to_string(value)
            .map_err(|e| CliError::new(format!("failed to render YAML: {e}"), EXIT_ERROR))?,
    };
    Ok(rendered.trim_end().to_string())
}

fn write_line(out: &mut dyn Write, line: &str) -> CliResult<()> {
    writeln!(out, "{line}")
        .map_err(|e| CliError::new(format!("failed to write output: {e}"), EXIT_ERROR))
}
