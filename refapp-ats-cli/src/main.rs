use std::io::Write;
use std::process;

use clap::Parser;
use refapp_ats_cli::cli::Cli;
use refapp_ats_cli::commands::{run, CommandContext};
use refapp_ats_cli::error::handle_cli_result;
use refapp_ats_cli::logging::{configure_logging, Pretty};
use refapp_ats_cli::settings::Settings;

/// Load settings with graceful error handling
///
/// A broken settings file should not make the CLI unusable: warn and fall
/// back to defaults.
fn load_cli_settings() -> Settings {
    let loaded = std::env::current_dir()
        .map_err(|e| e.to_string())
        .and_then(|dir| Settings::load(&dir).map_err(|e| e.to_string()));
    match loaded {
        Ok(settings) => {
            tracing::debug!("Loaded settings: {}", Pretty(&settings));
            settings
        }
        Err(e) => {
            tracing::warn!("Failed to load settings: {}", e);
            eprintln!("Warning: Settings loading failed: {}", e);
            eprintln!("Continuing with default settings...");
            Settings::default()
        }
    }
}

fn main() {
    let cli = Cli::parse();
    configure_logging(cli.verbose, cli.debug, cli.quiet);

    let settings = load_cli_settings();
    let ctx = CommandContext::new(&settings, cli.format);

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    let exit_code = handle_cli_result(run(cli.command, &ctx, &mut out));
    let _ = out.flush();
    drop(out);
    process::exit(exit_code);
}
