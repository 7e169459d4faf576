#![warn(clippy::all, clippy::pedantic)]

use std::process::ExitCode;

use ccs::app;
use ccs::cli::Cli;
use ccs::config::Settings;
use ccs::ui::style;
use clap::Parser;
use tracing::error;
use tracing_subscriber::FmtSubscriber;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let settings = match Settings::resolve() {
        Ok(settings) => settings.with_config_path(cli.config.clone()),
        Err(e) => {
            eprintln!("{} {e:#}", style::error("✗"));
            return ExitCode::FAILURE;
        }
    };
    settings.apply_locale();

    // Logs go to stderr so they never mix with `--show` output.
    let subscriber = FmtSubscriber::builder()
        .with_max_level(settings.log_level)
        .with_writer(std::io::stderr)
        .finish();
    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("Warning: Failed to install log subscriber: {e}");
    }

    let config_path = settings.config_path.clone();
    match app::dispatch(cli, settings).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(error = %e, "startup failed");
            eprintln!();
            eprintln!("{} {e}", style::error("✗"));
            if e.is_config_fault() {
                eprintln!("  {}", style::dim(config_path.display()));
            }
            ExitCode::FAILURE
        }
    }
}
