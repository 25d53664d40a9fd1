//! `quotes` — store, import, list and draw random quotes.
//!
//! # Usage
//!
//! ```text
//! quotes import-quotes --file-path data/quotes.json
//! quotes generate --category Wisdom
//! quotes add --category Wisdom --quote "Patience is a virtue." --author Sogo
//! quotes list-quotes --author sogo
//! quotes list-categories
//! ```

mod cli;
mod commands;
mod settings;
mod logging;

use std::process::ExitCode;

use clap::Parser;
use cli::Cli;
use settings::Settings;

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
  let cli = Cli::parse();

  let settings = match Settings::load(&cli) {
    Ok(s) => s,
    Err(e) => {
      eprintln!("error: {e:#}");
      return ExitCode::FAILURE;
    }
  };

  // Held until the end of main so both logs are flushed on exit.
  let _guards = match logging::init(&settings.log_dir) {
    Ok(g) => g,
    Err(e) => {
      eprintln!("error: {e:#}");
      return ExitCode::FAILURE;
    }
  };

  tracing::info!(command = ?cli.command, "running command");

  match commands::run(cli.command, cli.json, &settings).await {
    Ok(()) => ExitCode::SUCCESS,
    Err(e) => {
      let message = format!("{e:#}");
      tracing::error!(error = %message, "command failed");
      match e.downcast_ref::<quotes_service::Error>() {
        Some(not_found @ quotes_service::Error::NotFound(_)) => eprintln!("{not_found}"),
        _ => eprintln!("error: {e:#}"),
      }
      ExitCode::FAILURE
    }
  }
}
