//! File logging: a general operational log and an error-only log.
//!
//! Both files are appended to, one line per event. The general log defaults
//! to `INFO` and honours `RUST_LOG`; the error log always takes `ERROR` only.

use std::path::Path;

use anyhow::Context as _;
use tracing::level_filters::LevelFilter;
use tracing_appender::{
  non_blocking::WorkerGuard,
  rolling::{RollingFileAppender, Rotation},
};
use tracing_subscriber::{
  EnvFilter, Layer as _, fmt, layer::SubscriberExt as _, util::SubscriberInitExt as _,
};

pub const GENERAL_LOG: &str = "quote_manager.log";
pub const ERROR_LOG: &str = "quote_manager_error.log";

/// Keeps the background writers alive; dropping it flushes both logs.
#[must_use = "logs are lost if the guards are dropped early"]
pub struct LogGuards {
  _general: WorkerGuard,
  _errors:  WorkerGuard,
}

/// Install the global subscriber, creating `dir` if needed.
pub fn init(dir: &Path) -> anyhow::Result<LogGuards> {
  std::fs::create_dir_all(dir)
    .with_context(|| format!("creating log directory {}", dir.display()))?;

  let (general, general_guard) = tracing_appender::non_blocking(appender(dir, GENERAL_LOG)?);
  let (errors, errors_guard) = tracing_appender::non_blocking(appender(dir, ERROR_LOG)?);

  let general_filter = EnvFilter::builder()
    .with_default_directive(LevelFilter::INFO.into())
    .from_env_lossy();

  tracing_subscriber::registry()
    .with(
      fmt::layer()
        .with_ansi(false)
        .with_writer(general)
        .with_filter(general_filter),
    )
    .with(
      fmt::layer()
        .with_ansi(false)
        .with_writer(errors)
        .with_filter(LevelFilter::ERROR),
    )
    .try_init()
    .context("installing log subscriber")?;

  Ok(LogGuards {
    _general: general_guard,
    _errors:  errors_guard,
  })
}

/// An append-only file that is never rotated.
fn appender(dir: &Path, name: &str) -> anyhow::Result<RollingFileAppender> {
  RollingFileAppender::builder()
    .rotation(Rotation::NEVER)
    .filename_prefix(name)
    .build(dir)
    .with_context(|| format!("opening log file {}", dir.join(name).display()))
}
