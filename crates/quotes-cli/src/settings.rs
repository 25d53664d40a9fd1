//! Runtime settings, layered from defaults, an optional TOML file, `QUOTES_*`
//! environment variables and finally command-line flags.

use std::path::{Path, PathBuf};

use anyhow::Context as _;
use quotes_service::DEFAULT_LIST_LIMIT;
use serde::Deserialize;

use crate::cli::Cli;

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Settings {
  pub store_path: PathBuf,
  pub log_dir:    PathBuf,
  pub list_limit: usize,
}

impl Default for Settings {
  fn default() -> Self {
    Self {
      store_path: PathBuf::from("quotes.db"),
      log_dir:    PathBuf::from("var/log"),
      list_limit: DEFAULT_LIST_LIMIT,
    }
  }
}

impl Settings {
  /// Resolve settings for this invocation.
  pub fn load(cli: &Cli) -> anyhow::Result<Self> {
    let raw = config::Config::builder()
      .add_source(config::File::from(cli.config.as_path()).required(false))
      .add_source(config::Environment::with_prefix("QUOTES").try_parsing(true))
      .build()
      .with_context(|| format!("failed to read config file {}", cli.config.display()))?;

    let mut settings: Settings = raw
      .try_deserialize()
      .context("failed to deserialise settings")?;

    if let Some(db) = &cli.db {
      settings.store_path = db.clone();
    }
    if let Some(dir) = &cli.log_dir {
      settings.log_dir = dir.clone();
    }
    if settings.list_limit == 0 {
      anyhow::bail!("list_limit must be at least 1");
    }

    settings.store_path = expand_tilde(&settings.store_path);
    settings.log_dir = expand_tilde(&settings.log_dir);
    Ok(settings)
  }
}

/// Expand a leading `~` to the user's home directory.
fn expand_tilde(path: &Path) -> PathBuf {
  let s = path.to_string_lossy();
  if let Some(rest) = s.strip_prefix("~/")
    && let Ok(home) = std::env::var("HOME")
  {
    return PathBuf::from(home).join(rest);
  }
  path.to_path_buf()
}
