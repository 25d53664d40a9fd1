//! Error type for `quotes-store-sqlite`.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("database error")]
  Database(#[from] tokio_rusqlite::Error),

  #[error("cannot create directory for store at {}", path.display())]
  CreateDir {
    path:   PathBuf,
    #[source]
    source: std::io::Error,
  },

  /// A row count or limit did not fit the target integer type.
  #[error("value out of range: {0}")]
  OutOfRange(String),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
