//! Error types for the query service and importer.

use std::path::PathBuf;

use quotes_core::QuoteFilter;
use thiserror::Error;

/// An error returned by [`QuoteService`](crate::QuoteService).
#[derive(Debug, Error)]
pub enum Error {
  /// No quote matched the filter. A normal outcome, not a failure of the store.
  #[error("no quotes found for {0}")]
  NotFound(QuoteFilter),

  #[error("invalid input")]
  Invalid(#[from] quotes_core::Error),

  #[error("store error")]
  Persistence(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl Error {
  pub(crate) fn persistence<E>(e: E) -> Self
  where
    E: std::error::Error + Send + Sync + 'static,
  {
    Self::Persistence(Box::new(e))
  }
}

/// A failure that aborts an import run as a whole.
///
/// Individual malformed entries are not errors; they are reported in
/// [`ImportReport`](crate::ImportReport).
#[derive(Debug, Error)]
pub enum ImportError {
  #[error("{} is not a .json file", .0.display())]
  UnsupportedFormat(PathBuf),

  #[error("cannot read {}", path.display())]
  Read {
    path:   PathBuf,
    #[source]
    source: std::io::Error,
  },

  #[error("cannot parse {}: {reason}", path.display())]
  Parse { path: PathBuf, reason: String },

  #[error("store error")]
  Persistence(#[source] Box<dyn std::error::Error + Send + Sync>),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
