//! Error types for `quotes-core`.

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum Error {
  /// A required field was missing or blank after trimming.
  #[error("{0} must not be empty")]
  EmptyField(&'static str),

  #[error("limit must be at least 1")]
  ZeroLimit,
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
