//! Conversions between domain types and SQLite rows and parameters.

use quotes_core::{NewQuote, Quote, QuoteFilter, author_key};

use crate::{Error, Result};

/// Column list shared by every `SELECT` that yields a [`Quote`].
pub const QUOTE_COLUMNS: &str = "id, category, author, text";

/// `WHERE` clause for a [`QuoteFilter`] bound as `?1` (category) and `?2`
/// (folded author key). A `NULL` parameter disables that constraint.
pub const FILTER_CLAUSE: &str = "(?1 IS NULL OR category = ?1)
   AND (?2 IS NULL OR author_key = ?2)";

pub const INSERT_QUOTE: &str =
  "INSERT INTO quotes (category, author, author_key, text) VALUES (?1, ?2, ?3, ?4)";

/// Owned filter parameters that can be moved onto the database thread.
pub struct FilterParams {
  pub category: Option<String>,
  pub author:   Option<String>,
}

impl From<&QuoteFilter> for FilterParams {
  fn from(filter: &QuoteFilter) -> Self {
    Self {
      category: filter.category.clone(),
      author:   filter.author_key(),
    }
  }
}

/// Parameters for [`INSERT_QUOTE`].
pub fn insert_params(quote: &NewQuote) -> [String; 4] {
  [
    quote.category().to_owned(),
    quote.author().to_owned(),
    author_key(quote.author()),
    quote.text().to_owned(),
  ]
}

pub fn quote_from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Quote> {
  Ok(Quote {
    id:       row.get(0)?,
    category: row.get(1)?,
    author:   row.get(2)?,
    text:     row.get(3)?,
  })
}

/// SQLite `LIMIT` takes a signed integer; `-1` means unbounded.
pub fn encode_limit(limit: Option<usize>) -> Result<i64> {
  match limit {
    None => Ok(-1),
    Some(n) => i64::try_from(n).map_err(|_| Error::OutOfRange(format!("limit {n}"))),
  }
}

pub fn decode_count(n: i64) -> Result<u64> {
  u64::try_from(n).map_err(|_| Error::OutOfRange(format!("row count {n}")))
}
