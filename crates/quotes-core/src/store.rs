//! The `QuoteStore` trait.
//!
//! Implemented by storage backends (e.g. `quotes-store-sqlite`). The query
//! service and importer depend on this abstraction, not on a concrete backend.

use std::{collections::BTreeSet, future::Future};

use crate::quote::{NewQuote, Quote, QuoteFilter};

/// Abstraction over a quote store backend.
///
/// Writes are append-only; no operation updates or deletes a row. "No
/// matching rows" is always an empty result, never an error. Errors are
/// reserved for storage failures.
pub trait QuoteStore: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  // ── Writes ────────────────────────────────────────────────────────────

  /// Append one quote and return it with its freshly assigned id.
  fn insert(
    &self,
    quote: NewQuote,
  ) -> impl Future<Output = Result<Quote, Self::Error>> + Send + '_;

  /// Append many quotes atomically: either every row is written or none is.
  /// Returned quotes are in input order.
  fn insert_many(
    &self,
    quotes: Vec<NewQuote>,
  ) -> impl Future<Output = Result<Vec<Quote>, Self::Error>> + Send + '_;

  // ── Reads ─────────────────────────────────────────────────────────────

  /// Quotes matching `filter` in ascending id order, at most `limit` rows.
  fn select<'a>(
    &'a self,
    filter: &'a QuoteFilter,
    limit: Option<usize>,
  ) -> impl Future<Output = Result<Vec<Quote>, Self::Error>> + Send + 'a;

  /// One quote chosen uniformly at random among those matching `filter`.
  fn select_random<'a>(
    &'a self,
    filter: &'a QuoteFilter,
  ) -> impl Future<Output = Result<Option<Quote>, Self::Error>> + Send + 'a;

  /// Number of quotes matching `filter`.
  fn count<'a>(
    &'a self,
    filter: &'a QuoteFilter,
  ) -> impl Future<Output = Result<u64, Self::Error>> + Send + 'a;

  /// Whether a row with exactly this category, author and text exists.
  fn contains<'a>(
    &'a self,
    quote: &'a NewQuote,
  ) -> impl Future<Output = Result<bool, Self::Error>> + Send + 'a;

  fn distinct_categories(
    &self,
  ) -> impl Future<Output = Result<BTreeSet<String>, Self::Error>> + Send + '_;

  fn distinct_authors(
    &self,
  ) -> impl Future<Output = Result<BTreeSet<String>, Self::Error>> + Send + '_;
}
