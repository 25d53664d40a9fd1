//! [`QuoteService`] — the filter combinations the CLI verbs need, on top of
//! any [`QuoteStore`].

use quotes_core::{NewQuote, Quote, QuoteFilter, QuoteStore};

use crate::{Error, Result};

/// Page size used by `list_quotes` when no limit is configured.
pub const DEFAULT_LIST_LIMIT: usize = 5;

pub struct QuoteService<S> {
  store: S,
  limit: usize,
}

impl<S> QuoteService<S>
where
  S: QuoteStore,
{
  pub fn new(store: S) -> Self {
    Self {
      store,
      limit: DEFAULT_LIST_LIMIT,
    }
  }

  /// Use `limit` as the default page size. A limit of zero is rejected.
  pub fn with_limit(store: S, limit: usize) -> Result<Self> {
    if limit == 0 {
      return Err(quotes_core::Error::ZeroLimit.into());
    }
    Ok(Self { store, limit })
  }

  pub fn store(&self) -> &S { &self.store }

  /// Hand the store back, e.g. so the caller can close it.
  pub fn into_store(self) -> S { self.store }

  /// Store a single quote. A missing author is recorded as "Unknown".
  pub async fn add(
    &self,
    category: &str,
    author: Option<&str>,
    text: &str,
  ) -> Result<Quote> {
    let new = NewQuote::new(category, author, text)?;
    let quote = self.store.insert(new).await.map_err(Error::persistence)?;
    tracing::info!(id = quote.id, category = %quote.category, author = %quote.author, "added quote");
    Ok(quote)
  }

  /// Pick one quote at random among those matching the given fields.
  ///
  /// Absent or blank fields place no constraint. Returns
  /// [`Error::NotFound`] when nothing matches.
  pub async fn generate(
    &self,
    category: Option<&str>,
    author: Option<&str>,
  ) -> Result<Quote> {
    let filter = QuoteFilter::new(category, author);
    let picked = self
      .store
      .select_random(&filter)
      .await
      .map_err(Error::persistence)?;

    match picked {
      Some(quote) => {
        tracing::info!(id = quote.id, %filter, "generated quote");
        Ok(quote)
      }
      None => {
        tracing::warn!(%filter, "no quote matched");
        Err(Error::NotFound(filter))
      }
    }
  }

  /// Quotes matching the given fields, capped at `limit` (or the configured
  /// page size). An empty result is not an error.
  pub async fn list_quotes(
    &self,
    category: Option<&str>,
    author: Option<&str>,
    limit: Option<usize>,
  ) -> Result<Vec<Quote>> {
    let limit = match limit {
      Some(0) => return Err(quotes_core::Error::ZeroLimit.into()),
      Some(n) => n,
      None => self.limit,
    };
    let filter = QuoteFilter::new(category, author);

    let quotes = self
      .store
      .select(&filter, Some(limit))
      .await
      .map_err(Error::persistence)?;
    tracing::info!(%filter, limit, returned = quotes.len(), "listed quotes");
    Ok(quotes)
  }

  /// Total number of quotes matching the given fields.
  pub async fn count(
    &self,
    category: Option<&str>,
    author: Option<&str>,
  ) -> Result<u64> {
    let filter = QuoteFilter::new(category, author);
    self.store.count(&filter).await.map_err(Error::persistence)
  }

  /// Every distinct category, sorted.
  pub async fn list_categories(&self) -> Result<Vec<String>> {
    let set = self
      .store
      .distinct_categories()
      .await
      .map_err(Error::persistence)?;
    Ok(set.into_iter().collect())
  }

  /// Every distinct author, sorted.
  pub async fn list_authors(&self) -> Result<Vec<String>> {
    let set = self
      .store
      .distinct_authors()
      .await
      .map_err(Error::persistence)?;
    Ok(set.into_iter().collect())
  }
}

#[cfg(test)]
mod tests {
  use std::collections::BTreeSet;

  use quotes_core::DEFAULT_AUTHOR;
  use quotes_store_sqlite::SqliteStore;

  use super::*;

  async fn service() -> QuoteService<SqliteStore> {
    QuoteService::new(SqliteStore::open_in_memory().await.unwrap())
  }

  /// A backend whose every call fails.
  struct UnreachableStore;

  fn unreachable() -> std::io::Error {
    std::io::Error::new(std::io::ErrorKind::NotConnected, "database is unreachable")
  }

  impl QuoteStore for UnreachableStore {
    type Error = std::io::Error;

    async fn insert(&self, _: NewQuote) -> Result<Quote, Self::Error> {
      Err(unreachable())
    }

    async fn insert_many(&self, _: Vec<NewQuote>) -> Result<Vec<Quote>, Self::Error> {
      Err(unreachable())
    }

    async fn select(
      &self,
      _: &QuoteFilter,
      _: Option<usize>,
    ) -> Result<Vec<Quote>, Self::Error> {
      Err(unreachable())
    }

    async fn select_random(&self, _: &QuoteFilter) -> Result<Option<Quote>, Self::Error> {
      Err(unreachable())
    }

    async fn count(&self, _: &QuoteFilter) -> Result<u64, Self::Error> {
      Err(unreachable())
    }

    async fn contains(&self, _: &NewQuote) -> Result<bool, Self::Error> {
      Err(unreachable())
    }

    async fn distinct_categories(&self) -> Result<BTreeSet<String>, Self::Error> {
      Err(unreachable())
    }

    async fn distinct_authors(&self) -> Result<BTreeSet<String>, Self::Error> {
      Err(unreachable())
    }
  }

  #[tokio::test]
  async fn generate_returns_only_quote_in_category() {
    let svc = service().await;
    svc.add("Humor", Some("Twain"), "Get your facts first.").await.unwrap();
    let added = svc
      .add("Wisdom", Some("Sogo"), "Patience is a virtue.")
      .await
      .unwrap();

    let got = svc.generate(Some("Wisdom"), None).await.unwrap();
    assert_eq!(got, added);
    assert_eq!(got.text, "Patience is a virtue.");
    assert_eq!(got.author, "Sogo");
  }

  #[tokio::test]
  async fn generate_with_no_match_is_not_found() {
    let svc = service().await;
    svc.add("Wisdom", Some("Sogo"), "Patience is a virtue.").await.unwrap();

    let err = svc.generate(Some("Humor"), None).await.unwrap_err();
    assert!(matches!(err, Error::NotFound(ref f) if f.category.as_deref() == Some("Humor")));
    assert_eq!(err.to_string(), "no quotes found for category \"Humor\"");
  }

  #[tokio::test]
  async fn generate_on_empty_store_is_not_found() {
    let svc = service().await;
    let err = svc.generate(None, None).await.unwrap_err();
    assert!(matches!(err, Error::NotFound(ref f) if f.is_empty()));
  }

  #[tokio::test]
  async fn generate_matches_author_case_insensitively() {
    let svc = service().await;
    svc.add("Wisdom", Some("Sogo"), "Patience is a virtue.").await.unwrap();

    let got = svc.generate(None, Some("sogo")).await.unwrap();
    assert_eq!(got.author, "Sogo");
  }

  #[tokio::test]
  async fn generate_matches_non_ascii_author_in_any_case() {
    let svc = service().await;
    svc.add("Wisdom", Some("Sogo"), "Patience is a virtue.").await.unwrap();
    let added = svc
      .add("Literature", Some("Émile Zola"), "Truth is on the march.")
      .await
      .unwrap();

    assert_eq!(svc.generate(None, Some("émile zola")).await.unwrap(), added);
    assert_eq!(svc.generate(None, Some("ÉMILE ZOLA")).await.unwrap(), added);
    let listed = svc.list_quotes(None, Some("ÉMILE ZOLA"), None).await.unwrap();
    assert_eq!(listed, vec![added]);
  }

  #[tokio::test]
  async fn add_defaults_author() {
    let svc = service().await;
    let q = svc.add("Wisdom", None, "Anonymous wisdom.").await.unwrap();
    assert_eq!(q.author, DEFAULT_AUTHOR);
  }

  #[tokio::test]
  async fn add_rejects_blank_text() {
    let svc = service().await;
    let err = svc.add("Wisdom", Some("Sogo"), "  ").await.unwrap_err();
    assert!(matches!(err, Error::Invalid(quotes_core::Error::EmptyField("text"))));
  }

  #[tokio::test]
  async fn list_quotes_caps_at_default_limit() {
    let svc = service().await;
    for i in 0..9 {
      svc.add("Wisdom", Some("Sogo"), &format!("quote {i}")).await.unwrap();
    }

    let page = svc.list_quotes(None, None, None).await.unwrap();
    assert_eq!(page.len(), DEFAULT_LIST_LIMIT);
    assert_eq!(svc.count(None, None).await.unwrap(), 9);
  }

  #[tokio::test]
  async fn list_quotes_honours_explicit_limit() {
    let svc = service().await;
    for i in 0..4 {
      svc.add("Wisdom", Some("Sogo"), &format!("quote {i}")).await.unwrap();
    }

    assert_eq!(svc.list_quotes(None, None, Some(2)).await.unwrap().len(), 2);
    assert!(matches!(
      svc.list_quotes(None, None, Some(0)).await.unwrap_err(),
      Error::Invalid(quotes_core::Error::ZeroLimit)
    ));
  }

  #[tokio::test]
  async fn list_quotes_empty_category_is_empty_not_error() {
    let svc = service().await;
    svc.add("Wisdom", Some("Sogo"), "Patience is a virtue.").await.unwrap();

    let page = svc.list_quotes(Some("Humor"), None, None).await.unwrap();
    assert!(page.is_empty());
  }

  #[tokio::test]
  async fn list_categories_and_authors_sorted_unique() {
    let svc = service().await;
    svc.add("Wisdom", Some("Sogo"), "a").await.unwrap();
    svc.add("Humor", Some("Twain"), "b").await.unwrap();
    svc.add("Wisdom", Some("Sogo"), "c").await.unwrap();

    assert_eq!(svc.list_categories().await.unwrap(), vec!["Humor", "Wisdom"]);
    assert_eq!(svc.list_authors().await.unwrap(), vec!["Sogo", "Twain"]);
  }

  #[tokio::test]
  async fn list_authors_merges_case_variants() {
    let svc = service().await;
    svc.add("Wisdom", Some("Sogo"), "a").await.unwrap();
    svc.add("Humor", Some("sogo"), "b").await.unwrap();

    assert_eq!(svc.list_authors().await.unwrap(), vec!["Sogo"]);
    assert_eq!(svc.count(None, Some("SOGO")).await.unwrap(), 2);
  }

  #[tokio::test]
  async fn store_failure_is_persistence_not_not_found() {
    let svc = QuoteService::new(UnreachableStore);

    let err = svc.generate(Some("Wisdom"), None).await.unwrap_err();
    assert!(matches!(err, Error::Persistence(_)), "{err:?}");
    let cause = std::error::Error::source(&err).unwrap();
    assert_eq!(cause.to_string(), "database is unreachable");

    assert!(matches!(
      svc.list_quotes(None, None, None).await.unwrap_err(),
      Error::Persistence(_)
    ));
    assert!(matches!(
      svc.add("Wisdom", None, "text").await.unwrap_err(),
      Error::Persistence(_)
    ));
    assert!(matches!(
      svc.list_authors().await.unwrap_err(),
      Error::Persistence(_)
    ));
  }

  #[tokio::test]
  async fn with_limit_rejects_zero() {
    let store = SqliteStore::open_in_memory().await.unwrap();
    assert!(QuoteService::with_limit(store, 0).is_err());
  }
}
