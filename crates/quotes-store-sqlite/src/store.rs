//! [`SqliteStore`] — the SQLite implementation of [`QuoteStore`].

use std::{collections::BTreeSet, path::Path};

use rusqlite::OptionalExtension as _;

use quotes_core::{NewQuote, Quote, QuoteFilter, QuoteStore};

use crate::{
  Error, Result,
  encode::{
    FILTER_CLAUSE, FilterParams, INSERT_QUOTE, QUOTE_COLUMNS, decode_count,
    encode_limit, insert_params, quote_from_row,
  },
  schema,
};

// ─── Store ───────────────────────────────────────────────────────────────────

/// A quote store backed by a single SQLite file.
///
/// Cloning is cheap; the inner connection is reference-counted.
#[derive(Clone)]
pub struct SqliteStore {
  conn: tokio_rusqlite::Connection,
}

impl SqliteStore {
  /// Open (or create) a store at `path` and run schema initialisation.
  ///
  /// Missing parent directories are created first.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let path = path.as_ref();
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
      tokio::fs::create_dir_all(parent)
        .await
        .map_err(|source| Error::CreateDir {
          path: parent.to_path_buf(),
          source,
        })?;
    }

    let conn = tokio_rusqlite::Connection::open(path).await?;
    let store = Self { conn };
    store.init_schema().await?;
    tracing::debug!(path = %path.display(), "opened quote store");
    Ok(store)
  }

  /// Open an in-memory store — useful for testing.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  /// Close the connection, flushing any pending work on the database thread.
  pub async fn close(self) -> Result<()> {
    self.conn.close().await?;
    tracing::debug!("closed quote store");
    Ok(())
  }

  async fn init_schema(&self) -> Result<()> {
    self
      .conn
      .call(|conn| Ok(schema::init(conn)?))
      .await?;
    Ok(())
  }

  async fn distinct_column(&self, sql: &'static str) -> Result<BTreeSet<String>> {
    let values = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(sql)?;
        let values = stmt
          .query_map([], |row| row.get::<_, String>(0))?
          .collect::<rusqlite::Result<BTreeSet<_>>>()?;
        Ok(values)
      })
      .await?;
    Ok(values)
  }
}

#[cfg(test)]
impl SqliteStore {
  /// Run raw SQL on the connection, bypassing the typed API.
  pub(crate) async fn execute_batch(&self, sql: &'static str) -> Result<()> {
    self
      .conn
      .call(move |conn| Ok(conn.execute_batch(sql)?))
      .await?;
    Ok(())
  }
}

// ─── QuoteStore impl ─────────────────────────────────────────────────────────

impl QuoteStore for SqliteStore {
  type Error = Error;

  // ── Writes ────────────────────────────────────────────────────────────────

  async fn insert(&self, quote: NewQuote) -> Result<Quote> {
    let stored = self
      .conn
      .call(move |conn| {
        conn.execute(INSERT_QUOTE, insert_params(&quote))?;
        let id = conn.last_insert_rowid();
        Ok(quote.into_quote(id))
      })
      .await?;

    tracing::info!(id = stored.id, category = %stored.category, "inserted quote");
    Ok(stored)
  }

  async fn insert_many(&self, quotes: Vec<NewQuote>) -> Result<Vec<Quote>> {
    if quotes.is_empty() {
      return Ok(Vec::new());
    }

    let stored = self
      .conn
      .call(move |conn| {
        let tx = conn.transaction()?;
        let mut stored = Vec::with_capacity(quotes.len());
        {
          let mut stmt = tx.prepare(INSERT_QUOTE)?;
          for quote in quotes {
            stmt.execute(insert_params(&quote))?;
            stored.push(quote.into_quote(tx.last_insert_rowid()));
          }
        }
        tx.commit()?;
        Ok(stored)
      })
      .await?;

    tracing::info!(rows = stored.len(), "inserted quote batch");
    Ok(stored)
  }

  // ── Reads ─────────────────────────────────────────────────────────────────

  async fn select(
    &self,
    filter: &QuoteFilter,
    limit: Option<usize>,
  ) -> Result<Vec<Quote>> {
    let FilterParams { category, author } = filter.into();
    let limit_val = encode_limit(limit)?;

    let quotes = self
      .conn
      .call(move |conn| {
        let sql = format!(
          "SELECT {QUOTE_COLUMNS} FROM quotes
           WHERE {FILTER_CLAUSE}
           ORDER BY id
           LIMIT ?3"
        );
        let mut stmt = conn.prepare(&sql)?;
        let rows = stmt
          .query_map(
            rusqlite::params![category, author, limit_val],
            quote_from_row,
          )?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    Ok(quotes)
  }

  async fn select_random(&self, filter: &QuoteFilter) -> Result<Option<Quote>> {
    let FilterParams { category, author } = filter.into();

    let quote = self
      .conn
      .call(move |conn| {
        let sql = format!(
          "SELECT {QUOTE_COLUMNS} FROM quotes
           WHERE {FILTER_CLAUSE}
           ORDER BY RANDOM()
           LIMIT 1"
        );
        Ok(
          conn
            .query_row(&sql, rusqlite::params![category, author], quote_from_row)
            .optional()?,
        )
      })
      .await?;

    Ok(quote)
  }

  async fn count(&self, filter: &QuoteFilter) -> Result<u64> {
    let FilterParams { category, author } = filter.into();

    let n: i64 = self
      .conn
      .call(move |conn| {
        let sql = format!("SELECT COUNT(*) FROM quotes WHERE {FILTER_CLAUSE}");
        Ok(conn.query_row(&sql, rusqlite::params![category, author], |r| r.get(0))?)
      })
      .await?;

    decode_count(n)
  }

  async fn contains(&self, quote: &NewQuote) -> Result<bool> {
    let quote = quote.clone();

    let found = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              "SELECT 1 FROM quotes
               WHERE category = ?1 AND author = ?2 AND text = ?3
               LIMIT 1",
              rusqlite::params![quote.category(), quote.author(), quote.text()],
              |_| Ok(()),
            )
            .optional()?
            .is_some(),
        )
      })
      .await?;

    Ok(found)
  }

  async fn distinct_categories(&self) -> Result<BTreeSet<String>> {
    self
      .distinct_column("SELECT DISTINCT category FROM quotes")
      .await
  }

  /// One name per folded author key, spelled as in its earliest row.
  async fn distinct_authors(&self) -> Result<BTreeSet<String>> {
    self
      .distinct_column(
        "SELECT author FROM quotes
         WHERE id IN (SELECT MIN(id) FROM quotes GROUP BY author_key)",
      )
      .await
  }
}
