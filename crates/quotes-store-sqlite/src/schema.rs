//! SQL schema for the quote store.
//!
//! Executed once at connection startup. Upgrades are gated on
//! `PRAGMA user_version`.

use quotes_core::author_key;
use rusqlite::Connection;

/// Current value of `PRAGMA user_version`.
pub const SCHEMA_VERSION: i64 = 2;

/// Base DDL; idempotent thanks to `IF NOT EXISTS`.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;

-- Rows are append-only. AUTOINCREMENT keeps ids from ever being reused.
-- author_key is the Unicode-lowercased author, written by the store.
CREATE TABLE IF NOT EXISTS quotes (
    id          INTEGER PRIMARY KEY AUTOINCREMENT,
    category    TEXT NOT NULL CHECK (length(category) > 0),
    author      TEXT NOT NULL DEFAULT 'Unknown' CHECK (length(author) > 0),
    author_key  TEXT NOT NULL,
    text        TEXT NOT NULL CHECK (length(text) > 0)
);

CREATE INDEX IF NOT EXISTS quotes_category_idx ON quotes(category);
";

/// Version 1 tables have no `author_key`; the key is backfilled from Rust
/// because SQLite's `lower()` only folds ASCII.
const ADD_AUTHOR_KEY: &str = "
ALTER TABLE quotes ADD COLUMN author_key TEXT NOT NULL DEFAULT '';
DROP INDEX IF EXISTS quotes_author_idx;
";

const FINISH: &str = "
CREATE INDEX IF NOT EXISTS quotes_author_key_idx ON quotes(author_key);
PRAGMA user_version = 2;
";

/// Create the schema, or bring an older database up to [`SCHEMA_VERSION`].
pub fn init(conn: &mut Connection) -> rusqlite::Result<()> {
  conn.execute_batch(SCHEMA)?;

  let version: i64 = conn.query_row("PRAGMA user_version", [], |r| r.get(0))?;
  if version >= SCHEMA_VERSION {
    return Ok(());
  }

  let tx = conn.transaction()?;
  if version == 1 {
    tx.execute_batch(ADD_AUTHOR_KEY)?;
    let authors = tx
      .prepare("SELECT DISTINCT author FROM quotes")?
      .query_map([], |row| row.get::<_, String>(0))?
      .collect::<rusqlite::Result<Vec<_>>>()?;
    {
      let mut backfill =
        tx.prepare("UPDATE quotes SET author_key = ?1 WHERE author = ?2")?;
      for author in &authors {
        backfill.execute(rusqlite::params![author_key(author), author])?;
      }
    }
    tracing::info!(authors = authors.len(), "added author_key to quote store");
  }
  tx.execute_batch(FINISH)?;
  tx.commit()
}
