//! One-shot bulk import from a JSON file into a [`QuoteStore`].
//!
//! The source maps a category name to an ordered list of entries:
//!
//! ```json
//! {
//!   "Wisdom": [
//!     { "quote": "Patience is a virtue.", "author": "Sogo" }
//!   ]
//! }
//! ```
//!
//! Field names are matched case-insensitively. `author` is optional. Entries
//! that cannot become a quote are skipped and reported; a file that cannot be
//! read or parsed aborts the run before anything is written.

use std::path::Path;

use quotes_core::{NewQuote, QuoteStore};
use serde::Serialize;
use serde_json::{Map, Value};

use crate::ImportError;

// ─── Policy & report ─────────────────────────────────────────────────────────

/// What to do with entries already present in the store.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ImportPolicy {
  /// Skip entries whose category, author and text already exist, so running
  /// the same import twice inserts nothing the second time.
  #[default]
  SkipExisting,
  /// Insert every well-formed entry.
  Append,
}

/// A source entry that was not imported.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ImportIssue {
  pub category: String,
  /// Position within the category's list; `None` when the whole category
  /// value was unusable.
  pub index:    Option<usize>,
  pub reason:   String,
}

/// Summary of an import run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ImportReport {
  pub inserted:   usize,
  /// Malformed entries.
  pub skipped:    usize,
  /// Well-formed entries left out under [`ImportPolicy::SkipExisting`].
  pub duplicates: usize,
  pub issues:     Vec<ImportIssue>,
}

// ─── Importer ────────────────────────────────────────────────────────────────

pub struct Importer<'a, S> {
  store:  &'a S,
  policy: ImportPolicy,
}

impl<'a, S> Importer<'a, S>
where
  S: QuoteStore,
{
  pub fn new(store: &'a S) -> Self {
    Self {
      store,
      policy: ImportPolicy::default(),
    }
  }

  pub fn with_policy(mut self, policy: ImportPolicy) -> Self {
    self.policy = policy;
    self
  }

  /// Read, validate and load the file at `path`.
  pub async fn import_file(&self, path: &Path) -> Result<ImportReport, ImportError> {
    let is_json = path
      .extension()
      .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
    if !is_json {
      return Err(ImportError::UnsupportedFormat(path.to_path_buf()));
    }

    let raw = tokio::fs::read_to_string(path)
      .await
      .map_err(|source| ImportError::Read {
        path: path.to_path_buf(),
        source,
      })?;

    let parsed = parse_source(&raw).map_err(|reason| ImportError::Parse {
      path: path.to_path_buf(),
      reason,
    })?;

    let report = self.load(parsed).await?;
    tracing::info!(
      path = %path.display(),
      inserted = report.inserted,
      skipped = report.skipped,
      duplicates = report.duplicates,
      "import finished"
    );
    Ok(report)
  }

  /// Validate and load an in-memory JSON document.
  pub async fn import_str(&self, raw: &str) -> Result<ImportReport, ImportError> {
    let parsed = parse_source(raw).map_err(|reason| ImportError::Parse {
      path: "<inline>".into(),
      reason,
    })?;
    self.load(parsed).await
  }

  async fn load(&self, parsed: ParsedSource) -> Result<ImportReport, ImportError> {
    let ParsedSource { quotes, issues } = parsed;

    for issue in &issues {
      tracing::warn!(
        category = %issue.category,
        index = ?issue.index,
        reason = %issue.reason,
        "skipping malformed import entry"
      );
    }

    let mut report = ImportReport {
      skipped: issues.len(),
      issues,
      ..ImportReport::default()
    };

    let to_insert = match self.policy {
      ImportPolicy::Append => quotes,
      ImportPolicy::SkipExisting => {
        let mut fresh = Vec::with_capacity(quotes.len());
        for quote in quotes {
          let exists = self
            .store
            .contains(&quote)
            .await
            .map_err(|e| ImportError::Persistence(Box::new(e)))?;
          if exists {
            report.duplicates += 1;
          } else {
            fresh.push(quote);
          }
        }
        fresh
      }
    };

    let stored = self
      .store
      .insert_many(to_insert)
      .await
      .map_err(|e| ImportError::Persistence(Box::new(e)))?;
    report.inserted = stored.len();
    Ok(report)
  }
}

// ─── Parsing ─────────────────────────────────────────────────────────────────

struct ParsedSource {
  quotes: Vec<NewQuote>,
  issues: Vec<ImportIssue>,
}

fn parse_source(raw: &str) -> Result<ParsedSource, String> {
  let value: Value = serde_json::from_str(raw).map_err(|e| e.to_string())?;
  let Value::Object(categories) = value else {
    return Err("top level must be an object of category -> entries".into());
  };

  let mut quotes = Vec::new();
  let mut issues = Vec::new();

  for (category, entries) in &categories {
    let Value::Array(entries) = entries else {
      issues.push(ImportIssue {
        category: category.clone(),
        index:    None,
        reason:   "category value is not a list".into(),
      });
      continue;
    };

    for (index, entry) in entries.iter().enumerate() {
      match entry_to_quote(category, entry) {
        Ok(quote) => quotes.push(quote),
        Err(reason) => issues.push(ImportIssue {
          category: category.clone(),
          index: Some(index),
          reason,
        }),
      }
    }
  }

  Ok(ParsedSource { quotes, issues })
}

fn entry_to_quote(category: &str, entry: &Value) -> Result<NewQuote, String> {
  let Value::Object(fields) = entry else {
    return Err("entry is not an object".into());
  };

  let text = match field(fields, "quote") {
    Some(Value::String(s)) => s.as_str(),
    Some(_) => return Err("\"quote\" is not a string".into()),
    None => return Err("missing \"quote\"".into()),
  };
  let author = match field(fields, "author") {
    None | Some(Value::Null) => None,
    Some(Value::String(s)) => Some(s.as_str()),
    Some(_) => return Err("\"author\" is not a string".into()),
  };

  NewQuote::new(category, author, text).map_err(|e| e.to_string())
}

fn field<'v>(fields: &'v Map<String, Value>, name: &str) -> Option<&'v Value> {
  fields
    .iter()
    .find(|(key, _)| key.eq_ignore_ascii_case(name))
    .map(|(_, value)| value)
}
