//! The quote entity, its validated insert payload, and the query filter.
//!
//! Quotes are append-only: once the store assigns an `id` the row is never
//! updated or deleted.

use std::fmt;

use serde::Serialize;

use crate::{Error, Result};

/// Author recorded when none is supplied.
pub const DEFAULT_AUTHOR: &str = "Unknown";

/// The case-folded form of an author name that author filters compare on.
///
/// Uses full Unicode lowercasing, so "Émile" and "ÉMILE" share a key.
pub fn author_key(author: &str) -> String { author.to_lowercase() }

// ─── Quote ───────────────────────────────────────────────────────────────────

/// A persisted quote.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Quote {
  /// Store-assigned, immutable, never reused.
  pub id:       i64,
  pub category: String,
  pub author:   String,
  pub text:     String,
}

impl fmt::Display for Quote {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "\"{}\" - {} [{}]", self.text, self.author, self.category)
  }
}

// ─── NewQuote ────────────────────────────────────────────────────────────────

/// A quote that has passed validation but has not been stored yet.
///
/// Fields are private so every instance goes through [`NewQuote::new`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewQuote {
  category: String,
  author:   String,
  text:     String,
}

impl NewQuote {
  /// Trim and validate the three fields.
  ///
  /// A blank `category` or `text` is rejected. A missing or blank `author`
  /// becomes [`DEFAULT_AUTHOR`].
  pub fn new(
    category: impl AsRef<str>,
    author: Option<&str>,
    text: impl AsRef<str>,
  ) -> Result<Self> {
    let category = category.as_ref().trim();
    let text = text.as_ref().trim();

    if category.is_empty() {
      return Err(Error::EmptyField("category"));
    }
    if text.is_empty() {
      return Err(Error::EmptyField("text"));
    }

    let author = author
      .map(str::trim)
      .filter(|a| !a.is_empty())
      .unwrap_or(DEFAULT_AUTHOR);

    Ok(Self {
      category: category.to_owned(),
      author:   author.to_owned(),
      text:     text.to_owned(),
    })
  }

  pub fn category(&self) -> &str { &self.category }

  pub fn author(&self) -> &str { &self.author }

  pub fn text(&self) -> &str { &self.text }

  /// Attach a store-assigned id.
  pub fn into_quote(self, id: i64) -> Quote {
    Quote {
      id,
      category: self.category,
      author: self.author,
      text: self.text,
    }
  }
}

// ─── Filter ──────────────────────────────────────────────────────────────────

/// Optional equality constraints used to narrow query results.
///
/// `category` matches exactly; `author` matches case-insensitively. A `None`
/// field places no constraint on that column.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QuoteFilter {
  pub category: Option<String>,
  pub author:   Option<String>,
}

impl QuoteFilter {
  /// Build a filter, treating blank values as absent.
  pub fn new(category: Option<&str>, author: Option<&str>) -> Self {
    let clean = |v: Option<&str>| {
      v.map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_owned)
    };
    Self {
      category: clean(category),
      author:   clean(author),
    }
  }

  pub fn is_empty(&self) -> bool {
    self.category.is_none() && self.author.is_none()
  }

  /// The folded author constraint, if any. See [`author_key`].
  pub fn author_key(&self) -> Option<String> { self.author.as_deref().map(author_key) }
}

impl fmt::Display for QuoteFilter {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match (&self.category, &self.author) {
      (None, None) => write!(f, "any quote"),
      (Some(c), None) => write!(f, "category \"{c}\""),
      (None, Some(a)) => write!(f, "author \"{a}\""),
      (Some(c), Some(a)) => write!(f, "category \"{c}\", author \"{a}\""),
    }
  }
}
