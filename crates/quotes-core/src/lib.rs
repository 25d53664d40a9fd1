//! Core types and trait definitions for the quote store.
//!
//! This crate is free of database and CLI dependencies. The SQLite backend,
//! the query service and the `quotes` binary all depend on it.

pub mod error;
pub mod quote;
pub mod store;

pub use error::{Error, Result};
pub use quote::{DEFAULT_AUTHOR, NewQuote, Quote, QuoteFilter, author_key};
pub use store::QuoteStore;
