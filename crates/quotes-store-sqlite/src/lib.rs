//! SQLite backend for the quote store.
//!
//! Wraps [`tokio_rusqlite`] so database access runs on a dedicated thread
//! without blocking the async runtime.

mod encode;
mod schema;
mod store;

pub mod error;

pub use error::{Error, Result};
pub use store::SqliteStore;
