//! Query service and bulk importer for the quote store.
//!
//! Both are generic over any [`quotes_core::QuoteStore`]; the caller owns the
//! store and decides how it is opened and closed.
//!
//! ```rust,ignore
//! let service = QuoteService::new(store);
//! let quote = service.generate(Some("Wisdom"), None).await?;
//! ```

pub mod error;
pub mod import;
pub mod service;

pub use error::{Error, ImportError, Result};
pub use import::{ImportIssue, ImportPolicy, ImportReport, Importer};
pub use service::{DEFAULT_LIST_LIMIT, QuoteService};
