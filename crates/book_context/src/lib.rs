//! book_context - Reference context loader
//!
//! Fetches the static book document once and truncates it to a fixed
//! character budget. Loading is best-effort enrichment for remote prompts:
//! failure leaves the context empty and is never fatal to the session.

mod error;
mod loader;

pub use error::{ContextLoadError, Result};
pub use loader::{truncate_chars, BookContextLoader, ReferenceLoader, DEFAULT_DOCUMENT, MAX_CONTEXT_CHARS};
