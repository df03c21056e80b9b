//! credential_store - API credential lifecycle
//!
//! Holds the opaque secret that authorizes remote model calls. Reading
//! follows a fixed precedence: explicitly stored value first, then an
//! environment default, else absent. No validation happens here; an invalid
//! credential is only detected by a failed remote call.

mod error;
mod storage;
mod store;

pub use error::{CredentialError, Result};
pub use storage::{CredentialStorage, FileCredentialStorage, MemoryCredentialStorage};
pub use store::{CredentialStore, DEFAULT_ENV_KEY};
