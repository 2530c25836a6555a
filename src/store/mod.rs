//! Credential store
//!
//! Holds the current credential index, rebuilds it from the backing file on
//! every change notification, and answers lookups against it.

pub mod core;
pub mod index;
pub mod results;

pub use self::core::CredentialStore;
pub use index::CredentialIndex;
pub use results::ReloadOutcome;
