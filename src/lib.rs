//! File-backed credential store
//!
//! Loads `owner[.tag]=username,password` lines from a text file, keeps them in
//! memory and reloads whenever a watch service reports a change to the file.

pub mod config;
pub mod credential;
pub mod error;
pub mod parser;
pub mod store;
pub mod watch;

pub use self::config::StoreConfig;
pub use credential::Credential;
pub use error::{StoreError, WatchError};
pub use store::{CredentialIndex, CredentialStore, ReloadOutcome};
pub use watch::{FileWatcher, ManualWatcher, NotifyWatcher, Watch, WatchEvent};
