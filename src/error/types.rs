//! Error types
//!
//! Failures raised while loading the credential file or registering a watch.
//! None of these ever reach a lookup caller.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Watch service errors
#[derive(Debug, Error)]
pub enum WatchError {
    #[error("file watcher error: {0}")]
    Notify(#[from] notify::Error),

    #[error("invalid watch path: {}", .0.display())]
    InvalidPath(PathBuf),
}

/// Credential store errors
#[derive(Debug, Error)]
pub enum StoreError {
    /// The file exists but its bytes could not be read.
    #[error("failed to read credential file {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error(transparent)]
    Watch(#[from] WatchError),

    #[error("configuration error: {0}")]
    Config(#[from] config::ConfigError),
}
