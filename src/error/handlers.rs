//! Error handlers
//!
//! Logging for failures that are recovered locally.

use crate::error::types::StoreError;
use log::warn;

/// Log a reload that was abandoned. The previously installed index stays in place.
pub fn log_reload_error(err: &StoreError) {
    warn!("Credential reload failed, keeping previous credentials: {}", err);
}

/// Log a failed watch registration. The store keeps working without live reload.
pub fn log_watch_error(err: &StoreError) {
    warn!("Credential file watch not registered: {}", err);
}
