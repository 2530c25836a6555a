//! File watch services
//!
//! A watch pairs a file path with a listener. Services call the listener at
//! least once whenever the file is created, modified or deleted.

pub mod manual;
pub mod notify_watcher;
pub mod watcher;

pub use manual::ManualWatcher;
pub use notify_watcher::NotifyWatcher;
pub use watcher::{FileWatcher, Listener, Watch, WatchEvent};
