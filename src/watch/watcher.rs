//! Watch service interface

use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use notify::EventKind;

use crate::error::WatchError;

/// Kind of change reported for a watched path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WatchEvent {
    Create,
    Modify,
    Delete,
    Other,
}

impl From<&EventKind> for WatchEvent {
    fn from(kind: &EventKind) -> Self {
        match kind {
            EventKind::Create(_) => WatchEvent::Create,
            EventKind::Modify(_) => WatchEvent::Modify,
            EventKind::Remove(_) => WatchEvent::Delete,
            _ => WatchEvent::Other,
        }
    }
}

/// Callback invoked as `listener(path, event, watch, is_dir)`.
pub type Listener = Arc<dyn Fn(&Path, WatchEvent, &Watch, bool) + Send + Sync>;

/// A registered interest in one path.
#[derive(Clone)]
pub struct Watch {
    path: PathBuf,
    listener: Listener,
}

impl Watch {
    pub fn new<F>(path: impl Into<PathBuf>, listener: F) -> Self
    where
        F: Fn(&Path, WatchEvent, &Watch, bool) + Send + Sync + 'static,
    {
        Self {
            path: path.into(),
            listener: Arc::new(listener),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Invokes the listener for a change at `path`.
    pub fn notify(&self, path: &Path, event: WatchEvent, is_dir: bool) {
        (self.listener)(path, event, self, is_dir);
    }
}

impl fmt::Debug for Watch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Watch").field("path", &self.path).finish_non_exhaustive()
    }
}

/// Something a reload callback can be registered with.
pub trait FileWatcher: Send + Sync {
    /// Registers `watch` for the lifetime of the service.
    fn add(&self, watch: Watch) -> Result<(), WatchError>;
}
