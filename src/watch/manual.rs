//! Watch service driven by explicit calls
//!
//! For embedders that detect changes themselves, and for tests.

use std::path::Path;
use std::sync::{Mutex, PoisonError};

use log::debug;

use crate::error::WatchError;
use crate::watch::watcher::{FileWatcher, Watch, WatchEvent};

#[derive(Debug, Default)]
pub struct ManualWatcher {
    watches: Mutex<Vec<Watch>>,
}

impl ManualWatcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Delivers `event` for `path` to every watch registered on that path.
    /// Listeners run on the calling thread. Returns how many were invoked.
    pub fn fire(&self, path: &Path, event: WatchEvent) -> usize {
        // Listeners may register further watches, so call them unlocked.
        let matching: Vec<Watch> = self
            .watches
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .filter(|w| w.path() == path)
            .cloned()
            .collect();

        debug!("Firing {:?} for {} to {} watch(es)", event, path.display(), matching.len());

        let is_dir = path.is_dir();
        for watch in &matching {
            watch.notify(path, event, is_dir);
        }
        matching.len()
    }

    pub fn len(&self) -> usize {
        self.watches
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl FileWatcher for ManualWatcher {
    fn add(&self, watch: Watch) -> Result<(), WatchError> {
        self.watches
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(watch);
        Ok(())
    }
}
