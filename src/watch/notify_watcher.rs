//! Watch service backed by the `notify` crate
//!
//! The parent directory of each watched file is watched non-recursively, so the
//! file itself may be created, replaced or deleted without losing the watch.
//! Listeners run on notify's background thread.

use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, PoisonError};

use log::{debug, info, warn};
use notify::{Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher};

use crate::error::WatchError;
use crate::watch::watcher::{FileWatcher, Watch, WatchEvent};

/// A watch together with the absolute path events are matched against.
struct Registration {
    target: PathBuf,
    watch: Watch,
}

type Registry = Arc<Mutex<Vec<Registration>>>;

pub struct NotifyWatcher {
    watcher: Mutex<RecommendedWatcher>,
    registry: Registry,
    watched_dirs: Mutex<HashSet<PathBuf>>,
}

impl NotifyWatcher {
    pub fn new() -> Result<Self, WatchError> {
        let registry: Registry = Arc::default();
        let dispatch_registry = Arc::clone(&registry);

        let watcher = notify::recommended_watcher(move |res: notify::Result<Event>| match res {
            Ok(event) => dispatch(&dispatch_registry, &event),
            Err(e) => warn!("File watch error: {}", e),
        })?;

        Ok(Self {
            watcher: Mutex::new(watcher),
            registry,
            watched_dirs: Mutex::new(HashSet::new()),
        })
    }
}

impl FileWatcher for NotifyWatcher {
    fn add(&self, watch: Watch) -> Result<(), WatchError> {
        let (dir, target) = resolve(watch.path())?;

        {
            let mut dirs = self
                .watched_dirs
                .lock()
                .unwrap_or_else(PoisonError::into_inner);
            if !dirs.contains(&dir) {
                self.watcher
                    .lock()
                    .unwrap_or_else(PoisonError::into_inner)
                    .watch(&dir, RecursiveMode::NonRecursive)?;
                dirs.insert(dir.clone());
                info!("Watching directory {} for changes", dir.display());
            }
        }

        debug!("Registered watch for {}", target.display());
        self.registry
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(Registration { target, watch });
        Ok(())
    }
}

/// Splits a watched file path into its canonical parent directory and the
/// absolute path events will carry.
fn resolve(path: &Path) -> Result<(PathBuf, PathBuf), WatchError> {
    let name = path
        .file_name()
        .ok_or_else(|| WatchError::InvalidPath(path.to_path_buf()))?;
    let parent = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    let dir = parent.canonicalize().map_err(notify::Error::io)?;
    let target = dir.join(name);
    Ok((dir, target))
}

fn is_same_file(target: &Path, path: &Path) -> bool {
    if target == path {
        return true;
    }
    // Event paths may use a different spelling of the directory (symlinks).
    path.file_name() == target.file_name()
        && path
            .parent()
            .and_then(|p| p.canonicalize().ok())
            .is_some_and(|p| Some(p.as_path()) == target.parent())
}

fn dispatch(registry: &Registry, event: &Event) {
    // Our own reads show up as access events.
    if matches!(event.kind, EventKind::Access(_)) {
        return;
    }

    let kind = WatchEvent::from(&event.kind);
    for path in &event.paths {
        let matching: Vec<Watch> = registry
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .filter(|r| is_same_file(&r.target, path))
            .map(|r| r.watch.clone())
            .collect();

        if matching.is_empty() {
            continue;
        }

        debug!("{:?} event for {}", kind, path.display());
        let is_dir = path.is_dir();
        for watch in &matching {
            watch.notify(path, kind, is_dir);
        }
    }
}
