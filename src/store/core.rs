//! Store core
//!
//! Reload protocol, index publication and the lookup API.

use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, PoisonError, RwLock};

use log::{debug, info, warn};
use tokio::sync::watch;

use crate::config::StoreConfig;
use crate::credential::Credential;
use crate::error::StoreError;
use crate::error::handlers::{log_reload_error, log_watch_error};
use crate::parser::{parse_credentials, read_credential_file};
use crate::store::index::CredentialIndex;
use crate::store::results::ReloadOutcome;
use crate::watch::{FileWatcher, Watch};

/// File-backed credential lookup that follows edits to its file.
///
/// Readers take an `Arc` to the installed index; a reload builds a new index
/// off to the side and swaps the pointer, so every lookup sees exactly one
/// generation. Cloning the store shares the same state.
#[derive(Debug, Clone)]
pub struct CredentialStore {
    inner: Arc<StoreInner>,
}

#[derive(Debug)]
struct StoreInner {
    path: PathBuf,
    index: RwLock<Arc<CredentialIndex>>,
    generation: watch::Sender<u64>,
    /// Serializes reloads; lookups never take it.
    reload_lock: Mutex<()>,
}

impl CredentialStore {
    /// Registers with `watcher` for changes to `path`, then loads the file.
    ///
    /// Never fails: load and registration errors are logged and the store
    /// starts with whatever the initial load produced (possibly nothing).
    pub fn new(path: impl Into<PathBuf>, watcher: &dyn FileWatcher) -> Self {
        let store = Self::detached(path.into());

        let state = Arc::downgrade(&store.inner);
        let watch = Watch::new(store.inner.path.clone(), move |path, event, _, _| {
            debug!("Credential file {} changed ({:?})", path.display(), event);
            // The store may be gone; its registration outlives it.
            if let Some(inner) = state.upgrade() {
                if let Err(e) = inner.reload() {
                    log_reload_error(&e);
                }
            }
        });
        if let Err(e) = watcher.add(watch) {
            log_watch_error(&StoreError::from(e));
        }

        store.load_initial();
        store
    }

    /// Loads `path` once. Only explicit [`reload`](Self::reload) calls refresh it.
    pub fn unwatched(path: impl Into<PathBuf>) -> Self {
        let store = Self::detached(path.into());
        store.load_initial();
        store
    }

    /// Builds a store from configuration, registering with `watcher` only when
    /// `config.watch` is set.
    pub fn with_config(config: &StoreConfig, watcher: &dyn FileWatcher) -> Self {
        if config.watch {
            Self::new(config.cred_file_path(), watcher)
        } else {
            Self::unwatched(config.cred_file_path())
        }
    }

    fn detached(path: PathBuf) -> Self {
        let (generation, _) = watch::channel(0);
        Self {
            inner: Arc::new(StoreInner {
                path,
                index: RwLock::new(Arc::new(CredentialIndex::empty(0))),
                generation,
                reload_lock: Mutex::new(()),
            }),
        }
    }

    fn load_initial(&self) {
        if let Err(e) = self.inner.reload() {
            log_reload_error(&e);
        }
    }

    /// Re-reads the file and installs a fresh index.
    ///
    /// On error the previously installed index stays in place.
    pub fn reload(&self) -> Result<ReloadOutcome, StoreError> {
        self.inner.reload()
    }

    pub fn path(&self) -> &Path {
        &self.inner.path
    }

    /// The installed index. Stays valid and unchanged across later reloads.
    pub fn snapshot(&self) -> Arc<CredentialIndex> {
        Arc::clone(
            &self
                .inner
                .index
                .read()
                .unwrap_or_else(PoisonError::into_inner),
        )
    }

    /// Generation of the installed index; bumped on every install.
    pub fn generation(&self) -> u64 {
        *self.inner.generation.borrow()
    }

    /// Receiver that observes each newly installed generation.
    pub fn subscribe(&self) -> watch::Receiver<u64> {
        self.inner.generation.subscribe()
    }

    pub fn get_cred(&self, owner: &str) -> Option<Credential> {
        self.snapshot().get_cred(owner).cloned()
    }

    pub fn get_tagged_cred(&self, owner: &str, tag: &str) -> Option<Credential> {
        self.snapshot().get_tagged_cred(owner, tag).cloned()
    }

    pub fn get_tag(&self, owner: &str, username: &str) -> Option<String> {
        self.snapshot().get_tag(owner, username).map(str::to_string)
    }

    pub fn verify(&self, owner: &str, user: &str, pwd: &str) -> bool {
        self.snapshot().verify(owner, user, pwd)
    }

    pub fn verify_tagged(&self, owner: &str, tag: &str, user: &str, pwd: &str) -> bool {
        self.snapshot().verify_tagged(owner, tag, user, pwd)
    }
}

impl StoreInner {
    fn reload(&self) -> Result<ReloadOutcome, StoreError> {
        let _writer = self
            .reload_lock
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        let generation = *self.generation.borrow() + 1;

        let Some(content) = read_credential_file(&self.path)? else {
            // A vanished file revokes everything, even if it is only being replaced.
            warn!(
                "Credential file {} not found, clearing all credentials",
                self.path.display()
            );
            self.install(CredentialIndex::empty(generation));
            return Ok(ReloadOutcome::Cleared);
        };

        let index = CredentialIndex::from_records(parse_credentials(&content), generation);
        let records = index.len();
        self.install(index);
        info!(
            "Loaded {} credential(s) from {} (generation {})",
            records,
            self.path.display(),
            generation
        );
        Ok(ReloadOutcome::Loaded { records })
    }

    fn install(&self, index: CredentialIndex) {
        let generation = index.generation();
        *self.index.write().unwrap_or_else(PoisonError::into_inner) = Arc::new(index);
        self.generation.send_replace(generation);
    }
}
