//! Configuration management for the credential store
//!
//! Values come from an optional config file (format picked by extension) with
//! `CREDSTORE_*` environment overrides, e.g. `CREDSTORE_CRED_FILE`.

use config::{Config, Environment, File};
use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::error::StoreError;

/// Store configuration
#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    /// Path of the credential file
    pub cred_file: String,

    /// Reload automatically when the file changes
    #[serde(default = "default_watch")]
    pub watch: bool,
}

fn default_watch() -> bool {
    true
}

impl StoreConfig {
    /// Load configuration from `path` (if present) with environment overrides
    pub fn load(path: &Path) -> Result<Self, StoreError> {
        let settings = Config::builder()
            .set_default("watch", true)?
            .add_source(File::from(path).required(false))
            .add_source(Environment::with_prefix("CREDSTORE"))
            .build()?;

        let config: StoreConfig = settings.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), config::ConfigError> {
        if self.cred_file.trim().is_empty() {
            return Err(config::ConfigError::Message(
                "cred_file cannot be empty".into(),
            ));
        }

        Ok(())
    }

    /// Get the credential file as PathBuf
    pub fn cred_file_path(&self) -> PathBuf {
        PathBuf::from(&self.cred_file)
    }
}
