//! Persistent trap configuration.
//!
//! The store reads and writes one TOML file. Loading never fails from the
//! caller's point of view: a missing file yields the defaults and a corrupt
//! or invalid one is reported and replaced by the defaults in memory. Saving
//! writes a sibling temp file and renames it over the target, so a crash
//! mid-write leaves the previous file intact.

use crate::error::{IoError, Result};
use snare_core::catalog::TrapCatalog;
use snare_core::config::TrapConfig;
use snare_core::registry::KindRegistry;
use snare_core::system::TrapSystem;
use std::path::{Path, PathBuf};
use std::sync::Arc;

pub const DEFAULT_CONFIG_FILE: &str = "snare.toml";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigStore {
    path: PathBuf,
}

impl Default for ConfigStore {
    fn default() -> Self {
        Self::new(DEFAULT_CONFIG_FILE)
    }
}

impl ConfigStore {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_else(|| DEFAULT_CONFIG_FILE.into());
        name.push(".tmp");
        self.path.with_file_name(name)
    }

    /// Reads, parses and validates the file.
    pub fn try_load(&self) -> Result<TrapConfig> {
        let content = std::fs::read_to_string(&self.path).map_err(|e| {
            IoError::FileSystem(e).with_context(format!("reading config from {:?}", self.path))
        })?;
        let config: TrapConfig = toml::from_str(&content).map_err(|e| {
            IoError::TomlParse(e).with_context(format!("parsing config {:?}", self.path))
        })?;
        config
            .validate()
            .map_err(|e| IoError::validation(e.to_string()))?;
        Ok(config)
    }

    /// Loads the config, falling back to defaults when the file is missing,
    /// unreadable or invalid.
    pub fn load(&self) -> TrapConfig {
        match self.try_load() {
            Ok(config) => {
                tracing::info!(path = ?self.path, traps = config.traps.len(), "Loaded trap config");
                config
            }
            Err(err) if err.is_not_found() => {
                tracing::info!(path = ?self.path, "No trap config found, using defaults");
                TrapConfig::default()
            }
            Err(err) => {
                tracing::error!(path = ?self.path, error = %err, "Trap config is corrupt, using defaults");
                TrapConfig::default()
            }
        }
    }

    /// Validates and atomically writes `config`.
    pub fn save(&self, config: &TrapConfig) -> Result<()> {
        config
            .validate()
            .map_err(|e| IoError::validation(e.to_string()))?;
        let content = toml::to_string_pretty(config)?;

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| {
                IoError::FileSystem(e).with_context(format!("creating {parent:?}"))
            })?;
        }
        let temp = self.temp_path();
        std::fs::write(&temp, content).map_err(|e| {
            IoError::FileSystem(e).with_context(format!("writing config to {temp:?}"))
        })?;
        std::fs::rename(&temp, &self.path).map_err(|e| {
            IoError::FileSystem(e).with_context(format!("replacing config {:?}", self.path))
        })?;
        tracing::debug!(path = ?self.path, "Saved trap config");
        Ok(())
    }

    /// Loads the config and writes it straight back, so missing keys appear in
    /// the file with their defaults. A failed write is logged and ignored.
    pub fn load_and_save(&self) -> TrapConfig {
        let config = self.load();
        if let Err(err) = self.save(&config) {
            tracing::warn!(path = ?self.path, error = %err, "Could not write trap config");
        }
        config
    }

    /// Overwrites the file with the defaults.
    pub fn reset_and_save(&self) -> Result<TrapConfig> {
        let config = TrapConfig::default();
        self.save(&config)?;
        Ok(config)
    }

    pub fn load_catalog(&self, kinds: &KindRegistry) -> Arc<TrapCatalog> {
        Arc::new(TrapCatalog::resolve(&self.load(), kinds))
    }

    /// Re-reads the file and swaps the result into `system`.
    pub fn reload(&self, system: &mut TrapSystem, kinds: &KindRegistry) {
        system.replace_catalog(self.load_catalog(kinds));
    }
}
