//! Scout Config - merged global and project settings

use crate::storage::JsonStore;
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::debug;

/// Config file name inside a store
pub const SCOUT_CONFIG_FILE: &str = "config.json";

/// Files above this size are skipped by content scans (50MB)
pub const DEFAULT_MAX_FILE_SIZE: u64 = 50 * 1024 * 1024;

// ============================================================================
// Scout Config
// ============================================================================

/// Top-level settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoutConfig {
    /// Version (for migrations)
    #[serde(default = "default_version")]
    pub version: u32,

    /// Default log filter, e.g. "info" or "scout_tool=debug"
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub log_level: Option<String>,

    /// Search limits
    #[serde(default)]
    pub search: SearchSettings,
}

impl ScoutConfig {
    pub fn new() -> Self {
        Self {
            version: default_version(),
            ..Self::default()
        }
    }

    // ========================================================================
    // Load / Save
    // ========================================================================

    /// Load global settings, then overlay the project settings of the current directory
    pub fn load() -> Result<Self> {
        let cwd = std::env::current_dir()
            .map_err(|e| Error::Config(format!("Cannot get current directory: {}", e)))?;
        Self::load_for(&cwd)
    }

    /// Load global settings, then overlay `<project_root>/.scout/config.json`
    pub fn load_for(project_root: &Path) -> Result<Self> {
        let mut config = Self::new();

        if let Ok(global) = JsonStore::global() {
            if let Some(global_config) = global.load_optional::<ScoutConfig>(SCOUT_CONFIG_FILE)? {
                debug!("loaded global config from {}", global.base_dir().display());
                config.merge(global_config);
            }
        }

        let project = JsonStore::project(project_root);
        if let Some(project_config) = project.load_optional::<ScoutConfig>(SCOUT_CONFIG_FILE)? {
            debug!("loaded project config from {}", project.base_dir().display());
            config.merge(project_config);
        }

        Ok(config)
    }

    /// Load from a single store only
    pub fn load_from(store: &JsonStore) -> Result<Self> {
        let mut config = Self::new();
        if let Some(loaded) = store.load_optional::<ScoutConfig>(SCOUT_CONFIG_FILE)? {
            config.merge(loaded);
        }
        Ok(config)
    }

    pub fn save(&self, store: &JsonStore) -> Result<()> {
        store.save(SCOUT_CONFIG_FILE, self)
    }

    // ========================================================================
    // Merge
    // ========================================================================

    /// Merge another config into this one (other wins)
    pub fn merge(&mut self, other: ScoutConfig) {
        self.version = self.version.max(other.version);
        if other.log_level.is_some() {
            self.log_level = other.log_level;
        }
        self.search.merge(other.search);
    }
}

// ============================================================================
// Search Settings
// ============================================================================

/// Limits applied by the content-scanning tools
///
/// Unset fields stay `None` so a merge can tell "not configured" apart from an
/// explicit value equal to the default.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchSettings {
    /// Files larger than this are treated as unreadable and skipped
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_file_size: Option<u64>,
}

impl SearchSettings {
    fn merge(&mut self, other: SearchSettings) {
        if other.max_file_size.is_some() {
            self.max_file_size = other.max_file_size;
        }
    }

    pub fn with_max_file_size(mut self, bytes: u64) -> Self {
        self.max_file_size = Some(bytes);
        self
    }

    /// Effective size limit in bytes
    pub fn file_size_limit(&self) -> u64 {
        self.max_file_size.unwrap_or(DEFAULT_MAX_FILE_SIZE)
    }
}

fn default_version() -> u32 {
    1
}
