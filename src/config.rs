//! Configuration handling for the TUI

use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

use crate::draft::DEFAULT_STORAGE_KEY;

/// Seconds a notification stays in the status bar by default
const DEFAULT_NOTIFICATION_SECS: u64 = 4;

/// User configuration for the TUI
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct DraftsConfig {
    /// Key of the draft record
    pub storage_key: Option<String>,
    /// Directory holding the draft record
    pub data_dir: Option<PathBuf>,
    /// How long notifications stay visible
    pub notification_secs: Option<u64>,
}

impl DraftsConfig {
    fn project_dirs() -> Option<ProjectDirs> {
        ProjectDirs::from("com", "dehix", "dehix-drafts")
    }

    /// Get the config file path
    fn config_path() -> Option<PathBuf> {
        Self::project_dirs().map(|dirs| dirs.config_dir().join("config.json"))
    }

    /// Load configuration from file
    pub fn load() -> Result<Self> {
        let path = Self::config_path();

        if let Some(path) = path {
            if path.exists() {
                let content = fs::read_to_string(&path)
                    .with_context(|| format!("reading {}", path.display()))?;
                let config: DraftsConfig = serde_json::from_str(&content)
                    .with_context(|| format!("parsing {}", path.display()))?;
                return Ok(config);
            }
        }

        Ok(Self::default())
    }

    pub fn storage_key(&self) -> &str {
        self.storage_key.as_deref().unwrap_or(DEFAULT_STORAGE_KEY)
    }

    pub fn notification_secs(&self) -> u64 {
        self.notification_secs.unwrap_or(DEFAULT_NOTIFICATION_SECS)
    }

    /// Directory for the draft record: the configured one, else the platform data dir
    pub fn data_dir(&self) -> Result<PathBuf> {
        if let Some(dir) = &self.data_dir {
            return Ok(dir.clone());
        }
        Self::project_dirs()
            .map(|dirs| dirs.data_dir().to_path_buf())
            .context("could not determine a data directory; set data_dir in config.json")
    }
}
