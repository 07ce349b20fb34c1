//! Configuration management.

use crate::error::{Result, WpstackError};
use crate::paths;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Persistent configuration for wpstack.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Directory that holds one subdirectory per site.
    pub sites_dir: String,
    /// Explicit path to the docker-compose binary. Discovered on PATH when unset.
    pub compose_binary: Option<String>,
    /// Whether create/delete maintain a `127.0.0.1 <site>` hosts-file entry.
    pub manage_hosts_file: bool,
    /// Database name provisioned for each site.
    pub db_name: String,
    /// Database user provisioned for each site.
    pub db_user: String,
    /// Password for the site database user.
    pub db_password: String,
    /// MySQL root password.
    pub db_root_password: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            sites_dir: paths::sites_dir().to_string_lossy().to_string(),
            compose_binary: None,
            manage_hosts_file: true,
            db_name: "wordpress".to_string(),
            db_user: "wordpress".to_string(),
            db_password: "wordpress".to_string(),
            db_root_password: "password".to_string(),
        }
    }
}

impl Config {
    /// Get the path to the configuration file.
    pub fn config_path() -> PathBuf {
        paths::config_dir().join("config.json")
    }

    /// Load configuration from the default location.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path())
    }

    /// Load configuration from a specific path, falling back to defaults if absent.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path).map_err(|e| WpstackError::InvalidConfig {
            reason: format!("Failed to read config: {}", e),
        })?;
        serde_json::from_str(&content).map_err(|e| WpstackError::InvalidConfig {
            reason: format!("Failed to parse config: {}", e),
        })
    }

    /// Save configuration to the default location.
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path())
    }

    /// Save configuration to a specific path.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| WpstackError::io(parent, e))?;
        }
        let content = serde_json::to_string_pretty(self).map_err(|e| {
            WpstackError::InvalidConfig { reason: format!("Failed to serialize config: {}", e) }
        })?;
        std::fs::write(path, content).map_err(|e| WpstackError::io(path, e))
    }

    /// The sites directory as a path.
    pub fn sites_dir(&self) -> PathBuf {
        PathBuf::from(&self.sites_dir)
    }
}
