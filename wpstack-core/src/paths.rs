//! Centralized path configuration for wpstack.
//!
//! All data paths should go through this module to ensure consistency
//! whether wpstack runs as root or as an unprivileged user.

use std::path::PathBuf;

/// Get the wpstack data directory.
///
/// Resolution order:
/// 1. `WPSTACK_DATA_DIR` environment variable
/// 2. `/var/lib/wpstack` if it exists (system install)
/// 3. `~/.wpstack` for user-only installs
pub fn data_dir() -> PathBuf {
    if let Ok(dir) = std::env::var("WPSTACK_DATA_DIR") {
        return PathBuf::from(dir);
    }

    let system_dir = PathBuf::from("/var/lib/wpstack");
    if system_dir.exists() {
        return system_dir;
    }

    dirs::home_dir().map(|h| h.join(".wpstack")).unwrap_or(system_dir)
}

/// Get the directory that holds one subdirectory per materialized site.
pub fn sites_dir() -> PathBuf {
    data_dir().join("sites")
}

/// Get the configuration directory.
///
/// Resolution order:
/// 1. `WPSTACK_CONFIG_DIR` environment variable
/// 2. The platform config dir (`~/.config/wpstack` on Linux)
/// 3. `<data_dir>/config` as fallback
pub fn config_dir() -> PathBuf {
    if let Ok(dir) = std::env::var("WPSTACK_CONFIG_DIR") {
        return PathBuf::from(dir);
    }

    dirs::config_dir().map(|d| d.join("wpstack")).unwrap_or_else(|| data_dir().join("config"))
}
