//! Site domain types.
//!
//! A site is one isolated WordPress deployment, identified by name. The name
//! doubles as a filesystem path component, a DNS label, and the prefix that
//! keeps container, network, and volume names from colliding between sites,
//! so it is validated against the strictest of those charsets.

use crate::error::{Result, WpstackError};
use crate::ports::SitePorts;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};

/// File name of the per-site metadata record.
pub const SITE_RECORD_FILE: &str = "site.json";

/// Maximum site name length (DNS label limit).
const MAX_NAME_LEN: usize = 63;

/// A validated site name.
///
/// Accepted names are 1-63 bytes of ASCII lowercase alphanumerics and
/// interior hyphens, starting and ending with an alphanumeric.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SiteName(String);

impl SiteName {
    /// Validate a raw string as a site name.
    pub fn parse(raw: &str) -> Result<Self> {
        let reject = |reason: &str| {
            Err(WpstackError::InvalidSiteName { name: raw.to_string(), reason: reason.to_string() })
        };

        if raw.is_empty() {
            return reject("name must not be empty");
        }
        if raw.len() > MAX_NAME_LEN {
            return reject("name exceeds 63 bytes");
        }
        if !raw.chars().all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-') {
            return reject("only lowercase letters, digits, and hyphens are allowed");
        }
        if raw.starts_with('-') || raw.ends_with('-') {
            return reject("name must start and end with a letter or digit");
        }

        Ok(Self(raw.to_string()))
    }

    /// The validated name as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Name of the shared docker network for this site.
    pub fn network_name(&self) -> String {
        format!("{}_wpsite", self.0)
    }

    /// Name of the database volume for this site.
    pub fn volume_name(&self) -> String {
        format!("{}_db_data", self.0)
    }

    /// Container name for one of this site's services.
    pub fn container_name(&self, service: &str) -> String {
        format!("{}_{}", self.0, service)
    }
}

impl fmt::Display for SiteName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for SiteName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// A materialized site: name, on-disk root, and assigned host ports.
#[derive(Debug, Clone)]
pub struct Site {
    /// Site name.
    pub name: SiteName,
    /// Root of the site's isolated directory.
    pub root: PathBuf,
    /// Host ports assigned to this site.
    pub ports: SitePorts,
}

impl Site {
    /// Path of the generated compose descriptor.
    pub fn compose_path(&self) -> PathBuf {
        self.root.join("docker-compose.yml")
    }

    /// Path of the generated reverse-proxy config.
    pub fn nginx_config_path(&self) -> PathBuf {
        self.root.join("nginx").join("default.conf")
    }

    /// Directory served by PHP-FPM.
    pub fn public_dir(&self) -> PathBuf {
        self.root.join("public")
    }

    /// Path of the site metadata record.
    pub fn record_path(&self) -> PathBuf {
        self.root.join(SITE_RECORD_FILE)
    }
}

/// Persisted per-site metadata.
///
/// The record pins the port allocation so that later invocations (and other
/// sites' allocations) see it without inspecting the compose file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SiteRecord {
    /// Site name.
    pub name: String,
    /// First port of the site's assigned block.
    pub base_port: u16,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

impl SiteRecord {
    /// Read a record from disk.
    pub fn load(path: &Path) -> Result<Self> {
        let content =
            std::fs::read_to_string(path).map_err(|e| WpstackError::io(path, e))?;
        serde_json::from_str(&content).map_err(|e| WpstackError::CorruptSiteRecord {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })
    }

    /// Write a record to disk.
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = serde_json::to_string_pretty(self).map_err(|e| {
            WpstackError::CorruptSiteRecord { path: path.to_path_buf(), reason: e.to_string() }
        })?;
        std::fs::write(path, content).map_err(|e| WpstackError::io(path, e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_valid_names() {
        for name in ["blog", "shop", "my-site", "site42", "a", "0day"] {
            assert!(SiteName::parse(name).is_ok(), "expected '{}' to be valid", name);
        }
    }

    #[test]
    fn test_parse_rejects_unsafe_names() {
        for name in [
            "",
            "Blog",
            "my site",
            "my_site",
            "../etc",
            "a/b",
            "-leading",
            "trailing-",
            "dotted.name",
        ] {
            assert!(SiteName::parse(name).is_err(), "expected '{}' to be rejected", name);
        }
    }

    #[test]
    fn test_parse_rejects_overlong_name() {
        let name = "a".repeat(64);
        assert!(SiteName::parse(&name).is_err());
        let name = "a".repeat(63);
        assert!(SiteName::parse(&name).is_ok());
    }

    #[test]
    fn test_name_derivations() {
        let name = SiteName::parse("blog").unwrap();
        assert_eq!(name.network_name(), "blog_wpsite");
        assert_eq!(name.volume_name(), "blog_db_data");
        assert_eq!(name.container_name("db"), "blog_db");
    }

    #[test]
    fn test_record_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(SITE_RECORD_FILE);

        let record =
            SiteRecord { name: "blog".to_string(), base_port: 42000, created_at: Utc::now() };
        record.save(&path).unwrap();

        let loaded = SiteRecord::load(&path).unwrap();
        assert_eq!(loaded.name, "blog");
        assert_eq!(loaded.base_port, 42000);
    }

    #[test]
    fn test_record_load_rejects_garbage() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(SITE_RECORD_FILE);
        std::fs::write(&path, "not json").unwrap();

        assert!(matches!(
            SiteRecord::load(&path),
            Err(WpstackError::CorruptSiteRecord { .. })
        ));
    }
}
