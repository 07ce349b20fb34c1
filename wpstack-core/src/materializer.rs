//! Site materialization.
//!
//! Renders a site's compose topology and reverse-proxy configuration into an
//! isolated per-site directory:
//!
//! ```text
//! <sites_dir>/<name>/
//!   docker-compose.yml
//!   nginx/default.conf
//!   public/index.php
//!   site.json
//! ```
//!
//! Materializing an existing site leaves its files untouched and reuses the
//! recorded port allocation, so create is idempotent and never rewrites a
//! site's artifacts with different content.

use crate::compose::ComposeRenderer;
use crate::config::Config;
use crate::error::{Result, WpstackError};
use crate::nginx;
use crate::ports::{PortAllocator, SitePorts};
use crate::site::{Site, SiteName, SiteRecord};
use chrono::Utc;
use std::path::{Path, PathBuf};
use tracing::{info, instrument};

/// Placeholder served until WordPress takes over the document root.
const INDEX_PHP: &str = "<?php\nphpinfo();\n";

/// Materializes and removes per-site directories.
pub struct Materializer {
    sites_dir: PathBuf,
    config: Config,
}

impl Materializer {
    /// Create a materializer from configuration.
    pub fn new(config: &Config) -> Self {
        Self { sites_dir: config.sites_dir(), config: config.clone() }
    }

    /// Root directory a site occupies (whether or not it exists).
    pub fn site_root(&self, name: &SiteName) -> PathBuf {
        self.sites_dir.join(name.as_str())
    }

    /// Whether a site's artifacts exist on disk.
    pub fn is_materialized(&self, name: &SiteName) -> bool {
        self.site_root(name).join("docker-compose.yml").is_file()
    }

    /// Load an existing site.
    ///
    /// # Errors
    ///
    /// Returns `WpstackError::SiteNotFound` if the site was never created,
    /// and `WpstackError::CorruptSiteRecord` if its metadata is unreadable.
    pub fn load(&self, name: &SiteName) -> Result<Site> {
        if !self.is_materialized(name) {
            return Err(WpstackError::SiteNotFound { name: name.to_string() });
        }

        let root = self.site_root(name);
        let record = SiteRecord::load(&root.join(crate::site::SITE_RECORD_FILE))?;
        Ok(Site { name: name.clone(), root, ports: SitePorts::from_base(record.base_port) })
    }

    /// Materialize a site, rendering its artifacts if they do not exist yet.
    #[instrument(skip(self), fields(site = %name))]
    pub fn materialize(&self, name: &SiteName) -> Result<Site> {
        if self.is_materialized(name) {
            info!("Site already materialized, leaving files untouched");
            return self.load(name);
        }

        let ports = PortAllocator::new(&self.sites_dir).allocate(name)?;
        let root = self.site_root(name);
        let site = Site { name: name.clone(), root, ports };

        create_dir(&site.root)?;
        create_dir(&site.public_dir())?;
        let nginx_dir = site.root.join("nginx");
        create_dir(&nginx_dir)?;

        write_file(&site.nginx_config_path(), &nginx::render(name))?;
        write_file(&site.public_dir().join("index.php"), INDEX_PHP)?;
        write_file(&site.compose_path(), &ComposeRenderer::render_yaml(&site, &self.config)?)?;

        let record = SiteRecord {
            name: name.to_string(),
            base_port: ports.base(),
            created_at: Utc::now(),
        };
        record.save(&site.record_path())?;

        info!(base_port = ports.base(), "Site materialized");
        Ok(site)
    }

    /// Remove a site's directory tree. A missing directory is not an error.
    #[instrument(skip(self), fields(site = %name))]
    pub fn remove(&self, name: &SiteName) -> Result<()> {
        let root = self.site_root(name);
        if !root.exists() {
            return Ok(());
        }
        std::fs::remove_dir_all(&root).map_err(|e| WpstackError::io(&root, e))?;
        info!("Site directory removed");
        Ok(())
    }
}

fn create_dir(path: &Path) -> Result<()> {
    std::fs::create_dir_all(path).map_err(|e| WpstackError::io(path, e))
}

fn write_file(path: &Path, content: &str) -> Result<()> {
    std::fs::write(path, content).map_err(|e| WpstackError::io(path, e))
}
