//! wpstack dedicated host port range.
//!
//! Developers run many services (Prometheus on 9090, dev servers on 3000,
//! etc.). To avoid conflicts, wpstack publishes site services in a dedicated
//! high port range that is unlikely to collide with normal applications.
//!
//! Each site gets a block of four consecutive ports inside 42000-42999. The
//! block is keyed by the site name: the SHA-256 of the name selects a
//! preferred slot, and linear probing against already materialized sites
//! resolves the rare hash collision. A site that already owns a slot keeps it.

use crate::error::{Result, WpstackError};
use crate::site::{SiteName, SiteRecord, SITE_RECORD_FILE};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tracing::{debug, instrument};

/// wpstack dedicated port range start (inclusive).
pub const SITE_PORT_RANGE_START: u16 = 42000;

/// wpstack dedicated port range end (inclusive).
pub const SITE_PORT_RANGE_END: u16 = 42999;

/// Ports published per site: WordPress, phpMyAdmin, reverse proxy, PHP-FPM.
pub const PORTS_PER_SITE: u16 = 4;

/// Number of site slots in the dedicated range.
pub const SLOT_COUNT: u16 = (SITE_PORT_RANGE_END - SITE_PORT_RANGE_START + 1) / PORTS_PER_SITE;

/// Host ports assigned to one site.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SitePorts {
    /// WordPress HTTP port.
    pub wordpress: u16,
    /// phpMyAdmin HTTP port.
    pub phpmyadmin: u16,
    /// Reverse proxy HTTP port.
    pub proxy: u16,
    /// PHP-FPM FastCGI port.
    pub phpfpm: u16,
}

impl SitePorts {
    /// Build the port set from the first port of a site's block.
    pub fn from_base(base: u16) -> Self {
        Self { wordpress: base, phpmyadmin: base + 1, proxy: base + 2, phpfpm: base + 3 }
    }

    /// First port of the block.
    pub fn base(&self) -> u16 {
        self.wordpress
    }
}

/// Preferred slot for a site name, derived from its SHA-256 digest.
pub fn preferred_slot(name: &str) -> u16 {
    let digest = Sha256::digest(name.as_bytes());
    u16::from_be_bytes([digest[0], digest[1]]) % SLOT_COUNT
}

/// Port block allocator for sites.
///
/// Allocations are persisted implicitly through each site's record file, so
/// the allocator only needs the sites directory to see what is taken.
pub struct PortAllocator {
    sites_dir: PathBuf,
}

impl PortAllocator {
    /// Create an allocator over a sites directory.
    pub fn new(sites_dir: impl Into<PathBuf>) -> Self {
        Self { sites_dir: sites_dir.into() }
    }

    /// Allocate a port block for a site.
    ///
    /// Deterministic for a given name while the set of other sites is
    /// unchanged; re-allocating for an existing site returns its recorded
    /// block.
    ///
    /// # Errors
    ///
    /// Returns `WpstackError::PortPoolExhausted` if every slot is taken.
    #[instrument(skip(self), fields(site = %name))]
    pub fn allocate(&self, name: &SiteName) -> Result<SitePorts> {
        let taken = self.allocated_blocks()?;

        let mut slot = preferred_slot(name.as_str());
        for _ in 0..SLOT_COUNT {
            let base = SITE_PORT_RANGE_START + slot * PORTS_PER_SITE;
            match taken.get(&base) {
                Some(owner) if owner != name.as_str() => {
                    slot = (slot + 1) % SLOT_COUNT;
                }
                _ => {
                    debug!(base, "allocated port block");
                    return Ok(SitePorts::from_base(base));
                }
            }
        }

        Err(WpstackError::PortPoolExhausted)
    }

    /// Map of base port to owning site name for all recorded sites.
    fn allocated_blocks(&self) -> Result<HashMap<u16, String>> {
        let mut taken = HashMap::new();

        if !self.sites_dir.exists() {
            return Ok(taken);
        }

        let entries = std::fs::read_dir(&self.sites_dir)
            .map_err(|e| WpstackError::io(&self.sites_dir, e))?;

        for entry in entries {
            let entry = entry.map_err(|e| WpstackError::io(&self.sites_dir, e))?;
            let record_path = entry.path().join(SITE_RECORD_FILE);
            if !record_path.is_file() {
                continue;
            }
            let record = SiteRecord::load(&record_path)?;
            taken.insert(record.base_port, record.name);
        }

        Ok(taken)
    }

    /// The sites directory this allocator scans.
    pub fn sites_dir(&self) -> &Path {
        &self.sites_dir
    }
}
