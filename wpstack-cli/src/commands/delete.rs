//! Delete a site: tear down its services and volumes, then remove its files.

use anyhow::Result;
use colored::Colorize;
use std::path::Path;
use tracing::warn;
use wpstack_core::{hosts, Config, LifecycleOp, Materializer, Orchestrator, SiteName};

pub async fn delete(name: &SiteName, config: &Config) -> Result<()> {
    let materializer = Materializer::new(config);
    let site = materializer.load(name)?;

    let orchestrator = Orchestrator::new(config)?;
    orchestrator.run(LifecycleOp::Down, &site.root).await?;

    if config.manage_hosts_file {
        if let Err(err) = hosts::remove_entry(Path::new(hosts::HOSTS_PATH), name) {
            warn!(%err, "Could not clean up hosts file entry");
        }
    }

    materializer.remove(name)?;

    println!("{} Site deleted: {}", "✓".green().bold(), name.as_str().bold());
    Ok(())
}
