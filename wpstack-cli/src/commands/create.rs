//! Create a site: materialize its directory and bring the services up.

use anyhow::Result;
use colored::Colorize;
use std::path::Path;
use tracing::{debug, warn};
use wpstack_core::{hosts, Config, LifecycleOp, Materializer, Orchestrator, SiteName};

pub async fn create(name: &SiteName, config: &Config) -> Result<()> {
    // Probe the orchestrator before touching the filesystem.
    let orchestrator = Orchestrator::new(config)?;
    let version = orchestrator.version().await?;
    debug!(%version, "Orchestrator available");

    let materializer = Materializer::new(config);
    let site = materializer.materialize(name)?;

    if config.manage_hosts_file {
        match hosts::ensure_entry(Path::new(hosts::HOSTS_PATH), name) {
            Ok(_) => {}
            Err(err) => {
                warn!(%err, "Could not update hosts file");
                println!(
                    "{} Could not update {}; add '127.0.0.1 {}' manually",
                    "⚠".yellow().bold(),
                    hosts::HOSTS_PATH,
                    name
                );
            }
        }
    }

    orchestrator.run(LifecycleOp::Up, &site.root).await?;

    println!("{} Site created: {}", "✓".green().bold(), name.as_str().bold());
    println!();
    println!("  {} WordPress   http://{}:{}", "•".dimmed(), name, site.ports.wordpress);
    println!("  {} phpMyAdmin  http://{}:{}", "•".dimmed(), name, site.ports.phpmyadmin);
    println!("  {} Proxy       http://{}:{}", "•".dimmed(), name, site.ports.proxy);

    Ok(())
}
