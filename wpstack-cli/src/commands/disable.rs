//! Disable a site: stop its services. Files are not touched.

use anyhow::Result;
use colored::Colorize;
use wpstack_core::{Config, LifecycleOp, Materializer, Orchestrator, SiteName};

pub async fn disable(name: &SiteName, config: &Config) -> Result<()> {
    let site = Materializer::new(config).load(name)?;

    let orchestrator = Orchestrator::new(config)?;
    orchestrator.run(LifecycleOp::Stop, &site.root).await?;

    println!("{} Site disabled: {}", "✓".green().bold(), name.as_str().bold());
    Ok(())
}
