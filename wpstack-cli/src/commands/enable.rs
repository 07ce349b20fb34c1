//! Enable a site: start its stopped services. Files are not touched.

use anyhow::Result;
use colored::Colorize;
use wpstack_core::{Config, LifecycleOp, Materializer, Orchestrator, SiteName};

pub async fn enable(name: &SiteName, config: &Config) -> Result<()> {
    let site = Materializer::new(config).load(name)?;

    let orchestrator = Orchestrator::new(config)?;
    orchestrator.run(LifecycleOp::Start, &site.root).await?;

    println!("{} Site enabled: {}", "✓".green().bold(), name.as_str().bold());
    Ok(())
}
