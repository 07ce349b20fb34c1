use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use colored::Colorize;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};
use wpstack_core::{Config, SiteName, WpstackError};

mod commands;

#[derive(Parser)]
#[command(name = "wpstack")]
#[command(about = "WordPress site deployment CLI", long_about = None)]
#[command(version)]
struct Cli {
    /// Site name (used as directory, hostname, and container name prefix)
    site_name: String,

    /// Lifecycle action; omitting it creates the site
    #[arg(value_enum)]
    action: Option<Action>,
}

/// Lifecycle actions, mapped one-to-one onto orchestrator operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Action {
    /// Materialize the site and bring its services up
    Create,
    /// Start a previously disabled site's services
    Enable,
    /// Stop a site's services, keeping its files
    Disable,
    /// Stop and remove the site's services, volumes, and files
    Delete,
}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();

    let cli = Cli::parse();
    if let Err(err) = run(&cli).await {
        // A failed docker-compose run becomes our exit code, unmodified.
        if let Some(WpstackError::OrchestratorFailed { code, .. }) =
            err.downcast_ref::<WpstackError>()
        {
            eprintln!("{} {}", "✗".red().bold(), err);
            std::process::exit(*code);
        }
        return Err(err);
    }

    Ok(())
}

async fn run(cli: &Cli) -> Result<()> {
    let config = Config::load().context("Failed to load configuration")?;
    let name = SiteName::parse(&cli.site_name)?;

    match cli.action.unwrap_or(Action::Create) {
        Action::Create => commands::create(&name, &config).await,
        Action::Enable => commands::enable(&name, &config).await,
        Action::Disable => commands::disable(&name, &config).await,
        Action::Delete => commands::delete(&name, &config).await,
    }
}

fn init_tracing() {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();
}
