//! permsync CLI
//!
//! One-shot tool for copying Frontegg permission definitions between vendor
//! environments. User-facing output uses writeln! to stdout (this is a CLI
//! binary, not debug output); logs go to stderr.

use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use dialoguer::Confirm;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use permsync_core::{FronteggClient, Settings, migrate};

mod fmt;

#[derive(Parser, Debug)]
#[command(name = "permsync")]
#[command(version, about = "Migrate Frontegg permissions between environments", long_about = None)]
struct Cli {
    /// Path to the settings file (defaults to the user config directory)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Override the Frontegg API base URL
    #[arg(long, global = true)]
    base_url: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Copy permissions from one environment to another
    Migrate {
        /// Source environment name (e.g. "dev")
        source: String,
        /// Destination environment name (e.g. "qa")
        destination: String,
        /// Compute and print the plan without creating anything
        #[arg(long)]
        dry_run: bool,
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
    /// List an environment's permission categories
    Categories {
        /// Environment name
        environment: String,
    },
    /// List an environment's permissions
    Permissions {
        /// Environment name
        environment: String,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "permsync=info".into()),
        ))
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    info!(version = env!("CARGO_PKG_VERSION"), "Starting permsync");

    let settings = load_settings(&cli)?;
    let client = FronteggClient::new(settings)?;

    match cli.command {
        Commands::Migrate {
            source,
            destination,
            dry_run,
            yes,
        } => run_migrate(&client, &source, &destination, dry_run, yes).await,
        Commands::Categories { environment } => run_categories(&client, &environment).await,
        Commands::Permissions { environment } => run_permissions(&client, &environment).await,
    }
}

fn load_settings(cli: &Cli) -> anyhow::Result<Settings> {
    let path = match &cli.config {
        Some(path) => path.clone(),
        None => Settings::default_path().context("could not resolve the user config directory")?,
    };
    let mut settings = Settings::load(&path)?;
    if let Some(base_url) = &cli.base_url {
        settings.base_url = base_url.clone();
    }
    Ok(settings)
}

async fn run_migrate(
    client: &FronteggClient,
    source: &str,
    destination: &str,
    dry_run: bool,
    yes: bool,
) -> anyhow::Result<()> {
    let mut out = io::stdout();
    let plan = migrate::plan(client, source, destination).await?;

    if plan.is_empty() {
        writeln!(
            out,
            "No new permissions to migrate from {source} to {destination}."
        )?;
        return Ok(());
    }

    fmt::write_plan(&mut out, &plan)?;

    if dry_run {
        writeln!(
            out,
            "\n{} permission(s) would be created in {destination}.",
            plan.permissions.len()
        )?;
        return Ok(());
    }

    if !yes {
        let proceed = Confirm::new()
            .with_prompt(format!(
                "Create {} permission(s) in {destination}?",
                plan.permissions.len()
            ))
            .default(true)
            .interact()?;
        if !proceed {
            writeln!(out, "Aborted.")?;
            return Ok(());
        }
    }

    let created = migrate::apply(client, destination, &plan).await?;
    writeln!(
        out,
        "\nMigrated {} permission(s) from {source} to {destination}.",
        created.len()
    )?;
    Ok(())
}

async fn run_categories(client: &FronteggClient, environment: &str) -> anyhow::Result<()> {
    let mut out = io::stdout();
    let categories = client.list_categories(environment).await?;
    if categories.is_empty() {
        writeln!(out, "No categories found.")?;
    } else {
        fmt::write_categories(&mut out, &categories)?;
    }
    Ok(())
}

async fn run_permissions(client: &FronteggClient, environment: &str) -> anyhow::Result<()> {
    let mut out = io::stdout();
    let permissions = client.list_permissions(environment).await?;
    if permissions.is_empty() {
        writeln!(out, "No permissions found.")?;
    } else {
        fmt::write_permissions(&mut out, &permissions)?;
    }
    Ok(())
}
