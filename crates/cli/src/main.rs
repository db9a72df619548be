//! CLARK CLI - offline checks over stored learning objects
//!
//! Reads files of persisted learning-object documents, in any schema
//! revision, and reconstructs them through the domain model.

mod commands;
mod config;

use std::path::PathBuf;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::CliConfig;

const USAGE: &str = "Usage: clark <command> <file>

Commands:
  check      reconstruct every learning object in <file>
  submit     check, then verify each object is ready for review
  normalize  reconstruct and print the canonical JSON";

fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "clark_cli=info,clark_domain=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = CliConfig::from_env();
    config.install_taxonomy()?;

    let mut args = std::env::args().skip(1);
    let command = args.next();
    let file = args.next().map(PathBuf::from);

    match (command.as_deref(), file) {
        (Some("check"), Some(path)) => {
            let objects = commands::check(&path)?;
            tracing::info!("{} learning object(s) valid", objects.len());
        }
        (Some("submit"), Some(path)) => {
            commands::submit(&path)?;
        }
        (Some("normalize"), Some(path)) => {
            commands::normalize(&path, std::io::stdout().lock())?;
            println!();
        }
        (Some(cmd @ ("check" | "submit" | "normalize")), None) => {
            anyhow::bail!("Missing <file> for {cmd}\n\n{USAGE}")
        }
        (Some(cmd), _) => anyhow::bail!("Unknown command: {cmd}\n\n{USAGE}"),
        (None, _) => anyhow::bail!("{USAGE}"),
    }

    Ok(())
}

