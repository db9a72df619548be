//! Environment-driven configuration for the CLI

use std::env;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clark_domain::TaxonomyTables;

/// Points at a JSON file of Bloom taxonomy tables.
pub const TAXONOMY_PATH_VAR: &str = "CLARK_TAXONOMY_PATH";

#[derive(Debug, Clone, Default)]
pub struct CliConfig {
    /// Taxonomy tables to install; the built-in tables are used when unset
    pub taxonomy_path: Option<PathBuf>,
}

impl CliConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        Self {
            taxonomy_path: env::var(TAXONOMY_PATH_VAR)
                .ok()
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .map(PathBuf::from),
        }
    }

    /// Installs the configured taxonomy tables for this process.
    pub fn install_taxonomy(&self) -> Result<()> {
        let Some(path) = &self.taxonomy_path else {
            tracing::debug!("Using built-in taxonomy tables");
            return Ok(());
        };

        let tables = load_taxonomy(path)?;
        clark_domain::install_taxonomy(tables).context("installing taxonomy tables")?;
        tracing::info!("Taxonomy loaded from {}", path.display());
        Ok(())
    }
}

fn load_taxonomy(path: &Path) -> Result<TaxonomyTables> {
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("reading taxonomy tables from {}", path.display()))?;
    TaxonomyTables::from_json_str(&json)
        .with_context(|| format!("parsing taxonomy tables from {}", path.display()))
}
