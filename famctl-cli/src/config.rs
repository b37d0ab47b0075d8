//! Runtime configuration: `.env` files, environment, then CLI flags.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::{debug, warn};

use famctl_server::db::pool::DEFAULT_MAX_CONNECTIONS;

/// Environment variable holding the pool size.
const MAX_CONNECTIONS_ENV: &str = "FAMCTL_MAX_CONNECTIONS";

/// Outcome of `.env` loading, kept until tracing is initialized.
#[derive(Debug, Default)]
pub struct DotenvReport {
    pub loaded: Vec<PathBuf>,
    pub failed: Vec<(PathBuf, String)>,
}

impl DotenvReport {
    fn load_file(&mut self, path: &Path) {
        if !path.exists() {
            return;
        }
        match dotenvy::from_path(path) {
            Ok(()) => self.loaded.push(path.to_path_buf()),
            Err(e) => self.failed.push((path.to_path_buf(), e.to_string())),
        }
    }

    pub fn log(&self) {
        for path in &self.loaded {
            debug!("Loaded .env from {}", path.display());
        }
        for (path, err) in &self.failed {
            warn!("Failed to load {}: {}", path.display(), err);
        }
    }
}

/// Load environment variables from .env files.
///
/// Priority order (highest to lowest):
/// 1. Environment variables already set
/// 2. Current directory .env
/// 3. ~/.famctl/.env
///
/// dotenvy never overwrites variables that are already set. Runs before
/// tracing exists, so the result is returned for [`DotenvReport::log`].
pub fn load_dotenv() -> DotenvReport {
    let mut report = DotenvReport::default();

    match dotenvy::dotenv() {
        Ok(path) => report.loaded.push(path),
        Err(e) if e.not_found() => {}
        Err(e) => report.failed.push((PathBuf::from(".env"), e.to_string())),
    }

    if let Some(env_file) = config_dir().map(|dir| dir.join(".env")) {
        report.load_file(&env_file);
    }

    report
}

/// famctl config directory (~/.famctl)
pub fn config_dir() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(".famctl"))
}

/// Database settings shared by every command that opens a pool.
#[derive(Debug, Clone)]
pub struct DbConfig {
    pub database_url: String,
    pub max_connections: u32,
}

impl DbConfig {
    /// Resolve from the `--database-url` flag (which clap already falls back to
    /// `DATABASE_URL` for) and `FAMCTL_MAX_CONNECTIONS`.
    pub fn resolve(database_url: Option<String>) -> Result<Self> {
        let database_url = database_url.context(
            "DATABASE_URL not set. Set via --database-url, DATABASE_URL env, or ~/.famctl/.env",
        )?;

        let max_connections = match std::env::var(MAX_CONNECTIONS_ENV) {
            Ok(raw) => parse_max_connections(&raw)?,
            Err(_) => DEFAULT_MAX_CONNECTIONS,
        };

        Ok(Self {
            database_url,
            max_connections,
        })
    }
}

fn parse_max_connections(raw: &str) -> Result<u32> {
    let value: u32 = raw
        .trim()
        .parse()
        .with_context(|| format!("{MAX_CONNECTIONS_ENV} must be a positive integer, got {raw:?}"))?;
    anyhow::ensure!(value > 0, "{MAX_CONNECTIONS_ENV} must be at least 1");
    Ok(value)
}
