//! Command implementations for famctl CLI

pub mod families;
pub mod migrate;
pub mod serve;

pub use families::run_families;
pub use migrate::run_migrate;
pub use serve::run_serve;

use anyhow::{Context, Result};
use famctl_server::PgPool;

use crate::config::DbConfig;

/// Open a pool from resolved database settings.
pub(crate) async fn connect(database_url: Option<String>) -> Result<PgPool> {
    let config = DbConfig::resolve(database_url)?;
    famctl_server::db::create_pool_with_options(&config.database_url, config.max_connections)
        .await
        .context("Failed to create database pool")
}
