//! HTTP server command
//!
//! Runs the famctl HTTP API (families, users, health).

use std::net::SocketAddr;

use anyhow::{Context, Result};
use clap::Parser;

use famctl_server::db::migrations;
use famctl_server::http::{run_server, ServerConfig};

/// Arguments for the serve command
#[derive(Parser, Debug)]
pub struct ServeArgs {
    /// Address to bind to
    #[arg(long, short = 'b', env = "FAMCTL_BIND", default_value = "127.0.0.1:3030")]
    pub bind: SocketAddr,

    /// Allow permissive CORS (all origins) - use with caution
    #[arg(long)]
    pub cors_permissive: bool,

    /// Apply schema migrations before accepting requests
    #[arg(long)]
    pub migrate: bool,

    /// Database URL (overrides config/environment)
    #[arg(long, env = "DATABASE_URL")]
    pub database_url: Option<String>,
}

/// Run the HTTP server
pub async fn run_serve(args: ServeArgs) -> Result<()> {
    let pool = super::connect(args.database_url).await?;

    if args.migrate {
        migrations::run(&pool)
            .await
            .context("Failed to apply migrations")?;
    }

    tracing::info!("Starting famctl server on {}", args.bind);

    let config = ServerConfig {
        bind_addr: args.bind,
        cors_permissive: args.cors_permissive,
    };

    // Blocks until shutdown
    run_server(pool, config).await.context("Server error")?;

    Ok(())
}
