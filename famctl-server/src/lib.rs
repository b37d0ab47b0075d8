//! famctl-server: Postgres access and HTTP API for families
//!
//! - `db`: connection pool, schema migrations, `UserRepo`
//! - `models`: validated input types for account writes
//! - `http`: axum router over the family service and account operations

pub mod db;
pub mod http;
pub mod models;

pub use db::{create_pool, DbError, UserRepo};
pub use http::{run_server, ServerConfig};
pub use sqlx::PgPool;
