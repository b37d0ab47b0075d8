//! Database layer - connection pool, schema and repositories
//!
//! # Design Principles
//!
//! - Connection pool (default 5 connections) shared by all requests
//! - Family reads are one JOIN query each - no N+1 queries
//! - Rely on DB constraints, handle conflicts - no check-then-insert
//! - Table names come from [`Entity`], never from input

pub mod entity;
pub mod error;
pub mod migrations;
pub mod pool;
pub mod repos;

pub use entity::Entity;
pub use error::DbError;
pub use pool::{create_pool, create_pool_with_options};
pub use repos::*;
