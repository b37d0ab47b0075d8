//! Repository implementations for database access
//!
//! Each repository borrows the pool and follows these patterns:
//! - One JOIN query per family read, grouped in memory by `famctl-core`
//! - Conflicts surface from DB constraints (no check-then-insert)

pub mod users;

pub use users::UserRepo;
