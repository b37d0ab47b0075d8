//! Route handlers organized by resource

pub mod families;
pub mod health;
pub mod users;
