//! famctl-core: family domain model and join-row denormalization
//!
//! Turns the flat, fan-out rows of the family join queries into
//! `user -> children -> tutors` trees. No database access happens here; rows
//! come from a [`FamilyQuery`] implementation.

pub mod denormalize;
pub mod model;
pub mod query;
pub mod rows;
pub mod search;
pub mod service;

pub use denormalize::{FamilyDetailBuilder, FamilyListBuilder};
pub use model::{Child, ChildWithTutors, Family, FamilyDetail, Tutor, User};
pub use query::FamilyQuery;
pub use rows::{ChildColumns, FamilyDetailRow, FamilyListRow, TutorColumns};
pub use search::SearchTerm;
pub use service::FamilyService;
