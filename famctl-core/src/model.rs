//! Family domain objects as reconstructed from join rows.
//!
//! These are read-only projections: built per query, serialized, dropped.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Parent account at the root of every family tree.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: i64,
    pub firstname: String,
    pub lastname: String,
    pub email: String,
    pub phone_number: Option<String>,
    pub address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gender: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Child {
    pub id: i64,
    pub firstname: String,
    pub lastname: String,
    pub birthdate: Option<NaiveDate>,
    pub gender: Option<String>,
    pub allergy: Option<String>,
}

/// Tutor attached to a child through `tutor_children`.
///
/// The same tutor may appear under several children; each child holds its own copy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Tutor {
    pub id: i64,
    pub firstname: String,
    pub lastname: String,
    pub email: Option<String>,
    pub phone_number: Option<String>,
    pub address: Option<String>,
    pub gender: Option<String>,
}

/// Child plus the tutors associated with it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChildWithTutors {
    #[serde(flatten)]
    pub child: Child,
    pub tutors: Vec<Tutor>,
}

impl ChildWithTutors {
    pub fn new(child: Child) -> Self {
        Self {
            child,
            tutors: Vec::new(),
        }
    }

    pub fn id(&self) -> i64 {
        self.child.id
    }
}

/// One entry of the admin family listing: a user and their children.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Family {
    pub user: User,
    pub children: Vec<Child>,
}

/// A single family with tutors resolved per child.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FamilyDetail {
    pub user: User,
    pub children: Vec<ChildWithTutors>,
}
