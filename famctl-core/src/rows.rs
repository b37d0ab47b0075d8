//! Flat row shapes produced by the family join queries.
//!
//! Every column joined through a LEFT JOIN is optional. A null id means the row
//! carries no entity at that level (nor below it); the remaining columns of the
//! group are then ignored.

use chrono::NaiveDate;

use crate::model::{Child, Tutor, User};

/// `children` columns of a joined row (`child_*` aliases).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChildColumns {
    pub id: Option<i64>,
    pub firstname: Option<String>,
    pub lastname: Option<String>,
    pub birthdate: Option<NaiveDate>,
    pub gender: Option<String>,
    pub allergy: Option<String>,
}

impl ChildColumns {
    /// Materialize the child, or `None` when the join found no child.
    pub fn to_child(&self) -> Option<Child> {
        self.id.map(|id| self.child_with_id(id))
    }

    pub(crate) fn child_with_id(&self, id: i64) -> Child {
        Child {
            id,
            firstname: self.firstname.clone().unwrap_or_default(),
            lastname: self.lastname.clone().unwrap_or_default(),
            birthdate: self.birthdate,
            gender: self.gender.clone(),
            allergy: self.allergy.clone(),
        }
    }
}

/// `tutors` columns of a joined row (`tutor_*` aliases).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TutorColumns {
    pub id: Option<i64>,
    pub firstname: Option<String>,
    pub lastname: Option<String>,
    pub email: Option<String>,
    pub phone_number: Option<String>,
    pub address: Option<String>,
    pub gender: Option<String>,
}

impl TutorColumns {
    pub fn to_tutor(&self) -> Option<Tutor> {
        self.id.map(|id| self.tutor_with_id(id))
    }

    pub(crate) fn tutor_with_id(&self, id: i64) -> Tutor {
        Tutor {
            id,
            firstname: self.firstname.clone().unwrap_or_default(),
            lastname: self.lastname.clone().unwrap_or_default(),
            email: self.email.clone(),
            phone_number: self.phone_number.clone(),
            address: self.address.clone(),
            gender: self.gender.clone(),
        }
    }
}

/// Row of `users LEFT JOIN children`, ordered by `(user_id, child_id)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FamilyListRow {
    pub user: User,
    pub child: ChildColumns,
}

/// Row of `users LEFT JOIN children LEFT JOIN tutor_children LEFT JOIN tutors`,
/// ordered by `(user_id, child_id, tutor_id)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FamilyDetailRow {
    pub user: User,
    pub child: ChildColumns,
    pub tutor: TutorColumns,
}
