//! Family detail: one user, their children, and each child's tutors.

use std::collections::{HashMap, HashSet};

use crate::model::{ChildWithTutors, FamilyDetail, User};
use crate::rows::FamilyDetailRow;

/// Builds a [`FamilyDetail`] from `(user, child, tutor)` rows of a single user.
///
/// The user is taken from the first row only; all rows carry the same user
/// columns by construction of the query. Children are indexed by id so repeated
/// child rows (one per tutor) reuse the same entry. `(child, tutor)` pairs are
/// tracked separately so a duplicated association row cannot repeat a tutor.
#[derive(Debug, Default)]
pub struct FamilyDetailBuilder {
    user: Option<User>,
    children: Vec<ChildWithTutors>,
    child_positions: HashMap<i64, usize>,
    seen_tutors: HashSet<(i64, i64)>,
}

impl FamilyDetailBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build the detail from a complete, ordered row set.
    ///
    /// Empty input yields a default user and no children; use
    /// [`FamilyDetailBuilder::finish`] to tell that case apart.
    pub fn build<'a, I>(rows: I) -> FamilyDetail
    where
        I: IntoIterator<Item = &'a FamilyDetailRow>,
    {
        let mut builder = Self::new();
        for row in rows {
            builder.push(row);
        }
        builder.finish().unwrap_or_default()
    }

    pub fn push(&mut self, row: &FamilyDetailRow) {
        if self.user.is_none() {
            self.user = Some(row.user.clone());
        }

        let Some(child_id) = row.child.id else {
            return;
        };

        let children = &mut self.children;
        let position = *self.child_positions.entry(child_id).or_insert_with(|| {
            children.push(ChildWithTutors::new(row.child.child_with_id(child_id)));
            children.len() - 1
        });

        if let Some(tutor_id) = row.tutor.id {
            if self.seen_tutors.insert((child_id, tutor_id)) {
                self.children[position]
                    .tutors
                    .push(row.tutor.tutor_with_id(tutor_id));
            }
        }
    }

    /// `None` when no row was pushed, i.e. the user was not found.
    pub fn finish(self) -> Option<FamilyDetail> {
        let Self { user, children, .. } = self;
        user.map(|user| FamilyDetail { user, children })
    }
}
