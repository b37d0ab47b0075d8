//! Family listing: users with their children, one level deep.

use std::collections::HashSet;

use crate::model::{Family, User};
use crate::rows::FamilyListRow;

/// Family being accumulated for the current `user_id`.
#[derive(Debug)]
struct OpenFamily {
    family: Family,
    seen_children: HashSet<i64>,
}

impl OpenFamily {
    fn new(user: User) -> Self {
        Self {
            family: Family {
                user,
                children: Vec::new(),
            },
            seen_children: HashSet::new(),
        }
    }
}

/// Groups `(user, child)` rows into [`Family`] entries.
///
/// Rows must be ordered by `(user_id, child_id)`. A change of `user_id` closes the
/// open family; children are deduplicated by id within each family.
#[derive(Debug, Default)]
pub struct FamilyListBuilder {
    current: Option<OpenFamily>,
    families: Vec<Family>,
}

impl FamilyListBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build the listing from a complete, ordered row set.
    pub fn build<'a, I>(rows: I) -> Vec<Family>
    where
        I: IntoIterator<Item = &'a FamilyListRow>,
    {
        let mut builder = Self::new();
        for row in rows {
            builder.push(row);
        }
        builder.finish()
    }

    pub fn push(&mut self, row: &FamilyListRow) {
        let same_group = self
            .current
            .as_ref()
            .is_some_and(|open| open.family.user.id == row.user.id);

        if !same_group {
            self.flush();
        }

        let open = self
            .current
            .get_or_insert_with(|| OpenFamily::new(row.user.clone()));

        if let Some(child_id) = row.child.id {
            if open.seen_children.insert(child_id) {
                open.family.children.push(row.child.child_with_id(child_id));
            }
        }
    }

    /// Close the last open family and return the listing.
    pub fn finish(mut self) -> Vec<Family> {
        self.flush();
        self.families
    }

    fn flush(&mut self) {
        if let Some(open) = self.current.take() {
            self.families.push(open.family);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rows::ChildColumns;

    fn user(id: i64) -> User {
        User {
            id,
            firstname: format!("user{id}"),
            lastname: "Doe".into(),
            email: format!("user{id}@example.com"),
            ..Default::default()
        }
    }

    fn row(user_id: i64, child_id: Option<i64>) -> FamilyListRow {
        FamilyListRow {
            user: user(user_id),
            child: ChildColumns {
                id: child_id,
                firstname: child_id.map(|id| format!("child{id}")),
                lastname: child_id.map(|_| "Doe".to_string()),
                ..Default::default()
            },
        }
    }

    fn child_ids(family: &Family) -> Vec<i64> {
        family.children.iter().map(|c| c.id).collect()
    }

    #[test]
    fn empty_input_yields_empty_listing() {
        assert!(FamilyListBuilder::build(&Vec::<FamilyListRow>::new()).is_empty());
    }

    #[test]
    fn groups_children_under_users() {
        let rows = vec![row(1, Some(10)), row(1, Some(11)), row(2, None)];

        let families = FamilyListBuilder::build(&rows);

        assert_eq!(families.len(), 2);
        assert_eq!(families[0].user.id, 1);
        assert_eq!(child_ids(&families[0]), vec![10, 11]);
        assert_eq!(families[1].user.id, 2);
        assert!(families[1].children.is_empty());
    }

    #[test]
    fn fan_out_rows_do_not_duplicate_children() {
        let rows = vec![row(1, Some(10)), row(1, Some(10)), row(1, Some(11))];

        let families = FamilyListBuilder::build(&rows);

        assert_eq!(families.len(), 1);
        assert_eq!(child_ids(&families[0]), vec![10, 11]);
    }

    #[test]
    fn childless_user_in_the_middle_is_kept() {
        let rows = vec![row(1, Some(10)), row(2, None), row(3, Some(30))];

        let families = FamilyListBuilder::build(&rows);

        let users: Vec<i64> = families.iter().map(|f| f.user.id).collect();
        assert_eq!(users, vec![1, 2, 3]);
        assert!(families[1].children.is_empty());
    }

    #[test]
    fn output_follows_input_order_not_value_order() {
        let rows = vec![row(5, Some(2)), row(5, Some(1)), row(3, None)];

        let families = FamilyListBuilder::build(&rows);

        assert_eq!(families[0].user.id, 5);
        assert_eq!(child_ids(&families[0]), vec![2, 1]);
        assert_eq!(families[1].user.id, 3);
    }

    #[test]
    fn child_fields_come_from_row() {
        let families = FamilyListBuilder::build(&[row(1, Some(10))]);
        let child = &families[0].children[0];
        assert_eq!(child.firstname, "child10");
        assert_eq!(child.lastname, "Doe");
    }

    #[test]
    fn incremental_push_matches_build() {
        let rows = vec![row(1, Some(10)), row(2, Some(20)), row(2, Some(21))];

        let mut builder = FamilyListBuilder::new();
        for r in &rows {
            builder.push(r);
        }

        assert_eq!(builder.finish(), FamilyListBuilder::build(&rows));
    }
}
