//! Query capability the family service depends on.

use async_trait::async_trait;

use crate::rows::{FamilyDetailRow, FamilyListRow};
use crate::search::SearchTerm;

/// Source of the two family join queries.
///
/// Implementations run the SQL and decode rows; they do no grouping. Errors are
/// handed back to the caller untouched.
#[async_trait]
pub trait FamilyQuery: Send + Sync {
    type Error: std::error::Error + Send + Sync + 'static;

    /// Non-admin users left-joined to their children, ordered by
    /// `(user_id, child_id)`, optionally narrowed by `search`.
    async fn family_list_rows(
        &self,
        search: Option<&SearchTerm>,
    ) -> Result<Vec<FamilyListRow>, Self::Error>;

    /// One user left-joined to children and tutors, ordered by
    /// `(user_id, child_id, tutor_id)`. Empty when the user does not exist.
    async fn family_detail_rows(&self, user_id: i64) -> Result<Vec<FamilyDetailRow>, Self::Error>;
}
