//! Read operations over families: fetch rows, then denormalize.

use crate::denormalize::{FamilyDetailBuilder, FamilyListBuilder};
use crate::model::{Family, FamilyDetail};
use crate::query::FamilyQuery;
use crate::search::SearchTerm;

/// Family read service over any [`FamilyQuery`] implementation.
#[derive(Debug, Clone)]
pub struct FamilyService<Q> {
    query: Q,
}

impl<Q: FamilyQuery> FamilyService<Q> {
    pub fn new(query: Q) -> Self {
        Self { query }
    }

    /// List every non-admin family, optionally filtered by a search term.
    ///
    /// Blank search input means no filter.
    pub async fn list_families(&self, search: Option<&str>) -> Result<Vec<Family>, Q::Error> {
        let term = search.and_then(SearchTerm::parse);
        let rows = self.query.family_list_rows(term.as_ref()).await?;
        let families = FamilyListBuilder::build(&rows);

        tracing::debug!(
            search = term.as_ref().map(SearchTerm::as_str),
            rows = rows.len(),
            families = families.len(),
            "built family listing"
        );
        Ok(families)
    }

    /// Family of `user_id` with tutors per child, or `None` if the user does not exist.
    ///
    /// An existing user always yields at least one row (the join is a LEFT JOIN from
    /// `users`), so an empty row set is the not-found case.
    pub async fn get_family_detail(&self, user_id: i64) -> Result<Option<FamilyDetail>, Q::Error> {
        let rows = self.query.family_detail_rows(user_id).await?;

        let mut builder = FamilyDetailBuilder::new();
        for row in &rows {
            builder.push(row);
        }
        let detail = builder.finish();

        tracing::debug!(
            user_id,
            rows = rows.len(),
            found = detail.is_some(),
            "built family detail"
        );
        Ok(detail)
    }
}
