//! Entity kinds and the tables backing them.
//!
//! Statements that differ only by table are spelled out per variant so no SQL
//! is ever assembled at runtime.

use sqlx::PgPool;

use super::DbError;

/// Entity stored in its own table with a `BIGINT` primary key `id`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Entity {
    User,
    Child,
    Tutor,
}

impl Entity {
    pub const fn table(self) -> &'static str {
        match self {
            Self::User => "users",
            Self::Child => "children",
            Self::Tutor => "tutors",
        }
    }

    /// Name used in error messages and log fields.
    pub const fn resource(self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Child => "child",
            Self::Tutor => "tutor",
        }
    }

    const fn delete_by_id_sql(self) -> &'static str {
        match self {
            Self::User => "DELETE FROM users WHERE id = $1",
            Self::Child => "DELETE FROM children WHERE id = $1",
            Self::Tutor => "DELETE FROM tutors WHERE id = $1",
        }
    }
}

/// Delete one row by primary key, returning the number of rows removed.
///
/// Dependent rows go with it through `ON DELETE CASCADE`.
pub async fn delete_by_id(pool: &PgPool, entity: Entity, id: i64) -> Result<u64, DbError> {
    let result = sqlx::query(entity.delete_by_id_sql())
        .bind(id)
        .execute(pool)
        .await?;

    tracing::debug!(
        table = entity.table(),
        id,
        rows = result.rows_affected(),
        "deleted by id"
    );
    Ok(result.rows_affected())
}
