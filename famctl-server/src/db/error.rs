//! Database error type

/// Error from a repository call.
#[derive(Debug, thiserror::Error)]
pub enum DbError {
    #[error("database error: {0}")]
    Sqlx(#[from] sqlx::Error),

    #[error("not found: {resource} '{id}'")]
    NotFound { resource: &'static str, id: String },

    #[error("conflict: {resource} {reason}")]
    Conflict {
        resource: &'static str,
        reason: &'static str,
    },
}

impl DbError {
    /// Map a unique-constraint violation to [`DbError::Conflict`], pass anything else through.
    pub(crate) fn on_unique_violation(
        err: sqlx::Error,
        resource: &'static str,
        reason: &'static str,
    ) -> Self {
        match &err {
            sqlx::Error::Database(db) if db.is_unique_violation() => {
                Self::Conflict { resource, reason }
            }
            _ => Self::Sqlx(err),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = DbError::NotFound {
            resource: "user",
            id: "12".into(),
        };
        assert_eq!(err.to_string(), "not found: user '12'");

        let err = DbError::Conflict {
            resource: "user",
            reason: "email already registered",
        };
        assert_eq!(err.to_string(), "conflict: user email already registered");
    }

    #[test]
    fn non_database_errors_are_not_conflicts() {
        let err = DbError::on_unique_violation(sqlx::Error::RowNotFound, "user", "duplicate");
        assert!(matches!(err, DbError::Sqlx(sqlx::Error::RowNotFound)));
    }
}
