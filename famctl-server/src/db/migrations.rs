//! Schema migrations for the family tables
//!
//! Idempotent: every statement is `IF NOT EXISTS`, safe to run at each start.

use sqlx::PgPool;

use super::DbError;

const STATEMENTS: &[(&str, &str)] = &[
    (
        "users",
        r#"
        CREATE TABLE IF NOT EXISTS users (
            id BIGSERIAL PRIMARY KEY,
            firstname TEXT NOT NULL,
            lastname TEXT NOT NULL,
            email TEXT NOT NULL UNIQUE,
            password TEXT NOT NULL,
            phone_number TEXT,
            address TEXT,
            gender TEXT,
            is_admin BOOLEAN NOT NULL DEFAULT FALSE,
            created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
        )
        "#,
    ),
    (
        "children",
        r#"
        CREATE TABLE IF NOT EXISTS children (
            id BIGSERIAL PRIMARY KEY,
            user_id BIGINT NOT NULL REFERENCES users(id) ON DELETE CASCADE,
            firstname TEXT NOT NULL,
            lastname TEXT NOT NULL,
            birthdate DATE,
            gender TEXT,
            allergy TEXT
        )
        "#,
    ),
    (
        "tutors",
        r#"
        CREATE TABLE IF NOT EXISTS tutors (
            id BIGSERIAL PRIMARY KEY,
            firstname TEXT NOT NULL,
            lastname TEXT NOT NULL,
            email TEXT,
            phone_number TEXT,
            address TEXT,
            gender TEXT
        )
        "#,
    ),
    (
        "tutor_children",
        r#"
        CREATE TABLE IF NOT EXISTS tutor_children (
            tutor_id BIGINT NOT NULL REFERENCES tutors(id) ON DELETE CASCADE,
            child_id BIGINT NOT NULL REFERENCES children(id) ON DELETE CASCADE,
            PRIMARY KEY (tutor_id, child_id)
        )
        "#,
    ),
    (
        "idx_children_user_id",
        "CREATE INDEX IF NOT EXISTS idx_children_user_id ON children(user_id)",
    ),
    (
        "idx_tutor_children_child_id",
        "CREATE INDEX IF NOT EXISTS idx_tutor_children_child_id ON tutor_children(child_id)",
    ),
];

/// Run all family migrations.
pub async fn run(pool: &PgPool) -> Result<(), DbError> {
    tracing::info!("Running family schema migrations...");

    for (name, sql) in STATEMENTS {
        sqlx::query(sql).execute(pool).await?;
        tracing::debug!(object = name, "migration applied");
    }

    tracing::info!("Family schema migrations complete");
    Ok(())
}
