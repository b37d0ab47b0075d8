//! User repository
//!
//! Family reads (listing, detail) and account operations on `users`.

use async_trait::async_trait;
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};

use famctl_core::{
    ChildColumns, FamilyDetailRow, FamilyListRow, FamilyQuery, SearchTerm, TutorColumns, User,
};

use crate::db::entity::{delete_by_id, Entity};
use crate::db::DbError;
use crate::models::{NewUser, Profile, UserAccount, UserUpdate};

/// Non-admin users with their children. `$1` is a `LIKE` pattern or NULL for no filter.
const FAMILY_LIST_SQL: &str = r#"
    SELECT
        u.id AS user_id,
        u.firstname AS user_firstname,
        u.lastname AS user_lastname,
        u.email AS user_email,
        u.phone_number AS user_phone_number,
        u.address AS user_address,
        u.gender AS user_gender,

        c.id AS child_id,
        c.firstname AS child_firstname,
        c.lastname AS child_lastname,
        c.birthdate AS child_birthdate,
        c.gender AS child_gender,
        c.allergy AS child_allergy
    FROM users u
    LEFT JOIN children c ON c.user_id = u.id
    WHERE u.is_admin = FALSE
      AND (
        $1::text IS NULL
        OR u.firstname ILIKE $1
        OR u.lastname ILIKE $1
        OR u.email ILIKE $1
        OR c.firstname ILIKE $1
        OR c.lastname ILIKE $1
      )
    ORDER BY u.id, c.id
"#;

/// One user with children and each child's tutors.
const FAMILY_DETAIL_SQL: &str = r#"
    SELECT
        u.id AS user_id,
        u.firstname AS user_firstname,
        u.lastname AS user_lastname,
        u.email AS user_email,
        u.phone_number AS user_phone_number,
        u.address AS user_address,
        u.gender AS user_gender,

        c.id AS child_id,
        c.firstname AS child_firstname,
        c.lastname AS child_lastname,
        c.birthdate AS child_birthdate,
        c.gender AS child_gender,
        c.allergy AS child_allergy,

        t.id AS tutor_id,
        t.firstname AS tutor_firstname,
        t.lastname AS tutor_lastname,
        t.email AS tutor_email,
        t.phone_number AS tutor_phone_number,
        t.address AS tutor_address,
        t.gender AS tutor_gender
    FROM users u
    LEFT JOIN children c ON c.user_id = u.id
    LEFT JOIN tutor_children tc ON tc.child_id = c.id
    LEFT JOIN tutors t ON t.id = tc.tutor_id
    WHERE u.id = $1
    ORDER BY u.id, c.id, t.id
"#;

const ACCOUNT_BY_EMAIL_SQL: &str = r#"
    SELECT id, firstname, lastname, email, password, phone_number, address, gender, is_admin
    FROM users
    WHERE email = $1
"#;

const ACCOUNT_BY_ID_SQL: &str = r#"
    SELECT id, firstname, lastname, email, password, phone_number, address, gender, is_admin
    FROM users
    WHERE id = $1
"#;

fn decode_user(row: &PgRow) -> Result<User, sqlx::Error> {
    Ok(User {
        id: row.try_get("user_id")?,
        firstname: row.try_get("user_firstname")?,
        lastname: row.try_get("user_lastname")?,
        email: row.try_get("user_email")?,
        phone_number: row.try_get("user_phone_number")?,
        address: row.try_get("user_address")?,
        gender: row.try_get("user_gender")?,
    })
}

fn decode_child(row: &PgRow) -> Result<ChildColumns, sqlx::Error> {
    Ok(ChildColumns {
        id: row.try_get("child_id")?,
        firstname: row.try_get("child_firstname")?,
        lastname: row.try_get("child_lastname")?,
        birthdate: row.try_get("child_birthdate")?,
        gender: row.try_get("child_gender")?,
        allergy: row.try_get("child_allergy")?,
    })
}

fn decode_tutor(row: &PgRow) -> Result<TutorColumns, sqlx::Error> {
    Ok(TutorColumns {
        id: row.try_get("tutor_id")?,
        firstname: row.try_get("tutor_firstname")?,
        lastname: row.try_get("tutor_lastname")?,
        email: row.try_get("tutor_email")?,
        phone_number: row.try_get("tutor_phone_number")?,
        address: row.try_get("tutor_address")?,
        gender: row.try_get("tutor_gender")?,
    })
}

/// User repository
#[derive(Debug, Clone, Copy)]
pub struct UserRepo<'a> {
    pool: &'a PgPool,
}

impl<'a> UserRepo<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Look up an account by (already normalized) email.
    pub async fn find_by_email(&self, email: &str) -> Result<Option<UserAccount>, DbError> {
        let account = sqlx::query_as::<_, UserAccount>(ACCOUNT_BY_EMAIL_SQL)
            .bind(email)
            .fetch_optional(self.pool)
            .await?;
        Ok(account)
    }

    pub async fn find_by_id(&self, id: i64) -> Result<Option<UserAccount>, DbError> {
        let account = sqlx::query_as::<_, UserAccount>(ACCOUNT_BY_ID_SQL)
            .bind(id)
            .fetch_optional(self.pool)
            .await?;
        Ok(account)
    }

    /// Profile fields of one user.
    pub async fn read_profile(&self, id: i64) -> Result<Profile, DbError> {
        sqlx::query_as::<_, Profile>(
            r#"
            SELECT firstname, lastname, email, phone_number, address, gender
            FROM users
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(self.pool)
        .await?
        .ok_or_else(|| DbError::NotFound {
            resource: Entity::User.resource(),
            id: id.to_string(),
        })
    }

    /// Insert an account, returning its id.
    ///
    /// A duplicate email is reported as [`DbError::Conflict`].
    pub async fn create(&self, user: &NewUser) -> Result<i64, DbError> {
        let row = sqlx::query(
            r#"
            INSERT INTO users (firstname, lastname, email, password, phone_number, address, gender)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING id
            "#,
        )
        .bind(user.firstname.as_str())
        .bind(user.lastname.as_str())
        .bind(user.email.as_str())
        .bind(&user.password)
        .bind(user.phone_number.as_deref())
        .bind(user.address.as_deref())
        .bind(user.gender.as_deref())
        .fetch_one(self.pool)
        .await
        .map_err(|e| {
            DbError::on_unique_violation(e, Entity::User.resource(), "email already registered")
        })?;

        let id: i64 = row.try_get("id")?;
        tracing::info!(user_id = id, "user created");
        Ok(id)
    }

    /// Overwrite profile fields, returning the number of rows changed (0 or 1).
    pub async fn update(&self, user: &UserUpdate) -> Result<u64, DbError> {
        let result = sqlx::query(
            r#"
            UPDATE users
            SET firstname = $1, lastname = $2, email = $3, phone_number = $4, address = $5, gender = $6
            WHERE id = $7
            "#,
        )
        .bind(user.firstname.as_str())
        .bind(user.lastname.as_str())
        .bind(user.email.as_str())
        .bind(user.phone_number.as_deref())
        .bind(user.address.as_deref())
        .bind(user.gender.as_deref())
        .bind(user.id)
        .execute(self.pool)
        .await
        .map_err(|e| {
            DbError::on_unique_violation(e, Entity::User.resource(), "email already registered")
        })?;

        Ok(result.rows_affected())
    }

    /// Delete an account and, by cascade, its children and their tutor links.
    pub async fn delete(&self, id: i64) -> Result<u64, DbError> {
        delete_by_id(self.pool, Entity::User, id).await
    }
}

#[async_trait]
impl FamilyQuery for UserRepo<'_> {
    type Error = DbError;

    async fn family_list_rows(
        &self,
        search: Option<&SearchTerm>,
    ) -> Result<Vec<FamilyListRow>, DbError> {
        let rows = sqlx::query(FAMILY_LIST_SQL)
            .bind(search.map(SearchTerm::like_pattern))
            .fetch_all(self.pool)
            .await?;

        let rows = rows
            .iter()
            .map(|row| {
                Ok(FamilyListRow {
                    user: decode_user(row)?,
                    child: decode_child(row)?,
                })
            })
            .collect::<Result<Vec<_>, sqlx::Error>>()?;

        tracing::debug!(rows = rows.len(), "fetched family list rows");
        Ok(rows)
    }

    async fn family_detail_rows(&self, user_id: i64) -> Result<Vec<FamilyDetailRow>, DbError> {
        let rows = sqlx::query(FAMILY_DETAIL_SQL)
            .bind(user_id)
            .fetch_all(self.pool)
            .await?;

        let rows = rows
            .iter()
            .map(|row| {
                Ok(FamilyDetailRow {
                    user: decode_user(row)?,
                    child: decode_child(row)?,
                    tutor: decode_tutor(row)?,
                })
            })
            .collect::<Result<Vec<_>, sqlx::Error>>()?;

        tracing::debug!(user_id, rows = rows.len(), "fetched family detail rows");
        Ok(rows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use famctl_core::FamilyService;

    use crate::db::{create_pool, migrations};
    use crate::models::{Email, Name};

    // Run with: DATABASE_URL=postgres://... cargo test -p famctl-server -- --ignored

    async fn test_pool() -> PgPool {
        let url = std::env::var("DATABASE_URL").expect("DATABASE_URL required");
        let pool = create_pool(&url).await.expect("pool creation failed");
        migrations::run(&pool).await.expect("migrations failed");
        pool
    }

    fn new_user(tag: &str) -> NewUser {
        NewUser {
            firstname: Name::new("firstname", "Ada").unwrap(),
            lastname: Name::new("lastname", tag).unwrap(),
            email: Email::new(&format!("{tag}@example.com")).unwrap(),
            password: "digest".into(),
            phone_number: None,
            address: None,
            gender: None,
        }
    }

    fn unique_tag(prefix: &str) -> String {
        let nanos = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap()
            .as_nanos();
        format!("{prefix}{nanos}")
    }

    #[test]
    fn queries_order_by_grouping_keys() {
        assert!(FAMILY_LIST_SQL.trim_end().ends_with("ORDER BY u.id, c.id"));
        assert!(FAMILY_DETAIL_SQL.trim_end().ends_with("ORDER BY u.id, c.id, t.id"));
    }

    #[tokio::test]
    #[ignore = "requires database"]
    async fn family_detail_round_trip() {
        let pool = test_pool().await;
        let repo = UserRepo::new(&pool);
        let tag = unique_tag("detail");
        let user_id = repo.create(&new_user(&tag)).await.unwrap();

        let child_ids: Vec<i64> = {
            let mut ids = Vec::new();
            for name in ["Tom", "Lea"] {
                let (id,): (i64,) = sqlx::query_as(
                    "INSERT INTO children (user_id, firstname, lastname) VALUES ($1, $2, $3) RETURNING id",
                )
                .bind(user_id)
                .bind(name)
                .bind(&tag)
                .fetch_one(&pool)
                .await
                .unwrap();
                ids.push(id);
            }
            ids
        };
        let mut tutor_ids = Vec::new();
        for tutor in ["Ann", "Bob"] {
            let (tutor_id,): (i64,) = sqlx::query_as(
                "INSERT INTO tutors (firstname, lastname) VALUES ($1, $2) RETURNING id",
            )
            .bind(tutor)
            .bind(&tag)
            .fetch_one(&pool)
            .await
            .unwrap();
            sqlx::query("INSERT INTO tutor_children (tutor_id, child_id) VALUES ($1, $2)")
                .bind(tutor_id)
                .bind(child_ids[0])
                .execute(&pool)
                .await
                .unwrap();
            tutor_ids.push(tutor_id);
        }

        let detail = FamilyService::new(repo)
            .get_family_detail(user_id)
            .await
            .unwrap()
            .expect("user exists");

        assert_eq!(detail.user.id, user_id);
        assert_eq!(detail.children.len(), 2);
        assert_eq!(detail.children[0].tutors.len(), 2);
        assert!(detail.children[1].tutors.is_empty());

        // Removing a tutor drops its links; removing a child drops it from the family
        assert_eq!(delete_by_id(&pool, Entity::Tutor, tutor_ids[0]).await.unwrap(), 1);
        assert_eq!(delete_by_id(&pool, Entity::Child, child_ids[1]).await.unwrap(), 1);
        let detail = FamilyService::new(repo)
            .get_family_detail(user_id)
            .await
            .unwrap()
            .expect("user exists");
        assert_eq!(detail.children.len(), 1);
        let remaining: Vec<i64> = detail.children[0].tutors.iter().map(|t| t.id).collect();
        assert_eq!(remaining, vec![tutor_ids[1]]);

        assert_eq!(repo.delete(user_id).await.unwrap(), 1);
        delete_by_id(&pool, Entity::Tutor, tutor_ids[1]).await.unwrap();
        assert!(FamilyService::new(repo)
            .get_family_detail(user_id)
            .await
            .unwrap()
            .is_none());
    }

    #[tokio::test]
    #[ignore = "requires database"]
    async fn search_matches_child_names() {
        let pool = test_pool().await;
        let repo = UserRepo::new(&pool);
        let tag = unique_tag("search");
        let user_id = repo.create(&new_user(&tag)).await.unwrap();
        sqlx::query("INSERT INTO children (user_id, firstname, lastname) VALUES ($1, 'Zoé', $2)")
            .bind(user_id)
            .bind(format!("kid{tag}"))
            .execute(&pool)
            .await
            .unwrap();

        let families = FamilyService::new(repo)
            .list_families(Some(&format!("KID{tag}")))
            .await
            .unwrap();

        assert_eq!(families.len(), 1);
        assert_eq!(families[0].user.id, user_id);
        repo.delete(user_id).await.unwrap();
    }

    #[tokio::test]
    #[ignore = "requires database"]
    async fn duplicate_email_is_conflict() {
        let pool = test_pool().await;
        let repo = UserRepo::new(&pool);
        let tag = unique_tag("dup");
        let user_id = repo.create(&new_user(&tag)).await.unwrap();

        let err = repo.create(&new_user(&tag)).await.unwrap_err();
        assert!(matches!(err, DbError::Conflict { .. }));

        let found = repo.find_by_email(&format!("{tag}@example.com")).await.unwrap();
        assert_eq!(found.map(|a| a.id), Some(user_id));
        repo.delete(user_id).await.unwrap();
    }

    #[tokio::test]
    #[ignore = "requires database"]
    async fn profile_of_missing_user_is_not_found() {
        let pool = test_pool().await;
        let err = UserRepo::new(&pool).read_profile(i64::MAX).await.unwrap_err();
        assert!(matches!(err, DbError::NotFound { .. }));
    }
}
