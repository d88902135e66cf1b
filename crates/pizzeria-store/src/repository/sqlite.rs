//! # SQLite User Repository
//!
//! User operations against the embedded `users` table (native mode).
//!
//! All statements are parameterized; no untrusted value is ever
//! concatenated into SQL.

use sqlx::SqlitePool;
use tracing::debug;

use pizzeria_core::{User, UserProfile};

use crate::error::StoreResult;

/// Repository for user rows in the native database.
///
/// ## Usage
/// ```rust,ignore
/// let repo = SqliteUsers::new(pool);
/// repo.insert(&user).await?;
/// let found = repo.find_by_email("a@b.com").await?;
/// ```
#[derive(Debug, Clone)]
pub struct SqliteUsers {
    pool: SqlitePool,
}

impl SqliteUsers {
    /// Creates a new repository over the shared pool.
    pub fn new(pool: SqlitePool) -> Self {
        SqliteUsers { pool }
    }

    /// Inserts a new user row.
    ///
    /// ## Errors
    /// * [`StoreError::DuplicateEmail`](crate::StoreError::DuplicateEmail) -
    ///   the UNIQUE index on `email` rejected the row
    pub async fn insert(&self, user: &User) -> StoreResult<()> {
        debug!(email = %user.email, "Inserting user");

        sqlx::query(
            r#"
            INSERT INTO users (
                username, first_name, last_name, email,
                age, gender, password_hash, photo
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)
            "#,
        )
        .bind(&user.username)
        .bind(&user.first_name)
        .bind(&user.last_name)
        .bind(&user.email)
        .bind(user.age)
        .bind(&user.gender)
        .bind(&user.password_hash)
        .bind(&user.photo)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Fetches the user with the given email.
    ///
    /// ## Returns
    /// * `Ok(Some(User))` - user found
    /// * `Ok(None)` - no row with that email
    pub async fn find_by_email(&self, email: &str) -> StoreResult<Option<User>> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT
                username, first_name, last_name, email,
                age, gender, password_hash, photo
            FROM users
            WHERE email = ?1
            "#,
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    /// Updates the mutable profile fields by email (the immutable key).
    ///
    /// Email, password hash and photo are deliberately absent from the
    /// SET list.
    ///
    /// ## Returns
    /// `false` when no row matched the email.
    pub async fn update_profile(&self, profile: &UserProfile) -> StoreResult<bool> {
        debug!(email = %profile.email, "Updating user profile");

        let result = sqlx::query(
            r#"
            UPDATE users SET
                username = ?2,
                first_name = ?3,
                last_name = ?4,
                age = ?5,
                gender = ?6
            WHERE email = ?1
            "#,
        )
        .bind(&profile.email)
        .bind(&profile.username)
        .bind(&profile.first_name)
        .bind(&profile.last_name)
        .bind(profile.age)
        .bind(&profile.gender)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Counts user rows (for diagnostics and seeding).
    pub async fn count(&self) -> StoreResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}
