//! # User Repository
//!
//! One user-store contract, two interchangeable backends.
//!
//! ## Backend Dispatch
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    UserRepository                                       │
//! │                                                                         │
//! │  DataService::initialize() picks ONE variant, once, at startup:         │
//! │                                                                         │
//! │       ┌──────────────────────┐      ┌──────────────────────┐            │
//! │       │ Sqlite(SqliteUsers)  │      │   Kv(KvUsers)        │            │
//! │       │ parameterized SQL    │      │   linear scans over  │            │
//! │       │ UNIQUE email index   │      │   one JSON array     │            │
//! │       └──────────────────────┘      └──────────────────────┘            │
//! │                                                                         │
//! │  Callers never see which one is active; both honor the same             │
//! │  insert / find / update contract.                                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Enum dispatch (rather than a trait object) keeps the async methods
//! plain and makes "the mode never changes at runtime" structural.

pub mod kv;
pub mod sqlite;

use pizzeria_core::{User, UserProfile};

use crate::error::StoreResult;
pub use kv::KvUsers;
pub use sqlite::SqliteUsers;

/// The user store, backed by whichever backend initialization selected.
#[derive(Clone)]
pub enum UserRepository {
    /// Embedded SQLite database (native mode).
    Sqlite(SqliteUsers),

    /// Serialized collection in the key-value store (browser mode).
    Kv(KvUsers),
}

impl UserRepository {
    /// Inserts a new user record.
    ///
    /// ## Errors
    /// * [`StoreError::DuplicateEmail`](crate::StoreError::DuplicateEmail)
    ///   when the email already has an account
    pub async fn insert(&self, user: &User) -> StoreResult<()> {
        match self {
            UserRepository::Sqlite(repo) => repo.insert(user).await,
            UserRepository::Kv(repo) => repo.insert(user).await,
        }
    }

    /// Looks up a user by email.
    pub async fn find_by_email(&self, email: &str) -> StoreResult<Option<User>> {
        match self {
            UserRepository::Sqlite(repo) => repo.find_by_email(email).await,
            UserRepository::Kv(repo) => repo.find_by_email(email).await,
        }
    }

    /// Updates the mutable profile fields of the user with the profile's
    /// email. Email, password hash and photo are never rewritten here.
    ///
    /// ## Returns
    /// `false` when no user with that email exists.
    pub async fn update_profile(&self, profile: &UserProfile) -> StoreResult<bool> {
        match self {
            UserRepository::Sqlite(repo) => repo.update_profile(profile).await,
            UserRepository::Kv(repo) => repo.update_profile(profile).await,
        }
    }

    /// Backend label for logging.
    pub fn backend(&self) -> &'static str {
        match self {
            UserRepository::Sqlite(_) => "sqlite",
            UserRepository::Kv(_) => "key-value",
        }
    }
}

// =============================================================================
// Contract Tests (run against BOTH backends)
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{BackendMode, StoreConfig};
    use crate::kv::KvStore;
    use crate::migrations::run_migrations;
    use crate::pool::open_pool;
    use crate::StoreError;

    fn user(email: &str) -> User {
        User {
            username: "giuseppe".to_string(),
            first_name: "Giuseppe".to_string(),
            last_name: "Rossi".to_string(),
            email: email.to_string(),
            age: 34,
            gender: "male".to_string(),
            password_hash: "$argon2id$stub".to_string(),
            photo: None,
        }
    }

    async fn sqlite_repo() -> UserRepository {
        let config = StoreConfig::in_memory(BackendMode::Native);
        let pool = open_pool(&config).await.unwrap();
        run_migrations(&pool).await.unwrap();
        UserRepository::Sqlite(SqliteUsers::new(pool))
    }

    fn kv_repo() -> UserRepository {
        UserRepository::Kv(KvUsers::new(KvStore::in_memory()))
    }

    async fn insert_then_find_returns_inserted(repo: UserRepository) {
        let original = user("a@b.com");
        repo.insert(&original).await.unwrap();

        let found = repo.find_by_email("a@b.com").await.unwrap().unwrap();
        assert_eq!(found, original);
    }

    async fn duplicate_insert_rejected_and_original_unchanged(repo: UserRepository) {
        let original = user("a@b.com");
        repo.insert(&original).await.unwrap();

        let mut imposter = user("a@b.com");
        imposter.username = "imposter".to_string();
        let err = repo.insert(&imposter).await.unwrap_err();
        assert!(matches!(err, StoreError::DuplicateEmail));

        let found = repo.find_by_email("a@b.com").await.unwrap().unwrap();
        assert_eq!(found.username, "giuseppe");
    }

    async fn update_touches_only_mutable_fields(repo: UserRepository) {
        repo.insert(&user("a@b.com")).await.unwrap();

        let profile = UserProfile {
            email: "a@b.com".to_string(),
            username: "peppe".to_string(),
            first_name: "Peppe".to_string(),
            last_name: "Bianchi".to_string(),
            age: 35,
            gender: "male".to_string(),
        };
        assert!(repo.update_profile(&profile).await.unwrap());

        let found = repo.find_by_email("a@b.com").await.unwrap().unwrap();
        assert_eq!(found.username, "peppe");
        assert_eq!(found.last_name, "Bianchi");
        assert_eq!(found.age, 35);
        // Key and credentials untouched
        assert_eq!(found.email, "a@b.com");
        assert_eq!(found.password_hash, "$argon2id$stub");
    }

    async fn update_missing_user_is_false(repo: UserRepository) {
        let profile = UserProfile {
            email: "ghost@b.com".to_string(),
            username: "ghost".to_string(),
            first_name: "G".to_string(),
            last_name: "H".to_string(),
            age: 40,
            gender: "other".to_string(),
        };
        assert!(!repo.update_profile(&profile).await.unwrap());
    }

    async fn find_missing_user_is_none(repo: UserRepository) {
        assert!(repo.find_by_email("nobody@b.com").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn sqlite_insert_then_find() {
        insert_then_find_returns_inserted(sqlite_repo().await).await;
    }

    #[tokio::test]
    async fn kv_insert_then_find() {
        insert_then_find_returns_inserted(kv_repo()).await;
    }

    #[tokio::test]
    async fn sqlite_duplicate_rejected() {
        duplicate_insert_rejected_and_original_unchanged(sqlite_repo().await).await;
    }

    #[tokio::test]
    async fn kv_duplicate_rejected() {
        duplicate_insert_rejected_and_original_unchanged(kv_repo()).await;
    }

    #[tokio::test]
    async fn sqlite_update_profile() {
        update_touches_only_mutable_fields(sqlite_repo().await).await;
    }

    #[tokio::test]
    async fn kv_update_profile() {
        update_touches_only_mutable_fields(kv_repo()).await;
    }

    #[tokio::test]
    async fn sqlite_update_missing() {
        update_missing_user_is_false(sqlite_repo().await).await;
    }

    #[tokio::test]
    async fn kv_update_missing() {
        update_missing_user_is_false(kv_repo()).await;
    }

    #[tokio::test]
    async fn sqlite_find_missing() {
        find_missing_user_is_none(sqlite_repo().await).await;
    }

    #[tokio::test]
    async fn kv_find_missing() {
        find_missing_user_is_none(kv_repo()).await;
    }
}
