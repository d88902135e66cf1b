//! # Key-Value User Repository
//!
//! User operations emulated over a single serialized collection under the
//! `users` key (browser mode).
//!
//! Every operation reads the whole collection, scans linearly, and on
//! mutation writes the whole collection back. O(n) per operation is
//! acceptable here: this backend targets one device with a handful of
//! accounts, not a server.

use tracing::debug;

use pizzeria_core::{User, UserProfile};

use crate::error::{StoreError, StoreResult};
use crate::kv::{KvStore, USERS_KEY};

/// Repository for users in the key-value store.
#[derive(Clone)]
pub struct KvUsers {
    kv: KvStore,
}

impl KvUsers {
    /// Creates a new repository over the shared key-value store.
    pub fn new(kv: KvStore) -> Self {
        KvUsers { kv }
    }

    /// Seeds an empty `users` collection when the key is missing.
    ///
    /// Called once during browser-mode initialization so later reads can
    /// treat an absent key as a bug rather than first-run state.
    pub async fn seed(&self) -> StoreResult<()> {
        if !self.kv.contains(USERS_KEY).await {
            self.kv.set(USERS_KEY, &Vec::<User>::new()).await?;
            debug!("Seeded empty user collection");
        }
        Ok(())
    }

    /// Appends a new user unless the email is already taken.
    pub async fn insert(&self, user: &User) -> StoreResult<()> {
        debug!(email = %user.email, "Inserting user");

        let mut users = self.load().await?;

        if users.iter().any(|u| u.email == user.email) {
            return Err(StoreError::DuplicateEmail);
        }

        users.push(user.clone());
        self.kv.set(USERS_KEY, &users).await
    }

    /// Scans for the user with the given email.
    pub async fn find_by_email(&self, email: &str) -> StoreResult<Option<User>> {
        let users = self.load().await?;
        Ok(users.into_iter().find(|u| u.email == email))
    }

    /// Mutates the matching element in place and writes the collection
    /// back. Returns `false` when no element matched.
    pub async fn update_profile(&self, profile: &UserProfile) -> StoreResult<bool> {
        debug!(email = %profile.email, "Updating user profile");

        let mut users = self.load().await?;

        let Some(user) = users.iter_mut().find(|u| u.email == profile.email) else {
            return Ok(false);
        };

        user.apply_profile(profile);
        self.kv.set(USERS_KEY, &users).await?;
        Ok(true)
    }

    /// Number of stored users (for diagnostics and seeding).
    pub async fn count(&self) -> StoreResult<i64> {
        Ok(self.load().await?.len() as i64)
    }

    /// Reads the collection, defaulting to empty when the key is absent.
    async fn load(&self) -> StoreResult<Vec<User>> {
        Ok(self.kv.get(USERS_KEY).await?.unwrap_or_default())
    }
}
