//! # Session Store
//!
//! The record of which user is currently authenticated on this device:
//! a single key in the key-value store holding the logged-in email.
//!
//! ## Invariants
//! - At most one active session; `create` unconditionally overwrites
//! - Presence of the key is the sole authorization signal for guarded pages
//! - No expiry: the session persists until explicit logout or external
//!   storage wipe
//!
//! Lives in the key-value store in BOTH backend modes.

use tracing::info;

use crate::error::StoreResult;
use crate::kv::{KvStore, SESSION_KEY};

/// Store for the single active session.
#[derive(Clone)]
pub struct SessionStore {
    kv: KvStore,
}

impl SessionStore {
    pub fn new(kv: KvStore) -> Self {
        SessionStore { kv }
    }

    /// Opens a session for `email`, replacing any existing one.
    ///
    /// Only the login path may call this; session creation is a side
    /// effect of successful authentication and of nothing else.
    pub async fn create(&self, email: &str) -> StoreResult<()> {
        self.kv.set(SESSION_KEY, email).await?;
        info!(email = %email, "Session created");
        Ok(())
    }

    /// Email of the logged-in user, or `None` when logged out.
    pub async fn current(&self) -> StoreResult<Option<String>> {
        self.kv.get(SESSION_KEY).await
    }

    /// Ends the session. A no-op when no session exists.
    pub async fn close(&self) -> StoreResult<()> {
        self.kv.remove(SESSION_KEY).await?;
        info!("Session closed");
        Ok(())
    }
}
