//! # Data Service
//!
//! The storage facade the rest of the app talks to. One instance per
//! process; owns backend selection, initialization, and the translation
//! of every storage error into the `bool` / `Option` results the UI
//! consumes.
//!
//! ## Initialization Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  DataService::initialize()                                              │
//! │                                                                         │
//! │  1. Bring the key-value store online                                    │
//! │     (needed in BOTH modes: session and cart always live there)          │
//! │       │                                                                 │
//! │  2. Dispatch on the configured backend mode                             │
//! │       │                                                                 │
//! │       ├── Native ──► open SQLite pool ──► run migrations                │
//! │       │                                                                 │
//! │       └── Browser ─► seed empty `users` collection if missing           │
//! │       │                                                                 │
//! │  3. Flip the readiness signal to true                                   │
//! │                                                                         │
//! │  On ANY failure: readiness stays false, the error is logged and         │
//! │  returned; there is no retry. Until the app restarts, every             │
//! │  operation answers false / None / empty.                                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Error Translation Boundary
//! Callers of this type never see a raw backend error. Typed
//! [`StoreError`]s are logged here and collapsed into plain result
//! shapes: duplicate email → `false`, not-found → `None`, operational
//! failure → `false`/`None`/empty.

use std::sync::OnceLock;

use argon2::password_hash::{rand_core::OsRng, PasswordHash, SaltString};
use argon2::{Argon2, PasswordHasher, PasswordVerifier};
use tracing::{error, info, warn};

use pizzeria_core::validation::{
    validate_age, validate_email, validate_password, validate_username,
};
use pizzeria_core::{CartItem, NewUser, User, UserProfile};

use crate::cart::CartStore;
use crate::config::{BackendMode, StoreConfig};
use crate::error::{StoreError, StoreResult};
use crate::kv::KvStore;
use crate::migrations::run_migrations;
use crate::pool::open_pool;
use crate::ready::ReadySignal;
use crate::repository::{KvUsers, SqliteUsers, UserRepository};
use crate::session::SessionStore;

/// The storage facade.
///
/// Construct once with [`DataService::new`], call
/// [`initialize`](DataService::initialize), then share by reference (or
/// wrap in `Arc`) with every consumer.
pub struct DataService {
    config: StoreConfig,
    kv: OnceLock<KvStore>,
    users: OnceLock<UserRepository>,
    ready: ReadySignal,
}

impl DataService {
    /// Creates an uninitialized service. No I/O happens here; consumers
    /// may already subscribe to [`ready`](DataService::ready_signal).
    pub fn new(config: StoreConfig) -> Self {
        DataService {
            config,
            kv: OnceLock::new(),
            users: OnceLock::new(),
            ready: ReadySignal::new(),
        }
    }

    // =========================================================================
    // Initialization & Readiness
    // =========================================================================

    /// Brings the configured backend to a ready state.
    ///
    /// See the module docs for the exact sequence. Idempotent: a second
    /// call after success is a warning no-op.
    pub async fn initialize(&self) -> StoreResult<()> {
        if self.ready.is_ready() {
            warn!("initialize() called twice; ignoring");
            return Ok(());
        }

        info!(mode = self.config.mode.as_str(), "Initializing storage");

        // Step 1: key-value store, required regardless of mode.
        let kv = if self.config.in_memory {
            KvStore::in_memory()
        } else {
            KvStore::open(self.config.kv_path()).map_err(|e| {
                error!(error = %e, "Key-value store failed to open");
                e
            })?
        };
        let kv = self.kv.get_or_init(|| kv).clone();

        // Step 2: backend-specific setup.
        let users = match self.config.mode {
            BackendMode::Native => {
                let pool = open_pool(&self.config).await.map_err(|e| {
                    error!(error = %e, "Native database failed to open");
                    e
                })?;

                if self.config.run_migrations {
                    run_migrations(&pool).await.map_err(|e| {
                        error!(error = %e, "Native table setup failed");
                        e
                    })?;
                }

                UserRepository::Sqlite(SqliteUsers::new(pool))
            }

            BackendMode::Browser => {
                let repo = KvUsers::new(kv.clone());
                repo.seed().await.map_err(|e| {
                    error!(error = %e, "Browser user collection seed failed");
                    e
                })?;
                UserRepository::Kv(repo)
            }
        };

        let users = self.users.get_or_init(|| users);

        // Step 3: readiness flips exactly once, on success only.
        self.ready.mark_ready();
        info!(backend = users.backend(), "Storage ready");

        Ok(())
    }

    /// Whether the backend finished initializing.
    pub fn is_ready(&self) -> bool {
        self.ready.is_ready()
    }

    /// Handle to the readiness signal for subscribing or awaiting.
    pub fn ready_signal(&self) -> ReadySignal {
        self.ready.clone()
    }

    /// Suspends the caller until the backend is ready.
    pub async fn wait_ready(&self) -> StoreResult<()> {
        self.ready.wait().await
    }

    // =========================================================================
    // Users
    // =========================================================================

    /// Registers a new user.
    ///
    /// Validates the form fields, hashes the password, and inserts
    /// through the active backend.
    ///
    /// ## Returns
    /// * `true` - account created
    /// * `false` - invalid input, email already registered, backend not
    ///   ready, or the write failed (all logged)
    pub async fn register_user(&self, new_user: NewUser) -> bool {
        let Some(users) = self.users() else {
            return false;
        };

        if let Err(e) = validate_email(&new_user.email)
            .and_then(|_| validate_username(&new_user.username))
            .and_then(|_| validate_password(&new_user.password))
            .and_then(|_| validate_age(new_user.age))
        {
            warn!(error = %e, "Registration rejected by validation");
            return false;
        }

        let hash = match hash_password(&new_user.password) {
            Ok(hash) => hash,
            Err(e) => {
                error!(error = %e, "Password hashing failed");
                return false;
            }
        };

        let user = new_user.into_user(hash);
        match users.insert(&user).await {
            Ok(()) => {
                info!(email = %user.email, "User registered");
                true
            }
            Err(StoreError::DuplicateEmail) => {
                info!(email = %user.email, "Registration rejected: email taken");
                false
            }
            Err(e) => {
                error!(error = %e, "User insert failed");
                false
            }
        }
    }

    /// Checks an email/password pair against the stored credentials.
    ///
    /// No side effects; [`login`](DataService::login) is the path that
    /// opens a session.
    pub async fn verify_credentials(&self, email: &str, password: &str) -> bool {
        let Some(users) = self.users() else {
            return false;
        };

        let user = match users.find_by_email(email).await {
            Ok(Some(user)) => user,
            Ok(None) => return false,
            Err(e) => {
                error!(error = %e, "Credential lookup failed");
                return false;
            }
        };

        verify_password(password, &user.password_hash)
    }

    /// Authenticates and, on success only, opens the session.
    ///
    /// ## Returns
    /// `true` when the credentials matched AND the session was written;
    /// a failed login leaves any existing session untouched.
    pub async fn login(&self, email: &str, password: &str) -> bool {
        if !self.verify_credentials(email, password).await {
            info!(email = %email, "Login rejected");
            return false;
        }

        match self.sessions() {
            Some(sessions) => match sessions.create(email).await {
                Ok(()) => true,
                Err(e) => {
                    error!(error = %e, "Session write failed after login");
                    false
                }
            },
            None => false,
        }
    }

    /// Fetches a user by email, `None` when absent or on failure.
    pub async fn user_by_email(&self, email: &str) -> Option<User> {
        let users = self.users()?;

        match users.find_by_email(email).await {
            Ok(found) => found,
            Err(e) => {
                error!(error = %e, "User lookup failed");
                None
            }
        }
    }

    /// Updates the mutable profile fields of an existing user.
    ///
    /// ## Returns
    /// `false` for invalid input, unknown email, or backend failure.
    pub async fn update_profile(&self, profile: &UserProfile) -> bool {
        let Some(users) = self.users() else {
            return false;
        };

        if let Err(e) =
            validate_username(&profile.username).and_then(|_| validate_age(profile.age))
        {
            warn!(error = %e, "Profile update rejected by validation");
            return false;
        }

        match users.update_profile(profile).await {
            Ok(updated) => updated,
            Err(e) => {
                error!(error = %e, "Profile update failed");
                false
            }
        }
    }

    // =========================================================================
    // Session
    // =========================================================================

    /// Overwrites the session key with `email`. Prefer
    /// [`login`](DataService::login); this exists for the facade contract.
    pub async fn create_session(&self, email: &str) -> bool {
        match self.sessions() {
            Some(sessions) => match sessions.create(email).await {
                Ok(()) => true,
                Err(e) => {
                    error!(error = %e, "Session write failed");
                    false
                }
            },
            None => false,
        }
    }

    /// Email of the logged-in user, `None` when logged out or not ready.
    pub async fn session(&self) -> Option<String> {
        let sessions = self.sessions()?;

        match sessions.current().await {
            Ok(session) => session,
            Err(e) => {
                error!(error = %e, "Session read failed");
                None
            }
        }
    }

    /// Ends the session (logout).
    pub async fn close_session(&self) -> bool {
        match self.sessions() {
            Some(sessions) => match sessions.close().await {
                Ok(()) => true,
                Err(e) => {
                    error!(error = %e, "Session delete failed");
                    false
                }
            },
            None => false,
        }
    }

    // =========================================================================
    // Cart
    // =========================================================================

    /// Overwrites the stored cart wholesale.
    pub async fn save_cart(&self, items: &[CartItem]) -> bool {
        match self.carts() {
            Some(carts) => match carts.save(items).await {
                Ok(()) => true,
                Err(e) => {
                    error!(error = %e, "Cart save failed");
                    false
                }
            },
            None => false,
        }
    }

    /// Stored cart, empty when never saved, cleared, or on failure.
    pub async fn cart(&self) -> Vec<CartItem> {
        let Some(carts) = self.carts() else {
            return Vec::new();
        };

        match carts.load().await {
            Ok(items) => items,
            Err(e) => {
                error!(error = %e, "Cart load failed");
                Vec::new()
            }
        }
    }

    /// Deletes the stored cart (after successful order placement).
    pub async fn clear_cart(&self) -> bool {
        match self.carts() {
            Some(carts) => match carts.clear().await {
                Ok(()) => true,
                Err(e) => {
                    error!(error = %e, "Cart clear failed");
                    false
                }
            },
            None => false,
        }
    }

    // =========================================================================
    // Internals
    // =========================================================================

    /// Active user repository, `None` (with a log line) before readiness.
    fn users(&self) -> Option<&UserRepository> {
        let repo = self.users.get();
        if repo.is_none() {
            warn!("Storage operation before backend ready");
        }
        repo
    }

    fn sessions(&self) -> Option<SessionStore> {
        match self.kv.get() {
            Some(kv) => Some(SessionStore::new(kv.clone())),
            None => {
                warn!("Session operation before backend ready");
                None
            }
        }
    }

    fn carts(&self) -> Option<CartStore> {
        match self.kv.get() {
            Some(kv) => Some(CartStore::new(kv.clone())),
            None => {
                warn!("Cart operation before backend ready");
                None
            }
        }
    }
}

// =============================================================================
// Password Hashing
// =============================================================================

/// Hashes a plaintext password into an argon2 PHC string.
fn hash_password(password: &str) -> StoreResult<String> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| StoreError::PasswordHash(e.to_string()))?;
    Ok(hash.to_string())
}

/// Verifies a plaintext password against a stored PHC string.
///
/// A malformed stored hash counts as a mismatch rather than a panic; it
/// can only mean external tampering with the store.
fn verify_password(password: &str, stored: &str) -> bool {
    let Ok(parsed) = PasswordHash::new(stored) else {
        warn!("Stored password hash is malformed");
        return false;
    };

    Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .is_ok()
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn new_user(email: &str, password: &str) -> NewUser {
        NewUser {
            username: "giuseppe".to_string(),
            first_name: "Giuseppe".to_string(),
            last_name: "Rossi".to_string(),
            email: email.to_string(),
            age: 34,
            gender: "male".to_string(),
            password: password.to_string(),
            photo: None,
        }
    }

    async fn ready_service(mode: BackendMode) -> DataService {
        let service = DataService::new(StoreConfig::in_memory(mode));
        service.initialize().await.unwrap();
        service
    }

    #[tokio::test]
    async fn operations_before_initialize_are_inert() {
        let service = DataService::new(StoreConfig::in_memory(BackendMode::Browser));

        assert!(!service.is_ready());
        assert!(!service.register_user(new_user("a@b.com", "secret1")).await);
        assert!(!service.login("a@b.com", "secret1").await);
        assert!(service.user_by_email("a@b.com").await.is_none());
        assert!(service.session().await.is_none());
        assert!(service.cart().await.is_empty());
        assert!(!service.save_cart(&[]).await);
    }

    #[tokio::test]
    async fn initialize_flips_readiness_once() {
        let service = DataService::new(StoreConfig::in_memory(BackendMode::Native));
        assert!(!service.is_ready());

        service.initialize().await.unwrap();
        assert!(service.is_ready());

        // Second call is a no-op
        service.initialize().await.unwrap();
        assert!(service.is_ready());
    }

    #[tokio::test]
    async fn register_login_session_scenario_browser() {
        register_login_session_scenario(BackendMode::Browser).await;
    }

    #[tokio::test]
    async fn register_login_session_scenario_native() {
        register_login_session_scenario(BackendMode::Native).await;
    }

    async fn register_login_session_scenario(mode: BackendMode) {
        let service = ready_service(mode).await;

        assert!(service.register_user(new_user("a@b.com", "secret-x")).await);

        // Correct credentials open the session
        assert!(service.login("a@b.com", "secret-x").await);
        assert_eq!(service.session().await.as_deref(), Some("a@b.com"));

        // Wrong password: rejected, session unchanged
        assert!(!service.login("a@b.com", "wrong").await);
        assert_eq!(service.session().await.as_deref(), Some("a@b.com"));

        // Logout ends the session
        assert!(service.close_session().await);
        assert!(service.session().await.is_none());
    }

    #[tokio::test]
    async fn duplicate_registration_is_rejected() {
        let service = ready_service(BackendMode::Browser).await;

        assert!(service.register_user(new_user("a@b.com", "secret1")).await);
        assert!(!service.register_user(new_user("a@b.com", "other-pass")).await);

        // Original record unchanged: original password still works
        assert!(service.verify_credentials("a@b.com", "secret1").await);
        assert!(!service.verify_credentials("a@b.com", "other-pass").await);
    }

    #[tokio::test]
    async fn invalid_registration_input_is_rejected() {
        let service = ready_service(BackendMode::Browser).await;

        // Bad email
        assert!(!service.register_user(new_user("not-an-email", "secret1")).await);
        // Short password
        assert!(!service.register_user(new_user("a@b.com", "x")).await);

        assert!(service.user_by_email("not-an-email").await.is_none());
    }

    #[tokio::test]
    async fn stored_passwords_are_hashed() {
        let service = ready_service(BackendMode::Browser).await;
        service.register_user(new_user("a@b.com", "secret1")).await;

        let user = service.user_by_email("a@b.com").await.unwrap();
        assert_ne!(user.password_hash, "secret1");
        assert!(user.password_hash.starts_with("$argon2"));
    }

    #[tokio::test]
    async fn profile_update_preserves_credentials() {
        let service = ready_service(BackendMode::Native).await;
        service.register_user(new_user("a@b.com", "secret1")).await;

        let mut profile = UserProfile::from(&service.user_by_email("a@b.com").await.unwrap());
        profile.username = "peppe".to_string();
        profile.age = 35;
        assert!(service.update_profile(&profile).await);

        let user = service.user_by_email("a@b.com").await.unwrap();
        assert_eq!(user.username, "peppe");
        assert_eq!(user.age, 35);
        assert!(service.verify_credentials("a@b.com", "secret1").await);

        // Unknown email
        profile.email = "ghost@b.com".to_string();
        assert!(!service.update_profile(&profile).await);
    }

    #[tokio::test]
    async fn cart_round_trip_and_clear() {
        let service = ready_service(BackendMode::Browser).await;

        let items = vec![CartItem {
            product_id: 1,
            name: "Margherita".to_string(),
            price_cents: 5000,
            quantity: 2,
        }];

        assert!(service.save_cart(&items).await);
        assert_eq!(service.cart().await, items);

        assert!(service.clear_cart().await);
        assert!(service.cart().await.is_empty());
    }

    #[tokio::test]
    async fn add_twice_merges_before_save() {
        let service = ready_service(BackendMode::Browser).await;

        // Page loads snapshot, mutates in memory, persists explicitly
        let mut cart = pizzeria_core::Cart::from_items(service.cart().await);
        cart.add(1, "Margherita", 5000).unwrap();
        cart.add(1, "Margherita", 5000).unwrap();
        assert!(service.save_cart(cart.items()).await);

        let stored = service.cart().await;
        assert_eq!(stored.len(), 1);
        assert_eq!(stored[0].product_id, 1);
        assert_eq!(stored[0].price_cents, 5000);
        assert_eq!(stored[0].quantity, 2);
    }

    #[tokio::test]
    async fn wait_ready_unblocks_consumers() {
        let service = std::sync::Arc::new(DataService::new(StoreConfig::in_memory(
            BackendMode::Browser,
        )));

        let waiter = {
            let service = service.clone();
            tokio::spawn(async move { service.wait_ready().await })
        };

        service.initialize().await.unwrap();
        waiter.await.unwrap().unwrap();
    }
}
