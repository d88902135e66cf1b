//! # Store Error Types
//!
//! Error types for persistence operations.
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Propagation                                    │
//! │                                                                         │
//! │  SQLite error (sqlx::Error) / JSON error / I/O error                    │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  StoreError (this module) ← adds context and categorization             │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  DataService (service.rs) ← logs, translates to bool / Option           │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Frontend shows a generic message; duplicate email gets its own one     │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use thiserror::Error;

/// Persistence operation errors.
///
/// These wrap backend errors and classify the cases callers care about:
/// a duplicate email is recoverable, everything else is an operational
/// failure surfaced as a generic error.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Unique email constraint violated on insert.
    ///
    /// ## When This Occurs
    /// - Registering with an email that already has an account
    /// - Both backends raise it: UNIQUE index (SQLite) or scan hit (KV)
    #[error("email already registered")]
    DuplicateEmail,

    /// A storage operation was attempted before `initialize()` completed.
    #[error("storage backend not ready")]
    NotReady,

    /// Backend could not be constructed.
    ///
    /// ## When This Occurs
    /// - Database file can't be created (permissions, disk full)
    /// - Key-value document can't be read or parsed
    #[error("connection failed: {0}")]
    ConnectionFailed(String),

    /// Migration failed during native initialization.
    #[error("migration failed: {0}")]
    MigrationFailed(String),

    /// Query execution failed.
    #[error("query failed: {0}")]
    QueryFailed(String),

    /// Key-value document (de)serialization failed.
    #[error("serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Key-value file I/O failed.
    #[error("i/o failed: {0}")]
    Io(#[from] std::io::Error),

    /// Password hashing or verification failed structurally
    /// (a mismatched password is not an error, it is `false`).
    #[error("password hashing failed: {0}")]
    PasswordHash(String),

    /// Internal storage error.
    #[error("internal store error: {0}")]
    Internal(String),
}

/// Convert sqlx errors to StoreError.
///
/// ## Error Mapping
/// ```text
/// sqlx::Error::Database (UNIQUE)  → StoreError::DuplicateEmail
/// sqlx::Error::Database (other)   → StoreError::QueryFailed
/// sqlx::Error::PoolClosed         → StoreError::ConnectionFailed
/// Other                           → StoreError::Internal
/// ```
impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::Database(db_err) => {
                let msg = db_err.message();

                // SQLite reports the violated index as
                // "UNIQUE constraint failed: <table>.<column>". The only
                // unique column in this schema is users.email.
                if msg.contains("UNIQUE constraint failed") {
                    StoreError::DuplicateEmail
                } else {
                    StoreError::QueryFailed(msg.to_string())
                }
            }

            sqlx::Error::PoolTimedOut => {
                StoreError::ConnectionFailed("pool timed out".to_string())
            }

            sqlx::Error::PoolClosed => StoreError::ConnectionFailed("pool is closed".to_string()),

            _ => StoreError::Internal(err.to_string()),
        }
    }
}

impl From<sqlx::migrate::MigrateError> for StoreError {
    fn from(err: sqlx::migrate::MigrateError) -> Self {
        StoreError::MigrationFailed(err.to_string())
    }
}

/// Result type for persistence operations.
pub type StoreResult<T> = Result<T, StoreError>;
