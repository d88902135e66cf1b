//! # SQLite Pool Management
//!
//! Connection pool creation for the relational (native mode) backend.
//!
//! ## Single Shared Handle
//! One database handle is opened at initialization and shared
//! process-wide until teardown. The pool defaults to a single
//! connection accordingly; callers can raise the cap via
//! [`StoreConfig::max_connections`](crate::StoreConfig).
//!
//! ## WAL Mode
//! SQLite WAL (Write-Ahead Logging) mode is enabled for:
//! - Better concurrent read performance
//! - Readers don't block writers
//! - Better crash recovery

use std::str::FromStr;
use std::time::Duration;

use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous};
use sqlx::SqlitePool;
use tracing::{debug, info};

use crate::config::StoreConfig;
use crate::error::{StoreError, StoreResult};

/// Opens the SQLite pool for native mode.
///
/// ## What This Does
/// 1. Creates the data directory and database file if missing
/// 2. Configures SQLite for a local single-device app:
///    - WAL mode for concurrent reads
///    - NORMAL synchronous (balance of safety/speed)
///    - Foreign keys enabled
/// 3. Builds the connection pool
///
/// ## Errors
/// [`StoreError::ConnectionFailed`] when the file cannot be created or
/// opened; per the initialization contract this is terminal for the
/// process (readiness stays false, no retry).
pub async fn open_pool(config: &StoreConfig) -> StoreResult<SqlitePool> {
    let connect_options = if config.in_memory {
        // Isolated private database, used by tests.
        SqliteConnectOptions::from_str("sqlite::memory:")
            .map_err(|e| StoreError::ConnectionFailed(e.to_string()))?
    } else {
        let path = config.database_path();
        info!(path = %path.display(), "Opening native database");

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| StoreError::ConnectionFailed(e.to_string()))?;
        }

        // sqlite://path with mode=rwc creates the file if not exists
        let connect_url = format!("sqlite://{}?mode=rwc", path.display());
        SqliteConnectOptions::from_str(&connect_url)
            .map_err(|e| StoreError::ConnectionFailed(e.to_string()))?
    };

    let connect_options = connect_options
        .journal_mode(SqliteJournalMode::Wal)
        .synchronous(SqliteSynchronous::Normal)
        .foreign_keys(true)
        .create_if_missing(true);

    debug!("Connection options configured");

    let pool = SqlitePoolOptions::new()
        .max_connections(config.max_connections)
        .min_connections(1)
        .acquire_timeout(Duration::from_secs(30))
        .connect_with(connect_options)
        .await
        .map_err(|e| StoreError::ConnectionFailed(e.to_string()))?;

    info!(
        max_connections = config.max_connections,
        "Database pool created"
    );

    Ok(pool)
}

// =============================================================================
// Unit Tests
// =============================================================================
