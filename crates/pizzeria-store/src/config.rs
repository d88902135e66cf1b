//! # Store Configuration
//!
//! Backend mode and file locations for the persistence layer.
//!
//! ## Backend Mode
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Backend Selection                                    │
//! │                                                                         │
//! │  App shell startup                                                      │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Shell classifies its platform (packaged mobile shell vs browser)       │
//! │       │                                                                 │
//! │       ├── packaged shell ──► BackendMode::Native  (SQLite users table)  │
//! │       │                                                                 │
//! │       └── browser       ──► BackendMode::Browser (key-value users)      │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  StoreConfig { mode, .. } ──► DataService::initialize()                 │
//! │                                                                         │
//! │  The mode is fixed for the lifetime of the process; session and cart    │
//! │  always live in the key-value store regardless of mode.                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! A library crate cannot probe the surrounding shell itself, so the shell
//! states its platform once here (or via the `PIZZERIA_MODE` environment
//! variable for development).

use std::path::PathBuf;

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

/// Which storage implementation backs user records for this process.
///
/// Fixed at initialization; never changes at runtime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BackendMode {
    /// Packaged mobile shell with access to an embedded SQLite database.
    Native,

    /// Web browser context, restricted to key-value persistence.
    Browser,
}

impl BackendMode {
    /// Reads the mode from `PIZZERIA_MODE` ("native" or "browser").
    pub fn from_env() -> Option<Self> {
        match std::env::var("PIZZERIA_MODE").ok()?.to_lowercase().as_str() {
            "native" => Some(BackendMode::Native),
            "browser" => Some(BackendMode::Browser),
            _ => None,
        }
    }

    /// Short label for logging.
    pub fn as_str(&self) -> &'static str {
        match self {
            BackendMode::Native => "native",
            BackendMode::Browser => "browser",
        }
    }
}

/// Persistence layer configuration.
///
/// ## Example
/// ```rust,ignore
/// let config = StoreConfig::new(BackendMode::Native, "/data/pizzeria")
///     .max_connections(2);
/// let service = DataService::new(config);
/// ```
#[derive(Debug, Clone)]
pub struct StoreConfig {
    /// Which backend owns user records.
    pub mode: BackendMode,

    /// Directory holding the database file and the key-value document.
    pub data_dir: PathBuf,

    /// SQLite database file name inside `data_dir`.
    pub db_file: String,

    /// Key-value document file name inside `data_dir`.
    pub kv_file: String,

    /// Keep everything in memory (tests). No files are touched.
    pub in_memory: bool,

    /// Maximum SQLite pool connections.
    /// Defaults to 1: a single connection is shared process-wide,
    /// opened once and never closed until teardown.
    pub max_connections: u32,

    /// Whether to run embedded migrations during native initialization.
    pub run_migrations: bool,
}

impl StoreConfig {
    /// Creates a configuration with the given mode and data directory.
    pub fn new(mode: BackendMode, data_dir: impl Into<PathBuf>) -> Self {
        StoreConfig {
            mode,
            data_dir: data_dir.into(),
            db_file: "pizzaproject.db".to_string(),
            kv_file: "storage.json".to_string(),
            in_memory: false,
            max_connections: 1,
            run_migrations: true,
        }
    }

    /// Creates a configuration from the environment with platform defaults.
    ///
    /// ## Environment Variables
    /// - `PIZZERIA_MODE`: "native" or "browser" (default: native)
    /// - `PIZZERIA_DATA_DIR`: override the data directory
    pub fn from_env() -> Self {
        let mode = BackendMode::from_env().unwrap_or(BackendMode::Native);

        let data_dir = std::env::var("PIZZERIA_DATA_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| default_data_dir());

        StoreConfig::new(mode, data_dir)
    }

    /// Creates an in-memory configuration (for testing).
    ///
    /// ## Usage
    /// ```rust,ignore
    /// let config = StoreConfig::in_memory(BackendMode::Browser);
    /// // Nothing touches the filesystem, perfect for tests
    /// ```
    pub fn in_memory(mode: BackendMode) -> Self {
        StoreConfig {
            mode,
            data_dir: PathBuf::new(),
            db_file: String::new(),
            kv_file: String::new(),
            in_memory: true,
            max_connections: 1,
            run_migrations: true,
        }
    }

    /// Sets the maximum number of pool connections.
    pub fn max_connections(mut self, max: u32) -> Self {
        self.max_connections = max;
        self
    }

    /// Sets whether to run migrations during initialization.
    pub fn run_migrations(mut self, run: bool) -> Self {
        self.run_migrations = run;
        self
    }

    /// Full path of the SQLite database file.
    pub fn database_path(&self) -> PathBuf {
        self.data_dir.join(&self.db_file)
    }

    /// Full path of the key-value document.
    pub fn kv_path(&self) -> PathBuf {
        self.data_dir.join(&self.kv_file)
    }
}

/// Platform data directory for the app, falling back to the working
/// directory when the platform has no notion of one.
fn default_data_dir() -> PathBuf {
    ProjectDirs::from("com", "pizzeria", "pizzeria")
        .map(|dirs| dirs.data_dir().to_path_buf())
        .unwrap_or_else(|| PathBuf::from("."))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_builder() {
        let config = StoreConfig::new(BackendMode::Native, "/tmp/pizzeria").max_connections(4);

        assert_eq!(config.mode, BackendMode::Native);
        assert_eq!(config.max_connections, 4);
        assert_eq!(
            config.database_path(),
            PathBuf::from("/tmp/pizzeria/pizzaproject.db")
        );
        assert_eq!(
            config.kv_path(),
            PathBuf::from("/tmp/pizzeria/storage.json")
        );
    }

    #[test]
    fn in_memory_config() {
        let config = StoreConfig::in_memory(BackendMode::Browser);
        assert!(config.in_memory);
        assert_eq!(config.max_connections, 1);
    }
}
