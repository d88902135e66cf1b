//! # Key-Value Store
//!
//! Persistent key-value storage, the browser-mode analog of the embedded
//! database. One JSON document on disk holds every key; each mutation
//! rewrites the document through a temp-file rename.
//!
//! ## Persisted Layout
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  storage.json                                                           │
//! │                                                                         │
//! │  {                                                                      │
//! │    "users":          [ {User}, {User}, ... ],   ← browser-mode records  │
//! │    "session_active": "a@b.com",                 ← logged-in email       │
//! │    "carrito":        [ {CartItem}, ... ]        ← saved cart            │
//! │  }                                                                      │
//! │                                                                         │
//! │  Session and cart live here in BOTH modes; only the "users" key is      │
//! │  owned by the browser backend.                                          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Concurrency
//! A single `tokio::sync::Mutex` guards the map, so individual get/set
//! operations are atomic. Read-modify-write sequences spanning several
//! calls are NOT serialized against other callers; that hazard belongs to
//! the application layer.

use std::path::PathBuf;
use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{Map, Value};
use tokio::sync::Mutex;
use tracing::{debug, info};

use crate::error::StoreResult;

// =============================================================================
// Well-Known Keys
// =============================================================================

/// Serialized user collection (browser mode only).
pub const USERS_KEY: &str = "users";

/// Email of the currently logged-in user, absent when logged out.
pub const SESSION_KEY: &str = "session_active";

/// Saved cart line items, absent when the cart was never saved or cleared.
pub const CART_KEY: &str = "carrito";

// =============================================================================
// Store
// =============================================================================

struct KvInner {
    /// Backing file; `None` keeps the store purely in memory (tests).
    path: Option<PathBuf>,
    map: Map<String, Value>,
}

/// Handle to the key-value store.
///
/// Cheap to clone; all clones share the same map and backing file.
#[derive(Clone)]
pub struct KvStore {
    inner: Arc<Mutex<KvInner>>,
}

impl KvStore {
    /// Opens (or creates) the store backed by the given file.
    ///
    /// A missing file yields an empty store; a present file is parsed as
    /// one JSON object. A file that exists but cannot be parsed is a
    /// construction failure, not silent data loss.
    pub fn open(path: impl Into<PathBuf>) -> StoreResult<Self> {
        let path = path.into();

        let map = if path.exists() {
            let bytes = std::fs::read(&path)?;
            serde_json::from_slice(&bytes)?
        } else {
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)?;
            }
            Map::new()
        };

        info!(path = %path.display(), keys = map.len(), "Key-value store opened");

        Ok(KvStore {
            inner: Arc::new(Mutex::new(KvInner {
                path: Some(path),
                map,
            })),
        })
    }

    /// Creates a store with no backing file (for testing).
    pub fn in_memory() -> Self {
        KvStore {
            inner: Arc::new(Mutex::new(KvInner {
                path: None,
                map: Map::new(),
            })),
        }
    }

    /// Reads and deserializes the value under `key`.
    ///
    /// ## Returns
    /// * `Ok(Some(value))` - key present and parseable as `T`
    /// * `Ok(None)` - key absent
    pub async fn get<T: DeserializeOwned>(&self, key: &str) -> StoreResult<Option<T>> {
        let inner = self.inner.lock().await;

        match inner.map.get(key) {
            Some(value) => {
                let parsed = serde_json::from_value(value.clone())?;
                Ok(Some(parsed))
            }
            None => Ok(None),
        }
    }

    /// Serializes `value` under `key`, overwriting any previous value,
    /// and writes the document through to disk.
    pub async fn set<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> StoreResult<()> {
        let mut inner = self.inner.lock().await;

        let value = serde_json::to_value(value)?;
        inner.map.insert(key.to_string(), value);
        persist(&inner)?;

        debug!(key = %key, "Key-value entry written");
        Ok(())
    }

    /// Deletes `key`. Returns whether the key was present.
    pub async fn remove(&self, key: &str) -> StoreResult<bool> {
        let mut inner = self.inner.lock().await;

        let was_present = inner.map.remove(key).is_some();
        if was_present {
            persist(&inner)?;
        }

        debug!(key = %key, present = was_present, "Key-value entry removed");
        Ok(was_present)
    }

    /// Checks whether `key` exists without deserializing it.
    pub async fn contains(&self, key: &str) -> bool {
        self.inner.lock().await.map.contains_key(key)
    }
}

/// Writes the whole document atomically: serialize to a sibling temp file,
/// then rename over the target.
fn persist(inner: &KvInner) -> StoreResult<()> {
    let Some(path) = &inner.path else {
        return Ok(());
    };

    let bytes = serde_json::to_vec_pretty(&inner.map)?;

    let tmp = path.with_extension("json.tmp");
    std::fs::write(&tmp, bytes)?;
    std::fs::rename(&tmp, path)?;

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn set_get_round_trip() {
        let kv = KvStore::in_memory();

        kv.set("greeting", "hello").await.unwrap();
        let value: Option<String> = kv.get("greeting").await.unwrap();
        assert_eq!(value.as_deref(), Some("hello"));
    }

    #[tokio::test]
    async fn get_missing_key_is_none() {
        let kv = KvStore::in_memory();
        let value: Option<Vec<i64>> = kv.get("nope").await.unwrap();
        assert!(value.is_none());
    }

    #[tokio::test]
    async fn set_overwrites() {
        let kv = KvStore::in_memory();

        kv.set("n", &1i64).await.unwrap();
        kv.set("n", &2i64).await.unwrap();

        let value: Option<i64> = kv.get("n").await.unwrap();
        assert_eq!(value, Some(2));
    }

    #[tokio::test]
    async fn remove_deletes_key() {
        let kv = KvStore::in_memory();

        kv.set("n", &1i64).await.unwrap();
        assert!(kv.remove("n").await.unwrap());
        assert!(!kv.remove("n").await.unwrap());
        assert!(!kv.contains("n").await);
    }

    #[tokio::test]
    async fn survives_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("storage.json");

        {
            let kv = KvStore::open(&path).unwrap();
            kv.set("numbers", &vec![1i64, 2, 3]).await.unwrap();
        }

        let kv = KvStore::open(&path).unwrap();
        let value: Option<Vec<i64>> = kv.get("numbers").await.unwrap();
        assert_eq!(value, Some(vec![1, 2, 3]));
    }

    #[tokio::test]
    async fn corrupt_file_fails_open() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("storage.json");
        std::fs::write(&path, b"not json {").unwrap();

        assert!(KvStore::open(&path).is_err());
    }
}
