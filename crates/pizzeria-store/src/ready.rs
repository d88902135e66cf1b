//! # Readiness Signal
//!
//! One-shot boolean stream telling consumers the selected backend has
//! finished its setup (tables created / collection seeded) and is safe to
//! query.
//!
//! ## Contract
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Readiness Lifecycle                                                    │
//! │                                                                         │
//! │  new() ──► false ──── initialize() succeeds ────► true (forever)        │
//! │              │                                                          │
//! │              └──── initialize() fails ──► stays false for the rest      │
//! │                                           of the process (no retry)     │
//! │                                                                         │
//! │  Emits true at most once; never reverts to false.                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Consumers either poll [`ReadySignal::is_ready`], subscribe to the
//! watch channel, or block on [`ReadySignal::wait`] before their first
//! query.

use std::sync::Arc;

use tokio::sync::watch;

use crate::error::{StoreError, StoreResult};

/// The readiness flag for the storage layer.
///
/// Cheap to clone; all clones observe the same flag.
#[derive(Clone)]
pub struct ReadySignal {
    tx: Arc<watch::Sender<bool>>,
}

impl ReadySignal {
    /// Creates a signal in the not-ready state.
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(false);
        ReadySignal { tx: Arc::new(tx) }
    }

    /// Current value of the flag.
    pub fn is_ready(&self) -> bool {
        *self.tx.borrow()
    }

    /// Flips the flag to true. Idempotent; the flag never reverts.
    pub fn mark_ready(&self) {
        self.tx.send_replace(true);
    }

    /// Subscribes to the boolean stream. The receiver immediately sees
    /// the current value, then `true` once setup completes.
    pub fn subscribe(&self) -> watch::Receiver<bool> {
        self.tx.subscribe()
    }

    /// Suspends the caller until the flag is true.
    pub async fn wait(&self) -> StoreResult<()> {
        let mut rx = self.tx.subscribe();
        rx.wait_for(|ready| *ready)
            .await
            .map_err(|_| StoreError::NotReady)?;
        Ok(())
    }
}

impl Default for ReadySignal {
    fn default() -> Self {
        Self::new()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
