//! # Cart Store
//!
//! Persistence for the saved cart: a serialized list of line items under
//! the `carrito` key, kept in the key-value store in both backend modes.
//!
//! ## Contract
//! - `save` overwrites the stored cart wholesale; there is no merge
//! - `load` returns the stored list or empty when none exists
//! - `clear` deletes the key; a following `load` yields empty
//! - Read-modify-write atomicity is the caller's job: pages load a
//!   snapshot, mutate it in memory (see `pizzeria_core::Cart`), and save
//!   it back. Two callers racing on the same cart can lose updates; the
//!   store provides no locking.

use tracing::debug;

use pizzeria_core::CartItem;

use crate::error::StoreResult;
use crate::kv::{KvStore, CART_KEY};

/// Store for the saved cart.
#[derive(Clone)]
pub struct CartStore {
    kv: KvStore,
}

impl CartStore {
    pub fn new(kv: KvStore) -> Self {
        CartStore { kv }
    }

    /// Overwrites the stored cart with `items`.
    pub async fn save(&self, items: &[CartItem]) -> StoreResult<()> {
        debug!(lines = items.len(), "Saving cart");
        self.kv.set(CART_KEY, items).await
    }

    /// Returns the stored cart, empty when never saved or cleared.
    pub async fn load(&self) -> StoreResult<Vec<CartItem>> {
        Ok(self.kv.get(CART_KEY).await?.unwrap_or_default())
    }

    /// Deletes the stored cart entirely (after successful order placement).
    pub async fn clear(&self) -> StoreResult<()> {
        debug!("Clearing cart");
        self.kv.remove(CART_KEY).await?;
        Ok(())
    }
}
