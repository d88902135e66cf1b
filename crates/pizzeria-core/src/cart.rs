//! # Cart
//!
//! The in-memory shopping cart and its merge rules.
//!
//! ## Ownership Model
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Cart Data Flow                                       │
//! │                                                                         │
//! │  CartStore (pizzeria-store)          Cart (THIS MODULE)                 │
//! │  ──────────────────────────          ──────────────────                 │
//! │                                                                         │
//! │  load() ───────────────────────────► Cart::from_items(items)            │
//! │                                            │                            │
//! │                                      add / decrement / remove           │
//! │                                      (pure, in memory)                  │
//! │                                            │                            │
//! │  save(cart.items()) ◄────────────────── snapshot                        │
//! │                                                                         │
//! │  The store never mutates; pages load a snapshot, mutate it locally      │
//! │  and explicitly persist it back. There is no automatic sync.            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Invariants
//! - Items are unique by `product_id` (adding the same product merges)
//! - Quantity is always >= 1; a decrement below 1 removes the line
//! - Maximum unique items: [`MAX_CART_ITEMS`](crate::MAX_CART_ITEMS)
//! - Maximum quantity per line: [`MAX_ITEM_QUANTITY`](crate::MAX_ITEM_QUANTITY)

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::types::CartItem;
use crate::{MAX_CART_ITEMS, MAX_ITEM_QUANTITY};

/// The shopping cart.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Cart {
    /// Line items, unique by product id.
    items: Vec<CartItem>,

    /// When the cart was created or last cleared.
    created_at: DateTime<Utc>,
}

impl Cart {
    /// Creates a new empty cart.
    pub fn new() -> Self {
        Cart {
            items: Vec::new(),
            created_at: Utc::now(),
        }
    }

    /// Rebuilds a cart from a persisted snapshot.
    pub fn from_items(items: Vec<CartItem>) -> Self {
        Cart {
            items,
            created_at: Utc::now(),
        }
    }

    /// Adds one unit of a product, merging with an existing line.
    ///
    /// ## Behavior
    /// - Product already in cart: quantity increases by one
    /// - Product not in cart: appended as a new line with quantity 1
    ///
    /// ## Errors
    /// Returns an error string when the quantity or line count cap would
    /// be exceeded; the cart is left unchanged in that case.
    pub fn add(&mut self, product_id: i64, name: &str, price_cents: i64) -> Result<(), String> {
        if let Some(item) = self.items.iter_mut().find(|i| i.product_id == product_id) {
            if item.quantity + 1 > MAX_ITEM_QUANTITY {
                return Err(format!(
                    "Quantity would exceed maximum of {}",
                    MAX_ITEM_QUANTITY
                ));
            }
            item.quantity += 1;
            return Ok(());
        }

        if self.items.len() >= MAX_CART_ITEMS {
            return Err(format!(
                "Cart cannot have more than {} items",
                MAX_CART_ITEMS
            ));
        }

        self.items.push(CartItem {
            product_id,
            name: name.to_string(),
            price_cents,
            quantity: 1,
        });
        Ok(())
    }

    /// Removes one unit of a product; removes the whole line when the
    /// quantity would drop below 1.
    ///
    /// Returns `false` when the product is not in the cart.
    pub fn decrement(&mut self, product_id: i64) -> bool {
        let Some(pos) = self.items.iter().position(|i| i.product_id == product_id) else {
            return false;
        };

        if self.items[pos].quantity > 1 {
            self.items[pos].quantity -= 1;
        } else {
            self.items.remove(pos);
        }
        true
    }

    /// Removes a line entirely regardless of quantity.
    pub fn remove(&mut self, product_id: i64) -> bool {
        let before = self.items.len();
        self.items.retain(|i| i.product_id != product_id);
        self.items.len() != before
    }

    /// Clears all items.
    pub fn clear(&mut self) {
        self.items.clear();
        self.created_at = Utc::now();
    }

    /// Snapshot of the line items, in insertion order.
    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    /// Consumes the cart, yielding the items for persistence.
    pub fn into_items(self) -> Vec<CartItem> {
        self.items
    }

    /// Number of unique lines.
    pub fn item_count(&self) -> usize {
        self.items.len()
    }

    /// Total quantity across all lines.
    pub fn total_quantity(&self) -> i64 {
        self.items.iter().map(|i| i.quantity).sum()
    }

    /// Order total in cents.
    pub fn total_cents(&self) -> i64 {
        self.items.iter().map(|i| i.line_total_cents()).sum()
    }

    /// Checks if the cart is empty.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// When the cart was created or last cleared.
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

impl Default for Cart {
    fn default() -> Self {
        Self::new()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_same_product_twice_merges_into_one_line() {
        let mut cart = Cart::new();

        cart.add(1, "Margherita", 5000).unwrap();
        cart.add(1, "Margherita", 5000).unwrap();

        assert_eq!(cart.item_count(), 1);
        let item = &cart.items()[0];
        assert_eq!(item.product_id, 1);
        assert_eq!(item.price_cents, 5000);
        assert_eq!(item.quantity, 2);
    }

    #[test]
    fn add_distinct_products_keeps_separate_lines() {
        let mut cart = Cart::new();

        cart.add(1, "Margherita", 5000).unwrap();
        cart.add(2, "Diavola", 6500).unwrap();

        assert_eq!(cart.item_count(), 2);
        assert_eq!(cart.total_quantity(), 2);
        assert_eq!(cart.total_cents(), 11500);
    }

    #[test]
    fn decrement_below_one_removes_line() {
        let mut cart = Cart::new();
        cart.add(1, "Margherita", 5000).unwrap();
        cart.add(1, "Margherita", 5000).unwrap();

        assert!(cart.decrement(1));
        assert_eq!(cart.items()[0].quantity, 1);

        assert!(cart.decrement(1));
        assert!(cart.is_empty());
    }

    #[test]
    fn decrement_missing_product_is_false() {
        let mut cart = Cart::new();
        assert!(!cart.decrement(99));
    }

    #[test]
    fn remove_drops_whole_line() {
        let mut cart = Cart::new();
        cart.add(1, "Margherita", 5000).unwrap();
        cart.add(1, "Margherita", 5000).unwrap();
        cart.add(2, "Diavola", 6500).unwrap();

        assert!(cart.remove(1));
        assert_eq!(cart.item_count(), 1);
        assert_eq!(cart.items()[0].product_id, 2);
    }

    #[test]
    fn quantity_cap_is_enforced() {
        let mut cart = Cart::new();
        for _ in 0..crate::MAX_ITEM_QUANTITY {
            cart.add(1, "Margherita", 5000).unwrap();
        }
        assert!(cart.add(1, "Margherita", 5000).is_err());
        assert_eq!(cart.items()[0].quantity, crate::MAX_ITEM_QUANTITY);
    }

    #[test]
    fn clear_empties_cart() {
        let mut cart = Cart::new();
        cart.add(1, "Margherita", 5000).unwrap();
        assert!(!cart.is_empty());

        cart.clear();
        assert!(cart.is_empty());
        assert_eq!(cart.total_cents(), 0);
    }

    #[test]
    fn snapshot_round_trip() {
        let mut cart = Cart::new();
        cart.add(1, "Margherita", 5000).unwrap();
        cart.add(2, "Diavola", 6500).unwrap();

        let items = cart.into_items();
        let restored = Cart::from_items(items.clone());
        assert_eq!(restored.items(), items.as_slice());
    }
}
