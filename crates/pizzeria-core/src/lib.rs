//! # pizzeria-core: Pure Business Logic for the Pizzeria App
//!
//! This crate contains the domain model of the ordering app as pure
//! functions and types with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Pizzeria Architecture                             │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                  Frontend (Ionic/Capacitor)                     │   │
//! │  │    Menu UI ──► Cart UI ──► Checkout UI ──► Order History        │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │              ★ pizzeria-core (THIS CRATE) ★                     │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌────────────┐                  │   │
//! │  │   │   types   │  │   cart    │  │ validation │                  │   │
//! │  │   │   User    │  │   Cart    │  │   rules    │                  │   │
//! │  │   │ CartItem  │  │  merging  │  │   checks   │                  │   │
//! │  │   └───────────┘  └───────────┘  └────────────┘                  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO NETWORK • PURE FUNCTIONS            │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │              pizzeria-store (Persistence Layer)                 │   │
//! │  │        SQLite + key-value backends, session, cart store         │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (User, NewUser, UserProfile, CartItem)
//! - [`cart`] - In-memory cart with merge semantics
//! - [`error`] - Domain error types
//! - [`validation`] - Business rule validation
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: deterministic, no hidden state
//! 2. **No I/O**: database, network, file system access is FORBIDDEN here
//! 3. **Integer Money**: all prices are in cents (i64) to avoid float errors
//! 4. **Explicit Errors**: all errors are typed, never strings or panics

// =============================================================================
// Module Declarations
// =============================================================================

pub mod cart;
pub mod error;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use cart::Cart;
pub use error::ValidationError;
pub use types::{CartItem, NewUser, User, UserProfile};

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Maximum line items allowed in a single cart
///
/// ## Business Reason
/// Prevents runaway carts; a single pizzeria order never needs more
/// unique products than this.
pub const MAX_CART_ITEMS: usize = 50;

/// Maximum quantity of a single item in cart
///
/// ## Business Reason
/// Prevents accidental over-ordering (e.g., typing 100 instead of 10).
pub const MAX_ITEM_QUANTITY: i64 = 99;

/// Minimum accepted password length for new accounts.
pub const MIN_PASSWORD_LEN: usize = 6;

/// Accepted registration age range, inclusive.
pub const MIN_AGE: i64 = 13;
pub const MAX_AGE: i64 = 120;
