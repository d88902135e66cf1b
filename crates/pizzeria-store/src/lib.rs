//! # pizzeria-store: Persistence Layer for the Pizzeria App
//!
//! Local persistence behind one interface: user records on an embedded
//! SQLite database (native mode) or a key-value document (browser mode),
//! plus the session and cart stores shared by both modes and the
//! readiness signal consumers wait on.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Pizzeria Data Flow                                 │
//! │                                                                         │
//! │  App page (login / register / cart / profile)                           │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐    │
//! │  │                  pizzeria-store (THIS CRATE)                    │    │
//! │  │                                                                 │    │
//! │  │   ┌────────────────┐   ┌────────────────┐   ┌───────────────┐  │    │
//! │  │   │  DataService   │   │ UserRepository │   │   KvStore     │  │    │
//! │  │   │ (service.rs)   │──►│ Sqlite │ Kv    │   │ (kv.rs)       │  │    │
//! │  │   │ init, facade   │   │ (repository/)  │   │ session, cart │  │    │
//! │  │   └────────────────┘   └────────────────┘   └───────────────┘  │    │
//! │  │                                                                 │    │
//! │  └─────────────────────────────────────────────────────────────────┘    │
//! │       │                               │                                 │
//! │       ▼                               ▼                                 │
//! │  pizzaproject.db (SQLite)        storage.json (key-value)               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`service`] - The `DataService` facade (start here)
//! - [`config`] - Backend mode and store locations
//! - [`repository`] - User store, both backends
//! - [`kv`] - Key-value document store
//! - [`session`] / [`cart`] - Session and cart stores
//! - [`ready`] - Readiness signal
//! - [`pool`] / [`migrations`] - SQLite plumbing
//! - [`error`] - Store error types
//!
//! ## Usage
//!
//! ```rust,ignore
//! use pizzeria_store::{BackendMode, DataService, StoreConfig};
//!
//! let service = DataService::new(StoreConfig::from_env());
//! service.initialize().await?;
//! service.wait_ready().await?;
//!
//! if service.login("a@b.com", "password").await {
//!     let items = service.cart().await;
//! }
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod cart;
pub mod config;
pub mod error;
pub mod kv;
pub mod migrations;
pub mod pool;
pub mod ready;
pub mod repository;
pub mod service;
pub mod session;

// =============================================================================
// Re-exports
// =============================================================================

pub use cart::CartStore;
pub use config::{BackendMode, StoreConfig};
pub use error::{StoreError, StoreResult};
pub use kv::KvStore;
pub use ready::ReadySignal;
pub use repository::UserRepository;
pub use service::DataService;
pub use session::SessionStore;
