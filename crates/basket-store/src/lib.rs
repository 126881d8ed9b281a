//! # basket-store: Cart Persistence Layer
//!
//! Keeps the in-memory cart and its durable storage slot convergent.
//!
//! ## Architecture
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        basket-store                                     │
//! │                                                                         │
//! │  ┌─────────────┐      ┌──────────────────────────────────────────┐     │
//! │  │ StoreConfig │─────►│               CartStore<S>               │     │
//! │  │ basket.toml │      │  Cart (authoritative, in memory)         │     │
//! │  │ BASKET_*    │      │  ShippingPolicy                          │     │
//! │  └─────────────┘      │  last_storage_error                      │     │
//! │                       └──────────────────┬───────────────────────┘     │
//! │                                          │ codec::encode / decode       │
//! │                                          ▼                              │
//! │                       ┌──────────────────────────────────────────┐     │
//! │                       │            S: CartSlot                   │     │
//! │                       │   MemorySlot  │  FileSlot (<key>.json)   │     │
//! │                       └──────────────────────────────────────────┘     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use basket_core::{Money, ProductSnapshot, ShippingPolicy};
//! use basket_store::{CartStore, MemorySlot};
//!
//! let slot = MemorySlot::new();
//! let mut store = CartStore::open(slot.clone(), ShippingPolicy::default());
//! store.add_item(ProductSnapshot::new("a", "Apples", Money::from_cents(1000), "").unwrap());
//!
//! // A second store over the same slot sees the persisted cart.
//! let restarted = CartStore::open(slot, ShippingPolicy::default());
//! assert_eq!(restarted.total_items(), 1);
//! ```

pub mod codec;
pub mod config;
pub mod error;
pub mod slot;
pub mod store;

pub use config::{StorageSettings, StoreConfig};
pub use error::{SlotError, SlotResult, StoreError, StoreResult};
pub use slot::{CartSlot, FileSlot, MemorySlot};
pub use store::{CartStore, CartTotals};

/// Name of the persisted slot when none is configured.
pub const DEFAULT_SLOT_KEY: &str = "cart";
