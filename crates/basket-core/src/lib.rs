//! # basket-core: Pure Cart Logic for Basket
//!
//! This crate is the **heart** of the storefront cart. It contains the line
//! item model, the cart invariants and all pricing math as pure functions
//! with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Basket Architecture                              │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │              Checkout / UI layer (basket-cli, web client)       │   │
//! │  │     Product card ──► Cart drawer ──► Order summary (+ tax)      │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               basket-store (CartStore + slots)                  │   │
//! │  │       persist after every mutation, hydrate on open             │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ basket-core (THIS CRATE) ★                      │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   types   │  │   money   │  │   cart    │  │  pricing  │  │   │
//! │  │   │ LineItem  │  │   Money   │  │   Cart    │  │ Shipping  │  │   │
//! │  │   │ Snapshot  │  │  TaxRate  │  │ invariants│  │  Summary  │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO STORAGE • NO NETWORK • PURE FUNCTIONS            │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (ProductSnapshot, CartLineItem, TaxRate, TaxBase)
//! - [`money`] - Money type with integer arithmetic (no floating point math)
//! - [`cart`] - The cart itself and its invariants
//! - [`pricing`] - Shipping policy, tax configuration, order summary
//! - [`error`] - Domain error types
//! - [`validation`] - Input validation
//!
//! ## Example Usage
//!
//! ```rust
//! use basket_core::{Cart, Money, ProductSnapshot, ShippingPolicy};
//!
//! let mut cart = Cart::new();
//! let apple = ProductSnapshot::new("a", "Apple crate", Money::from_cents(1000), "/a.png").unwrap();
//! cart.add_item(apple);
//!
//! let policy = ShippingPolicy::default();
//! assert_eq!(cart.subtotal().cents(), 1000);
//! assert_eq!(cart.shipping_cost(&policy).cents(), 599);
//! assert_eq!(cart.total_price(&policy).cents(), 1599);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod cart;
pub mod error;
pub mod money;
pub mod pricing;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use cart::{Cart, QuantityChange};
pub use error::{CoreError, CoreResult, ValidationError};
pub use money::Money;
pub use pricing::{OrderSummary, ShippingPolicy, TaxConfig};
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Subtotal at or above which shipping is free ($50.00).
pub const FREE_SHIPPING_THRESHOLD: Money = Money::from_cents(5000);

/// Flat shipping fee charged below the free-shipping threshold ($5.99).
pub const FLAT_SHIPPING_FEE: Money = Money::from_cents(599);

/// Default sales tax rate applied by the checkout layer (8%).
pub const DEFAULT_TAX_RATE_BPS: u32 = 800;

/// Largest quantity a single row can hold. Larger requests are clamped, and
/// persisted rows above it are rejected.
pub const MAX_ITEM_QUANTITY: i64 = 9_999;
