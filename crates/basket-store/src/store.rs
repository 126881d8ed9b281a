//! # Cart Store
//!
//! The authoritative cart for one shopping session plus its storage slot.
//!
//! ## Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  CartStore::open(slot) ──► slot.read() ──► codec::decode ──► Cart      │
//! │        (absent / malformed / unreadable → empty cart)                   │
//! │                                                                         │
//! │  add_item / update_quantity / remove_item                               │
//! │        │                                                                │
//! │        ▼                                                                │
//! │  mutate Cart ──► codec::encode ──► slot.write(full cart)                │
//! │                                                                         │
//! │  clear_cart ──► Cart::clear ──► slot.remove()  (slot gone, not "[]")    │
//! │                                                                         │
//! │  Any slot failure: warn!, remember in last_storage_error, carry on.     │
//! │  Memory stays authoritative for the rest of the session.                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The store is an ordinary owned value: construct one per session and pass
//! it to whatever needs it.

use basket_core::{Cart, CartLineItem, Money, ProductSnapshot, QuantityChange, ShippingPolicy};
use serde::Serialize;
use tracing::{debug, info, warn};
use ts_rs::TS;

use crate::codec;
use crate::error::StoreError;
use crate::slot::CartSlot;

/// Cart totals summary for UI rendering (drawer, badge, order summary).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct CartTotals {
    pub line_count: usize,
    #[ts(type = "number")]
    pub total_items: i64,
    #[ts(type = "number")]
    pub subtotal: Money,
    #[ts(type = "number")]
    pub shipping: Money,
    #[ts(type = "number")]
    pub total: Money,
    #[ts(type = "number")]
    pub amount_until_free_shipping: Money,
}

/// The session's cart, kept convergent with a [`CartSlot`].
#[derive(Debug)]
pub struct CartStore<S: CartSlot> {
    slot: S,
    cart: Cart,
    shipping: ShippingPolicy,
    last_storage_error: Option<StoreError>,
}

impl<S: CartSlot> CartStore<S> {
    /// Opens the store and hydrates it from `slot`.
    pub fn open(slot: S, shipping: ShippingPolicy) -> Self {
        let mut store = CartStore {
            slot,
            cart: Cart::new(),
            shipping,
            last_storage_error: None,
        };
        store.reload();
        store
    }

    /// Replaces the in-memory cart with whatever the slot holds.
    ///
    /// An unreadable slot yields an empty cart and is recorded in
    /// [`last_storage_error`](Self::last_storage_error).
    pub fn reload(&mut self) {
        match self.slot.read() {
            Ok(payload) => {
                self.cart = codec::decode(payload.as_deref());
                self.last_storage_error = None;
                info!(
                    slot = %self.slot.describe(),
                    lines = self.cart.len(),
                    items = self.cart.total_items(),
                    "Cart hydrated"
                );
            }
            Err(err) => {
                warn!(slot = %self.slot.describe(), error = %err, "Cart slot unreadable, starting empty");
                self.cart = Cart::new();
                self.last_storage_error = Some(err.into());
            }
        }
    }

    // =========================================================================
    // Mutations
    // =========================================================================

    /// Adds a product or increments its quantity. Returns the new quantity.
    pub fn add_item(&mut self, product: ProductSnapshot) -> i64 {
        let id = product.id().to_string();
        let quantity = self.cart.add_item(product);
        debug!(id = %id, quantity, "add_item");

        self.persist();
        quantity
    }

    /// Sets a row's quantity; `quantity <= 0` removes the row.
    ///
    /// Unknown ids are ignored and nothing is written.
    pub fn update_quantity(&mut self, id: &str, quantity: i64) -> QuantityChange {
        let change = self.cart.update_quantity(id, quantity);
        debug!(id = %id, quantity, ?change, "update_quantity");

        if change.changed() {
            self.persist();
        }
        change
    }

    /// Removes a row if present. Returns whether anything was removed.
    pub fn remove_item(&mut self, id: &str) -> bool {
        let removed = self.cart.remove_item(id);
        debug!(id = %id, removed, "remove_item");

        if removed {
            self.persist();
        }
        removed
    }

    /// Empties the cart and deletes the slot.
    pub fn clear_cart(&mut self) {
        self.cart.clear();
        debug!("clear_cart");

        match self.slot.remove() {
            Ok(()) => self.last_storage_error = None,
            Err(err) => {
                warn!(slot = %self.slot.describe(), error = %err, "Failed to remove cart slot");
                self.last_storage_error = Some(err.into());
            }
        }
    }

    fn persist(&mut self) {
        let result = codec::encode(&self.cart)
            .and_then(|payload| self.slot.write(&payload).map_err(StoreError::from));

        match result {
            Ok(()) => self.last_storage_error = None,
            Err(err) => {
                warn!(slot = %self.slot.describe(), error = %err, "Failed to persist cart");
                self.last_storage_error = Some(err);
            }
        }
    }

    // =========================================================================
    // Queries
    // =========================================================================

    pub fn items(&self) -> &[CartLineItem] {
        self.cart.items()
    }

    pub fn item(&self, id: &str) -> Option<&CartLineItem> {
        self.cart.item(id)
    }

    /// The underlying cart, for checkout-layer calculations.
    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    pub fn is_empty(&self) -> bool {
        self.cart.is_empty()
    }

    /// Number of distinct products.
    pub fn line_count(&self) -> usize {
        self.cart.len()
    }

    /// Σ quantity.
    pub fn total_items(&self) -> i64 {
        self.cart.total_items()
    }

    /// Σ price × quantity.
    pub fn subtotal(&self) -> Money {
        self.cart.subtotal()
    }

    pub fn shipping_cost(&self) -> Money {
        self.cart.shipping_cost(&self.shipping)
    }

    /// Subtotal + shipping (tax excluded).
    pub fn total_price(&self) -> Money {
        self.cart.total_price(&self.shipping)
    }

    pub fn amount_until_free_shipping(&self) -> Money {
        self.shipping.amount_until_free(self.cart.subtotal())
    }

    pub fn shipping_policy(&self) -> &ShippingPolicy {
        &self.shipping
    }

    /// All derived figures at once.
    pub fn totals(&self) -> CartTotals {
        let subtotal = self.cart.subtotal();
        let shipping = self.shipping.shipping_for(subtotal);

        CartTotals {
            line_count: self.cart.len(),
            total_items: self.cart.total_items(),
            subtotal,
            shipping,
            total: subtotal + shipping,
            amount_until_free_shipping: self.shipping.amount_until_free(subtotal),
        }
    }

    /// Most recent storage failure, cleared by the next successful slot
    /// operation.
    pub fn last_storage_error(&self) -> Option<&StoreError> {
        self.last_storage_error.as_ref()
    }

    pub fn slot(&self) -> &S {
        &self.slot
    }
}
