//! # Cart
//!
//! The in-memory shopping cart and its invariants.
//!
//! ## Cart Operations Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Cart Operations                                      │
//! │                                                                         │
//! │  Shopper Action           Cart Method             State Change          │
//! │  ──────────────           ───────────             ────────────          │
//! │                                                                         │
//! │  "Add to cart" ─────────► add_item() ───────────► qty += 1 / push row  │
//! │                                                                         │
//! │  +/- buttons ───────────► update_quantity() ────► qty = n (n <= 0 →    │
//! │                                                   row removed)          │
//! │                                                                         │
//! │  Trash icon ────────────► remove_item() ────────► row removed          │
//! │                                                                         │
//! │  "Clear cart" ──────────► clear() ──────────────► no rows              │
//! │                                                                         │
//! │  Drawer / summary ──────► subtotal(), shipping_cost(), total_price()   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Invariants
//! - Rows are unique by `id` (adding the same product increments quantity)
//! - Every row has `1 <= quantity <= MAX_ITEM_QUANTITY`
//! - Rows keep insertion order

use serde::Serialize;

use crate::error::ValidationError;
use crate::money::Money;
use crate::pricing::ShippingPolicy;
use crate::types::{CartLineItem, ProductSnapshot};
use crate::validation::validate_line_item;
use crate::MAX_ITEM_QUANTITY;

/// What `update_quantity` did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuantityChange {
    /// The row now has the requested quantity.
    Updated,
    /// The requested quantity was <= 0 and the row was removed.
    Removed,
    /// No row with that id; nothing changed.
    NotInCart,
}

impl QuantityChange {
    /// Returns true if the cart contents changed.
    pub fn changed(&self) -> bool {
        !matches!(self, QuantityChange::NotInCart)
    }
}

/// The shopping cart.
///
/// Rows are private so the invariants above cannot be bypassed; read them
/// through [`Cart::items`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Cart {
    items: Vec<CartLineItem>,
}

impl Cart {
    /// Creates a new empty cart.
    pub fn new() -> Self {
        Cart { items: Vec::new() }
    }

    /// Rebuilds a cart from persisted rows, preserving their order.
    ///
    /// ## Errors
    /// Any row failing `validate_line_item`, or two rows sharing an id.
    pub fn from_items(items: Vec<CartLineItem>) -> Result<Self, ValidationError> {
        for (index, item) in items.iter().enumerate() {
            validate_line_item(item)?;

            if items[..index].iter().any(|earlier| earlier.id == item.id) {
                return Err(ValidationError::Duplicate {
                    field: "id".to_string(),
                    value: item.id.clone(),
                });
            }
        }

        Ok(Cart { items })
    }

    /// Adds a product, or increments its quantity if already present.
    ///
    /// A row already at `MAX_ITEM_QUANTITY` stays there.
    ///
    /// ## Returns
    /// The row's quantity after the call.
    pub fn add_item(&mut self, product: ProductSnapshot) -> i64 {
        if let Some(item) = self.items.iter_mut().find(|i| i.id == product.id()) {
            item.quantity = item.quantity.saturating_add(1).min(MAX_ITEM_QUANTITY);
            return item.quantity;
        }

        self.items.push(CartLineItem::from_snapshot(product, 1));
        1
    }

    /// Sets the absolute quantity of a row.
    ///
    /// ## Behavior
    /// - `quantity <= 0`: same as `remove_item`
    /// - `quantity > MAX_ITEM_QUANTITY`: clamped to the maximum
    /// - Unknown id: no-op
    ///
    /// Ids are matched after trimming, like `ProductSnapshot::new` stores them.
    pub fn update_quantity(&mut self, id: &str, quantity: i64) -> QuantityChange {
        let id = id.trim();
        if quantity <= 0 {
            return if self.remove_item(id) {
                QuantityChange::Removed
            } else {
                QuantityChange::NotInCart
            };
        }

        match self.items.iter_mut().find(|i| i.id == id) {
            Some(item) => {
                item.quantity = quantity.min(MAX_ITEM_QUANTITY);
                QuantityChange::Updated
            }
            None => QuantityChange::NotInCart,
        }
    }

    /// Removes a row by product id.
    ///
    /// ## Returns
    /// `true` if a row was removed.
    pub fn remove_item(&mut self, id: &str) -> bool {
        let id = id.trim();
        let initial_len = self.items.len();
        self.items.retain(|i| i.id != id);
        self.items.len() != initial_len
    }

    /// Clears all rows.
    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Rows in insertion order.
    pub fn items(&self) -> &[CartLineItem] {
        &self.items
    }

    /// Looks up a row by product id.
    pub fn item(&self, id: &str) -> Option<&CartLineItem> {
        let id = id.trim();
        self.items.iter().find(|i| i.id == id)
    }

    /// Number of distinct products.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Sum of all quantities (the badge count).
    pub fn total_items(&self) -> i64 {
        self.items
            .iter()
            .fold(0i64, |total, i| total.saturating_add(i.quantity))
    }

    /// Σ(price × quantity), before shipping and tax.
    pub fn subtotal(&self) -> Money {
        self.items.iter().map(CartLineItem::line_total).sum()
    }

    /// Shipping for the current subtotal under `policy`.
    pub fn shipping_cost(&self, policy: &ShippingPolicy) -> Money {
        policy.shipping_for(self.subtotal())
    }

    /// Subtotal + shipping. Tax is not included.
    pub fn total_price(&self, policy: &ShippingPolicy) -> Money {
        let subtotal = self.subtotal();
        subtotal + policy.shipping_for(subtotal)
    }
}
