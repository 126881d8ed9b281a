//! # Persisted Cart Layout
//!
//! The slot holds a JSON array of line items:
//!
//! ```json
//! [
//!   {"id": "a", "name": "Apple crate", "price": 10.0, "image": "/a.png", "quantity": 2},
//!   {"id": "b", "name": "Banana box",  "price": 45.0, "image": "/b.png", "quantity": 1}
//! ]
//! ```
//!
//! ## Reading Rules
//! | Slot contents                               | Result              |
//! |---------------------------------------------|---------------------|
//! | absent                                      | empty cart          |
//! | `[]`                                        | empty cart          |
//! | valid array                                 | cart, same order    |
//! | not JSON / not an array / missing fields    | empty cart + warn   |
//! | duplicate ids, quantity < 1, negative price | empty cart + warn   |

use basket_core::{Cart, CartLineItem};
use tracing::warn;

use crate::error::{StoreError, StoreResult};

/// Serializes the full cart into the slot layout.
pub fn encode(cart: &Cart) -> StoreResult<String> {
    Ok(serde_json::to_string(cart.items())?)
}

/// Parses a slot payload, reporting why it is unusable.
pub fn try_decode(payload: &str) -> StoreResult<Cart> {
    let items: Vec<CartLineItem> =
        serde_json::from_str(payload).map_err(|e| StoreError::MalformedSlot(e.to_string()))?;

    Cart::from_items(items).map_err(|e| StoreError::MalformedSlot(e.to_string()))
}

/// Parses a slot payload, falling back to an empty cart.
///
/// Malformed data never prevents startup.
pub fn decode(payload: Option<&str>) -> Cart {
    let Some(payload) = payload else {
        return Cart::new();
    };

    try_decode(payload).unwrap_or_else(|err| {
        warn!(error = %err, "Discarding malformed cart slot");
        Cart::new()
    })
}
