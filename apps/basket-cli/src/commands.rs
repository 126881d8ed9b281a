//! # Cart Commands
//!
//! One function per subcommand. Each takes the open store, performs a single
//! operation and returns the text to print.
//!
//! ## Cart Display
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Apple crate (a)                         x2             $20.00         │
//! │  Banana box (b)                          x1             $45.00         │
//! │  ─────────────────────────────────────────────────────────────         │
//! │  Items                                   3                             │
//! │  Subtotal                                               $65.00         │
//! │  Shipping                                               FREE           │
//! │  Total                                                  $65.00         │
//! │                                                                         │
//! │  (below the threshold: "Add $40.00 more for free shipping!")           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::error::Error;
use std::fmt::Write as _;

use basket_core::{
    CartLineItem, CoreError, Money, OrderSummary, ProductSnapshot, QuantityChange, TaxConfig,
};
use basket_store::{CartSlot, CartStore, CartTotals};
use serde::Serialize;

/// `show --json` payload: the lines plus their totals.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CartView<'a> {
    pub items: &'a [CartLineItem],
    pub totals: CartTotals,
}

impl<'a, S: CartSlot> From<&'a CartStore<S>> for CartView<'a> {
    fn from(store: &'a CartStore<S>) -> Self {
        CartView {
            items: store.items(),
            totals: store.totals(),
        }
    }
}

pub fn add<S: CartSlot>(
    store: &mut CartStore<S>,
    id: &str,
    name: &str,
    price: &str,
    image: &str,
) -> Result<String, CoreError> {
    let product = ProductSnapshot::parse(id, name, price, image)?;
    let label = product.name().to_string();
    let quantity = store.add_item(product);

    Ok(format!("Added {} (quantity {})", label, quantity))
}

pub fn set_quantity<S: CartSlot>(store: &mut CartStore<S>, id: &str, quantity: i64) -> String {
    match store.update_quantity(id, quantity) {
        QuantityChange::Updated => {
            let stored = store.item(id).map_or(quantity, |item| item.quantity);
            format!("Set {} to quantity {}", id.trim(), stored)
        }
        QuantityChange::Removed => format!("Removed {}", id),
        QuantityChange::NotInCart => format!("{} is not in the cart", id),
    }
}

pub fn remove<S: CartSlot>(store: &mut CartStore<S>, id: &str) -> String {
    if store.remove_item(id) {
        format!("Removed {}", id)
    } else {
        format!("{} is not in the cart", id)
    }
}

pub fn clear<S: CartSlot>(store: &mut CartStore<S>) -> String {
    store.clear_cart();
    "Cart cleared".to_string()
}

pub fn show<S: CartSlot>(store: &CartStore<S>) -> String {
    if store.is_empty() {
        return "Your cart is empty".to_string();
    }

    let mut out = String::new();
    for item in store.items() {
        let _ = writeln!(
            out,
            "{:<40} x{:<6} {:>12}",
            format!("{} ({})", item.name, item.id),
            item.quantity,
            item.line_total().to_string()
        );
    }

    let totals = store.totals();
    let _ = writeln!(out, "{}", "-".repeat(61));
    let _ = writeln!(out, "{:<40} {}", "Items", totals.total_items);
    let _ = writeln!(out, "{:<48} {:>12}", "Subtotal", totals.subtotal.to_string());
    let _ = writeln!(out, "{:<48} {:>12}", "Shipping", shipping_label(totals.shipping));
    let _ = write!(out, "{:<48} {:>12}", "Total", totals.total.to_string());

    if totals.amount_until_free_shipping.is_positive() {
        let _ = write!(
            out,
            "\n\nAdd {} more for free shipping!",
            totals.amount_until_free_shipping
        );
    }
    out
}

pub fn show_json<S: CartSlot>(store: &CartStore<S>) -> serde_json::Result<String> {
    serde_json::to_string_pretty(&CartView::from(store))
}

pub fn summary<S: CartSlot>(store: &CartStore<S>, tax: &TaxConfig) -> String {
    let summary = OrderSummary::compute(store.cart(), store.shipping_policy(), tax);

    let mut out = String::from("Order Summary\n");
    let _ = writeln!(
        out,
        "{:<48} {:>12}",
        format!("Subtotal ({} items)", store.total_items()),
        summary.subtotal.to_string()
    );
    let _ = writeln!(out, "{:<48} {:>12}", "Shipping", shipping_label(summary.shipping));
    let _ = writeln!(
        out,
        "{:<48} {:>12}",
        format!("Tax ({})", tax.rate),
        summary.tax.to_string()
    );
    let _ = write!(out, "{:<48} {:>12}", "Total", summary.grand_total.to_string());
    out
}

/// Fails if the last slot operation did not stick.
///
/// The process ends after one command, so an unsaved change is a lost change.
pub fn ensure_saved<S: CartSlot>(store: &CartStore<S>) -> Result<(), Box<dyn Error>> {
    match store.last_storage_error() {
        Some(err) => Err(format!("cart was not saved: {err}").into()),
        None => Ok(()),
    }
}

fn shipping_label(shipping: Money) -> String {
    if shipping.is_zero() {
        "FREE".to_string()
    } else {
        shipping.to_string()
    }
}
