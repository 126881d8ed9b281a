//! # Pricing
//!
//! Shipping policy, tax configuration and the checkout order summary.
//!
//! ## Where Each Figure Comes From
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Cart.subtotal() ─────────┬──────────────────────────────► Subtotal     │
//! │                           │                                             │
//! │                           ▼                                             │
//! │  ShippingPolicy.shipping_for(subtotal) ──────────────────► Shipping     │
//! │     subtotal >= threshold → $0.00, else flat fee                        │
//! │                           │                                             │
//! │                           ▼                                             │
//! │  TaxConfig.tax_for(subtotal, shipping) ──────────────────► Tax          │
//! │     base = Subtotal           → rate × subtotal                         │
//! │     base = TotalWithShipping  → rate × (subtotal + shipping)            │
//! │                                                                         │
//! │  Grand total = subtotal + shipping + tax                                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The cart store only owns subtotal / shipping / total. Tax belongs to the
//! checkout layer, which builds an [`OrderSummary`].

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::cart::Cart;
use crate::money::Money;
use crate::types::{TaxBase, TaxRate};
use crate::{FLAT_SHIPPING_FEE, FREE_SHIPPING_THRESHOLD};

// =============================================================================
// Shipping Policy
// =============================================================================

/// Free shipping at or above a threshold, a flat fee below it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShippingPolicy {
    /// Subtotal at which shipping becomes free.
    #[serde(default = "default_free_threshold")]
    pub free_threshold: Money,

    /// Fee charged below the threshold.
    #[serde(default = "default_flat_fee")]
    pub flat_fee: Money,
}

fn default_free_threshold() -> Money {
    FREE_SHIPPING_THRESHOLD
}

fn default_flat_fee() -> Money {
    FLAT_SHIPPING_FEE
}

impl Default for ShippingPolicy {
    /// $5.99 below $50.00, free at or above.
    fn default() -> Self {
        ShippingPolicy {
            free_threshold: default_free_threshold(),
            flat_fee: default_flat_fee(),
        }
    }
}

impl ShippingPolicy {
    pub fn new(free_threshold: Money, flat_fee: Money) -> Self {
        ShippingPolicy {
            free_threshold,
            flat_fee,
        }
    }

    /// Shipping charged for a given subtotal.
    pub fn shipping_for(&self, subtotal: Money) -> Money {
        if subtotal >= self.free_threshold {
            Money::zero()
        } else {
            self.flat_fee
        }
    }

    /// How much more the shopper must add to qualify for free shipping.
    ///
    /// Zero once the threshold is reached.
    pub fn amount_until_free(&self, subtotal: Money) -> Money {
        (self.free_threshold - subtotal).max(Money::zero())
    }
}

// =============================================================================
// Tax Configuration
// =============================================================================

/// Tax rate plus the amount it applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TaxConfig {
    #[serde(default, rename = "rate_bps")]
    pub rate: TaxRate,

    #[serde(default)]
    pub base: TaxBase,
}

impl TaxConfig {
    pub fn new(rate: TaxRate, base: TaxBase) -> Self {
        TaxConfig { rate, base }
    }

    /// Tax owed, rounded half-up to the cent.
    pub fn tax_for(&self, subtotal: Money, shipping: Money) -> Money {
        let taxable = match self.base {
            TaxBase::Subtotal => subtotal,
            TaxBase::TotalWithShipping => subtotal + shipping,
        };
        taxable.calculate_tax(self.rate)
    }
}

// =============================================================================
// Order Summary
// =============================================================================

/// The figures shown in the checkout "Order Summary" panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct OrderSummary {
    #[ts(type = "number")]
    pub subtotal: Money,
    #[ts(type = "number")]
    pub shipping: Money,
    #[ts(type = "number")]
    pub tax: Money,
    #[ts(type = "number")]
    pub grand_total: Money,
    pub tax_rate_bps: u32,
    pub tax_base: TaxBase,
}

impl OrderSummary {
    /// Computes the summary for a cart.
    ///
    /// ## Example
    /// ```rust
    /// use basket_core::{Cart, Money, OrderSummary, ProductSnapshot, ShippingPolicy, TaxConfig};
    ///
    /// let mut cart = Cart::new();
    /// cart.add_item(ProductSnapshot::new("a", "Apples", Money::from_cents(1000), "").unwrap());
    ///
    /// let summary = OrderSummary::compute(&cart, &ShippingPolicy::default(), &TaxConfig::default());
    /// assert_eq!(summary.shipping.cents(), 599);
    /// assert_eq!(summary.tax.cents(), 80);
    /// assert_eq!(summary.grand_total.cents(), 1679);
    /// ```
    pub fn compute(cart: &Cart, shipping: &ShippingPolicy, tax: &TaxConfig) -> Self {
        let subtotal = cart.subtotal();
        let shipping_cost = shipping.shipping_for(subtotal);
        let tax_amount = tax.tax_for(subtotal, shipping_cost);

        OrderSummary {
            subtotal,
            shipping: shipping_cost,
            tax: tax_amount,
            grand_total: subtotal + shipping_cost + tax_amount,
            tax_rate_bps: tax.rate.bps(),
            tax_base: tax.base,
        }
    }
}
