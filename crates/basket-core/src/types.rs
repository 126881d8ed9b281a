//! # Domain Types
//!
//! Core domain types used throughout Basket.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   add_item()   ┌─────────────────┐                │
//! │  │ ProductSnapshot │ ─────────────► │  CartLineItem   │                │
//! │  │  ─────────────  │                │  ─────────────  │                │
//! │  │  id             │                │  id             │                │
//! │  │  name           │   (frozen at   │  name           │                │
//! │  │  price          │    add time)   │  price          │                │
//! │  │  image          │                │  image          │                │
//! │  └─────────────────┘                │  quantity >= 1  │                │
//! │                                     └─────────────────┘                │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────────┐                         │
//! │  │    TaxRate      │   │      TaxBase        │                         │
//! │  │  bps (u32)      │   │  Subtotal           │                         │
//! │  │  800 = 8%       │   │  TotalWithShipping  │                         │
//! │  └─────────────────┘   └─────────────────────┘                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use ts_rs::TS;

use crate::error::{CoreError, ValidationError};
use crate::money::Money;
use crate::validation::{validate_price, validate_product_id};

// =============================================================================
// Tax Rate
// =============================================================================

/// Tax rate represented in basis points (bps).
///
/// 1 basis point = 0.01%, so 800 bps = 8%.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaxRate(u32);

impl TaxRate {
    /// Creates a tax rate from basis points.
    #[inline]
    pub const fn from_bps(bps: u32) -> Self {
        TaxRate(bps)
    }

    /// Returns the rate in basis points.
    #[inline]
    pub const fn bps(&self) -> u32 {
        self.0
    }

    /// Returns the rate as a percentage (for display only).
    #[inline]
    pub fn percentage(&self) -> f64 {
        self.0 as f64 / 100.0
    }

    /// Zero tax rate.
    #[inline]
    pub const fn zero() -> Self {
        TaxRate(0)
    }
}

impl Default for TaxRate {
    fn default() -> Self {
        TaxRate::from_bps(crate::DEFAULT_TAX_RATE_BPS)
    }
}

impl fmt::Display for TaxRate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", self.percentage())
    }
}

// =============================================================================
// Tax Base
// =============================================================================

/// Which amount the checkout layer applies the tax rate to.
///
/// The storefront pages disagreed here: the cart page taxed the pre-shipping
/// subtotal while the drawer taxed the shipping-inclusive total. The choice
/// is explicit configuration rather than an accident of the call site.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum TaxBase {
    /// Tax = rate × subtotal. Shipping is not taxed.
    #[default]
    Subtotal,

    /// Tax = rate × (subtotal + shipping).
    TotalWithShipping,
}

impl fmt::Display for TaxBase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TaxBase::Subtotal => write!(f, "subtotal"),
            TaxBase::TotalWithShipping => write!(f, "total_with_shipping"),
        }
    }
}

impl FromStr for TaxBase {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace('-', "_").as_str() {
            "subtotal" => Ok(TaxBase::Subtotal),
            "total_with_shipping" | "total" => Ok(TaxBase::TotalWithShipping),
            other => Err(format!(
                "Unknown tax base: '{}'. Valid options: subtotal, total_with_shipping",
                other
            )),
        }
    }
}

// =============================================================================
// Product Snapshot
// =============================================================================

/// The catalog's view of a product at the moment a shopper adds it.
///
/// Only constructible through [`ProductSnapshot::new`] (or deserialization,
/// which runs the same checks), so every snapshot has a non-empty id and a
/// non-negative price.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawProductSnapshot")]
pub struct ProductSnapshot {
    id: String,
    name: String,
    price: Money,
    image: String,
}

#[derive(Deserialize)]
struct RawProductSnapshot {
    id: String,
    name: String,
    price: Money,
    #[serde(default)]
    image: String,
}

impl TryFrom<RawProductSnapshot> for ProductSnapshot {
    type Error = ValidationError;

    fn try_from(raw: RawProductSnapshot) -> Result<Self, Self::Error> {
        ProductSnapshot::new(raw.id, raw.name, raw.price, raw.image)
    }
}

impl ProductSnapshot {
    /// Creates a validated snapshot. The id is trimmed.
    ///
    /// ## Errors
    /// - `Required { field: "id" }` for an empty/blank id
    /// - `MustNotBeNegative { field: "price" }` for a negative price
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        price: Money,
        image: impl Into<String>,
    ) -> Result<Self, ValidationError> {
        let id = id.into().trim().to_string();
        validate_product_id(&id)?;
        validate_price(price)?;

        Ok(ProductSnapshot {
            id,
            name: name.into(),
            price,
            image: image.into(),
        })
    }

    /// Convenience constructor taking the price as a decimal string.
    pub fn parse(
        id: impl Into<String>,
        name: impl Into<String>,
        price: &str,
        image: impl Into<String>,
    ) -> Result<Self, CoreError> {
        let price: Money = price.parse()?;
        Ok(ProductSnapshot::new(id, name, price, image)?)
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn price(&self) -> Money {
        self.price
    }

    pub fn image(&self) -> &str {
        &self.image
    }
}

// =============================================================================
// Cart Line Item
// =============================================================================

/// One row in the cart: a distinct product and its quantity.
///
/// ## Persisted Layout
/// Field names and types match the storage slot exactly:
/// ```json
/// {"id": "apple", "name": "Apple crate", "price": 10.0, "image": "/a.png", "quantity": 2}
/// ```
///
/// ## Price Freezing
/// `name`, `price` and `image` are copied from the catalog when the row is
/// created and never refreshed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct CartLineItem {
    /// Product id; unique within the cart.
    pub id: String,

    /// Display name at time of adding.
    pub name: String,

    /// Unit price at time of adding.
    #[ts(type = "number")]
    pub price: Money,

    /// Thumbnail URI at time of adding.
    pub image: String,

    /// Always >= 1 while the row is in a cart.
    #[ts(type = "number")]
    pub quantity: i64,
}

impl CartLineItem {
    /// Creates a row from a catalog snapshot.
    pub fn from_snapshot(snapshot: ProductSnapshot, quantity: i64) -> Self {
        CartLineItem {
            id: snapshot.id,
            name: snapshot.name,
            price: snapshot.price,
            image: snapshot.image,
            quantity,
        }
    }

    /// Unit price × quantity.
    #[inline]
    pub fn line_total(&self) -> Money {
        self.price * self.quantity
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_snapshot_validation() {
        assert!(ProductSnapshot::new("apple", "Apple", Money::from_cents(199), "").is_ok());
        assert!(ProductSnapshot::new("free", "Sample", Money::zero(), "").is_ok());

        assert_eq!(
            ProductSnapshot::new("  ", "Blank", Money::from_cents(100), ""),
            Err(ValidationError::Required {
                field: "id".to_string()
            })
        );
        assert_eq!(
            ProductSnapshot::new("neg", "Negative", Money::from_cents(-1), ""),
            Err(ValidationError::MustNotBeNegative {
                field: "price".to_string()
            })
        );
    }

    #[test]
    fn test_snapshot_trims_id() {
        let snapshot = ProductSnapshot::new(" kiwi ", "Kiwi", Money::from_cents(50), "").unwrap();
        assert_eq!(snapshot.id(), "kiwi");
    }

    #[test]
    fn test_snapshot_parse() {
        let snapshot = ProductSnapshot::parse("mango", "Mango", "3.49", "/m.png").unwrap();
        assert_eq!(snapshot.price().cents(), 349);
        assert_eq!(snapshot.image(), "/m.png");

        assert!(ProductSnapshot::parse("mango", "Mango", "three", "").is_err());
    }

    #[test]
    fn test_snapshot_deserialize_validates() {
        let ok: ProductSnapshot =
            serde_json::from_str(r#"{"id":"pear","name":"Pear","price":1.25}"#).unwrap();
        assert_eq!(ok.price().cents(), 125);
        assert_eq!(ok.image(), "");

        let bad = serde_json::from_str::<ProductSnapshot>(r#"{"id":"","name":"x","price":1}"#);
        assert!(bad.is_err());
    }

    #[test]
    fn test_line_item_layout() {
        let snapshot = ProductSnapshot::new("a", "Apple", Money::from_cents(1000), "/a.png").unwrap();
        let item = CartLineItem::from_snapshot(snapshot, 2);

        assert_eq!(item.line_total().cents(), 2000);
        assert_eq!(
            serde_json::to_value(&item).unwrap(),
            serde_json::json!({
                "id": "a",
                "name": "Apple",
                "price": 10.0,
                "image": "/a.png",
                "quantity": 2
            })
        );
    }

    #[test]
    fn test_tax_base_parsing() {
        assert_eq!("subtotal".parse::<TaxBase>().unwrap(), TaxBase::Subtotal);
        assert_eq!(
            "total-with-shipping".parse::<TaxBase>().unwrap(),
            TaxBase::TotalWithShipping
        );
        assert_eq!("TOTAL".parse::<TaxBase>().unwrap(), TaxBase::TotalWithShipping);
        assert!("gross".parse::<TaxBase>().is_err());
    }

    #[test]
    fn test_tax_rate_display() {
        assert_eq!(TaxRate::from_bps(800).to_string(), "8%");
        assert_eq!(TaxRate::from_bps(825).to_string(), "8.25%");
        assert_eq!(TaxRate::default().bps(), 800);
    }
}
