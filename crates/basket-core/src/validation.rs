//! # Validation Module
//!
//! Input validation for catalog snapshots, persisted rows and pricing config.
//!
//! ## Where Checks Run
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Checks, outermost first                            │
//! │                                                                         │
//! │  Layer 1: Edge parsing (CLI args, JSON, TOML)                          │
//! │  └── Money / TaxBase parsing                                           │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: THIS MODULE                                                  │
//! │  ├── ProductSnapshot::new  (id, price)                                 │
//! │  ├── Cart::from_items      (every persisted row)                       │
//! │  └── StoreConfig::validate (shipping + tax settings)                   │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Cart operations (infallible, invariants already hold)        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use crate::error::ValidationError;
use crate::money::Money;
use crate::types::CartLineItem;
use crate::MAX_ITEM_QUANTITY;

/// Result of a single invariant check.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Validates a product id: must be non-empty after trimming.
///
/// ## Example
/// ```rust
/// use basket_core::validation::validate_product_id;
///
/// assert!(validate_product_id("apple").is_ok());
/// assert!(validate_product_id("   ").is_err());
/// ```
pub fn validate_product_id(id: &str) -> ValidationResult<()> {
    if id.trim().is_empty() {
        return Err(ValidationError::Required {
            field: "id".to_string(),
        });
    }

    Ok(())
}

/// Validates a unit price. Zero is allowed (free samples).
pub fn validate_price(price: Money) -> ValidationResult<()> {
    if price.is_negative() {
        return Err(ValidationError::MustNotBeNegative {
            field: "price".to_string(),
        });
    }

    Ok(())
}

/// Validates a line item quantity: `1..=MAX_ITEM_QUANTITY`.
pub fn validate_quantity(qty: i64) -> ValidationResult<()> {
    if qty <= 0 {
        return Err(ValidationError::MustBePositive {
            field: "quantity".to_string(),
        });
    }
    if qty > MAX_ITEM_QUANTITY {
        return Err(ValidationError::OutOfRange {
            field: "quantity".to_string(),
            min: 1,
            max: MAX_ITEM_QUANTITY,
        });
    }

    Ok(())
}

/// Validates a tax rate in basis points (0% to 100%).
pub fn validate_tax_rate_bps(bps: u32) -> ValidationResult<()> {
    if bps > 10000 {
        return Err(ValidationError::OutOfRange {
            field: "tax_rate".to_string(),
            min: 0,
            max: 10000,
        });
    }

    Ok(())
}

/// Validates a single persisted row in isolation.
///
/// Uniqueness across rows is checked by `Cart::from_items`.
pub fn validate_line_item(item: &CartLineItem) -> ValidationResult<()> {
    validate_product_id(&item.id)?;
    validate_price(item.price)?;
    validate_quantity(item.quantity)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(id: &str, price_cents: i64, quantity: i64) -> CartLineItem {
        CartLineItem {
            id: id.to_string(),
            name: "Row".to_string(),
            price: Money::from_cents(price_cents),
            image: String::new(),
            quantity,
        }
    }

    #[test]
    fn test_validate_product_id() {
        assert!(validate_product_id("64f1c0ffee").is_ok());
        assert!(validate_product_id("").is_err());
        assert!(validate_product_id("\t").is_err());
    }

    #[test]
    fn test_validate_price() {
        assert!(validate_price(Money::zero()).is_ok());
        assert!(validate_price(Money::from_cents(1099)).is_ok());
        assert!(validate_price(Money::from_cents(-100)).is_err());
    }

    #[test]
    fn test_quantity_must_be_at_least_one() {
        for ok in [1, 2, 1000, MAX_ITEM_QUANTITY] {
            assert!(validate_quantity(ok).is_ok());
        }
        for bad in [0, -1, i64::MIN, MAX_ITEM_QUANTITY + 1, i64::MAX] {
            assert!(validate_quantity(bad).is_err());
        }
    }

    #[test]
    fn test_tax_rate_caps_at_one_hundred_percent() {
        assert_eq!(validate_tax_rate_bps(800), Ok(()));
        assert_eq!(validate_tax_rate_bps(10000), Ok(()));
        assert_eq!(
            validate_tax_rate_bps(10001),
            Err(ValidationError::OutOfRange {
                field: "tax_rate".to_string(),
                min: 0,
                max: 10000,
            })
        );
    }

    #[test]
    fn test_validate_line_item() {
        assert!(validate_line_item(&row("a", 100, 1)).is_ok());
        assert!(validate_line_item(&row("", 100, 1)).is_err());
        assert!(validate_line_item(&row("a", -5, 1)).is_err());
        assert!(validate_line_item(&row("a", 100, 0)).is_err());
    }
}
