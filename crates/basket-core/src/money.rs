//! # Money
//!
//! Cart arithmetic runs on whole cents. Prices enter as decimals (JSON
//! numbers, CLI strings, TOML values) and are converted once, at the edge.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Edge (decimal)            Core (i64 cents)           Edge (decimal)    │
//! │                                                                         │
//! │  "12.99"  ── FromStr ──►                                                │
//! │  12.99    ── serde   ──►   Money(1299)   ── serde ──►  12.99            │
//! │                                │         ── Display ─► "$12.99"         │
//! │                                ▼                                        │
//! │               sums, threshold comparisons, tax: exact                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! A float subtotal such as `0.1 + 0.2` is `0.30000000000000004`; with cents
//! the `subtotal >= 50.00` free-shipping check can never flip on the last bit.
//!
//! ## Wire Format
//! The persisted cart stores `"price": 12.99`. Deserializing rounds half away
//! from zero to the nearest cent.
//!
//! ```rust
//! use basket_core::money::Money;
//!
//! let apples = Money::from_cents(1099);
//! assert_eq!((apples * 2).cents(), 2198);
//!
//! let typed: Money = "12.5".parse().unwrap();
//! assert_eq!(typed.to_string(), "$12.50");
//! ```

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, Mul, Sub};
use std::str::FromStr;

use crate::error::{CoreError, CoreResult};
use crate::types::TaxRate;

/// An amount of US dollars held as signed cents.
///
/// Signed because `threshold - subtotal` is taken before clamping to zero.
/// Arithmetic saturates at the i64 bounds instead of wrapping or panicking.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Money(i64);

impl Money {
    #[inline]
    pub const fn from_cents(cents: i64) -> Self {
        Money(cents)
    }

    /// Converts a decimal number of dollars, rounding to the nearest cent.
    ///
    /// `12.99` is `1298.9999…` cents in binary floating point and still
    /// lands on 1299.
    ///
    /// ## Errors
    /// `CoreError::InvalidPrice` for NaN, infinities and amounts beyond the
    /// i64 cent range.
    pub fn from_major_f64(amount: f64) -> CoreResult<Self> {
        if !amount.is_finite() {
            return Err(CoreError::invalid_price(
                amount.to_string(),
                "must be a finite number",
            ));
        }

        let cents = (amount * 100.0).round();
        if cents.abs() >= i64::MAX as f64 {
            return Err(CoreError::invalid_price(amount.to_string(), "out of range"));
        }

        Ok(Money(cents as i64))
    }

    #[inline]
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Dollars as a float. Only for the wire format, never for math.
    #[inline]
    pub fn as_major_f64(&self) -> f64 {
        self.0 as f64 / 100.0
    }

    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    #[inline]
    pub const fn is_positive(&self) -> bool {
        self.0 > 0
    }

    #[inline]
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Tax owed on this amount, rounded half-up to the cent.
    ///
    /// Computed in i128 as `(cents * bps + 5000) / 10000`.
    ///
    /// ```rust
    /// use basket_core::money::Money;
    /// use basket_core::types::TaxRate;
    ///
    /// let subtotal = Money::from_cents(1599);
    /// assert_eq!(subtotal.calculate_tax(TaxRate::from_bps(800)).cents(), 128);
    /// ```
    pub fn calculate_tax(&self, rate: TaxRate) -> Money {
        let owed = (i128::from(self.0) * i128::from(rate.bps()) + 5000) / 10000;
        Money(owed.clamp(i128::from(i64::MIN), i128::from(i64::MAX)) as i64)
    }
}

/// Accepts `12`, `12.5`, `12.99`, `.75`, `$12.99` and a leading `-`.
///
/// No floating point is involved. A third fractional digit is an error
/// rather than a silent rounding.
impl FromStr for Money {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let input = s.trim();
        let (negative, unsigned) = match input.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, input),
        };
        let digits = unsigned.strip_prefix('$').unwrap_or(unsigned);
        let (whole, frac) = digits.split_once('.').unwrap_or((digits, ""));

        if whole.is_empty() && frac.is_empty() {
            return Err(CoreError::invalid_price(s, "no digits"));
        }
        let all_digits = |part: &str| part.bytes().all(|b| b.is_ascii_digit());
        if !all_digits(whole) || !all_digits(frac) {
            return Err(CoreError::invalid_price(s, "expected a decimal number"));
        }
        if frac.len() > 2 {
            return Err(CoreError::invalid_price(s, "at most two decimal places"));
        }

        let dollars: i64 = match whole {
            "" => 0,
            _ => whole
                .parse()
                .map_err(|_| CoreError::invalid_price(s, "out of range"))?,
        };
        // Right-pad to two digits: "5" means 50 cents.
        let cents: i64 = format!("{:0<2}", frac).parse().unwrap_or(0);

        let total = dollars
            .checked_mul(100)
            .and_then(|c| c.checked_add(cents))
            .ok_or_else(|| CoreError::invalid_price(s, "out of range"))?;

        Ok(Money(if negative { -total } else { total }))
    }
}

impl Serialize for Money {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_f64(self.as_major_f64())
    }
}

impl<'de> Deserialize<'de> for Money {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let amount = f64::deserialize(deserializer)?;
        Money::from_major_f64(amount).map_err(D::Error::custom)
    }
}

/// `$1234.50`, `-$5.50`.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let abs = self.0.unsigned_abs();
        let sign = if self.0 < 0 { "-" } else { "" };
        write!(f, "{}${}.{:02}", sign, abs / 100, abs % 100)
    }
}

impl Add for Money {
    type Output = Money;

    fn add(self, rhs: Money) -> Money {
        Money(self.0.saturating_add(rhs.0))
    }
}

impl Sub for Money {
    type Output = Money;

    fn sub(self, rhs: Money) -> Money {
        Money(self.0.saturating_sub(rhs.0))
    }
}

/// Unit price × quantity.
impl Mul<i64> for Money {
    type Output = Money;

    fn mul(self, quantity: i64) -> Money {
        Money(self.0.saturating_mul(quantity))
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), Add::add)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_formats_dollars() {
        assert_eq!(Money::from_cents(599).to_string(), "$5.99");
        assert_eq!(Money::from_cents(6500).to_string(), "$65.00");
        assert_eq!(Money::from_cents(7).to_string(), "$0.07");
        assert_eq!(Money::from_cents(-4000).to_string(), "-$40.00");
        assert_eq!(Money::zero().to_string(), "$0.00");
    }

    #[test]
    fn test_cart_arithmetic() {
        let apple = Money::from_cents(1000);
        let banana = Money::from_cents(4500);

        assert_eq!(apple * 2 + banana, Money::from_cents(6500));
        assert_eq!(Money::from_cents(5000) - apple, Money::from_cents(4000));

        let subtotal: Money = [apple * 2, banana].into_iter().sum();
        assert_eq!(subtotal.cents(), 6500);
        assert_eq!(std::iter::empty::<Money>().sum::<Money>(), Money::zero());
    }

    #[test]
    fn test_from_major_f64_rounds_to_cent() {
        assert_eq!(Money::from_major_f64(12.99).unwrap().cents(), 1299);
        assert_eq!(Money::from_major_f64(0.1 + 0.2).unwrap().cents(), 30);
        assert_eq!(Money::from_major_f64(45.0).unwrap().cents(), 4500);
        assert_eq!(Money::from_major_f64(1.005).unwrap().cents(), 100);
        assert!(Money::from_major_f64(f64::NAN).is_err());
        assert!(Money::from_major_f64(f64::NEG_INFINITY).is_err());
        assert!(Money::from_major_f64(1e30).is_err());
    }

    #[test]
    fn test_parse_decimal_strings() {
        let cents = |s: &str| s.parse::<Money>().map(|m| m.cents());

        assert_eq!(cents("12").unwrap(), 1200);
        assert_eq!(cents("12.5").unwrap(), 1250);
        assert_eq!(cents(" 12.99 ").unwrap(), 1299);
        assert_eq!(cents("$5.99").unwrap(), 599);
        assert_eq!(cents(".75").unwrap(), 75);
        assert_eq!(cents("3.").unwrap(), 300);
        assert_eq!(cents("-3.10").unwrap(), -310);

        for bad in ["", "$", ".", "abc", "1.999", "1.2.3", "1,50", "+4"] {
            assert!(cents(bad).is_err(), "accepted {:?}", bad);
        }
    }

    #[test]
    fn test_json_is_number_of_dollars() {
        assert_eq!(serde_json::to_string(&Money::from_cents(1299)).unwrap(), "12.99");
        assert_eq!(serde_json::to_string(&Money::from_cents(4500)).unwrap(), "45.0");

        let whole: Money = serde_json::from_str("45").unwrap();
        assert_eq!(whole.cents(), 4500);

        assert!(serde_json::from_str::<Money>("\"12.99\"").is_err());
    }

    #[test]
    fn test_tax_rounds_half_up() {
        let ten = Money::from_cents(1000);
        assert_eq!(ten.calculate_tax(TaxRate::from_bps(800)).cents(), 80);

        // $10.00 at 8.25% = $0.825
        assert_eq!(ten.calculate_tax(TaxRate::from_bps(825)).cents(), 83);

        // $65.00 at 8% = $5.20
        let subtotal = Money::from_cents(6500);
        assert_eq!(subtotal.calculate_tax(TaxRate::from_bps(800)).cents(), 520);
        assert_eq!(subtotal.calculate_tax(TaxRate::zero()), Money::zero());
    }

    #[test]
    fn test_arithmetic_saturates() {
        let max = Money::from_cents(i64::MAX);
        assert_eq!(Money::from_cents(1000) * i64::MAX, max);
        assert_eq!(max + Money::from_cents(1), max);
        assert_eq!(
            Money::from_cents(i64::MIN) - Money::from_cents(1),
            Money::from_cents(i64::MIN)
        );
        assert_eq!([max, max].into_iter().sum::<Money>(), max);
        assert_eq!(max.calculate_tax(TaxRate::from_bps(10000)), max);
    }

    #[test]
    fn test_sign_checks_and_ordering() {
        assert!(Money::zero().is_zero());
        assert!(!Money::zero().is_positive());
        assert!(!Money::zero().is_negative());
        assert!(Money::from_cents(-1).is_negative());

        assert!(Money::from_cents(5000) >= Money::from_cents(5000));
        assert!(Money::from_cents(4999) < Money::from_cents(5000));
        assert_eq!(
            (Money::from_cents(1000) - Money::from_cents(5000)).max(Money::zero()),
            Money::zero()
        );
    }
}
