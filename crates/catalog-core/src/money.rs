//! # Money Module
//!
//! Provides the `Price` type for product prices.
//!
//! ## Why Integer Cents?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  Callers send prices as JSON numbers:  { "price": 10.99 }              │
//! │  In binary floating point 10.99 * 100 = 1098.9999999999998             │
//! │                                                                         │
//! │  OUR SOLUTION: convert once at the boundary                             │
//! │    10.99 ──► digits "10" + "99" = 1099 cents ──► stored as INTEGER      │
//! │    1099 cents ──► 1099 / 100 = 10.99 ──► sent back as a JSON number     │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Rules
//! - at most 2 fractional digits (`10.999` is rejected, not rounded)
//! - never below 1.00
//!
//! ## Usage
//! ```rust
//! use catalog_core::money::Price;
//!
//! let price = Price::from_decimal(10.99).unwrap();
//! assert_eq!(price.cents(), 1099);
//! assert_eq!(price.to_string(), "10.99");
//! ```

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

use crate::error::ValidationError;
use crate::MIN_PRICE_CENTS;

/// Fractional digits a price may carry.
pub const PRICE_DECIMAL_PLACES: u32 = 2;

/// A product price held in cents.
///
/// The inner value is always `>= MIN_PRICE_CENTS`; the only ways to build a
/// `Price` go through the checks below.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Price(i64);

impl Price {
    /// Creates a price from cents.
    ///
    /// ## Example
    /// ```rust
    /// use catalog_core::money::Price;
    ///
    /// assert_eq!(Price::from_cents(1099).unwrap().cents(), 1099);
    /// assert!(Price::from_cents(99).is_err());
    /// ```
    pub fn from_cents(cents: i64) -> Result<Self, ValidationError> {
        if cents < MIN_PRICE_CENTS {
            return Err(below_minimum());
        }
        Ok(Price(cents))
    }

    /// Creates a price from a decimal amount as it arrives on the wire.
    ///
    /// ## Errors
    /// - `InvalidFormat` for NaN / infinite / out-of-range values
    /// - `TooManyDecimals` when more than 2 fractional digits are present
    /// - `BelowMinimum` for amounts under 1
    pub fn from_decimal(value: f64) -> Result<Self, ValidationError> {
        if !value.is_finite() {
            return Err(ValidationError::InvalidFormat {
                field: "price".to_string(),
                reason: "must be a finite number".to_string(),
            });
        }

        // Shortest round-trip form: 10.99 prints "10.99", never 10.989999...
        let repr = value.abs().to_string();
        let (whole, fraction) = repr.split_once('.').unwrap_or((repr.as_str(), ""));

        if fraction.len() > PRICE_DECIMAL_PLACES as usize {
            return Err(ValidationError::TooManyDecimals {
                field: "price".to_string(),
                max: PRICE_DECIMAL_PLACES,
            });
        }

        let too_large = || ValidationError::InvalidFormat {
            field: "price".to_string(),
            reason: "is too large".to_string(),
        };

        let whole: i64 = whole.parse().map_err(|_| too_large())?;
        let fraction: i64 = format!("{fraction:0<2}").parse().map_err(|_| too_large())?;
        let cents = whole
            .checked_mul(100)
            .and_then(|c| c.checked_add(fraction))
            .ok_or_else(too_large)?;

        if value.is_sign_negative() {
            return Err(below_minimum());
        }

        Price::from_cents(cents)
    }

    /// Returns the value in cents.
    #[inline]
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Returns the value as a decimal amount (the wire representation).
    #[inline]
    pub fn to_decimal(&self) -> f64 {
        self.0 as f64 / 100.0
    }
}

fn below_minimum() -> ValidationError {
    ValidationError::BelowMinimum {
        field: "price".to_string(),
        min: "1".to_string(),
    }
}

impl TryFrom<i64> for Price {
    type Error = ValidationError;

    fn try_from(cents: i64) -> Result<Self, Self::Error> {
        Price::from_cents(cents)
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{:02}", self.0 / 100, self.0 % 100)
    }
}

impl Serialize for Price {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_f64(self.to_decimal())
    }
}

/// Accepts a JSON number or a numeric string (`"10.5"`), then applies the
/// decimal rules.
impl<'de> Deserialize<'de> for Price {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Wire {
            Number(f64),
            Text(String),
        }

        let value = match Wire::deserialize(deserializer)? {
            Wire::Number(n) => n,
            Wire::Text(s) => s
                .trim()
                .parse::<f64>()
                .map_err(|_| D::Error::custom("price must be a number"))?,
        };

        Price::from_decimal(value).map_err(D::Error::custom)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
