//! # Domain Types
//!
//! The product record and the write models that create or change it.
//!
//! ## Type Overview
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    Product      │   │   NewProduct    │   │ ProductChanges  │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id (i64)       │   │  name           │   │  name?          │       │
//! │  │  name           │   │  price          │   │  price?         │       │
//! │  │  price (cents)  │   └─────────────────┘   │  available?     │       │
//! │  │  available      │                         └─────────────────┘       │
//! │  │  created_at     │                                                    │
//! │  │  updated_at     │                                                    │
//! │  └─────────────────┘                                                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Availability
//! `available = false` is the soft-delete marker. Unavailable products are
//! hidden from listings but still resolve by id.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::money::Price;

// =============================================================================
// Product
// =============================================================================

/// A catalog product.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// Identifier assigned by the database. Never reused.
    #[ts(type = "number")]
    pub id: i64,

    /// Display name.
    pub name: String,

    /// Price; stored as cents, sent as a decimal number.
    #[cfg_attr(feature = "sqlx", sqlx(rename = "price_cents", try_from = "i64"))]
    #[ts(type = "number")]
    pub price: Price,

    /// Whether product is listed (soft delete marker).
    pub available: bool,

    /// When the product was created.
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,

    /// When the product was last written.
    #[ts(as = "String")]
    pub updated_at: DateTime<Utc>,
}

// =============================================================================
// Write Models
// =============================================================================

/// Fields required to create a product. New products are always available.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewProduct {
    pub name: String,
    pub price: Price,
}

/// A partial update. `None` leaves the stored value untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProductChanges {
    pub name: Option<String>,
    pub price: Option<Price>,
    pub available: Option<bool>,
}

impl ProductChanges {
    /// Changes to name and/or price only.
    pub fn details(name: Option<String>, price: Option<Price>) -> Self {
        ProductChanges {
            name,
            price,
            available: None,
        }
    }

    /// Changes to the availability flag only.
    pub fn availability(available: bool) -> Self {
        ProductChanges {
            available: Some(available),
            ..Default::default()
        }
    }

    /// True when nothing would be written.
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.price.is_none() && self.available.is_none()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_product_wire_shape() {
        let now = Utc::now();
        let product = Product {
            id: 7,
            name: "Keyboard".to_string(),
            price: Price::from_cents(4999).unwrap(),
            available: true,
            created_at: now,
            updated_at: now,
        };

        let json = serde_json::to_value(&product).unwrap();
        assert_eq!(json["id"], 7);
        assert_eq!(json["price"], 49.99);
        assert_eq!(json["available"], true);
        assert!(json.get("createdAt").is_some());
        assert!(json.get("updatedAt").is_some());
    }

    #[test]
    fn test_changes_constructors() {
        assert!(ProductChanges::default().is_empty());
        assert!(ProductChanges::details(None, None).is_empty());

        let off = ProductChanges::availability(false);
        assert_eq!(off.available, Some(false));
        assert!(off.name.is_none() && off.price.is_none());
    }
}
