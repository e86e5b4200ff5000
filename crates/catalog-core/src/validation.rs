//! # Validation Module
//!
//! Boundary validation for inbound command payloads.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Payload decoding (serde)                                     │
//! │  ├── Shape and field types                                             │
//! │  └── Unknown fields rejected                                           │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: THIS MODULE                                                  │
//! │  ├── Id coercion ("12" → 12) and positivity                            │
//! │  ├── Name presence                                                      │
//! │  └── Page / limit bounds                                               │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Database (SQLite)                                            │
//! │  ├── NOT NULL constraints                                              │
//! │  └── CHECK (price_cents >= 100)                                        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Price rules live on [`Price`](crate::money::Price) itself.
//!
//! ## Usage
//! ```rust
//! use catalog_core::validation::{parse_id, validate_product_name};
//!
//! assert_eq!(parse_id("12").unwrap(), 12);
//! assert!(parse_id("abc").is_err());
//! assert!(validate_product_name("Mouse").is_ok());
//! ```

use serde::Deserialize;

use crate::error::ValidationError;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// String Validators
// =============================================================================

/// Validates a product name.
///
/// ## Rules
/// - Must not be empty or whitespace only
pub fn validate_product_name(name: &str) -> ValidationResult<()> {
    if name.trim().is_empty() {
        return Err(ValidationError::Required {
            field: "name".to_string(),
        });
    }

    Ok(())
}

// =============================================================================
// Identifier Validators
// =============================================================================

/// Parses a product id that arrived as text.
///
/// ## Example
/// ```rust
/// use catalog_core::validation::parse_id;
///
/// assert_eq!(parse_id(" 7 ").unwrap(), 7);
/// assert!(parse_id("0").is_err());
/// assert!(parse_id("7a").is_err());
/// ```
pub fn parse_id(raw: &str) -> ValidationResult<i64> {
    let id = raw
        .trim()
        .parse::<i64>()
        .map_err(|_| ValidationError::InvalidFormat {
            field: "id".to_string(),
            reason: "must be a numeric string".to_string(),
        })?;

    validate_id(id)
}

/// Validates a numeric product id.
///
/// ## Rules
/// - Must be positive (database ids start at 1)
pub fn validate_id(id: i64) -> ValidationResult<i64> {
    if id <= 0 {
        return Err(ValidationError::MustBePositive {
            field: "id".to_string(),
        });
    }

    Ok(id)
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates a page or limit value.
///
/// ## Rules
/// - Must be >= 1
///
/// There is no upper bound; a page past the end is answered with no data.
pub fn validate_page_param(field: &str, value: i64) -> ValidationResult<u64> {
    u64::try_from(value)
        .ok()
        .filter(|v| *v >= 1)
        .ok_or_else(|| ValidationError::MustBePositive {
            field: field.to_string(),
        })
}

// =============================================================================
// Wire Helpers
// =============================================================================

/// An integer that may arrive as a JSON number or as a numeric string.
///
/// ```rust
/// use catalog_core::validation::IntegerInput;
///
/// let n: IntegerInput = serde_json::from_str("\"5\"").unwrap();
/// assert_eq!(n.resolve("page").unwrap(), 5);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum IntegerInput {
    Number(i64),
    Text(String),
}

impl IntegerInput {
    /// Coerces the input to an integer.
    pub fn resolve(&self, field: &str) -> ValidationResult<i64> {
        match self {
            IntegerInput::Number(n) => Ok(*n),
            IntegerInput::Text(s) => {
                s.trim()
                    .parse::<i64>()
                    .map_err(|_| ValidationError::InvalidFormat {
                        field: field.to_string(),
                        reason: "must be an integer".to_string(),
                    })
            }
        }
    }

    /// Coerces the input to a product id.
    pub fn resolve_id(&self) -> ValidationResult<i64> {
        match self {
            IntegerInput::Number(n) => validate_id(*n),
            IntegerInput::Text(s) => parse_id(s),
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
