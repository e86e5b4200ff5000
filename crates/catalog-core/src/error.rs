//! # Error Types
//!
//! Domain-specific error types for catalog-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  catalog-core errors (this file)                                       │
//! │  ├── CoreError        - Catalog rule violations (not found, ...)      │
//! │  └── ValidationError  - Inbound payload failures                       │
//! │                                                                         │
//! │  catalog-db errors (separate crate)                                    │
//! │  └── DbError          - Database operation failures                    │
//! │                                                                         │
//! │  products-service errors                                               │
//! │  ├── ServiceError     - What a command handler returns                 │
//! │  └── RpcError         - What the caller sees (status + message)        │
//! │                                                                         │
//! │  Flow: ValidationError ─────────────────────────► RpcError (400)      │
//! │        CoreError → ServiceError ─────────────────► RpcError (404/400)  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Catalog rule violations raised by the domain service.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoreError {
    /// No product carries this id (available or not).
    #[error("Product with id #{0} not found")]
    ProductNotFound(i64),

    /// Bulk validation could not resolve every requested id.
    ///
    /// ## When This Occurs
    /// - `validate_products` with an id that was never issued
    ///
    /// The message lists each unresolved id, comma separated.
    #[error("Some products not found or are not available: {}", join_ids(.missing))]
    ProductsUnavailable { missing: Vec<i64> },
}

fn join_ids(ids: &[i64]) -> String {
    ids.iter()
        .map(|id| id.to_string())
        .collect::<Vec<_>>()
        .join(",")
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// Raised at the command boundary before a handler runs.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Value must be positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Numeric value is below the allowed minimum.
    #[error("{field} must not be less than {min}")]
    BelowMinimum { field: String, min: String },

    /// Decimal value carries more fractional digits than allowed.
    #[error("{field} must have at most {max} decimal places")]
    TooManyDecimals { field: String, max: u32 },

    /// Invalid format (e.g., non-numeric id).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },

    /// Payload could not be decoded into the command's shape.
    #[error("Invalid payload: {0}")]
    InvalidPayload(String),
}

// =============================================================================
// Unit Tests
// =============================================================================
