//! # catalog-core: Pure Domain Logic for the Products Catalog
//!
//! This crate holds the product model and every rule that can be checked
//! without touching storage or the network.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     Products Catalog Architecture                       │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                     Message Bus (NATS)                          │   │
//! │  │   create_product, findAll_products, validate_products, ...      │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │             products-service (dispatcher + service)             │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ catalog-core (THIS CRATE) ★                     │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌────────────┐  ┌───────────┐  │   │
//! │  │   │   types   │  │   money   │  │ pagination │  │ validation│  │   │
//! │  │   │  Product  │  │   Price   │  │  PageMeta  │  │   rules   │  │   │
//! │  │   └───────────┘  └───────────┘  └────────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO NETWORK • PURE FUNCTIONS           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                  catalog-db (Database Layer)                    │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Product record and write models
//! - [`money`] - `Price` stored as integer cents
//! - [`pagination`] - Offset pagination query and page metadata
//! - [`error`] - Domain error types
//! - [`validation`] - Boundary validation rules
//!
//! ## Example Usage
//!
//! ```rust
//! use catalog_core::money::Price;
//!
//! let price = Price::from_decimal(10.99).unwrap();
//! assert_eq!(price.cents(), 1099);
//! assert!(Price::from_decimal(0.5).is_err());
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod money;
pub mod pagination;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use error::{CoreError, ValidationError};
pub use money::Price;
pub use pagination::{PageMeta, Paginated, PaginationQuery};
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Page requested when a list command omits `page`.
pub const DEFAULT_PAGE: u64 = 1;

/// Page size used when a list command omits `limit`.
pub const DEFAULT_PAGE_LIMIT: u64 = 10;

/// Lowest price a product may carry, in cents (1.00).
pub const MIN_PRICE_CENTS: i64 = 100;
