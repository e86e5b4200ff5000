//! # Product Commands
//!
//! Payload decoding and boundary checks for each product command.
//!
//! ## Handler Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Product Command Flow                                 │
//! │                                                                         │
//! │  raw payload bytes                                                     │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  serde decode ──── bad shape / unknown field ──► 400 Invalid payload   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  boundary checks ── id coercion, name, page/limit ──► 400              │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ProductsService ── NotFound ──► 404 / Unavailable ──► 400             │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  serde_json::Value (reply body)                                        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, error};
use ts_rs::TS;

use catalog_core::validation::{validate_page_param, validate_product_name, IntegerInput};
use catalog_core::{
    NewProduct, PaginationQuery, Price, ValidationError, DEFAULT_PAGE, DEFAULT_PAGE_LIMIT,
};

use crate::error::RpcError;
use crate::service::ProductsService;
use crate::store::ProductStore;

// =============================================================================
// Payloads
// =============================================================================

/// Payload of `create_product`.
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export)]
#[serde(deny_unknown_fields)]
pub struct CreateProductPayload {
    pub name: String,

    /// Up to 2 decimals, at least 1. Numeric strings are accepted.
    #[ts(type = "number")]
    pub price: Price,
}

/// Payload of `findAll_products`. Missing values use the defaults.
#[derive(Debug, Clone, Default, Deserialize, TS)]
#[ts(export)]
#[serde(deny_unknown_fields)]
pub struct FindAllPayload {
    #[serde(default)]
    #[ts(type = "number | null")]
    pub page: Option<IntegerInput>,

    #[serde(default)]
    #[ts(type = "number | null")]
    pub limit: Option<IntegerInput>,
}

/// Payload of commands keyed by a single id. Other fields are ignored.
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export)]
pub struct IdPayload {
    #[ts(type = "number | string")]
    pub id: IntegerInput,
}

/// Payload of `update_product`.
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export)]
#[serde(deny_unknown_fields)]
pub struct UpdateProductPayload {
    #[ts(type = "number | string")]
    pub id: IntegerInput,

    #[serde(default)]
    pub name: Option<String>,

    #[serde(default)]
    #[ts(type = "number | null")]
    pub price: Option<Price>,
}

// =============================================================================
// Handlers
// =============================================================================

pub async fn create_product<S: ProductStore>(
    service: &ProductsService<S>,
    payload: &[u8],
) -> Result<Value, RpcError> {
    let payload: CreateProductPayload = decode(payload)?;
    validate_product_name(&payload.name)?;

    let product = service
        .create(NewProduct {
            name: payload.name,
            price: payload.price,
        })
        .await?;

    to_value(&product)
}

pub async fn find_all_products<S: ProductStore>(
    service: &ProductsService<S>,
    payload: &[u8],
) -> Result<Value, RpcError> {
    let payload: FindAllPayload = decode::<Option<FindAllPayload>>(payload)?.unwrap_or_default();

    let page = match payload.page {
        Some(raw) => validate_page_param("page", raw.resolve("page")?)?,
        None => DEFAULT_PAGE,
    };
    let limit = match payload.limit {
        Some(raw) => validate_page_param("limit", raw.resolve("limit")?)?,
        None => DEFAULT_PAGE_LIMIT,
    };

    let page = service.find_all(PaginationQuery::new(page, limit)?).await?;
    to_value(&page)
}

pub async fn find_one_product<S: ProductStore>(
    service: &ProductsService<S>,
    payload: &[u8],
) -> Result<Value, RpcError> {
    let id = decode_id(payload)?;
    to_value(&service.find_one(id).await?)
}

/// The payload id is the only id used; there is no separate path id.
pub async fn update_product<S: ProductStore>(
    service: &ProductsService<S>,
    payload: &[u8],
) -> Result<Value, RpcError> {
    let payload: UpdateProductPayload = decode(payload)?;
    let id = payload.id.resolve_id()?;
    if let Some(name) = &payload.name {
        validate_product_name(name)?;
    }

    let product = service.update(id, payload.name, payload.price).await?;
    to_value(&product)
}

pub async fn update_product_status<S: ProductStore>(
    service: &ProductsService<S>,
    payload: &[u8],
) -> Result<Value, RpcError> {
    let id = decode_id(payload)?;
    to_value(&service.restore_status(id).await?)
}

pub async fn remove_product<S: ProductStore>(
    service: &ProductsService<S>,
    payload: &[u8],
) -> Result<Value, RpcError> {
    let id = decode_id(payload)?;
    to_value(&service.remove(id).await?)
}

pub async fn validate_products<S: ProductStore>(
    service: &ProductsService<S>,
    payload: &[u8],
) -> Result<Value, RpcError> {
    let ids: Vec<i64> = decode(payload)?;
    to_value(&service.validate_many(&ids).await?)
}

// =============================================================================
// Helpers
// =============================================================================

/// Decodes a JSON payload. An empty payload decodes as `null`.
fn decode<T: DeserializeOwned>(payload: &[u8]) -> Result<T, ValidationError> {
    let result = if payload.iter().all(u8::is_ascii_whitespace) {
        serde_json::from_value(Value::Null)
    } else {
        serde_json::from_slice(payload)
    };

    result.map_err(|e| {
        debug!(error = %e, "Rejected payload");
        ValidationError::InvalidPayload(e.to_string())
    })
}

fn decode_id(payload: &[u8]) -> Result<i64, ValidationError> {
    let payload: IdPayload = decode(payload)?;
    payload.id.resolve_id()
}

fn to_value<T: Serialize>(value: &T) -> Result<Value, RpcError> {
    serde_json::to_value(value).map_err(|e| {
        error!(error = %e, "Failed to encode reply body");
        RpcError::internal()
    })
}

// =============================================================================
// Unit Tests
// =============================================================================
