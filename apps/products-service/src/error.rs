//! # RPC Error Type
//!
//! The error half of every command reply.
//!
//! ## Status Mapping
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error → Reply Status                                 │
//! │                                                                         │
//! │  ValidationError ─────────────────────────────► 400  (message as is)   │
//! │  CoreError::ProductsUnavailable ──────────────► 400  (lists the ids)   │
//! │  CoreError::ProductNotFound ──────────────────► 404  (names the id)    │
//! │  Unknown command ─────────────────────────────► 404                    │
//! │  StoreError ──────────────────────────────────► 500  (generic message, │
//! │                                                       detail logged)   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Serialization
//! ```json
//! { "status": 404, "message": "Product with id #9 not found" }
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::error;
use ts_rs::TS;

use catalog_core::{CoreError, ValidationError};

use crate::service::ServiceError;

/// Error returned to the caller of a command.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize, TS)]
#[ts(export)]
#[error("{message} ({status})")]
pub struct RpcError {
    /// HTTP-style status code.
    pub status: u16,

    /// Human-readable message.
    pub message: String,
}

impl RpcError {
    pub fn new(status: u16, message: impl Into<String>) -> Self {
        RpcError {
            status,
            message: message.into(),
        }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(400, message)
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(404, message)
    }

    /// Internal failure. The detail stays in the logs.
    pub fn internal() -> Self {
        Self::new(500, "Internal server error")
    }

    pub fn unknown_command(command: &str) -> Self {
        Self::not_found(format!("Unknown command: {command}"))
    }
}

impl From<ValidationError> for RpcError {
    fn from(err: ValidationError) -> Self {
        RpcError::bad_request(err.to_string())
    }
}

impl From<CoreError> for RpcError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::ProductNotFound(_) => RpcError::not_found(err.to_string()),
            CoreError::ProductsUnavailable { .. } => RpcError::bad_request(err.to_string()),
        }
    }
}

impl From<ServiceError> for RpcError {
    fn from(err: ServiceError) -> Self {
        match err {
            ServiceError::Domain(core) => core.into(),
            ServiceError::Store(store) => {
                error!(error = %store, "Store operation failed");
                RpcError::internal()
            }
        }
    }
}
