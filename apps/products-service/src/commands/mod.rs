//! # Command Dispatch
//!
//! Routes a named command and its JSON payload to a handler and wraps the
//! outcome in a reply envelope.
//!
//! ## Commands
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Command                 Payload                     Result             │
//! │  ─────────────────────   ─────────────────────────   ────────────────── │
//! │  create_product          {name, price}               Product            │
//! │  findAll_products        {page?, limit?}             {data, meta}       │
//! │  findOne_product         {id}                        Product            │
//! │  update_product          {id, name?, price?}         Product            │
//! │  update_product_status   {id}                        Product            │
//! │  remove_product          {id}                        Product            │
//! │  validate_products       [id, ...]                   Product[]          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Reply Envelope
//! ```json
//! { "response": { "id": 1, "name": "Mouse", ... } }
//! { "err": { "status": 404, "message": "Product with id #9 not found" } }
//! ```

pub mod product;

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use serde::Serialize;
use serde_json::Value;
use tracing::{debug, warn};

use crate::error::RpcError;
use crate::service::ProductsService;
use crate::store::ProductStore;

// =============================================================================
// Command Names
// =============================================================================

/// Every command the service answers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Command {
    CreateProduct,
    FindAllProducts,
    FindOneProduct,
    UpdateProduct,
    UpdateProductStatus,
    RemoveProduct,
    ValidateProducts,
}

impl Command {
    pub const ALL: [Command; 7] = [
        Command::CreateProduct,
        Command::FindAllProducts,
        Command::FindOneProduct,
        Command::UpdateProduct,
        Command::UpdateProductStatus,
        Command::RemoveProduct,
        Command::ValidateProducts,
    ];

    /// The name callers use on the bus.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Command::CreateProduct => "create_product",
            Command::FindAllProducts => "findAll_products",
            Command::FindOneProduct => "findOne_product",
            Command::UpdateProduct => "update_product",
            Command::UpdateProductStatus => "update_product_status",
            Command::RemoveProduct => "remove_product",
            Command::ValidateProducts => "validate_products",
        }
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Command {
    type Err = RpcError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Command::ALL
            .into_iter()
            .find(|command| command.as_str() == s)
            .ok_or_else(|| RpcError::unknown_command(s))
    }
}

// =============================================================================
// Reply Envelope
// =============================================================================

/// What goes back to the caller.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum CommandReply {
    Response(Value),
    Err(RpcError),
}

impl CommandReply {
    pub fn is_err(&self) -> bool {
        matches!(self, CommandReply::Err(_))
    }

    /// Encodes the envelope as JSON bytes.
    pub fn to_bytes(&self) -> Vec<u8> {
        match serde_json::to_vec(self) {
            Ok(bytes) => bytes,
            Err(e) => {
                warn!(error = %e, "Failed to encode reply");
                br#"{"err":{"status":500,"message":"Internal server error"}}"#.to_vec()
            }
        }
    }
}

impl From<Result<Value, RpcError>> for CommandReply {
    fn from(result: Result<Value, RpcError>) -> Self {
        match result {
            Ok(value) => CommandReply::Response(value),
            Err(err) => CommandReply::Err(err),
        }
    }
}

// =============================================================================
// Dispatcher
// =============================================================================

/// Routes commands to [`ProductsService`]. Cheap to clone.
pub struct CommandDispatcher<S> {
    service: Arc<ProductsService<S>>,
}

impl<S> Clone for CommandDispatcher<S> {
    fn clone(&self) -> Self {
        CommandDispatcher {
            service: Arc::clone(&self.service),
        }
    }
}

impl<S: ProductStore> CommandDispatcher<S> {
    pub fn new(service: ProductsService<S>) -> Self {
        CommandDispatcher {
            service: Arc::new(service),
        }
    }

    /// Runs `command` with a raw JSON payload.
    pub async fn dispatch(&self, command: &str, payload: &[u8]) -> CommandReply {
        let result = match command.parse::<Command>() {
            Ok(command) => {
                debug!(%command, bytes = payload.len(), "Dispatching command");
                self.run(command, payload).await
            }
            Err(err) => {
                warn!(command, "Unknown command");
                Err(err)
            }
        };

        result.into()
    }

    async fn run(&self, command: Command, payload: &[u8]) -> Result<Value, RpcError> {
        let service = self.service.as_ref();
        match command {
            Command::CreateProduct => product::create_product(service, payload).await,
            Command::FindAllProducts => product::find_all_products(service, payload).await,
            Command::FindOneProduct => product::find_one_product(service, payload).await,
            Command::UpdateProduct => product::update_product(service, payload).await,
            Command::UpdateProductStatus => {
                product::update_product_status(service, payload).await
            }
            Command::RemoveProduct => product::remove_product(service, payload).await,
            Command::ValidateProducts => product::validate_products(service, payload).await,
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use catalog_db::{Database, DbConfig, ProductRepository};
    use serde_json::json;

    async fn dispatcher() -> CommandDispatcher<ProductRepository> {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        CommandDispatcher::new(ProductsService::new(db.products()))
    }

    fn bytes(value: Value) -> Vec<u8> {
        serde_json::to_vec(&value).unwrap()
    }

    #[test]
    fn test_command_names_roundtrip() {
        for command in Command::ALL {
            assert_eq!(command.as_str().parse::<Command>().unwrap(), command);
        }
        assert!("findall_products".parse::<Command>().is_err());
    }

    #[test]
    fn test_reply_envelope_shape() {
        let ok = serde_json::to_value(CommandReply::Response(json!([1]))).unwrap();
        assert_eq!(ok, json!({ "response": [1] }));

        let err = serde_json::to_value(CommandReply::Err(RpcError::not_found("gone"))).unwrap();
        assert_eq!(err, json!({ "err": { "status": 404, "message": "gone" } }));
    }

    #[tokio::test]
    async fn test_unknown_command() {
        let dispatcher = dispatcher().await;

        let reply = dispatcher.dispatch("drop_products", b"{}").await;
        assert_eq!(
            reply,
            CommandReply::Err(RpcError::unknown_command("drop_products"))
        );
    }

    #[tokio::test]
    async fn test_create_then_find_one() {
        let dispatcher = dispatcher().await;

        let created = dispatcher
            .dispatch(
                "create_product",
                &bytes(json!({ "name": "Keyboard", "price": 49.99 })),
            )
            .await;
        let CommandReply::Response(product) = created else {
            panic!("create failed: {created:?}");
        };
        assert_eq!(product["available"], true);
        assert_eq!(product["price"], 49.99);

        let found = dispatcher
            .dispatch("findOne_product", &bytes(json!({ "id": product["id"].to_string() })))
            .await;
        assert_eq!(found, CommandReply::Response(product));
    }

    #[tokio::test]
    async fn test_lifecycle_through_dispatcher() {
        let dispatcher = dispatcher().await;
        dispatcher
            .dispatch("create_product", &bytes(json!({ "name": "Lamp", "price": 20 })))
            .await;

        let removed = dispatcher
            .dispatch("remove_product", &bytes(json!({ "id": 1 })))
            .await;
        let CommandReply::Response(removed) = removed else {
            panic!("remove failed");
        };
        assert_eq!(removed["available"], false);

        let listed = dispatcher.dispatch("findAll_products", b"").await;
        let CommandReply::Response(listed) = listed else {
            panic!("list failed");
        };
        assert_eq!(listed["meta"], json!({ "page": 1, "total": 0, "lastPage": 0 }));

        let restored = dispatcher
            .dispatch("update_product_status", &bytes(json!({ "id": "1" })))
            .await;
        let CommandReply::Response(restored) = restored else {
            panic!("restore failed");
        };
        assert_eq!(restored["available"], true);
    }

    #[tokio::test]
    async fn test_errors_carry_status() {
        let dispatcher = dispatcher().await;

        let missing = dispatcher
            .dispatch("findOne_product", &bytes(json!({ "id": 9 })))
            .await;
        assert_eq!(
            missing,
            CommandReply::Err(RpcError::not_found("Product with id #9 not found"))
        );

        let invalid = dispatcher
            .dispatch("validate_products", &bytes(json!([1, 2])))
            .await;
        let CommandReply::Err(err) = invalid else {
            panic!("expected error");
        };
        assert_eq!(err.status, 400);
        assert!(err.message.ends_with("1,2"));
    }
}
