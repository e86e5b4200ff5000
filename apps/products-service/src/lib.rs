//! # Products Service
//!
//! Message-driven product catalog: commands arrive over NATS, run against
//! the SQLite catalog and get a reply envelope back.
//!
//! ## Module Organization
//! ```text
//! products_service/
//! ├── lib.rs          ◄─── You are here
//! ├── config.rs       ◄─── Environment configuration
//! ├── store.rs        ◄─── ProductStore contract (catalog-db implements it)
//! ├── service.rs      ◄─── ProductsService: catalog rules
//! ├── commands/
//! │   ├── mod.rs      ◄─── Command names, dispatcher, reply envelope
//! │   └── product.rs  ◄─── Payload decoding + boundary checks
//! ├── error.rs        ◄─── RpcError { status, message }
//! └── transport.rs    ◄─── NATS queue subscription loop
//! ```
//!
//! ## Configuration
//! Environment variables:
//! - `PORT` - Advertised port (default: 3001)
//! - `NATS_SERVERS` - Comma separated server URLs (default: nats://localhost:4222)
//! - `DATABASE_PATH` - SQLite file (default: ./data/products.db)
//! - `DB_MAX_CONNECTIONS` - Pool size (default: 5)
//! - `SUBJECT_PREFIX` - Subject prefix (default: products)
//! - `QUEUE_GROUP` - Queue group (default: products-service)

pub mod commands;
pub mod config;
pub mod error;
pub mod service;
pub mod store;
pub mod transport;

// Re-exports
pub use commands::{Command, CommandDispatcher, CommandReply};
pub use config::{ConfigError, ServiceConfig};
pub use error::RpcError;
pub use service::{ProductsService, ServiceError};
pub use store::{ProductStore, StoreError};
pub use transport::{CommandListener, TransportError};
