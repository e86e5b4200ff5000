//! # NATS Transport
//!
//! Request/reply loop between the message bus and the [`CommandDispatcher`].
//!
//! ## Message Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Command Listener                                  │
//! │                                                                         │
//! │  caller ── request("products.findOne_product", {"id": 1}) ──► NATS     │
//! │                                                                         │
//! │  NATS ──► queue group "products-service" (one instance gets it)        │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  subject "products.findOne_product" → command "findOne_product"        │
//! │       │                                                                 │
//! │       ▼  tokio::spawn (one task per message)                           │
//! │  dispatcher.dispatch(command, payload)                                 │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  publish(reply_subject, {"response": ...} | {"err": ...})              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Messages without a reply subject are still executed; nothing is sent back.

use std::future::Future;
use std::time::Duration;

use async_nats::{Client, ConnectOptions, Message};
use bytes::Bytes;
use thiserror::Error;
use tokio::task::JoinSet;
use tokio_stream::StreamExt;
use tracing::{debug, info, warn};

use crate::commands::CommandDispatcher;
use crate::config::ServiceConfig;
use crate::store::ProductStore;

/// Client name reported to the NATS server.
const CLIENT_NAME: &str = "products-service";

#[derive(Debug, Error)]
pub enum TransportError {
    #[error("NATS connection failed: {0}")]
    Connect(String),

    #[error("NATS subscription failed: {0}")]
    Subscribe(String),
}

/// Connects to the configured NATS servers.
pub async fn connect(config: &ServiceConfig) -> Result<Client, TransportError> {
    let options = ConnectOptions::new()
        .name(CLIENT_NAME)
        .connection_timeout(Duration::from_secs(10));

    let client = async_nats::connect_with_options(config.nats_servers.join(","), options)
        .await
        .map_err(|e| TransportError::Connect(e.to_string()))?;

    info!(servers = ?config.nats_servers, "Connected to NATS");
    Ok(client)
}

/// Extracts the command name from `<prefix>.<command>`.
pub fn command_name<'a>(subject: &'a str, prefix: &str) -> Option<&'a str> {
    let command = subject.strip_prefix(prefix)?.strip_prefix('.')?;
    if command.is_empty() || command.contains('.') {
        return None;
    }
    Some(command)
}

/// Serves product commands from a NATS queue subscription.
pub struct CommandListener<S> {
    client: Client,
    dispatcher: CommandDispatcher<S>,
    subject: String,
    subject_prefix: String,
    queue_group: String,
}

impl<S: ProductStore + 'static> CommandListener<S> {
    pub fn new(client: Client, dispatcher: CommandDispatcher<S>, config: &ServiceConfig) -> Self {
        CommandListener {
            client,
            dispatcher,
            subject: config.subscription_subject(),
            subject_prefix: config.subject_prefix.clone(),
            queue_group: config.queue_group.clone(),
        }
    }

    /// Runs until `shutdown` resolves or the subscription closes, then waits
    /// for in-flight commands to reply.
    pub async fn run(self, shutdown: impl Future<Output = ()>) -> Result<(), TransportError> {
        let subject = self.subject.clone();
        let mut subscriber = self
            .client
            .queue_subscribe(subject.clone(), self.queue_group.clone())
            .await
            .map_err(|e| TransportError::Subscribe(e.to_string()))?;

        info!(%subject, queue_group = %self.queue_group, "Listening for product commands");

        let mut in_flight = JoinSet::new();
        tokio::pin!(shutdown);

        loop {
            tokio::select! {
                _ = &mut shutdown => {
                    info!("Stopping command listener");
                    break;
                }
                next = subscriber.next() => match next {
                    Some(message) => {
                        in_flight.spawn(handle_message(
                            self.client.clone(),
                            self.dispatcher.clone(),
                            self.subject_prefix.clone(),
                            message,
                        ));
                    }
                    None => {
                        warn!(%subject, "Subscription ended");
                        break;
                    }
                },
                // Reap finished tasks so the set stays small.
                Some(_) = in_flight.join_next(), if !in_flight.is_empty() => {}
            }
        }

        if let Err(e) = subscriber.unsubscribe().await {
            warn!(error = %e, "Failed to unsubscribe");
        }

        let pending = in_flight.len();
        if pending > 0 {
            info!(pending, "Waiting for in-flight commands");
        }
        while in_flight.join_next().await.is_some() {}

        if let Err(e) = self.client.flush().await {
            warn!(error = %e, "Failed to flush replies");
        }

        Ok(())
    }
}

async fn handle_message<S: ProductStore>(
    client: Client,
    dispatcher: CommandDispatcher<S>,
    prefix: String,
    message: Message,
) {
    let subject = message.subject.to_string();
    debug!(%subject, payload_size = message.payload.len(), "Received command");

    let reply = match command_name(&subject, &prefix) {
        Some(command) => dispatcher.dispatch(command, &message.payload).await,
        None => dispatcher.dispatch(&subject, &message.payload).await,
    };

    if reply.is_err() {
        debug!(%subject, "Command failed");
    }

    let Some(reply_to) = message.reply else {
        debug!(%subject, "No reply subject; dropping result");
        return;
    };

    if let Err(e) = client
        .publish(reply_to.to_string(), Bytes::from(reply.to_bytes()))
        .await
    {
        warn!(%subject, error = %e, "Failed to publish reply");
    }
}
