//! Fire-and-forget conversation logging to MongoDB
//!
//! One append per chat exchange, best effort: the write is detached from
//! the request, every failure is operator-visible only, and there is no
//! read path. Each write opens and closes its own connection.

use anyhow::Result;
use mongodb::bson::DateTime;
use mongodb::Client;
use serde::Serialize;
use tracing::{debug, error};

/// Append-only audit record, one per exchange.
///
/// Field names stay camelCase on the wire for compatibility with the
/// existing `conversation_logs` collection.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConversationLogRecord {
    pub timestamp: DateTime,
    pub user_message: String,
    pub assistant_response: String,
}

impl ConversationLogRecord {
    #[must_use]
    pub fn now(user_message: String, assistant_response: String) -> Self {
        Self {
            timestamp: DateTime::now(),
            user_message,
            assistant_response,
        }
    }
}

/// Writer for the conversation log. A logger without a URI is a no-op.
#[derive(Debug, Clone)]
pub struct ConversationLogger {
    uri: Option<String>,
    database: String,
    collection: String,
}

impl ConversationLogger {
    #[must_use]
    pub fn new(uri: Option<String>, database: String, collection: String) -> Self {
        Self {
            uri,
            database,
            collection,
        }
    }

    /// A logger that drops every record, for deployments without a
    /// Mongo URI and for tests
    #[must_use]
    pub fn disabled() -> Self {
        Self::new(None, String::new(), String::new())
    }

    #[must_use]
    pub fn is_enabled(&self) -> bool {
        self.uri.is_some()
    }

    /// Detach a log write on the runtime and return immediately.
    ///
    /// The response must never wait on, or fail because of, this write.
    pub fn spawn_log(&self, user_message: &str, assistant_response: &str) {
        let Some(uri) = self.uri.clone() else {
            debug!("Conversation logging disabled, skipping record");
            return;
        };

        let database = self.database.clone();
        let collection = self.collection.clone();
        let record =
            ConversationLogRecord::now(user_message.to_string(), assistant_response.to_string());

        tokio::spawn(async move {
            if let Err(e) = write_record(&uri, &database, &collection, record).await {
                error!("Failed to log conversation to MongoDB: {e:#}");
            }
        });
    }
}

async fn write_record(
    uri: &str,
    database: &str,
    collection: &str,
    record: ConversationLogRecord,
) -> Result<()> {
    let client = Client::with_uri_str(uri).await?;
    client
        .database(database)
        .collection::<ConversationLogRecord>(collection)
        .insert_one(record)
        .await?;
    client.shutdown().await;
    Ok(())
}
