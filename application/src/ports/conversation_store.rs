//! Conversation store port
//!
//! Defines how the application layer persists conversations and messages.
//! Implementations (adapters) live in the infrastructure layer and must
//! serialize writes per conversation id so concurrent turns on different
//! conversations cannot interleave appends within one transcript.

use async_trait::async_trait;
use errand_domain::{Conversation, Message, NewMessage};
use thiserror::Error;

/// Errors that can occur during store operations
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Conversation not found: {0}")]
    ConversationNotFound(u64),

    #[error("Store backend error: {0}")]
    Backend(String),
}

/// Durable persistence for conversations and their messages
#[async_trait]
pub trait ConversationStore: Send + Sync {
    /// Create a conversation for the user, in the `Active` state.
    async fn create(&self, user_id: &str) -> Result<Conversation, StoreError>;

    /// Fetch a conversation with its messages.
    async fn find_by_id(&self, id: u64) -> Result<Option<Conversation>, StoreError>;

    /// Persist conversation-level fields (status, updated_at).
    async fn save(&self, conversation: Conversation) -> Result<Conversation, StoreError>;

    /// Append a message; the store assigns id and timestamp.
    async fn append_message(
        &self,
        conversation_id: u64,
        message: NewMessage,
    ) -> Result<Message, StoreError>;

    /// All messages of a conversation, oldest first.
    async fn list_messages(&self, conversation_id: u64) -> Result<Vec<Message>, StoreError>;
}
