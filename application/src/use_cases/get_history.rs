//! Get History use case.

use crate::ports::conversation_store::ConversationStore;
use crate::use_cases::send_message::TurnError;
use errand_domain::{Conversation, Message};
use std::sync::Arc;

/// Reads a conversation and its ordered message history.
pub struct GetHistoryUseCase {
    store: Arc<dyn ConversationStore>,
}

impl GetHistoryUseCase {
    pub fn new(store: Arc<dyn ConversationStore>) -> Self {
        Self { store }
    }

    pub async fn conversation(&self, conversation_id: u64) -> Result<Conversation, TurnError> {
        self.store
            .find_by_id(conversation_id)
            .await?
            .ok_or(TurnError::ConversationNotFound(conversation_id))
    }

    /// Messages of the conversation, oldest first.
    pub async fn messages(&self, conversation_id: u64) -> Result<Vec<Message>, TurnError> {
        // Existence check first so an unknown id maps to not-found, not an
        // empty list
        self.conversation(conversation_id).await?;
        Ok(self.store.list_messages(conversation_id).await?)
    }
}
