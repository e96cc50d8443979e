//! Start Conversation use case.

use crate::ports::conversation_store::{ConversationStore, StoreError};
use errand_domain::Conversation;
use std::sync::Arc;
use tracing::info;

/// Creates a new conversation for a user, in the `Active` state.
pub struct StartConversationUseCase {
    store: Arc<dyn ConversationStore>,
}

impl StartConversationUseCase {
    pub fn new(store: Arc<dyn ConversationStore>) -> Self {
        Self { store }
    }

    pub async fn execute(&self, user_id: &str) -> Result<Conversation, StoreError> {
        let conversation = self.store.create(user_id).await?;
        info!(
            conversation_id = conversation.id,
            user_id, "Started conversation"
        );
        Ok(conversation)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::use_cases::testing::InMemoryStore;
    use errand_domain::ConversationStatus;

    #[tokio::test]
    async fn test_new_conversation_is_active() {
        let use_case = StartConversationUseCase::new(Arc::new(InMemoryStore::new()));

        let conversation = use_case.execute("u1").await.unwrap();

        assert_eq!(conversation.user_id, "u1");
        assert_eq!(conversation.status, ConversationStatus::Active);
    }

    #[tokio::test]
    async fn test_conversations_get_distinct_ids() {
        let use_case = StartConversationUseCase::new(Arc::new(InMemoryStore::new()));

        let first = use_case.execute("u1").await.unwrap();
        let second = use_case.execute("u2").await.unwrap();

        assert_ne!(first.id, second.id);
    }
}
