//! In-memory conversation store.

use async_trait::async_trait;
use chrono::Utc;
use errand_application::ports::conversation_store::{ConversationStore, StoreError};
use errand_domain::{Conversation, Message, NewMessage};
use std::collections::HashMap;
use tokio::sync::RwLock;

#[derive(Default)]
struct Inner {
    next_conversation_id: u64,
    next_message_id: u64,
    conversations: HashMap<u64, Conversation>,
    messages: HashMap<u64, Vec<Message>>,
}

/// Conversation store backed by process memory.
///
/// Ids and timestamps are assigned on write, the way a database identity
/// column would. The single write lock serializes all mutations, which
/// subsumes the per-conversation write ordering the port requires;
/// concurrent turns on different conversations still interleave freely
/// between operations.
#[derive(Default)]
pub struct InMemoryConversationStore {
    inner: RwLock<Inner>,
}

impl InMemoryConversationStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ConversationStore for InMemoryConversationStore {
    async fn create(&self, user_id: &str) -> Result<Conversation, StoreError> {
        let mut inner = self.inner.write().await;
        inner.next_conversation_id += 1;
        let id = inner.next_conversation_id;

        let conversation = Conversation::new(id, user_id, Utc::now());
        inner.conversations.insert(id, conversation.clone());
        inner.messages.insert(id, Vec::new());
        Ok(conversation)
    }

    async fn find_by_id(&self, id: u64) -> Result<Option<Conversation>, StoreError> {
        let inner = self.inner.read().await;
        let mut conversation = match inner.conversations.get(&id) {
            Some(c) => c.clone(),
            None => return Ok(None),
        };
        conversation.messages = inner.messages.get(&id).cloned().unwrap_or_default();
        Ok(Some(conversation))
    }

    async fn save(&self, conversation: Conversation) -> Result<Conversation, StoreError> {
        let mut inner = self.inner.write().await;
        if !inner.conversations.contains_key(&conversation.id) {
            return Err(StoreError::ConversationNotFound(conversation.id));
        }

        // Messages are owned by append_message; only conversation-level
        // fields are written here
        let mut stored = conversation.clone();
        stored.messages = Vec::new();
        inner.conversations.insert(stored.id, stored);
        Ok(conversation)
    }

    async fn append_message(
        &self,
        conversation_id: u64,
        message: NewMessage,
    ) -> Result<Message, StoreError> {
        let mut inner = self.inner.write().await;
        if !inner.conversations.contains_key(&conversation_id) {
            return Err(StoreError::ConversationNotFound(conversation_id));
        }

        inner.next_message_id += 1;
        let persisted = Message {
            id: inner.next_message_id,
            conversation_id,
            role: message.role,
            content: message.content,
            tools_used: message.tools_used,
            created_at: Utc::now(),
        };

        inner
            .messages
            .entry(conversation_id)
            .or_default()
            .push(persisted.clone());
        Ok(persisted)
    }

    async fn list_messages(&self, conversation_id: u64) -> Result<Vec<Message>, StoreError> {
        let inner = self.inner.read().await;
        Ok(inner
            .messages
            .get(&conversation_id)
            .cloned()
            .unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use errand_domain::{ConversationStatus, MessageRole};

    #[tokio::test]
    async fn test_create_assigns_sequential_ids() {
        let store = InMemoryConversationStore::new();

        let first = store.create("u1").await.unwrap();
        let second = store.create("u2").await.unwrap();

        assert_eq!(first.id, 1);
        assert_eq!(second.id, 2);
        assert_eq!(first.status, ConversationStatus::Active);
    }

    #[tokio::test]
    async fn test_find_by_id_includes_messages() {
        let store = InMemoryConversationStore::new();
        let conversation = store.create("u1").await.unwrap();

        store
            .append_message(conversation.id, NewMessage::user("hello"))
            .await
            .unwrap();

        let found = store.find_by_id(conversation.id).await.unwrap().unwrap();
        assert_eq!(found.messages.len(), 1);
        assert_eq!(found.messages[0].role, MessageRole::User);

        assert!(store.find_by_id(999).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_save_persists_status() {
        let store = InMemoryConversationStore::new();
        let mut conversation = store.create("u1").await.unwrap();

        conversation.complete(Utc::now());
        store.save(conversation.clone()).await.unwrap();

        let found = store.find_by_id(conversation.id).await.unwrap().unwrap();
        assert_eq!(found.status, ConversationStatus::Completed);
    }

    #[tokio::test]
    async fn test_save_unknown_conversation_fails() {
        let store = InMemoryConversationStore::new();
        let ghost = Conversation::new(42, "u1", Utc::now());

        let result = store.save(ghost).await;
        assert!(matches!(result, Err(StoreError::ConversationNotFound(42))));
    }

    #[tokio::test]
    async fn test_append_to_unknown_conversation_fails() {
        let store = InMemoryConversationStore::new();

        let result = store.append_message(42, NewMessage::user("hi")).await;
        assert!(matches!(result, Err(StoreError::ConversationNotFound(42))));
    }

    #[tokio::test]
    async fn test_messages_keep_append_order() {
        let store = InMemoryConversationStore::new();
        let conversation = store.create("u1").await.unwrap();

        store
            .append_message(conversation.id, NewMessage::user("one"))
            .await
            .unwrap();
        store
            .append_message(
                conversation.id,
                NewMessage::assistant("two", Some(vec!["customer_search".to_string()])),
            )
            .await
            .unwrap();

        let messages = store.list_messages(conversation.id).await.unwrap();
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0].content, "one");
        assert_eq!(messages[1].content, "two");
        assert!(messages[0].id < messages[1].id);
    }
}
