//! Shared test fixtures for use-case tests.

use crate::ports::conversation_store::{ConversationStore, StoreError};
use async_trait::async_trait;
use chrono::Utc;
use errand_domain::{
    Conversation, Message, NewMessage, ProviderFactory, Tool, ToolError, ToolParams,
};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::Mutex;

#[derive(Default)]
struct StoreInner {
    next_conversation_id: u64,
    next_message_id: u64,
    conversations: HashMap<u64, Conversation>,
    messages: HashMap<u64, Vec<Message>>,
}

/// Minimal store fake backing use-case tests.
#[derive(Default)]
pub struct InMemoryStore {
    inner: Mutex<StoreInner>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn message_count(&self) -> usize {
        let inner = self.inner.lock().await;
        inner.messages.values().map(|v| v.len()).sum()
    }
}

#[async_trait]
impl ConversationStore for InMemoryStore {
    async fn create(&self, user_id: &str) -> Result<Conversation, StoreError> {
        let mut inner = self.inner.lock().await;
        inner.next_conversation_id += 1;
        let id = inner.next_conversation_id;
        let conversation = Conversation::new(id, user_id, Utc::now());
        inner.conversations.insert(id, conversation.clone());
        inner.messages.insert(id, Vec::new());
        Ok(conversation)
    }

    async fn find_by_id(&self, id: u64) -> Result<Option<Conversation>, StoreError> {
        let inner = self.inner.lock().await;
        let mut conversation = match inner.conversations.get(&id) {
            Some(c) => c.clone(),
            None => return Ok(None),
        };
        conversation.messages = inner.messages.get(&id).cloned().unwrap_or_default();
        Ok(Some(conversation))
    }

    async fn save(&self, conversation: Conversation) -> Result<Conversation, StoreError> {
        let mut inner = self.inner.lock().await;
        if !inner.conversations.contains_key(&conversation.id) {
            return Err(StoreError::ConversationNotFound(conversation.id));
        }
        inner.conversations.insert(conversation.id, conversation.clone());
        Ok(conversation)
    }

    async fn append_message(
        &self,
        conversation_id: u64,
        message: NewMessage,
    ) -> Result<Message, StoreError> {
        let mut inner = self.inner.lock().await;
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
        let inner = self.inner.lock().await;
        Ok(inner.messages.get(&conversation_id).cloned().unwrap_or_default())
    }
}

/// Tool that answers with a fixed output string.
pub struct RecordingTool {
    name: &'static str,
    output: &'static str,
}

impl RecordingTool {
    pub fn new(name: &'static str, output: &'static str) -> Self {
        Self { name, output }
    }
}

#[async_trait]
impl Tool for RecordingTool {
    fn name(&self) -> &str {
        self.name
    }

    fn description(&self) -> &str {
        "Test tool with canned output."
    }

    fn parameter_hints(&self) -> Vec<(String, String)> {
        Vec::new()
    }

    async fn execute(&self, _params: &ToolParams) -> Result<String, ToolError> {
        Ok(self.output.to_string())
    }
}

/// Factory with no registered providers; every selection fails, which
/// forces the turn executor onto its fallback answer.
pub struct NoProviderFactory;

impl NoProviderFactory {
    pub fn factory() -> Arc<ProviderFactory> {
        Arc::new(ProviderFactory::new(Vec::new(), "openai"))
    }
}
