//! Conversation domain entities

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Lifecycle state of a conversation.
///
/// The orchestration loop only drives `Active` → `Completed`; `Archived`
/// and `Failed` stay representable for callers that manage conversations
/// out of band.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ConversationStatus {
    Active,
    Completed,
    Archived,
    Failed,
}

impl ConversationStatus {
    pub fn as_str(&self) -> &str {
        match self {
            ConversationStatus::Active => "ACTIVE",
            ConversationStatus::Completed => "COMPLETED",
            ConversationStatus::Archived => "ARCHIVED",
            ConversationStatus::Failed => "FAILED",
        }
    }
}

impl std::fmt::Display for ConversationStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Role of a persisted message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MessageRole {
    User,
    Assistant,
    System,
}

impl MessageRole {
    pub fn as_str(&self) -> &str {
        match self {
            MessageRole::User => "USER",
            MessageRole::Assistant => "ASSISTANT",
            MessageRole::System => "SYSTEM",
        }
    }
}

/// A persisted message. Append-only: never mutated after creation.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    pub id: u64,
    /// Back-reference to the owning conversation (non-owning)
    pub conversation_id: u64,
    pub role: MessageRole,
    pub content: String,
    /// Tool names used to produce this message, in execution order
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tools_used: Option<Vec<String>>,
    pub created_at: DateTime<Utc>,
}

/// Message payload handed to the store, which assigns id and timestamp
/// the way a database identity column would.
#[derive(Debug, Clone)]
pub struct NewMessage {
    pub role: MessageRole,
    pub content: String,
    pub tools_used: Option<Vec<String>>,
}

impl NewMessage {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::User,
            content: content.into(),
            tools_used: None,
        }
    }

    pub fn assistant(content: impl Into<String>, tools_used: Option<Vec<String>>) -> Self {
        Self {
            role: MessageRole::Assistant,
            content: content.into(),
            tools_used,
        }
    }
}

/// A conversation between a user and the agent.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Conversation {
    pub id: u64,
    pub user_id: String,
    pub status: ConversationStatus,
    pub messages: Vec<Message>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Conversation {
    /// A freshly started conversation in the `Active` state.
    pub fn new(id: u64, user_id: impl Into<String>, now: DateTime<Utc>) -> Self {
        Self {
            id,
            user_id: user_id.into(),
            status: ConversationStatus::Active,
            messages: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }

    pub fn complete(&mut self, now: DateTime<Utc>) {
        self.status = ConversationStatus::Completed;
        self.updated_at = now;
    }

    pub fn archive(&mut self, now: DateTime<Utc>) {
        self.status = ConversationStatus::Archived;
        self.updated_at = now;
    }

    pub fn fail(&mut self, now: DateTime<Utc>) {
        self.status = ConversationStatus::Failed;
        self.updated_at = now;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_conversation_is_active() {
        let conversation = Conversation::new(1, "u1", Utc::now());
        assert_eq!(conversation.status, ConversationStatus::Active);
        assert!(conversation.messages.is_empty());
    }

    #[test]
    fn test_status_transitions_touch_updated_at() {
        let created = Utc::now();
        let mut conversation = Conversation::new(1, "u1", created);

        let later = created + chrono::Duration::seconds(5);
        conversation.complete(later);

        assert_eq!(conversation.status, ConversationStatus::Completed);
        assert_eq!(conversation.updated_at, later);
        assert_eq!(conversation.created_at, created);
    }

    #[test]
    fn test_all_states_representable() {
        let now = Utc::now();
        let mut conversation = Conversation::new(1, "u1", now);

        conversation.archive(now);
        assert_eq!(conversation.status, ConversationStatus::Archived);

        conversation.fail(now);
        assert_eq!(conversation.status, ConversationStatus::Failed);
    }

    #[test]
    fn test_status_wire_format() {
        assert_eq!(
            serde_json::to_string(&ConversationStatus::Active).unwrap(),
            "\"ACTIVE\""
        );
        assert_eq!(MessageRole::Assistant.as_str(), "ASSISTANT");
    }

    #[test]
    fn test_message_serialization_omits_empty_tools() {
        let message = Message {
            id: 1,
            conversation_id: 2,
            role: MessageRole::User,
            content: "hello".to_string(),
            tools_used: None,
            created_at: Utc::now(),
        };

        let json = serde_json::to_value(&message).unwrap();
        assert!(json.get("toolsUsed").is_none());
        assert_eq!(json["conversationId"], 2);
    }
}
