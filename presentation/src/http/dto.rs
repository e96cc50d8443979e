//! HTTP request/response DTOs.

use errand_domain::{Conversation, Message};
use serde::{Deserialize, Serialize};

/// Query parameters for creating a conversation.
#[derive(Debug, Deserialize)]
pub struct CreateConversationParams {
    #[serde(default = "default_user_id")]
    pub user_id: String,
}

fn default_user_id() -> String {
    "user123".to_string()
}

/// Body of a send-message request.
#[derive(Debug, Deserialize)]
pub struct SendMessageRequest {
    pub content: String,
}

/// Conversation summary returned by create/get.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConversationResponse {
    pub id: u64,
    pub status: String,
}

impl From<&Conversation> for ConversationResponse {
    fn from(conversation: &Conversation) -> Self {
        Self {
            id: conversation.id,
            status: conversation.status.to_string(),
        }
    }
}

/// Message representation returned by send-message and history.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MessageResponse {
    pub id: u64,
    pub conversation_id: u64,
    pub role: String,
    pub content: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tools_used: Option<Vec<String>>,
}

impl From<&Message> for MessageResponse {
    fn from(message: &Message) -> Self {
        Self {
            id: message.id,
            conversation_id: message.conversation_id,
            role: message.role.as_str().to_string(),
            content: message.content.clone(),
            tools_used: message.tools_used.clone(),
        }
    }
}
