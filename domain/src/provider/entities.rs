//! Provider request/response value objects.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Role of a chat message on the provider wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    System,
    User,
    Assistant,
}

impl ChatRole {
    pub fn as_str(&self) -> &str {
        match self {
            ChatRole::System => "system",
            ChatRole::User => "user",
            ChatRole::Assistant => "assistant",
        }
    }
}

/// A message in provider chat format.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: ChatRole,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::System,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::Assistant,
            content: content.into(),
        }
    }
}

/// Request sent to a model provider.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProviderRequest {
    /// Model identifier; an empty string means "use the provider default"
    pub model: String,
    pub messages: Vec<ChatMessage>,
    pub temperature: f64,
    pub max_tokens: u32,
    /// Optional tool metadata forwarded to providers that support it
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tools: Option<HashMap<String, serde_json::Value>>,
}

impl ProviderRequest {
    pub fn new(model: impl Into<String>, messages: Vec<ChatMessage>) -> Self {
        Self {
            model: model.into(),
            messages,
            temperature: 0.7,
            max_tokens: 2000,
            tools: None,
        }
    }

    pub fn with_temperature(mut self, temperature: f64) -> Self {
        self.temperature = temperature;
        self
    }

    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = max_tokens;
        self
    }

    /// Concatenated content of every input message, for token accounting.
    pub fn joined_content(&self) -> String {
        self.messages
            .iter()
            .map(|m| m.content.as_str())
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Content of the most recent user message, if any.
    pub fn last_user_content(&self) -> Option<&str> {
        self.messages
            .iter()
            .rev()
            .find(|m| m.role == ChatRole::User)
            .map(|m| m.content.as_str())
    }
}

/// One completion choice in a provider response.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Choice {
    pub index: u32,
    pub role: ChatRole,
    pub content: String,
    pub finish_reason: String,
}

/// Token accounting for a provider call.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Usage {
    pub prompt_tokens: u32,
    pub completion_tokens: u32,
    pub total_tokens: u32,
}

impl Usage {
    pub fn new(prompt_tokens: u32, completion_tokens: u32) -> Self {
        Self {
            prompt_tokens,
            completion_tokens,
            total_tokens: prompt_tokens + completion_tokens,
        }
    }
}

/// Response returned by a model provider.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderResponse {
    pub id: String,
    pub model: String,
    pub created: i64,
    pub choices: Vec<Choice>,
    pub usage: Usage,
}

impl ProviderResponse {
    /// A response with a single assistant choice, the shape every shipped
    /// provider produces.
    pub fn single(id: impl Into<String>, model: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            model: model.into(),
            created: 0,
            choices: vec![Choice {
                index: 0,
                role: ChatRole::Assistant,
                content: content.into(),
                finish_reason: "stop".to_string(),
            }],
            usage: Usage::default(),
        }
    }

    pub fn with_created(mut self, created: i64) -> Self {
        self.created = created;
        self
    }

    pub fn with_usage(mut self, usage: Usage) -> Self {
        self.usage = usage;
        self
    }

    /// Strip all choices (malformed-response test fixture).
    pub fn without_choices(mut self) -> Self {
        self.choices.clear();
        self
    }

    /// Content of the first choice. The orchestration loop reads nothing
    /// else from a response.
    pub fn first_choice_content(&self) -> Option<&str> {
        self.choices.first().map(|c| c.content.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_defaults() {
        let request = ProviderRequest::new("gpt-4", vec![ChatMessage::user("hi")]);
        assert_eq!(request.temperature, 0.7);
        assert_eq!(request.max_tokens, 2000);
        assert!(request.tools.is_none());
    }

    #[test]
    fn test_last_user_content_picks_most_recent() {
        let request = ProviderRequest::new(
            "gpt-4",
            vec![
                ChatMessage::system("be helpful"),
                ChatMessage::user("first"),
                ChatMessage::assistant("ok"),
                ChatMessage::user("second"),
            ],
        );

        assert_eq!(request.last_user_content(), Some("second"));
    }

    #[test]
    fn test_first_choice_content() {
        let response = ProviderResponse::single("id-1", "gpt-4", "hello");
        assert_eq!(response.first_choice_content(), Some("hello"));
        assert_eq!(response.without_choices().first_choice_content(), None);
    }

    #[test]
    fn test_usage_totals() {
        let usage = Usage::new(10, 5);
        assert_eq!(usage.total_tokens, 15);
    }

    #[test]
    fn test_chat_role_wire_names() {
        assert_eq!(ChatRole::System.as_str(), "system");
        assert_eq!(
            serde_json::to_string(&ChatRole::Assistant).unwrap(),
            "\"assistant\""
        );
    }
}
