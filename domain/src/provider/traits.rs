//! Model provider capability trait.

use super::entities::{ProviderRequest, ProviderResponse};
use super::error::ProviderError;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Kind of backend a provider talks to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderType {
    OpenAi,
    Anthropic,
    Local,
    Azure,
    Other,
}

impl ProviderType {
    pub fn as_str(&self) -> &str {
        match self {
            ProviderType::OpenAi => "OPENAI",
            ProviderType::Anthropic => "ANTHROPIC",
            ProviderType::Local => "LOCAL",
            ProviderType::Azure => "AZURE",
            ProviderType::Other => "OTHER",
        }
    }
}

impl std::fmt::Display for ProviderType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A pluggable language-model backend.
///
/// Implementations must enforce their own timeout/retry policy inside
/// `chat`; the orchestration core treats the call as a single fallible
/// external operation.
#[async_trait]
pub trait ModelProvider: Send + Sync {
    /// Provider name used for configuration lookup (case-insensitive).
    fn name(&self) -> &str;

    /// Model used when a request does not name one.
    fn default_model(&self) -> &str;

    fn provider_type(&self) -> ProviderType;

    /// Whether credentials/configuration are present and the provider is
    /// ready to serve `chat`.
    fn is_configured(&self) -> bool;

    /// Token count approximation for cost estimation. Exactness is not
    /// part of the contract; the default is `ceil(len / 4)`.
    fn count_tokens(&self, content: &str) -> u32 {
        content.len().div_ceil(4) as u32
    }

    /// Send a chat request. Must fail fast with
    /// [`ProviderError::NotConfigured`] when [`is_configured`](Self::is_configured)
    /// is false, and must default the request model to
    /// [`default_model`](Self::default_model) when unset.
    async fn chat(&self, request: ProviderRequest) -> Result<ProviderResponse, ProviderError>;
}
