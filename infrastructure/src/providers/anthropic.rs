//! Anthropic model provider adapter.

use super::{canned_reply, resolve_api_key};
use crate::config::AnthropicSettings;
use async_trait::async_trait;
use chrono::Utc;
use errand_domain::{
    ModelProvider, ProviderError, ProviderRequest, ProviderResponse, ProviderType, Usage,
};
use std::sync::atomic::{AtomicU64, Ordering};
use tracing::debug;

/// Anthropic-backed provider.
///
/// Same contract and stand-in transport as [`OpenAiProvider`](super::OpenAiProvider);
/// only the identity and response ids differ.
pub struct AnthropicProvider {
    api_key: Option<String>,
    model: String,
    #[allow(dead_code)]
    endpoint: String,
    next_id: AtomicU64,
}

impl AnthropicProvider {
    pub fn from_settings(settings: &AnthropicSettings) -> Self {
        Self {
            api_key: resolve_api_key(settings.api_key.as_deref(), &settings.api_key_env),
            model: settings.model.clone(),
            endpoint: settings.endpoint.clone(),
            next_id: AtomicU64::new(1),
        }
    }

    /// Provider with an explicit key, for wiring and tests.
    pub fn with_api_key(api_key: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            api_key: Some(api_key.into()),
            model: model.into(),
            endpoint: "https://api.anthropic.com".to_string(),
            next_id: AtomicU64::new(1),
        }
    }
}

#[async_trait]
impl ModelProvider for AnthropicProvider {
    fn name(&self) -> &str {
        "Anthropic"
    }

    fn default_model(&self) -> &str {
        &self.model
    }

    fn provider_type(&self) -> ProviderType {
        ProviderType::Anthropic
    }

    fn is_configured(&self) -> bool {
        self.api_key.as_deref().is_some_and(|k| !k.is_empty())
    }

    async fn chat(&self, mut request: ProviderRequest) -> Result<ProviderResponse, ProviderError> {
        if !self.is_configured() {
            return Err(ProviderError::NotConfigured(self.name().to_string()));
        }

        if request.model.is_empty() {
            request.model = self.model.clone();
        }

        debug!(model = %request.model, messages = request.messages.len(), "Anthropic chat request");

        let content = canned_reply(request.last_user_content().unwrap_or(""));
        let usage = Usage::new(
            self.count_tokens(&request.joined_content()),
            self.count_tokens(&content),
        );

        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        Ok(
            ProviderResponse::single(format!("msg-{}", id), &request.model, content)
                .with_created(Utc::now().timestamp())
                .with_usage(usage),
        )
    }
}
