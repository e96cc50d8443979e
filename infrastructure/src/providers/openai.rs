//! OpenAI model provider adapter.

use super::{canned_reply, resolve_api_key};
use crate::config::OpenAiSettings;
use async_trait::async_trait;
use chrono::Utc;
use errand_domain::{
    ModelProvider, ProviderError, ProviderRequest, ProviderResponse, ProviderType, Usage,
};
use std::sync::atomic::{AtomicU64, Ordering};
use tracing::debug;

/// OpenAI-backed provider.
///
/// Construction resolves the API key from configuration (direct value or
/// the configured environment variable); an absent key leaves the provider
/// registered but unconfigured, so the factory can skip it.
///
/// The transport is a deterministic stand-in: `chat` enforces the full
/// provider contract (fail-fast, model defaulting, usage accounting) and
/// synthesizes the completion locally instead of crossing the network.
pub struct OpenAiProvider {
    api_key: Option<String>,
    model: String,
    #[allow(dead_code)]
    endpoint: String,
    next_id: AtomicU64,
}

impl OpenAiProvider {
    pub fn from_settings(settings: &OpenAiSettings) -> Self {
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
            endpoint: "https://api.openai.com".to_string(),
            next_id: AtomicU64::new(1),
        }
    }

    /// Provider without credentials (never serves `chat`).
    pub fn unconfigured() -> Self {
        Self::from_settings(&OpenAiSettings {
            api_key_env: "ERRAND_TEST_UNSET_OPENAI_KEY".to_string(),
            ..OpenAiSettings::default()
        })
    }
}

#[async_trait]
impl ModelProvider for OpenAiProvider {
    fn name(&self) -> &str {
        "OpenAI"
    }

    fn default_model(&self) -> &str {
        &self.model
    }

    fn provider_type(&self) -> ProviderType {
        ProviderType::OpenAi
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

        debug!(model = %request.model, messages = request.messages.len(), "OpenAI chat request");

        let content = canned_reply(request.last_user_content().unwrap_or(""));
        let usage = Usage::new(
            self.count_tokens(&request.joined_content()),
            self.count_tokens(&content),
        );

        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        Ok(
            ProviderResponse::single(format!("chatcmpl-{}", id), &request.model, content)
                .with_created(Utc::now().timestamp())
                .with_usage(usage),
        )
    }
}
