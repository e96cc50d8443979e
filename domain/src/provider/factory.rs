//! Provider selection and fallback.

use super::error::ProviderError;
use super::traits::{ModelProvider, ProviderType};
use std::sync::Arc;

/// Holds every registered provider plus the configured preference.
///
/// Selection policy: the preferred provider wins if it is present *and*
/// configured; otherwise the first configured provider in registration
/// order; otherwise [`ProviderError::NoProviderConfigured`]. An
/// unconfigured preferred provider is skipped, never an error, as long as
/// some other provider is configured.
pub struct ProviderFactory {
    providers: Vec<Arc<dyn ModelProvider>>,
    preferred: String,
}

impl ProviderFactory {
    pub fn new(providers: Vec<Arc<dyn ModelProvider>>, preferred: impl Into<String>) -> Self {
        Self {
            providers,
            preferred: preferred.into(),
        }
    }

    /// The provider the orchestration loop should use for this turn.
    pub fn default_provider(&self) -> Result<Arc<dyn ModelProvider>, ProviderError> {
        if let Some(preferred) = self.get(&self.preferred) {
            if preferred.is_configured() {
                return Ok(preferred);
            }
        }

        self.providers
            .iter()
            .find(|p| p.is_configured())
            .cloned()
            .ok_or(ProviderError::NoProviderConfigured)
    }

    /// Case-insensitive lookup by provider name.
    pub fn get(&self, name: &str) -> Option<Arc<dyn ModelProvider>> {
        self.providers
            .iter()
            .find(|p| p.name().eq_ignore_ascii_case(name))
            .cloned()
    }

    /// First provider of the given type, in registration order.
    pub fn get_by_type(&self, kind: ProviderType) -> Option<Arc<dyn ModelProvider>> {
        self.providers
            .iter()
            .find(|p| p.provider_type() == kind)
            .cloned()
    }

    pub fn all(&self) -> &[Arc<dyn ModelProvider>] {
        &self.providers
    }

    /// Providers that are ready to serve requests.
    pub fn configured(&self) -> Vec<Arc<dyn ModelProvider>> {
        self.providers
            .iter()
            .filter(|p| p.is_configured())
            .cloned()
            .collect()
    }

    /// Human-readable status of every registered provider.
    pub fn status_report(&self) -> String {
        let mut out = String::from("Model Provider Status:\n");
        for provider in &self.providers {
            out.push_str(&format!(
                "- {} ({}): {}\n",
                provider.name(),
                provider.provider_type(),
                if provider.is_configured() {
                    "CONFIGURED"
                } else {
                    "NOT CONFIGURED"
                }
            ));
        }
        out
    }
}
