//! Provider error types

use thiserror::Error;

/// Errors raised by model providers and provider selection.
///
/// These are caught at the synthesis boundary and downgraded to a fallback
/// answer; a turn never fails because a provider is unavailable. They stay
/// visible as-is from the providers-status diagnostics query.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ProviderError {
    #[error("Provider '{0}' is not configured")]
    NotConfigured(String),

    #[error("No model provider is configured; set an API key for at least one provider")]
    NoProviderConfigured,

    #[error("Provider request failed: {0}")]
    RequestFailed(String),

    #[error("Malformed provider response: {0}")]
    MalformedResponse(String),
}
