//! Model provider adapters and factory wiring.

pub mod anthropic;
pub mod openai;

pub use anthropic::AnthropicProvider;
pub use openai::OpenAiProvider;

use crate::config::LlmConfig;
use errand_domain::ProviderFactory;
use std::sync::Arc;

/// Factory over the built-in providers, preferred name from configuration.
pub fn build_factory(config: &LlmConfig) -> ProviderFactory {
    ProviderFactory::new(
        vec![
            Arc::new(OpenAiProvider::from_settings(&config.openai)),
            Arc::new(AnthropicProvider::from_settings(&config.anthropic)),
        ],
        config.provider.clone(),
    )
}

/// Resolve an API key: a directly configured value wins, otherwise the
/// configured environment variable is consulted.
pub(crate) fn resolve_api_key(direct: Option<&str>, env_var: &str) -> Option<String> {
    match direct {
        Some(key) if !key.is_empty() => Some(key.to_string()),
        _ => std::env::var(env_var).ok().filter(|k| !k.is_empty()),
    }
}

/// Deterministic completion standing in for a vendor call, keyed on the
/// user's request the way the upstream simulation behaves.
pub(crate) fn canned_reply(user_message: &str) -> String {
    let lower = user_message.to_lowercase();

    if lower.contains("search") || lower.contains("find") {
        "I understand you want to search for something. I'll help you with that. \
         What specific criteria would you like me to use for the search?"
            .to_string()
    } else if lower.contains("email") || lower.contains("send") {
        "I can help you send emails. Here's what I'll do:\n\
         1. Identify the recipients\n\
         2. Prepare the email content\n\
         3. Send the emails\n\
         4. Confirm delivery"
            .to_string()
    } else if lower.contains("overdue") || lower.contains("balance") {
        "I'll search for customers with overdue balances and prepare reminder communications. \
         Let me gather the data and send out notifications."
            .to_string()
    } else {
        format!(
            "I've received your request: \"{}\". \
             I'm processing this and will provide you with detailed assistance.",
            user_message
        )
    }
}
