//! Configuration file schema.
//!
//! All sections have serde defaults so a missing or partial `errand.toml`
//! still yields a working configuration.

use serde::{Deserialize, Serialize};

/// Top-level configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FileConfig {
    #[serde(default)]
    pub llm: LlmConfig,
    #[serde(default)]
    pub planner: PlannerConfig,
    #[serde(default)]
    pub tools: ToolsConfig,
    #[serde(default)]
    pub server: ServerConfig,
}

/// Model provider configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LlmConfig {
    /// Preferred provider name ("openai", "anthropic"). The factory falls
    /// back to the first configured provider when this one is not ready.
    #[serde(default = "default_provider")]
    pub provider: String,
    #[serde(default)]
    pub openai: OpenAiSettings,
    #[serde(default)]
    pub anthropic: AnthropicSettings,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            provider: default_provider(),
            openai: OpenAiSettings::default(),
            anthropic: AnthropicSettings::default(),
        }
    }
}

fn default_provider() -> String {
    "openai".to_string()
}

/// OpenAI provider settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OpenAiSettings {
    /// Environment variable holding the API key.
    #[serde(default = "default_openai_key_env")]
    pub api_key_env: String,
    /// Direct API key (not recommended; use the env var instead).
    #[serde(default)]
    pub api_key: Option<String>,
    #[serde(default = "default_openai_model")]
    pub model: String,
    #[serde(default = "default_openai_endpoint")]
    pub endpoint: String,
}

impl Default for OpenAiSettings {
    fn default() -> Self {
        Self {
            api_key_env: default_openai_key_env(),
            api_key: None,
            model: default_openai_model(),
            endpoint: default_openai_endpoint(),
        }
    }
}

fn default_openai_key_env() -> String {
    "OPENAI_API_KEY".to_string()
}

fn default_openai_model() -> String {
    "gpt-4".to_string()
}

fn default_openai_endpoint() -> String {
    "https://api.openai.com".to_string()
}

/// Anthropic provider settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnthropicSettings {
    /// Environment variable holding the API key.
    #[serde(default = "default_anthropic_key_env")]
    pub api_key_env: String,
    /// Direct API key (not recommended; use the env var instead).
    #[serde(default)]
    pub api_key: Option<String>,
    #[serde(default = "default_anthropic_model")]
    pub model: String,
    #[serde(default = "default_anthropic_endpoint")]
    pub endpoint: String,
}

impl Default for AnthropicSettings {
    fn default() -> Self {
        Self {
            api_key_env: default_anthropic_key_env(),
            api_key: None,
            model: default_anthropic_model(),
            endpoint: default_anthropic_endpoint(),
        }
    }
}

fn default_anthropic_key_env() -> String {
    "ANTHROPIC_API_KEY".to_string()
}

fn default_anthropic_model() -> String {
    "claude-3-5-sonnet-latest".to_string()
}

fn default_anthropic_endpoint() -> String {
    "https://api.anthropic.com".to_string()
}

/// Planner selection.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlannerConfig {
    /// "rules" (deterministic keyword planner, the default) or "model"
    /// (provider-backed planner; requires a configured provider).
    #[serde(default = "default_planner_kind")]
    pub kind: String,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            kind: default_planner_kind(),
        }
    }
}

fn default_planner_kind() -> String {
    "rules".to_string()
}

/// Tool allow-list used by the plan validator.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolsConfig {
    #[serde(default = "default_allowed_tools")]
    pub allowed: Vec<String>,
}

impl Default for ToolsConfig {
    fn default() -> Self {
        Self {
            allowed: default_allowed_tools(),
        }
    }
}

fn default_allowed_tools() -> Vec<String> {
    vec![
        "customer_search".to_string(),
        "send_email_reminder".to_string(),
    ]
}

/// HTTP server settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_addr")]
    pub addr: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            addr: default_addr(),
        }
    }
}

fn default_addr() -> String {
    "127.0.0.1:8080".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = FileConfig::default();

        assert_eq!(config.llm.provider, "openai");
        assert_eq!(config.llm.openai.model, "gpt-4");
        assert_eq!(config.llm.anthropic.api_key_env, "ANTHROPIC_API_KEY");
        assert_eq!(config.planner.kind, "rules");
        assert_eq!(
            config.tools.allowed,
            vec!["customer_search", "send_email_reminder"]
        );
        assert_eq!(config.server.addr, "127.0.0.1:8080");
    }

    #[test]
    fn test_partial_toml_fills_missing_sections() {
        let config: FileConfig = toml::from_str(
            r#"
            [llm]
            provider = "anthropic"
        "#,
        )
        .unwrap();

        assert_eq!(config.llm.provider, "anthropic");
        assert_eq!(config.llm.openai.api_key_env, "OPENAI_API_KEY");
        assert_eq!(config.planner.kind, "rules");
    }
}
