//! Configuration loading and schema.

pub mod file_config;
pub mod loader;

pub use file_config::{
    AnthropicSettings, FileConfig, LlmConfig, OpenAiSettings, PlannerConfig, ServerConfig,
    ToolsConfig,
};
pub use loader::ConfigLoader;
