//! Tool error types

use thiserror::Error;

/// Errors raised by tool parameter parsing and execution.
///
/// Type mismatches fail explicitly; tools never silently coerce a bad
/// parameter into a default.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ToolError {
    #[error("Missing required parameter '{0}'")]
    MissingParameter(String),

    #[error("Invalid parameter '{name}': {reason}")]
    InvalidParameter { name: String, reason: String },

    #[error("Tool execution failed: {0}")]
    ExecutionFailed(String),
}

impl ToolError {
    pub fn missing(name: impl Into<String>) -> Self {
        ToolError::MissingParameter(name.into())
    }

    pub fn invalid(name: impl Into<String>, reason: impl Into<String>) -> Self {
        ToolError::InvalidParameter {
            name: name.into(),
            reason: reason.into(),
        }
    }
}
