//! Tool capability trait.

use super::context::ExecutionContext;
use super::error::ToolError;
use async_trait::async_trait;
use std::collections::HashMap;

/// Untyped parameter mapping handed to a tool.
///
/// Values stay dynamic at this boundary; each tool converts to concrete
/// types in its own parameter parsing and fails explicitly on mismatch.
pub type ToolParams = HashMap<String, serde_json::Value>;

/// An executable capability the agent can plan against.
///
/// Implementations live in the infrastructure layer; the planner and turn
/// executor only ever see this trait.
#[async_trait]
pub trait Tool: Send + Sync {
    /// Unique tool name (e.g. `customer_search`).
    fn name(&self) -> &str;

    /// Human-readable description, rendered into the provider prompt.
    fn description(&self) -> &str;

    /// Parameter name → human-readable hint pairs, in presentation order.
    /// Documentation for the provider, not a runtime type check.
    fn parameter_hints(&self) -> Vec<(String, String)>;

    /// Execute with the given parameters.
    async fn execute(&self, params: &ToolParams) -> Result<String, ToolError>;

    /// Execute with access to prior step results.
    ///
    /// The default ignores the context and delegates to [`execute`](Self::execute);
    /// tools that consume earlier outputs override this.
    async fn execute_with_context(
        &self,
        params: &ToolParams,
        _context: &ExecutionContext,
    ) -> Result<String, ToolError> {
        self.execute(params).await
    }
}

/// Read a required string parameter.
pub fn require_str<'a>(params: &'a ToolParams, key: &str) -> Result<&'a str, ToolError> {
    match params.get(key) {
        Some(serde_json::Value::String(s)) => Ok(s),
        Some(other) => Err(ToolError::invalid(
            key,
            format!("expected a string, got {}", other),
        )),
        None => Err(ToolError::missing(key)),
    }
}

/// Read an optional string parameter, falling back to a default.
pub fn str_or<'a>(params: &'a ToolParams, key: &str, default: &'a str) -> &'a str {
    match params.get(key) {
        Some(serde_json::Value::String(s)) => s,
        _ => default,
    }
}

/// Read a required numeric parameter. Numeric strings are accepted, the
/// way a loosely-typed planner may emit them.
pub fn require_f64(params: &ToolParams, key: &str) -> Result<f64, ToolError> {
    match params.get(key) {
        Some(serde_json::Value::Number(n)) => n
            .as_f64()
            .ok_or_else(|| ToolError::invalid(key, "not representable as f64")),
        Some(serde_json::Value::String(s)) => s
            .parse::<f64>()
            .map_err(|_| ToolError::invalid(key, format!("'{}' is not a number", s))),
        Some(other) => Err(ToolError::invalid(
            key,
            format!("expected a number, got {}", other),
        )),
        None => Err(ToolError::missing(key)),
    }
}
