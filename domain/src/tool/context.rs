//! Per-turn execution context.

use std::collections::HashMap;

/// Transient mapping threading a tool's textual output to later steps.
///
/// Scoped to a single turn: the turn executor creates one, stores each
/// step's result under `"<toolName>_result"`, and drops it when the turn
/// ends. It is never persisted and never shared across conversations.
#[derive(Debug, Default)]
pub struct ExecutionContext {
    values: HashMap<String, String>,
}

impl ExecutionContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Key a tool's result is stored under.
    pub fn result_key(tool_name: &str) -> String {
        format!("{}_result", tool_name)
    }

    /// Record a tool's output for later steps.
    pub fn record_result(&mut self, tool_name: &str, output: impl Into<String>) {
        self.values
            .insert(Self::result_key(tool_name), output.into());
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(|s| s.as_str())
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}
