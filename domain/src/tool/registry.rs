//! Tool registry.

use super::traits::Tool;
use std::collections::HashMap;
use std::sync::Arc;

/// Resolves tool names to implementations and renders the tool catalogue.
///
/// Registration order is preserved: `describe_all()` iterates tools in the
/// order they were first registered, and re-registering a name replaces the
/// implementation in place (last registration wins). The catalogue text is
/// rendered verbatim into the synthesis prompt, so its formatting is part
/// of the contract with the provider, not incidental.
#[derive(Default)]
pub struct ToolRegistry {
    tools: Vec<Arc<dyn Tool>>,
    index: HashMap<String, usize>,
}

impl ToolRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a tool. A later registration for the same name replaces
    /// the earlier one without changing its position in the catalogue.
    pub fn register(mut self, tool: Arc<dyn Tool>) -> Self {
        match self.index.get(tool.name()).copied() {
            Some(pos) => self.tools[pos] = tool,
            None => {
                self.index.insert(tool.name().to_string(), self.tools.len());
                self.tools.push(tool);
            }
        }
        self
    }

    pub fn lookup(&self, name: &str) -> Option<Arc<dyn Tool>> {
        self.index.get(name).map(|&pos| Arc::clone(&self.tools[pos]))
    }

    pub fn has_tool(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    /// Tool names in registration order.
    pub fn names(&self) -> Vec<&str> {
        self.tools.iter().map(|t| t.name()).collect()
    }

    pub fn len(&self) -> usize {
        self.tools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }

    /// Deterministic human-readable catalogue of every registered tool.
    pub fn describe_all(&self) -> String {
        let mut out = String::from("Available tools:\n");
        for tool in &self.tools {
            out.push_str(&format!("\n- {}: {}", tool.name(), tool.description()));
            let hints = tool.parameter_hints();
            if !hints.is_empty() {
                out.push_str("\n  Parameters: ");
                for (name, hint) in hints {
                    out.push_str(&format!("\n    - {}: {}", name, hint));
                }
            }
        }
        out
    }
}
