//! Plan domain entities

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A single step in an execution plan.
///
/// Carries everything needed to invoke a tool: a human-readable
/// description, the tool name, and an untyped parameter mapping.
/// Steps are immutable once built; identity is structural.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanStep {
    /// What this step accomplishes
    pub description: String,
    /// The tool to invoke
    pub tool_name: String,
    /// Arguments for the tool; `None` means the planner produced no mapping
    /// at all (rejected by the validator), while an empty map is legal
    pub parameters: Option<HashMap<String, serde_json::Value>>,
}

impl PlanStep {
    pub fn new(description: impl Into<String>, tool_name: impl Into<String>) -> Self {
        Self {
            description: description.into(),
            tool_name: tool_name.into(),
            parameters: Some(HashMap::new()),
        }
    }

    pub fn with_param(mut self, key: impl Into<String>, value: impl Into<serde_json::Value>) -> Self {
        self.parameters
            .get_or_insert_with(HashMap::new)
            .insert(key.into(), value.into());
        self
    }

    /// A step whose parameter mapping is absent entirely.
    pub fn without_parameters(description: impl Into<String>, tool_name: impl Into<String>) -> Self {
        Self {
            description: description.into(),
            tool_name: tool_name.into(),
            parameters: None,
        }
    }
}

impl std::fmt::Display for PlanStep {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Step: {} [Tool: {}]", self.description, self.tool_name)
    }
}

/// An ordered execution plan produced for a goal.
///
/// Step order is execution order. An empty plan is a legal value (it
/// signals "no actionable intent") but the validator rejects it when
/// validation is required before execution.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Plan {
    pub steps: Vec<PlanStep>,
}

impl Plan {
    pub fn new(steps: Vec<PlanStep>) -> Self {
        Self { steps }
    }

    pub fn empty() -> Self {
        Self { steps: Vec::new() }
    }

    pub fn with_step(mut self, step: PlanStep) -> Self {
        self.steps.push(step);
        self
    }

    /// Human-readable description of the plan.
    pub fn describe(&self) -> String {
        let mut out = format!("Execution Plan ({} steps):\n", self.steps.len());
        for (i, step) in self.steps.iter().enumerate() {
            out.push_str(&format!("{}. {}\n", i + 1, step.description));
        }
        out
    }

    /// Tool names in execution order.
    pub fn tool_names(&self) -> Vec<String> {
        self.steps.iter().map(|s| s.tool_name.clone()).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn requires_tools(&self) -> bool {
        !self.steps.is_empty()
    }
}
