//! Plan validation against the configured tool allow-list.

use super::entities::Plan;
use super::error::PlanningError;
use std::collections::BTreeSet;

/// Validates plans before execution.
///
/// The allow-list is injected at construction: it is configuration, not
/// business logic, so callers decide which tools a plan may reference.
/// `validate` is a pure function of its input.
#[derive(Debug, Clone)]
pub struct PlanValidator {
    allowed_tools: BTreeSet<String>,
}

impl PlanValidator {
    pub fn new<I, S>(allowed_tools: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            allowed_tools: allowed_tools.into_iter().map(Into::into).collect(),
        }
    }

    pub fn allowed_tools(&self) -> impl Iterator<Item = &str> {
        self.allowed_tools.iter().map(|s| s.as_str())
    }

    /// Accepts iff the plan has at least one step, every step's tool is in
    /// the allow-list, and every step carries a parameter mapping (an
    /// empty-but-present mapping is fine).
    pub fn validate(&self, plan: &Plan) -> Result<(), PlanningError> {
        if plan.steps.is_empty() {
            return Err(PlanningError::EmptyPlan);
        }

        for step in &plan.steps {
            if !self.allowed_tools.contains(&step.tool_name) {
                return Err(PlanningError::UnknownTool(step.tool_name.clone()));
            }

            if step.parameters.is_none() {
                return Err(PlanningError::MissingParameters(step.tool_name.clone()));
            }
        }

        Ok(())
    }
}
