//! Model-driven planner.

use super::entities::{Plan, PlanStep};
use super::error::PlanningError;
use super::planner::Planner;
use super::schema::PLAN_SCHEMA;
use super::validator::PlanValidator;
use crate::provider::{ChatMessage, ModelProvider, ProviderRequest};
use async_trait::async_trait;
use serde::Deserialize;
use std::sync::Arc;

/// Wire shape of the plan document the provider is asked to produce.
#[derive(Debug, Deserialize)]
struct PlanDocument {
    steps: Vec<PlanStep>,
}

/// Planner that asks a model provider for a JSON plan document.
///
/// The provider is instructed to answer with `{"steps": [...]}` matching
/// [`PLAN_SCHEMA`]; the first choice's content is parsed, mapped to
/// [`PlanStep`]s, and run through the [`PlanValidator`] before being
/// returned. Missing content, malformed JSON, or a validation failure all
/// surface as [`PlanningError`].
pub struct ModelPlanner {
    provider: Arc<dyn ModelProvider>,
    validator: PlanValidator,
}

impl ModelPlanner {
    pub fn new(provider: Arc<dyn ModelProvider>, validator: PlanValidator) -> Self {
        Self {
            provider,
            validator,
        }
    }

    fn build_request(&self, goal: &str) -> ProviderRequest {
        let tool_list = self
            .validator
            .allowed_tools()
            .map(|t| format!("- {}", t))
            .collect::<Vec<_>>()
            .join("\n");

        let system = format!(
            "You are a planning assistant. Turn the user's goal into an execution plan.\n\
             Answer with a single JSON object matching this schema, and nothing else:\n\
             {schema}\n\n\
             Only use these tools:\n{tools}\n",
            schema = PLAN_SCHEMA,
            tools = tool_list,
        );

        ProviderRequest::new(
            self.provider.default_model(),
            vec![ChatMessage::system(system), ChatMessage::user(goal)],
        )
    }

    fn parse_plan(&self, content: &str) -> Result<Plan, PlanningError> {
        let document: PlanDocument = serde_json::from_str(content)
            .map_err(|e| PlanningError::InvalidModelOutput(e.to_string()))?;

        Ok(Plan::new(document.steps))
    }
}

#[async_trait]
impl Planner for ModelPlanner {
    fn name(&self) -> &str {
        "ModelPlanner"
    }

    async fn create_plan(&self, goal: &str) -> Result<Plan, PlanningError> {
        let request = self.build_request(goal);
        let response = self.provider.chat(request).await?;

        let content = response.first_choice_content().ok_or_else(|| {
            PlanningError::InvalidModelOutput("response contained no content".to_string())
        })?;

        let plan = self.parse_plan(content)?;
        self.validator.validate(&plan)?;

        Ok(plan)
    }
}
