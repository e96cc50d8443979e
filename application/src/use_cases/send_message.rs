//! Send Message use case: the turn executor.
//!
//! Drives one conversational turn: plan the goal, run the plan's steps
//! against the tool registry with a shared per-turn context, synthesize an
//! answer through the selected model provider, and persist the transcript.

use crate::ports::conversation_store::{ConversationStore, StoreError};
use chrono::Utc;
use errand_domain::{
    ChatMessage, ExecutionContext, Message, NewMessage, PlanStep, Planner, PlanningError,
    ProviderError, ProviderFactory, ProviderRequest, ToolParams, ToolRegistry,
};
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info, warn};

/// Errors a turn surfaces to its caller.
///
/// Provider and tool failures never appear here: providers degrade to the
/// fallback answer at the synthesis boundary, and tool failures degrade to
/// recorded textual results.
#[derive(Error, Debug)]
pub enum TurnError {
    #[error("Conversation not found: {0}")]
    ConversationNotFound(u64),

    /// Plan construction failed. Intentionally not degraded: the caller
    /// must see that the goal produced no executable plan.
    #[error(transparent)]
    Planning(#[from] PlanningError),

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Executes one user-message-in, assistant-message-out turn.
pub struct SendMessageUseCase {
    store: Arc<dyn ConversationStore>,
    registry: Arc<ToolRegistry>,
    factory: Arc<ProviderFactory>,
    planner: Arc<dyn Planner>,
}

impl SendMessageUseCase {
    pub fn new(
        store: Arc<dyn ConversationStore>,
        registry: Arc<ToolRegistry>,
        factory: Arc<ProviderFactory>,
        planner: Arc<dyn Planner>,
    ) -> Self {
        Self {
            store,
            registry,
            factory,
            planner,
        }
    }

    /// Run one turn against an existing conversation.
    ///
    /// Steps execute strictly sequentially; later steps may read earlier
    /// results through the shared context, so this loop must never be
    /// parallelized within a turn.
    pub async fn execute(&self, conversation_id: u64, goal: &str) -> Result<Message, TurnError> {
        let mut conversation = self
            .store
            .find_by_id(conversation_id)
            .await?
            .ok_or(TurnError::ConversationNotFound(conversation_id))?;

        self.store
            .append_message(conversation_id, NewMessage::user(goal))
            .await?;

        let plan = self.planner.create_plan(goal).await?;
        debug!(planner = self.planner.name(), "{}", plan.describe());

        let mut tool_results = String::new();
        let mut tools_used: Vec<String> = Vec::new();
        let mut context = ExecutionContext::new();

        for step in &plan.steps {
            info!(tool = %step.tool_name, "Executing: {}", step.description);

            let result = self.execute_step(step, &context).await;
            tool_results.push_str(&format!("Tool: {}\n{}\n\n", step.tool_name, result));
            tools_used.push(step.tool_name.clone());

            // Store the result for later steps
            context.record_result(&step.tool_name, result);
        }

        let answer = self.synthesize(goal, &tool_results, &tools_used).await;

        let recorded_tools = if tools_used.is_empty() {
            None
        } else {
            Some(tools_used)
        };
        let assistant = self
            .store
            .append_message(conversation_id, NewMessage::assistant(answer, recorded_tools))
            .await?;

        conversation.complete(Utc::now());
        self.store.save(conversation).await?;

        Ok(assistant)
    }

    /// Execute a single plan step. Failures degrade to descriptive result
    /// strings so the rest of the plan still executes.
    async fn execute_step(&self, step: &PlanStep, context: &ExecutionContext) -> String {
        let tool = match self.registry.lookup(&step.tool_name) {
            Some(tool) => tool,
            None => return format!("Tool '{}' not found", step.tool_name),
        };

        let empty = ToolParams::new();
        let params = step.parameters.as_ref().unwrap_or(&empty);

        match tool.execute_with_context(params, context).await {
            Ok(output) => output,
            Err(e) => {
                warn!(tool = %step.tool_name, error = %e, "Tool step failed");
                format!("Tool '{}' failed: {}", step.tool_name, e)
            }
        }
    }

    /// Synthesize the final answer, degrading to the template fallback on
    /// any provider failure. The turn never fails here.
    async fn synthesize(&self, goal: &str, tool_results: &str, tools_used: &[String]) -> String {
        match self.ask_provider(goal, tool_results, tools_used).await {
            Ok(answer) => answer,
            Err(e) => {
                warn!(error = %e, "Provider call failed, using fallback answer");
                fallback_answer(goal, tools_used)
            }
        }
    }

    async fn ask_provider(
        &self,
        goal: &str,
        tool_results: &str,
        tools_used: &[String],
    ) -> Result<String, ProviderError> {
        let provider = self.factory.default_provider()?;
        debug!(provider = provider.name(), "Using model provider");

        let system = self.build_system_prompt(tool_results, tools_used);
        let request = ProviderRequest::new(
            provider.default_model(),
            vec![ChatMessage::system(system), ChatMessage::user(goal)],
        )
        .with_temperature(0.7)
        .with_max_tokens(1000);

        let response = provider.chat(request).await?;
        response
            .first_choice_content()
            .map(|s| s.to_string())
            .ok_or_else(|| {
                ProviderError::MalformedResponse("response contained no choices".to_string())
            })
    }

    fn build_system_prompt(&self, tool_results: &str, tools_used: &[String]) -> String {
        let mut prompt = String::from(
            "You are an intelligent business agent assistant. \
             Your role is to help users accomplish their business tasks by using available tools.\n\n",
        );

        prompt.push_str("AVAILABLE TOOLS:\n");
        prompt.push_str(&self.registry.describe_all());
        prompt.push_str("\n\n");

        if !tool_results.is_empty() {
            prompt.push_str("TOOL EXECUTION RESULTS:\n");
            prompt.push_str(tool_results);
            prompt.push('\n');
        }

        if !tools_used.is_empty() {
            prompt.push_str("TOOLS USED IN THIS REQUEST:\n");
            for tool in tools_used {
                prompt.push_str(&format!("- {}\n", tool));
            }
            prompt.push('\n');
        }

        prompt.push_str(
            "Based on the tool results above, provide a concise and helpful response to the user. \
             Summarize what was done, highlight key findings, and suggest next steps if appropriate.\n",
        );

        prompt
    }
}

/// Deterministic template answer used when no provider is reachable.
fn fallback_answer(goal: &str, tools_used: &[String]) -> String {
    let mut response = String::from("✓ Task completed.\n\n");
    response.push_str(&format!("Summary of your request: \"{}\"\n", goal));

    if tools_used.is_empty() {
        response.push_str("No tools were required for this request.\n\n");
    } else {
        response.push_str(&format!(
            "- Executed {} tool step(s)\n\nTools used: {}\n\n",
            tools_used.len(),
            tools_used.join(", ")
        ));
    }

    response.push_str(
        "Next steps: review the results above and follow up within 5 business days \
         if further action is required.",
    );
    response
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::use_cases::testing::{InMemoryStore, NoProviderFactory, RecordingTool};
    use async_trait::async_trait;
    use errand_domain::{Plan, RulePlanner, Tool, ToolError};

    fn registry() -> Arc<ToolRegistry> {
        Arc::new(
            ToolRegistry::new()
                .register(Arc::new(RecordingTool::new("customer_search", "five customers: C001")))
                .register(Arc::new(RecordingTool::new("send_email_reminder", "emails sent"))),
        )
    }

    fn use_case(store: Arc<InMemoryStore>) -> SendMessageUseCase {
        SendMessageUseCase::new(
            store,
            registry(),
            NoProviderFactory::factory(),
            Arc::new(RulePlanner::new()),
        )
    }

    #[tokio::test]
    async fn test_unknown_conversation_persists_nothing() {
        let store = Arc::new(InMemoryStore::new());
        let use_case = use_case(Arc::clone(&store));

        let result = use_case.execute(42, "find customers").await;

        assert!(matches!(result, Err(TurnError::ConversationNotFound(42))));
        assert!(store.message_count().await == 0);
    }

    #[tokio::test]
    async fn test_turn_appends_user_then_assistant() {
        let store = Arc::new(InMemoryStore::new());
        let conversation = store.create("u1").await.unwrap();
        let use_case = use_case(Arc::clone(&store));

        let assistant = use_case
            .execute(conversation.id, "find overdue customers and send reminders")
            .await
            .unwrap();

        let messages = store.list_messages(conversation.id).await.unwrap();
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0].role, errand_domain::MessageRole::User);
        assert_eq!(messages[1].role, errand_domain::MessageRole::Assistant);
        assert_eq!(messages[1].id, assistant.id);
        assert_eq!(
            assistant.tools_used,
            Some(vec![
                "customer_search".to_string(),
                "send_email_reminder".to_string()
            ])
        );

        let refreshed = store.find_by_id(conversation.id).await.unwrap().unwrap();
        assert_eq!(
            refreshed.status,
            errand_domain::ConversationStatus::Completed
        );
    }

    #[tokio::test]
    async fn test_no_provider_still_completes_with_fallback() {
        let store = Arc::new(InMemoryStore::new());
        let conversation = store.create("u1").await.unwrap();
        let use_case = use_case(Arc::clone(&store));

        let assistant = use_case
            .execute(conversation.id, "send reminder emails")
            .await
            .unwrap();

        assert!(!assistant.content.is_empty());
        assert!(assistant.content.contains("send reminder emails"));
    }

    #[tokio::test]
    async fn test_empty_plan_yields_no_tools_used() {
        let store = Arc::new(InMemoryStore::new());
        let conversation = store.create("u1").await.unwrap();
        let use_case = use_case(Arc::clone(&store));

        let assistant = use_case.execute(conversation.id, "hello").await.unwrap();

        assert!(assistant.tools_used.is_none());
        let refreshed = store.find_by_id(conversation.id).await.unwrap().unwrap();
        assert_eq!(
            refreshed.status,
            errand_domain::ConversationStatus::Completed
        );
    }

    #[tokio::test]
    async fn test_missing_tool_degrades_to_recorded_string() {
        let store = Arc::new(InMemoryStore::new());
        let conversation = store.create("u1").await.unwrap();

        // Registry without the email tool
        let registry = Arc::new(
            ToolRegistry::new().register(Arc::new(RecordingTool::new("customer_search", "found"))),
        );
        let use_case = SendMessageUseCase::new(
            Arc::clone(&store) as Arc<dyn ConversationStore>,
            registry,
            NoProviderFactory::factory(),
            Arc::new(RulePlanner::new()),
        );

        let assistant = use_case
            .execute(conversation.id, "find overdue customers and send reminders")
            .await
            .unwrap();

        // Both steps still count as used, and the turn completed
        assert_eq!(
            assistant.tools_used,
            Some(vec![
                "customer_search".to_string(),
                "send_email_reminder".to_string()
            ])
        );
    }

    #[tokio::test]
    async fn test_failing_tool_does_not_abort_the_turn() {
        struct FailingTool;

        #[async_trait]
        impl Tool for FailingTool {
            fn name(&self) -> &str {
                "customer_search"
            }

            fn description(&self) -> &str {
                "Always fails."
            }

            fn parameter_hints(&self) -> Vec<(String, String)> {
                Vec::new()
            }

            async fn execute(&self, _params: &ToolParams) -> Result<String, ToolError> {
                Err(ToolError::ExecutionFailed("backend down".to_string()))
            }
        }

        let store = Arc::new(InMemoryStore::new());
        let conversation = store.create("u1").await.unwrap();
        let registry = Arc::new(
            ToolRegistry::new()
                .register(Arc::new(FailingTool))
                .register(Arc::new(RecordingTool::new("send_email_reminder", "sent"))),
        );
        let use_case = SendMessageUseCase::new(
            Arc::clone(&store) as Arc<dyn ConversationStore>,
            registry,
            NoProviderFactory::factory(),
            Arc::new(RulePlanner::new()),
        );

        let assistant = use_case
            .execute(conversation.id, "find overdue customers and send reminders")
            .await
            .unwrap();

        assert!(assistant.tools_used.is_some());
        let refreshed = store.find_by_id(conversation.id).await.unwrap().unwrap();
        assert_eq!(
            refreshed.status,
            errand_domain::ConversationStatus::Completed
        );
    }

    #[tokio::test]
    async fn test_resending_appends_rather_than_replaces() {
        let store = Arc::new(InMemoryStore::new());
        let conversation = store.create("u1").await.unwrap();
        let use_case = use_case(Arc::clone(&store));

        use_case.execute(conversation.id, "hello").await.unwrap();
        use_case.execute(conversation.id, "hello").await.unwrap();

        let messages = store.list_messages(conversation.id).await.unwrap();
        assert_eq!(messages.len(), 4, "turns append, they never replace");
    }

    #[tokio::test]
    async fn test_planning_error_propagates() {
        struct BrokenPlanner;

        #[async_trait]
        impl Planner for BrokenPlanner {
            fn name(&self) -> &str {
                "BrokenPlanner"
            }

            async fn create_plan(&self, _goal: &str) -> Result<Plan, PlanningError> {
                Err(PlanningError::InvalidModelOutput("garbage".to_string()))
            }
        }

        let store = Arc::new(InMemoryStore::new());
        let conversation = store.create("u1").await.unwrap();
        let use_case = SendMessageUseCase::new(
            Arc::clone(&store) as Arc<dyn ConversationStore>,
            registry(),
            NoProviderFactory::factory(),
            Arc::new(BrokenPlanner),
        );

        let result = use_case.execute(conversation.id, "anything").await;
        assert!(matches!(result, Err(TurnError::Planning(_))));
    }
}
