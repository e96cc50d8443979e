//! Email reminder tool.

use async_trait::async_trait;
use errand_domain::tool::{str_or, ExecutionContext, Tool, ToolError, ToolParams};
use regex::Regex;
use tracing::debug;

/// Customer id list used when the context holds no usable search result.
const DEFAULT_CUSTOMER_IDS: &str = "C001, C002, C003, C004, C005";

/// Sends reminder emails to a list of customers.
///
/// When invoked through `execute_with_context` with an empty `customerIds`,
/// the recipient list is derived from the previous search step's textual
/// output stored under `customer_search_result`. This is the one cross-step
/// coupling in the system.
pub struct EmailReminderTool {
    id_token: Regex,
}

impl EmailReminderTool {
    pub fn new() -> Self {
        Self {
            id_token: Regex::new(r"^C\d+$").expect("static pattern"),
        }
    }

    /// Build a comma-separated customer id list from the search result in
    /// the execution context. Tokens are whole words shaped like `C001`;
    /// when none match, the fixed default list is used.
    fn customer_ids_from_context(&self, context: &ExecutionContext) -> String {
        let results = match context.get(ExecutionContext::result_key("customer_search").as_str()) {
            Some(text) => text,
            None => return String::new(),
        };

        let ids: Vec<&str> = results
            .split(|c: char| c == ',' || c.is_whitespace())
            .map(str::trim)
            .filter(|token| self.id_token.is_match(token))
            .collect();

        if ids.is_empty() {
            debug!("No customer id tokens in search result, using default list");
            DEFAULT_CUSTOMER_IDS.to_string()
        } else {
            ids.join(", ")
        }
    }
}

impl Default for EmailReminderTool {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Tool for EmailReminderTool {
    fn name(&self) -> &str {
        "send_email_reminder"
    }

    fn description(&self) -> &str {
        "Send email reminders to customers about overdue balances."
    }

    fn parameter_hints(&self) -> Vec<(String, String)> {
        vec![
            (
                "customerIds".to_string(),
                "Comma-separated list of customer IDs".to_string(),
            ),
            (
                "templateType".to_string(),
                "Email template to use (reminder, final_notice, etc.)".to_string(),
            ),
            ("subject".to_string(), "Email subject line".to_string()),
        ]
    }

    async fn execute(&self, params: &ToolParams) -> Result<String, ToolError> {
        let customer_ids = match params.get("customerIds") {
            Some(serde_json::Value::String(s)) => s.as_str(),
            Some(other) => {
                return Err(ToolError::invalid(
                    "customerIds",
                    format!("expected a string, got {}", other),
                ))
            }
            None => return Err(ToolError::missing("customerIds")),
        };
        let template_type = str_or(params, "templateType", "reminder");
        let subject = str_or(params, "subject", "Account Balance Reminder");

        let customers: Vec<&str> = customer_ids.split(',').collect();
        let mut result = format!(
            "Sending {} reminder emails with template '{}':\n",
            customers.len(),
            template_type
        );

        for customer_id in customers {
            result.push_str(&format!(
                "✓ Email sent to customer {} with subject: '{}'\n",
                customer_id.trim(),
                subject
            ));
        }

        result.push_str("\nEmail reminders sent successfully to all customers.");
        Ok(result)
    }

    async fn execute_with_context(
        &self,
        params: &ToolParams,
        context: &ExecutionContext,
    ) -> Result<String, ToolError> {
        let provided = str_or(params, "customerIds", "");

        if !provided.trim().is_empty() {
            return self.execute(params).await;
        }

        let mut merged = params.clone();
        let derived = self.customer_ids_from_context(context);
        if !derived.is_empty() {
            merged.insert("customerIds".to_string(), serde_json::Value::String(derived));
        }

        self.execute(&merged).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(json: serde_json::Value) -> ToolParams {
        serde_json::from_value(json).unwrap()
    }

    #[tokio::test]
    async fn test_explicit_ids_are_used_directly() {
        let out = EmailReminderTool::new()
            .execute(&params(serde_json::json!({"customerIds": "C001, C002"})))
            .await
            .unwrap();

        assert!(out.starts_with("Sending 2 reminder emails with template 'reminder':"));
        assert!(out.contains("✓ Email sent to customer C001"));
        assert!(out.contains("✓ Email sent to customer C002"));
        assert!(out.ends_with("Email reminders sent successfully to all customers."));
    }

    #[tokio::test]
    async fn test_missing_ids_are_an_error_without_context() {
        let result = EmailReminderTool::new()
            .execute(&params(serde_json::json!({})))
            .await;

        assert!(matches!(result, Err(ToolError::MissingParameter(_))));
    }

    #[tokio::test]
    async fn test_context_supplies_ids_when_blank() {
        let tool = EmailReminderTool::new();
        let mut context = ExecutionContext::new();
        context.record_result(
            "customer_search",
            "Found 2 customers:\n1. Customer ID: C001, Name: John Doe\n2. Customer ID: C002, Name: Jane Smith",
        );

        let out = tool
            .execute_with_context(&params(serde_json::json!({"customerIds": ""})), &context)
            .await
            .unwrap();

        assert!(out.starts_with("Sending 2 reminder emails"));
        assert!(out.contains("customer C001"));
        assert!(out.contains("customer C002"));
        assert!(!out.contains("C003"), "default list must not be used");
    }

    #[tokio::test]
    async fn test_context_without_id_tokens_falls_back_to_default_list() {
        let tool = EmailReminderTool::new();
        let mut context = ExecutionContext::new();
        context.record_result("customer_search", "No matching customers found.");

        let out = tool
            .execute_with_context(&params(serde_json::json!({"customerIds": ""})), &context)
            .await
            .unwrap();

        assert!(out.starts_with("Sending 5 reminder emails"));
        assert!(out.contains("customer C005"));
    }

    #[tokio::test]
    async fn test_explicit_ids_win_over_context() {
        let tool = EmailReminderTool::new();
        let mut context = ExecutionContext::new();
        context.record_result("customer_search", "Customer ID: C009");

        let out = tool
            .execute_with_context(
                &params(serde_json::json!({"customerIds": "C042"})),
                &context,
            )
            .await
            .unwrap();

        assert!(out.contains("customer C042"));
        assert!(!out.contains("C009"));
    }

    #[tokio::test]
    async fn test_empty_context_falls_back_to_plain_execute_error() {
        let tool = EmailReminderTool::new();
        let context = ExecutionContext::new();

        // No context entry and no ids: the underlying execute sees the
        // original blank parameter
        let out = tool
            .execute_with_context(&params(serde_json::json!({"customerIds": ""})), &context)
            .await
            .unwrap();

        assert!(out.starts_with("Sending 1 reminder emails"));
    }

    #[tokio::test]
    async fn test_custom_subject_and_template() {
        let out = EmailReminderTool::new()
            .execute(&params(serde_json::json!({
                "customerIds": "C001",
                "templateType": "final_notice",
                "subject": "Last call"
            })))
            .await
            .unwrap();

        assert!(out.contains("template 'final_notice'"));
        assert!(out.contains("subject: 'Last call'"));
    }
}
