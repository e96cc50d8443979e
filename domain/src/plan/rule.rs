//! Deterministic keyword-rule planner.

use super::entities::{Plan, PlanStep};
use super::error::PlanningError;
use super::planner::Planner;
use async_trait::async_trait;
use regex::Regex;

const CUSTOMER_SEARCH: &str = "customer_search";
const SEND_EMAIL_REMINDER: &str = "send_email_reminder";

/// Rule-based planner matching goal keywords to tools.
///
/// Three conditions are evaluated independently and their steps unioned:
/// search/find intent adds a `customer_search` step, email/send/reminder
/// intent adds a `send_email_reminder` step, and overdue/balance intent
/// guarantees both steps are present. A goal matching nothing yields an
/// empty plan.
pub struct RulePlanner {
    number: Regex,
}

impl RulePlanner {
    pub fn new() -> Self {
        Self {
            number: Regex::new(r"\d+(?:\.\d+)?").expect("static pattern"),
        }
    }

    fn search_step(&self, goal: &str) -> PlanStep {
        let mut min_balance = self.extract_balance(goal);
        if min_balance <= 0.0 {
            min_balance = 500.0;
        }

        PlanStep::new(
            format!(
                "Search for customers with overdue balance >= ${:.2}",
                min_balance
            ),
            CUSTOMER_SEARCH,
        )
        .with_param("minBalance", min_balance)
        .with_param("status", "overdue")
        .with_param("limit", 100)
    }

    fn email_step(&self) -> PlanStep {
        PlanStep::new(
            "Send reminder emails to identified customers",
            SEND_EMAIL_REMINDER,
        )
        // Populated from the previous step's result at execution time
        .with_param("customerIds", "")
        .with_param("templateType", "reminder")
        .with_param(
            "subject",
            "Payment Reminder: Your Account Requires Immediate Attention",
        )
    }

    /// First decimal number found in the goal text, or 0 when absent.
    fn extract_balance(&self, goal: &str) -> f64 {
        self.number
            .find(goal)
            .and_then(|m| m.as_str().parse::<f64>().ok())
            .unwrap_or(0.0)
    }
}

impl Default for RulePlanner {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Planner for RulePlanner {
    fn name(&self) -> &str {
        "RulePlanner"
    }

    async fn create_plan(&self, goal: &str) -> Result<Plan, PlanningError> {
        let mut steps: Vec<PlanStep> = Vec::new();
        let lower = goal.to_lowercase();

        if lower.contains("search") || lower.contains("find") {
            steps.push(self.search_step(goal));
        }

        if lower.contains("email") || lower.contains("send") || lower.contains("reminder") {
            steps.push(self.email_step());
        }

        if lower.contains("overdue") || lower.contains("balance") {
            if !steps.iter().any(|s| s.tool_name == CUSTOMER_SEARCH) {
                steps.insert(0, self.search_step(goal));
            }
            if !steps.iter().any(|s| s.tool_name == SEND_EMAIL_REMINDER) {
                steps.push(self.email_step());
            }
        }

        Ok(Plan::new(steps))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn plan_for(goal: &str) -> Plan {
        RulePlanner::new().create_plan(goal).await.unwrap()
    }

    #[tokio::test]
    async fn test_search_goal_with_threshold() {
        let plan = plan_for("search for customers with overdue balance of 750").await;

        let step = &plan.steps[0];
        assert_eq!(step.tool_name, "customer_search");
        let params = step.parameters.as_ref().unwrap();
        assert_eq!(params.get("minBalance"), Some(&serde_json::json!(750.0)));
        assert_eq!(params.get("status"), Some(&serde_json::json!("overdue")));
    }

    #[tokio::test]
    async fn test_email_goal_yields_single_email_step() {
        let plan = plan_for("send reminder emails").await;

        assert_eq!(plan.tool_names(), vec!["send_email_reminder"]);
        let params = plan.steps[0].parameters.as_ref().unwrap();
        assert_eq!(params.get("customerIds"), Some(&serde_json::json!("")));
    }

    #[tokio::test]
    async fn test_overdue_balance_alone_yields_both_steps() {
        // Neither "search" nor "email" appears, yet both steps are required
        let plan = plan_for("overdue balance").await;

        assert_eq!(
            plan.tool_names(),
            vec!["customer_search", "send_email_reminder"]
        );
    }

    #[tokio::test]
    async fn test_search_is_inserted_before_existing_email_step() {
        let plan = plan_for("send emails about overdue accounts").await;

        assert_eq!(
            plan.tool_names(),
            vec!["customer_search", "send_email_reminder"]
        );
    }

    #[tokio::test]
    async fn test_unmatched_goal_yields_empty_plan() {
        let plan = plan_for("hello").await;
        assert!(plan.is_empty());
    }

    #[tokio::test]
    async fn test_missing_threshold_defaults_to_500() {
        let plan = plan_for("find delinquent customers").await;

        let params = plan.steps[0].parameters.as_ref().unwrap();
        assert_eq!(params.get("minBalance"), Some(&serde_json::json!(500.0)));
    }

    #[tokio::test]
    async fn test_zero_threshold_defaults_to_500() {
        let plan = plan_for("find customers with balance over 0").await;

        let params = plan.steps[0].parameters.as_ref().unwrap();
        assert_eq!(params.get("minBalance"), Some(&serde_json::json!(500.0)));
    }

    #[tokio::test]
    async fn test_decimal_threshold_is_extracted() {
        let plan = plan_for("find customers owing 750.50 or more").await;

        let params = plan.steps[0].parameters.as_ref().unwrap();
        assert_eq!(params.get("minBalance"), Some(&serde_json::json!(750.5)));
    }
}
