//! Customer search tool.

use async_trait::async_trait;
use errand_domain::tool::{require_f64, str_or, Tool, ToolError, ToolParams};

/// Searches customers by balance and status.
///
/// The five-row listing stands in for a customer database; its format is
/// load-bearing because the email reminder tool scans it for customer id
/// tokens through the execution context.
pub struct CustomerSearchTool;

#[async_trait]
impl Tool for CustomerSearchTool {
    fn name(&self) -> &str {
        "customer_search"
    }

    fn description(&self) -> &str {
        "Search for customers based on specific criteria like overdue balance, status, etc."
    }

    fn parameter_hints(&self) -> Vec<(String, String)> {
        vec![
            (
                "minBalance".to_string(),
                "Minimum balance amount (e.g., 500)".to_string(),
            ),
            (
                "status".to_string(),
                "Customer status filter (active, overdue, etc.)".to_string(),
            ),
            (
                "limit".to_string(),
                "Maximum number of results to return".to_string(),
            ),
        ]
    }

    async fn execute(&self, params: &ToolParams) -> Result<String, ToolError> {
        let min_balance = require_f64(params, "minBalance")?;
        let status = str_or(params, "status", "overdue");

        Ok(format!(
            "Found 5 customers with overdue balance >= ${:.2} and status '{}':\n\
             1. Customer ID: C001, Name: John Doe, Balance: $650.00\n\
             2. Customer ID: C002, Name: Jane Smith, Balance: $800.50\n\
             3. Customer ID: C003, Name: Bob Johnson, Balance: $550.25\n\
             4. Customer ID: C004, Name: Alice Williams, Balance: $1200.00\n\
             5. Customer ID: C005, Name: Charlie Brown, Balance: $600.75",
            min_balance, status
        ))
    }
}
