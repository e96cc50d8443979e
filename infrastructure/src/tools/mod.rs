//! Reference tool implementations.

pub mod customer_search;
pub mod email_reminder;

pub use customer_search::CustomerSearchTool;
pub use email_reminder::EmailReminderTool;

use errand_domain::ToolRegistry;
use std::sync::Arc;

/// Registry with the built-in tool set, in catalogue order.
pub fn default_registry() -> ToolRegistry {
    ToolRegistry::new()
        .register(Arc::new(CustomerSearchTool))
        .register(Arc::new(EmailReminderTool::new()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_registry_contents() {
        let registry = default_registry();

        assert!(registry.has_tool("customer_search"));
        assert!(registry.has_tool("send_email_reminder"));
        assert_eq!(registry.names(), vec!["customer_search", "send_email_reminder"]);
    }

    #[test]
    fn test_catalogue_mentions_both_tools_with_hints() {
        let catalogue = default_registry().describe_all();

        assert!(catalogue.contains("- customer_search: Search for customers"));
        assert!(catalogue.contains("- send_email_reminder: Send email reminders"));
        assert!(catalogue.contains("    - minBalance: Minimum balance amount (e.g., 500)"));
        assert!(catalogue.contains("    - customerIds: Comma-separated list of customer IDs"));
    }
}
