//! Planner capability trait.

use super::entities::Plan;
use super::error::PlanningError;
use async_trait::async_trait;

/// Turns a free-text goal into an execution plan.
///
/// Two variants ship with the system: the deterministic keyword
/// [`RulePlanner`](super::rule::RulePlanner) and the provider-backed
/// [`ModelPlanner`](super::model::ModelPlanner). The variant in use is
/// selected by configuration at wiring time, never by runtime inspection.
#[async_trait]
pub trait Planner: Send + Sync {
    /// Name of this planner, for logging and diagnostics.
    fn name(&self) -> &str;

    /// Create an execution plan for the goal.
    async fn create_plan(&self, goal: &str) -> Result<Plan, PlanningError>;
}
