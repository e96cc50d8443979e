//! Plan model, validation, and the two planner variants.

pub mod entities;
pub mod error;
pub mod model;
pub mod planner;
pub mod rule;
pub mod schema;
pub mod validator;

pub use entities::{Plan, PlanStep};
pub use error::PlanningError;
pub use model::ModelPlanner;
pub use planner::Planner;
pub use rule::RulePlanner;
pub use schema::PLAN_SCHEMA;
pub use validator::PlanValidator;
