//! Planning error types

use crate::provider::ProviderError;
use thiserror::Error;

/// Errors raised while creating or validating a plan.
///
/// These are caller-visible: the turn executor never swallows them.
#[derive(Error, Debug)]
pub enum PlanningError {
    #[error("Empty plan")]
    EmptyPlan,

    #[error("Unknown tool: {0}")]
    UnknownTool(String),

    #[error("Missing parameters for tool: {0}")]
    MissingParameters(String),

    /// The model returned no content, or content that is not the expected
    /// plan document shape.
    #[error("Invalid plan response from provider: {0}")]
    InvalidModelOutput(String),

    /// The provider call itself failed before any content was produced.
    #[error("Provider call failed during planning")]
    Provider(#[from] ProviderError),
}
