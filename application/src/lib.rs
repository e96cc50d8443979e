//! Application layer for errand-agent
//!
//! This crate contains use cases and port definitions. It depends only on
//! the domain layer; adapters for its ports live in the infrastructure
//! layer.

pub mod ports;
pub mod use_cases;

// Re-export commonly used types
pub use ports::conversation_store::{ConversationStore, StoreError};
pub use use_cases::{
    GetHistoryUseCase, SendMessageUseCase, StartConversationUseCase, TurnError,
};
