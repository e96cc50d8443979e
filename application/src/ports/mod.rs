//! Ports: interfaces the application layer consumes.

pub mod conversation_store;

pub use conversation_store::{ConversationStore, StoreError};
