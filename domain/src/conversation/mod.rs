//! Conversation and message entities.

pub mod entities;

pub use entities::{Conversation, ConversationStatus, Message, MessageRole, NewMessage};
