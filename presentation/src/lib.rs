//! Presentation layer for errand-agent
//!
//! Exposes the orchestration core over HTTP. Error mapping:
//! conversation-not-found → 404, any other orchestration failure → 500.

pub mod http;

pub use http::{router, AppState};
