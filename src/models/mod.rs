//! Data models for the Climate Insights service
//!
//! Core domain models organized by concern:
//! - Location: geographic coordinates and metadata
//! - Chat: request/reply wire shapes for the chat endpoint

pub mod chat;
pub mod location;

// Re-export all public types for convenient access
pub use chat::{ChatError, ChatReply, ChatRequest};
pub use location::Location;
