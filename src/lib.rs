//! Climate Insights - backend for the climate assistant chatbot
//!
//! This library provides the chat orchestration flow: intent
//! classification and reply synthesis through Gemini, live weather and
//! air-quality enrichment through Open-Meteo, and best-effort
//! conversation logging to MongoDB.

pub mod chat;
pub mod config;
pub mod error;
pub mod gemini;
pub mod intent;
pub mod log_store;
pub mod models;
pub mod weather;
pub mod web;

// Re-export core types for public API
pub use chat::ChatService;
pub use config::ClimateConfig;
pub use error::ClimateError;
pub use gemini::GeminiClient;
pub use intent::{Classification, Intent};
pub use log_store::ConversationLogger;
pub use models::{ChatReply, ChatRequest, Location};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Core result type used throughout the library
pub type Result<T> = std::result::Result<T, ClimateError>;
