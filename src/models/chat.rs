//! Wire shapes for the chat endpoint

use serde::{Deserialize, Serialize};

/// Inbound chat request body
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ChatRequest {
    /// Free-text user message
    pub message: String,
}

/// Successful chat response body
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ChatReply {
    /// Assistant reply, plain text
    pub reply: String,
}

/// Error response body
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ChatError {
    /// User-facing error description
    pub error: String,
}

impl ChatReply {
    pub fn new<S: Into<String>>(reply: S) -> Self {
        Self {
            reply: reply.into(),
        }
    }
}

impl ChatError {
    pub fn new<S: Into<String>>(error: S) -> Self {
        Self {
            error: error.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_deserializes() {
        let request: ChatRequest = serde_json::from_str(r#"{"message": "hi"}"#).unwrap();
        assert_eq!(request.message, "hi");
    }

    #[test]
    fn test_reply_wire_shape() {
        let reply = ChatReply::new("Hello there!");
        let json = serde_json::to_value(&reply).unwrap();
        assert_eq!(json, serde_json::json!({"reply": "Hello there!"}));
    }

    #[test]
    fn test_error_wire_shape() {
        let error = ChatError::new("Gemini API key not configured");
        let json = serde_json::to_value(&error).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"error": "Gemini API key not configured"})
        );
    }
}
