//! Error types and handling for the Climate Insights service

use thiserror::Error;

/// Main error type for the Climate Insights service
#[derive(Error, Debug)]
pub enum ClimateError {
    /// Configuration-related errors
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// Text-generation (Gemini) API errors
    #[error("Gemini error: {message}")]
    Llm { message: String },

    /// Open-Meteo / outbound API communication errors
    #[error("API error: {message}")]
    Api { message: String },

    /// Input validation errors
    #[error("Invalid input: {message}")]
    Validation { message: String },

    /// I/O operation errors
    #[error("I/O error: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },

    /// General application errors
    #[error("Application error: {message}")]
    General { message: String },
}

impl ClimateError {
    /// Create a new configuration error
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create a new text-generation error
    pub fn llm<S: Into<String>>(message: S) -> Self {
        Self::Llm {
            message: message.into(),
        }
    }

    /// Create a new API error
    pub fn api<S: Into<String>>(message: S) -> Self {
        Self::Api {
            message: message.into(),
        }
    }

    /// Create a new validation error
    pub fn validation<S: Into<String>>(message: S) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// Create a new general error
    pub fn general<S: Into<String>>(message: S) -> Self {
        Self::General {
            message: message.into(),
        }
    }

    /// Get a user-friendly error message
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            ClimateError::Config { .. } => {
                "Configuration error. Please check your config file and API keys.".to_string()
            }
            ClimateError::Llm { .. } => {
                "The assistant service is currently unavailable. Please try again later."
                    .to_string()
            }
            ClimateError::Api { .. } => {
                "Unable to connect to external services. Please check your internet connection."
                    .to_string()
            }
            ClimateError::Validation { message } => {
                format!("Invalid input: {message}")
            }
            ClimateError::Io { .. } => {
                "File operation failed. Please check file permissions.".to_string()
            }
            ClimateError::General { message } => message.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_creation() {
        let config_err = ClimateError::config("missing API key");
        assert!(matches!(config_err, ClimateError::Config { .. }));

        let llm_err = ClimateError::llm("model returned no candidates");
        assert!(matches!(llm_err, ClimateError::Llm { .. }));

        let api_err = ClimateError::api("connection failed");
        assert!(matches!(api_err, ClimateError::Api { .. }));

        let validation_err = ClimateError::validation("empty message");
        assert!(matches!(validation_err, ClimateError::Validation { .. }));
    }

    #[test]
    fn test_user_messages() {
        let config_err = ClimateError::config("test");
        assert!(config_err.user_message().contains("Configuration error"));

        let llm_err = ClimateError::llm("test");
        assert!(llm_err.user_message().contains("currently unavailable"));

        let api_err = ClimateError::api("test");
        assert!(api_err.user_message().contains("Unable to connect"));

        let validation_err = ClimateError::validation("test input");
        assert!(validation_err.user_message().contains("test input"));
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let climate_err: ClimateError = io_err.into();
        assert!(matches!(climate_err, ClimateError::Io { .. }));
    }
}
