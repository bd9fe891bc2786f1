//! Configuration management for the Climate Insights service
//!
//! Handles loading configuration from files, environment variables,
//! and provides validation for all configuration settings.

use crate::ClimateError;
use anyhow::{Context, Result};
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Root configuration structure for the Climate Insights service
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ClimateConfig {
    /// HTTP server configuration
    #[serde(default)]
    pub server: ServerConfig,
    /// Gemini text-generation configuration
    #[serde(default)]
    pub gemini: GeminiConfig,
    /// Conversation log store configuration
    #[serde(default)]
    pub mongo: MongoConfig,
    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// HTTP server settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Bind address
    #[serde(default = "default_server_host")]
    pub host: String,
    /// Listen port
    #[serde(default = "default_server_port")]
    pub port: u16,
}

/// Gemini API settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeminiConfig {
    /// Gemini API key; requests are rejected with a fixed message when unset
    pub api_key: Option<String>,
    /// Model identifier
    #[serde(default = "default_gemini_model")]
    pub model: String,
    /// Base URL for the Generative Language API
    #[serde(default = "default_gemini_base_url")]
    pub base_url: String,
}

/// MongoDB conversation log settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MongoConfig {
    /// Connection string; logging is disabled when unset
    pub uri: Option<String>,
    /// Database holding the conversation log
    #[serde(default = "default_mongo_database")]
    pub database: String,
    /// Collection receiving one document per exchange
    #[serde(default = "default_mongo_collection")]
    pub collection: String,
}

/// Logging configuration settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (error, warn, info, debug, trace)
    #[serde(default = "default_log_level")]
    pub level: String,
}

// Default value functions
fn default_server_host() -> String {
    "0.0.0.0".to_string()
}

fn default_server_port() -> u16 {
    3000
}

fn default_gemini_model() -> String {
    "gemini-1.5-pro-latest".to_string()
}

fn default_gemini_base_url() -> String {
    "https://generativelanguage.googleapis.com/v1beta".to_string()
}

fn default_mongo_database() -> String {
    "climate_insights".to_string()
}

fn default_mongo_collection() -> String {
    "conversation_logs".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_server_host(),
            port: default_server_port(),
        }
    }
}

impl Default for GeminiConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            model: default_gemini_model(),
            base_url: default_gemini_base_url(),
        }
    }
}

impl Default for MongoConfig {
    fn default() -> Self {
        Self {
            uri: None,
            database: default_mongo_database(),
            collection: default_mongo_collection(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

impl ClimateConfig {
    /// Load configuration from file and environment variables
    pub fn load() -> Result<Self> {
        Self::load_from_path(None)
    }

    /// Load configuration from specified path
    pub fn load_from_path(config_path: Option<PathBuf>) -> Result<Self> {
        let mut builder = Config::builder();

        // Load from file if path is provided or use default location
        let config_file = config_path.unwrap_or_else(|| {
            Self::get_config_path().unwrap_or_else(|| PathBuf::from("config.toml"))
        });

        if config_file.exists() {
            builder = builder.add_source(
                File::from(config_file.clone())
                    .required(false)
                    .format(config::FileFormat::Toml),
            );
        }

        // Add environment variable overrides with CLIMATE_ prefix
        builder = builder.add_source(
            Environment::with_prefix("CLIMATE")
                .separator("__")
                .try_parsing(true),
        );

        let settings = builder
            .build()
            .with_context(|| "Failed to build configuration")?;

        let mut config: ClimateConfig = settings
            .try_deserialize()
            .with_context(|| "Failed to deserialize configuration")?;

        // The deployment contract predates the config file: the two secrets
        // keep their plain environment names as fallbacks.
        if config.gemini.api_key.is_none() {
            config.gemini.api_key = std::env::var("GEMINI_API_KEY").ok().filter(|k| !k.is_empty());
        }
        if config.mongo.uri.is_none() {
            config.mongo.uri = std::env::var("MONGO_URI").ok().filter(|u| !u.is_empty());
        }

        config.validate()?;

        Ok(config)
    }

    /// Get the default configuration file path
    #[must_use]
    pub fn get_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("climate-insights").join("config.toml"))
    }

    /// Whether the Gemini API key is present
    #[must_use]
    pub fn gemini_configured(&self) -> bool {
        self.gemini
            .api_key
            .as_ref()
            .is_some_and(|key| !key.is_empty())
    }

    /// Validate all configuration settings
    pub fn validate(&self) -> Result<()> {
        self.validate_api_keys()?;
        self.validate_string_values()?;
        Ok(())
    }

    /// Validate API keys and credentials
    pub fn validate_api_keys(&self) -> Result<()> {
        // The Gemini key is optional at startup; its absence is answered
        // per request with a fixed configuration-error reply.
        if let Some(api_key) = &self.gemini.api_key {
            if api_key.is_empty() {
                return Err(ClimateError::config(
                    "Gemini API key cannot be empty if provided. Either remove it or provide a valid key."
                ).into());
            }

            if api_key.len() > 200 {
                return Err(ClimateError::config(
                    "Gemini API key appears to be invalid (too long). Please check your API key.",
                )
                .into());
            }
        }

        if let Some(uri) = &self.mongo.uri {
            if !uri.starts_with("mongodb://") && !uri.starts_with("mongodb+srv://") {
                return Err(ClimateError::config(
                    "Mongo URI must start with mongodb:// or mongodb+srv://",
                )
                .into());
            }
        }

        Ok(())
    }

    /// Validate string configuration values
    fn validate_string_values(&self) -> Result<()> {
        let valid_log_levels = ["error", "warn", "info", "debug", "trace"];
        if !valid_log_levels.contains(&self.logging.level.as_str()) {
            return Err(ClimateError::config(format!(
                "Invalid log level '{}'. Must be one of: {}",
                self.logging.level,
                valid_log_levels.join(", ")
            ))
            .into());
        }

        if !self.gemini.base_url.starts_with("http://")
            && !self.gemini.base_url.starts_with("https://")
        {
            return Err(ClimateError::config(
                "Gemini base URL must be a valid HTTP or HTTPS URL",
            )
            .into());
        }

        if self.gemini.model.is_empty() {
            return Err(ClimateError::config("Gemini model cannot be empty").into());
        }

        Ok(())
    }
}
