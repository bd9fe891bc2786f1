//! Gemini text-generation client
//!
//! Thin client over the Google Generative Language REST API. The service
//! calls it twice per chat request: once to classify intent, once to
//! synthesize the final reply. Single-turn only, no streaming, no tools.

use anyhow::{anyhow, Result};
use reqwest::Client;
use serde_json::Value;
use std::time::Instant;
use tracing::debug;

/// Client for the Gemini `generateContent` endpoint
#[derive(Clone)]
pub struct GeminiClient {
    client: Client,
    api_key: String,
    base_url: String,
    model: String,
}

impl GeminiClient {
    /// Create a new Gemini client
    pub fn new(api_key: String, base_url: String, model: String) -> Result<Self> {
        if api_key.is_empty() {
            return Err(anyhow!("Gemini API key is required"));
        }

        Ok(GeminiClient {
            client: Client::new(),
            api_key,
            base_url,
            model,
        })
    }

    /// Get the model name
    pub fn model(&self) -> &str {
        &self.model
    }

    /// Build the API URL for a given method
    fn api_url(&self, method: &str) -> String {
        format!(
            "{}/models/{}:{}?key={}",
            self.base_url, self.model, method, self.api_key
        )
    }

    /// Send a single-turn generation request and return the reply text
    pub async fn generate(&self, prompt: &str) -> Result<String> {
        let start = Instant::now();
        debug!("Sending generateContent request ({} prompt chars)", prompt.len());

        let request_body = serde_json::json!({
            "contents": [{
                "role": "user",
                "parts": [{"text": prompt}]
            }]
        });

        let response = self
            .client
            .post(self.api_url("generateContent"))
            .header("Content-Type", "application/json")
            .json(&request_body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(anyhow!("Gemini API returned {}: {}", status, error_text));
        }

        let response_body: Value = response.json().await?;
        let text = extract_text(&response_body)?;

        debug!(
            "Gemini response: {} chars in {:.3}s",
            text.len(),
            start.elapsed().as_secs_f64()
        );

        Ok(text)
    }
}

/// Extract the text of the first candidate from a `generateContent`
/// response body. Multi-part candidates are concatenated.
pub fn extract_text(response: &Value) -> Result<String> {
    let candidate = response
        .get("candidates")
        .and_then(|c| c.get(0))
        .ok_or_else(|| anyhow!("Gemini response contained no candidates"))?;

    let parts = candidate
        .get("content")
        .and_then(|c| c.get("parts"))
        .and_then(|p| p.as_array())
        .ok_or_else(|| anyhow!("Gemini candidate contained no content parts"))?;

    let text: String = parts
        .iter()
        .filter_map(|part| part.get("text").and_then(|t| t.as_str()))
        .collect();

    if text.is_empty() {
        return Err(anyhow!("Gemini candidate contained no text"));
    }

    Ok(text)
}
