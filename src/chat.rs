//! Chat orchestrator
//!
//! One linear flow per request: classify the message's intent with
//! Gemini, branch on the intent (optionally enriching with live
//! Open-Meteo data), synthesize the reply with a second Gemini call, and
//! detach a best-effort log write. No retries, no caching, no state
//! between requests.

use crate::gemini::GeminiClient;
use crate::intent::{self, Intent};
use crate::log_store::ConversationLogger;
use crate::weather;
use anyhow::Result;
use reqwest::Client;
use tracing::{info, instrument, warn};

/// Fixed reply when intent classification produces nothing usable
pub const CLARIFICATION_REPLY: &str =
    "I'm sorry, I couldn't understand your request. Could you please rephrase?";

/// Fixed reply for the greeting intent; no second model call is made
pub const GREETING_REPLY: &str =
    "Hello there! How can I help you with climate information today?";

/// Which live metric a location-based intent needs
#[derive(Debug, Clone, Copy)]
enum Metric {
    Weather,
    AirQuality,
}

impl Metric {
    /// Human wording used in the "please tell me a location" reply
    fn noun(self) -> &'static str {
        match self {
            Metric::Weather => "weather",
            Metric::AirQuality => "air quality",
        }
    }
}

/// The chat orchestrator: classification, routing, synthesis, logging
pub struct ChatService {
    gemini: GeminiClient,
    http: Client,
    logger: ConversationLogger,
}

impl ChatService {
    #[must_use]
    pub fn new(gemini: GeminiClient, logger: ConversationLogger) -> Self {
        Self {
            gemini,
            http: Client::new(),
            logger,
        }
    }

    /// Produce the assistant reply for one user message.
    ///
    /// Classification ambiguity, a missing location and a geocoding miss
    /// all terminate locally with a fixed reply; any other failure
    /// propagates to the HTTP boundary, which turns it into a single
    /// error response.
    #[instrument(skip(self, message))]
    pub async fn respond(&self, message: &str) -> Result<String> {
        let raw = self
            .gemini
            .generate(&prompts::classification(message))
            .await?;

        let Some(classification) = intent::parse_classification(&raw) else {
            warn!("Unusable intent classification output: {raw:?}");
            return Ok(CLARIFICATION_REPLY.to_string());
        };

        info!(intent = ?classification.intent, location = ?classification.location, "Classified message");

        match classification.intent {
            Intent::Greeting => {
                self.logger.spawn_log(message, GREETING_REPLY);
                Ok(GREETING_REPLY.to_string())
            }
            Intent::GetCurrentWeather => {
                self.metric_reply(message, classification.location, Metric::Weather)
                    .await
            }
            Intent::GetAirQuality => {
                self.metric_reply(message, classification.location, Metric::AirQuality)
                    .await
            }
            Intent::GeneralClimateQuestion => {
                self.synthesize(message, &prompts::general_question(message))
                    .await
            }
        }
    }

    /// Location-based branch: geocode, fetch the snapshot, synthesize
    async fn metric_reply(
        &self,
        message: &str,
        location: Option<String>,
        metric: Metric,
    ) -> Result<String> {
        let Some(location_name) = location else {
            return Ok(missing_location_reply(metric));
        };

        let Some(place) = weather::geocode(&self.http, &location_name).await? else {
            return Ok(not_found_reply(&location_name));
        };

        let prompt = match metric {
            Metric::Weather => {
                info!("User is asking about the current weather in {place}");
                let data = weather::current_weather(&self.http, place.latitude, place.longitude)
                    .await?;
                prompts::weather_summary(message, &data)
            }
            Metric::AirQuality => {
                info!("User is asking about the air quality in {place}");
                let data =
                    weather::current_air_quality(&self.http, place.latitude, place.longitude)
                        .await?;
                prompts::air_quality_summary(message, &data)
            }
        };

        self.synthesize(message, &prompt).await
    }

    /// Second Gemini call; its text is the reply verbatim, and the
    /// exchange is logged fire-and-forget
    async fn synthesize(&self, message: &str, prompt: &str) -> Result<String> {
        let reply = self.gemini.generate(prompt).await?;
        self.logger.spawn_log(message, &reply);
        Ok(reply)
    }
}

/// Fixed prompt for an intent that needs a location but got none
fn missing_location_reply(metric: Metric) -> String {
    format!("To get the {}, please tell me a location.", metric.noun())
}

/// Fixed reply when geocoding finds no match for the requested place
fn not_found_reply(location_name: &str) -> String {
    format!("I couldn't find data for \"{location_name}\". Is it spelled correctly?")
}

/// Prompt templates for the two Gemini calls.
///
/// Every synthesis template constrains the output to plain text with no
/// markdown; the weather/air-quality variants embed the live payload as
/// pretty-printed JSON.
mod prompts {
    use serde_json::Value;

    const PLAIN_TEXT_CONSTRAINT: &str = "IMPORTANT: The response must be plain text only. Do not use any markdown formatting like *, **, #, or lists.";

    /// First-stage instruction: intent and entity extraction as JSON
    pub fn classification(message: &str) -> String {
        format!(
            "Analyze the user's query to determine the intent and extract entities. Respond with a JSON object.\n\
             Intents can be: 'get_current_weather', 'get_air_quality', 'general_climate_question', or 'greeting'.\n\
             The 'location' entity is required for 'get_current_weather' and 'get_air_quality'. For other intents, it can be null.\n\
             \n\
             Query: \"{message}\"\n\
             \n\
             Example for weather: {{ \"intent\": \"get_current_weather\", \"location\": \"New York\" }}\n\
             Example for greeting: {{ \"intent\": \"greeting\", \"location\": null }}"
        )
    }

    /// Synthesis prompt over a live weather payload
    pub fn weather_summary(message: &str, data: &Value) -> String {
        format!(
            "You are a friendly climate assistant. Based on the following live weather data, provide a conversational summary for the user's query: \"{message}\". {PLAIN_TEXT_CONSTRAINT}\n\nData:\n{}",
            serde_json::to_string_pretty(data).unwrap_or_default()
        )
    }

    /// Synthesis prompt over a live air-quality payload
    pub fn air_quality_summary(message: &str, data: &Value) -> String {
        format!(
            "You are a friendly climate assistant. Based on the following live air quality data, provide a conversational summary for the user's query: \"{message}\". Explain the main pollutants. {PLAIN_TEXT_CONSTRAINT}\n\nData:\n{}",
            serde_json::to_string_pretty(data).unwrap_or_default()
        )
    }

    /// Synthesis prompt for a general climate question, no data fetch
    pub fn general_question(message: &str) -> String {
        format!(
            "You are a friendly and knowledgeable climate assistant. Please provide a helpful and accurate answer to the user's question: \"{message}\". {PLAIN_TEXT_CONSTRAINT}"
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_classification_prompt_embeds_message() {
        let prompt = prompts::classification("weather in Paris");
        assert!(prompt.contains("Query: \"weather in Paris\""));
        assert!(prompt.contains("'get_current_weather'"));
        assert!(prompt.contains("'get_air_quality'"));
        assert!(prompt.contains("'general_climate_question'"));
        assert!(prompt.contains("'greeting'"));
        assert!(prompt.contains(r#"{ "intent": "greeting", "location": null }"#));
    }

    #[test]
    fn test_synthesis_prompts_forbid_markdown() {
        let data = json!({"current": {"temperature_2m": 21.4}});
        for prompt in [
            prompts::weather_summary("weather in Paris", &data),
            prompts::air_quality_summary("air quality in Delhi", &data),
            prompts::general_question("why is the sky blue?"),
        ] {
            assert!(prompt.contains("plain text only"));
            assert!(prompt.contains("Do not use any markdown formatting like *, **, #, or lists."));
        }
    }

    #[test]
    fn test_weather_prompt_embeds_payload() {
        let data = json!({"current": {"temperature_2m": 21.4, "wind_speed_10m": 12.0}});
        let prompt = prompts::weather_summary("weather in Paris", &data);
        assert!(prompt.contains("\"weather in Paris\""));
        assert!(prompt.contains("\"temperature_2m\": 21.4"));
        assert!(prompt.contains("live weather data"));
    }

    #[test]
    fn test_air_quality_prompt_mentions_pollutants() {
        let data = json!({"current": {"pm2_5": 12.0}});
        let prompt = prompts::air_quality_summary("air quality in Delhi", &data);
        assert!(prompt.contains("Explain the main pollutants."));
        assert!(prompt.contains("live air quality data"));
    }

    #[test]
    fn test_missing_location_replies_are_intent_specific() {
        assert_eq!(
            missing_location_reply(Metric::Weather),
            "To get the weather, please tell me a location."
        );
        assert_eq!(
            missing_location_reply(Metric::AirQuality),
            "To get the air quality, please tell me a location."
        );
    }

    #[test]
    fn test_not_found_reply_names_location() {
        assert_eq!(
            not_found_reply("Zzzzxyz"),
            "I couldn't find data for \"Zzzzxyz\". Is it spelled correctly?"
        );
    }

    #[test]
    fn test_canned_replies() {
        assert_eq!(
            GREETING_REPLY,
            "Hello there! How can I help you with climate information today?"
        );
        assert_eq!(
            CLARIFICATION_REPLY,
            "I'm sorry, I couldn't understand your request. Could you please rephrase?"
        );
    }
}
