//! Intent classification output parsing
//!
//! The first Gemini call returns a small JSON object describing what the
//! user wants. The model wraps it in markdown code fences often enough
//! that stripping them is part of the contract, and the JSON itself is
//! untrusted: parse failures and unknown intent values both degrade to a
//! clarification reply instead of an error.

use serde::Deserialize;

/// The classified purpose of a user message
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Intent {
    GetCurrentWeather,
    GetAirQuality,
    GeneralClimateQuestion,
    Greeting,
}

impl Intent {
    /// Map the classifier's intent string onto the closed enum.
    ///
    /// Anything outside the four known values is `None`; the caller
    /// treats that the same as a parse failure rather than silently
    /// routing to the general-question branch.
    #[must_use]
    pub fn from_label(label: &str) -> Option<Self> {
        match label {
            "get_current_weather" => Some(Self::GetCurrentWeather),
            "get_air_quality" => Some(Self::GetAirQuality),
            "general_climate_question" => Some(Self::GeneralClimateQuestion),
            "greeting" => Some(Self::Greeting),
            _ => None,
        }
    }
}

/// Parsed result of the intent-classification call
#[derive(Debug, Clone, PartialEq)]
pub struct Classification {
    pub intent: Intent,
    pub location: Option<String>,
}

/// Raw JSON shape produced by the model, before validation
#[derive(Debug, Deserialize)]
struct RawClassification {
    intent: Option<String>,
    location: Option<String>,
}

/// Strip markdown code fences the model tends to wrap JSON in
fn strip_code_fences(raw: &str) -> String {
    raw.trim().replace("```json", "").replace("```", "").trim().to_string()
}

/// Parse the raw model output of the classification call.
///
/// Returns `None` when the output is not JSON, the `intent` field is
/// absent, or the intent value is not one of the known labels. Every
/// `None` is answered with the fixed clarification reply.
#[must_use]
pub fn parse_classification(raw: &str) -> Option<Classification> {
    let cleaned = strip_code_fences(raw);
    let parsed: RawClassification = serde_json::from_str(&cleaned).ok()?;
    let intent = Intent::from_label(parsed.intent?.as_str())?;

    // An empty location string is as useless as a missing one.
    let location = parsed.location.filter(|l| !l.trim().is_empty());

    Some(Classification { intent, location })
}
