//! Open-Meteo lookups: geocoding, current weather, current air quality
//!
//! The metric payloads deliberately stay untyped `serde_json::Value` —
//! the orchestrator serializes them straight into the synthesis prompt,
//! so a typed model would only drop fields the assistant could use.

use crate::models::Location;
use anyhow::{Context, Result};
use reqwest::Client;
use serde_json::Value;
use tracing::debug;

/// Resolve a free-text place name to its best geocoding match.
///
/// Returns `None` when the geocoder has no results for the name.
pub async fn geocode(client: &Client, location_name: &str) -> Result<Option<Location>> {
    // Open-Meteo geocoding API (no API key required); only the first
    // match is used.
    let url = format!(
        "https://geocoding-api.open-meteo.com/v1/search?name={}&count=1",
        urlencoding::encode(location_name)
    );

    debug!("Geocoding '{}'", location_name);
    let response = client.get(&url).send().await?;

    let openmeteo_response: openmeteo::GeocodingResponse = response
        .json()
        .await
        .with_context(|| "Failed to parse OpenMeteo geocoding response")?;

    Ok(openmeteo_response
        .results
        .unwrap_or_default()
        .into_iter()
        .next()
        .map(Into::into))
}

/// Fetch the current weather snapshot for a coordinate pair
pub async fn current_weather(client: &Client, latitude: f64, longitude: f64) -> Result<Value> {
    let url = format!(
        "https://api.open-meteo.com/v1/forecast?latitude={latitude}&longitude={longitude}&current=temperature_2m,apparent_temperature,is_day,precipitation,weather_code,wind_speed_10m"
    );

    debug!("Fetching current weather for ({:.4}, {:.4})", latitude, longitude);
    let response = client.get(&url).send().await?;

    response
        .json()
        .await
        .with_context(|| "Failed to parse OpenMeteo weather response")
}

/// Fetch the current air-quality snapshot for a coordinate pair
pub async fn current_air_quality(client: &Client, latitude: f64, longitude: f64) -> Result<Value> {
    let url = format!(
        "https://air-quality-api.open-meteo.com/v1/air-quality?latitude={latitude}&longitude={longitude}&current=pm2_5,carbon_monoxide,ozone,sulphur_dioxide"
    );

    debug!(
        "Fetching current air quality for ({:.4}, {:.4})",
        latitude, longitude
    );
    let response = client.get(&url).send().await?;

    response
        .json()
        .await
        .with_context(|| "Failed to parse OpenMeteo air quality response")
}

/// `OpenMeteo` geocoding response structures and conversion utilities
mod openmeteo {
    use super::Location;
    use serde::Deserialize;

    /// Geocoding response from `OpenMeteo`
    #[derive(Debug, Deserialize)]
    pub struct GeocodingResponse {
        pub results: Option<Vec<GeocodingResult>>,
    }

    #[derive(Debug, Deserialize)]
    pub struct GeocodingResult {
        pub name: String,
        pub latitude: f64,
        pub longitude: f64,
        pub country: Option<String>,
    }

    impl From<GeocodingResult> for Location {
        fn from(result: GeocodingResult) -> Self {
            Location {
                latitude: result.latitude,
                longitude: result.longitude,
                name: result.name,
                country: result.country,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::openmeteo::GeocodingResponse;
    use crate::models::Location;

    #[test]
    fn test_geocoding_response_parses_first_match() {
        let body = r#"{
            "results": [
                {"name": "Paris", "latitude": 48.85341, "longitude": 2.3488,
                 "country": "France", "admin1": "Île-de-France"},
                {"name": "Paris", "latitude": 33.66094, "longitude": -95.55551,
                 "country": "United States"}
            ],
            "generationtime_ms": 0.85
        }"#;

        let response: GeocodingResponse = serde_json::from_str(body).unwrap();
        let mut results = response.results.unwrap();
        let first: Location = results.remove(0).into();
        assert_eq!(first.name, "Paris");
        assert_eq!(first.country.as_deref(), Some("France"));
        assert_eq!(first.latitude, 48.85341);
    }

    #[test]
    fn test_geocoding_response_without_results() {
        // Open-Meteo omits the results field entirely on a miss.
        let body = r#"{"generationtime_ms": 0.35}"#;
        let response: GeocodingResponse = serde_json::from_str(body).unwrap();
        assert!(response.results.is_none());
    }
}
