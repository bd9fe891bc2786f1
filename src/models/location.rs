//! Location model for geographic coordinates and metadata

use serde::{Deserialize, Serialize};
use std::fmt;

/// A geocoded place, the first match of an Open-Meteo geocoding lookup
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Location {
    /// Latitude in decimal degrees
    pub latitude: f64,
    /// Longitude in decimal degrees
    pub longitude: f64,
    /// Location name (city, region, etc.)
    pub name: String,
    /// Country name, when the geocoder provides one
    pub country: Option<String>,
}

impl Location {
    /// Create a new location
    #[must_use]
    pub fn new(latitude: f64, longitude: f64, name: String) -> Self {
        Self {
            latitude,
            longitude,
            name,
            country: None,
        }
    }

    /// Create location with country
    #[must_use]
    pub fn with_country(latitude: f64, longitude: f64, name: String, country: String) -> Self {
        Self {
            latitude,
            longitude,
            name,
            country: Some(country),
        }
    }

    /// Format location as coordinates string
    #[must_use]
    pub fn format_coordinates(&self) -> String {
        format!("{:.4}, {:.4}", self.latitude, self.longitude)
    }
}

impl fmt::Display for Location {
    /// "Paris, France" when the country is known, "Paris" otherwise
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.country {
            Some(country) => write!(f, "{}, {}", self.name, country),
            None => write!(f, "{}", self.name),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_location_creation() {
        let location = Location::new(48.8566, 2.3522, "Paris".to_string());
        assert_eq!(location.latitude, 48.8566);
        assert_eq!(location.longitude, 2.3522);
        assert_eq!(location.name, "Paris");
        assert!(location.country.is_none());
    }

    #[test]
    fn test_display_with_country() {
        let location =
            Location::with_country(48.8566, 2.3522, "Paris".to_string(), "France".to_string());
        assert_eq!(location.to_string(), "Paris, France");
    }

    #[test]
    fn test_display_without_country() {
        let location = Location::new(48.8566, 2.3522, "Paris".to_string());
        assert_eq!(location.to_string(), "Paris");
    }

    #[test]
    fn test_format_coordinates() {
        let location = Location::new(48.85661, 2.35222, "Paris".to_string());
        assert_eq!(location.format_coordinates(), "48.8566, 2.3522");
    }
}
