//! Location value type returned by geocoding searches.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Geographic point (lat/lng in degrees)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinates {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }
}

impl std::fmt::Display for Coordinates {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({:.6}, {:.6})", self.latitude, self.longitude)
    }
}

/// A named place with coordinates.
///
/// Fields are private so a location cannot change after it is built.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    description: String,
    coordinates: Coordinates,
}

impl Location {
    pub fn new(description: impl Into<String>, coordinates: Coordinates) -> Self {
        Self {
            description: description.into(),
            coordinates,
        }
    }

    /// Parse one element of a geocoding `results` array.
    ///
    /// Expects `{"formatted": "...", "geometry": {"lat": 1.0, "lng": 2.0}}`.
    /// Returns `None` when the name or either coordinate is missing or has
    /// the wrong type.
    pub fn from_json(item: &Value) -> Option<Self> {
        let description = item["formatted"].as_str()?;
        let geometry = &item["geometry"];
        let latitude = geometry["lat"].as_f64()?;
        let longitude = geometry["lng"].as_f64()?;

        Some(Self::new(description, Coordinates::new(latitude, longitude)))
    }

    /// Display name
    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn coordinates(&self) -> Coordinates {
        self.coordinates
    }
}

impl std::fmt::Display for Location {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.description, self.coordinates)
    }
}
