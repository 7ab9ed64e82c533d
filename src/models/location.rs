//! Location model returned by the maps collaborator

use serde::{Deserialize, Serialize};

/// Geographic coordinates
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq)]
pub struct Coordinates {
    /// Latitude in decimal degrees
    pub lat: f64,
    /// Longitude in decimal degrees
    pub lng: f64,
}

impl Coordinates {
    /// Format as a coordinate pair
    #[must_use]
    pub fn format(&self) -> String {
        format!("{:.4}, {:.4}", self.lat, self.lng)
    }
}

/// Geocoded description of the destination
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct MapInfo {
    /// Human-readable address
    pub formatted_address: String,
    /// Geocoded position
    pub location: Coordinates,
    /// Provider-specific place identifier
    #[serde(default)]
    pub place_id: String,
}

impl MapInfo {
    #[must_use]
    pub fn new(formatted_address: impl Into<String>, lat: f64, lng: f64) -> Self {
        Self {
            formatted_address: formatted_address.into(),
            location: Coordinates { lat, lng },
            place_id: String::new(),
        }
    }
}
