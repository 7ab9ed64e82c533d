//! Normalized travel features extracted from a request

use serde::{Deserialize, Serialize};

/// Placeholder used when no destination could be resolved
pub const UNKNOWN_DESTINATION: &str = "Unknown destination";

/// Structured travel attributes for one request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Features {
    /// Main destination, never empty
    pub destination: String,
    /// Trip length in days, always positive when present
    pub duration_days: Option<u32>,
    /// Food and drink interests, never an empty list
    pub cuisine_preferences: Option<Vec<String>>,
    /// Activity and place interests, never an empty list
    pub place_preferences: Option<Vec<String>>,
    /// Preferred way of getting around
    pub transport_preferences: Option<String>,
}

impl Features {
    /// Features for a destination with nothing else known
    #[must_use]
    pub fn for_destination(destination: impl Into<String>) -> Self {
        let destination = destination.into();
        let destination = if destination.trim().is_empty() {
            UNKNOWN_DESTINATION.to_string()
        } else {
            destination.trim().to_string()
        };

        Self {
            destination,
            duration_days: None,
            cuisine_preferences: None,
            place_preferences: None,
            transport_preferences: None,
        }
    }

    /// Whether the destination was actually resolved rather than defaulted
    #[must_use]
    pub fn has_known_destination(&self) -> bool {
        !self.destination.trim().is_empty() && self.destination != UNKNOWN_DESTINATION
    }

    /// Place preferences, empty when absent
    #[must_use]
    pub fn places(&self) -> &[String] {
        self.place_preferences.as_deref().unwrap_or_default()
    }

    /// Cuisine preferences, empty when absent
    #[must_use]
    pub fn cuisines(&self) -> &[String] {
        self.cuisine_preferences.as_deref().unwrap_or_default()
    }
}
