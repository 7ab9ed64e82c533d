//! Weather forecast model returned by the weather collaborator

use serde::{Deserialize, Serialize};

/// Multi-day forecast for the destination
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct WeatherInfo {
    /// Location the forecast was requested for
    pub location: String,
    /// One entry per forecast day
    #[serde(default)]
    pub forecast: Vec<DailyForecast>,
}

/// Forecast for a single day
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct DailyForecast {
    /// 1-based day counter
    pub day: u32,
    /// Minimum temperature with unit
    pub min_temp: String,
    /// Maximum temperature with unit
    pub max_temp: String,
    /// Apparent temperature with unit
    pub feels_like: String,
    /// Conditions, e.g. "few clouds"
    pub description: String,
    /// Wind speed with unit
    pub wind_speed: String,
}

impl DailyForecast {
    /// Format as a single summary line
    #[must_use]
    pub fn summary(&self) -> String {
        format!(
            "Day {}: {} to {} (feels like {}), {}, wind {}",
            self.day,
            self.min_temp,
            self.max_temp,
            self.feels_like,
            self.description,
            self.wind_speed
        )
    }
}
