//! External collaborators the pipeline depends on but does not implement
//!
//! Every call is a blocking round trip that may fail. The pipeline treats
//! each failure as a signal to substitute a deterministic fallback.

use anyhow::Result;

use crate::models::{MapInfo, PlaceInfo, Turn, WeatherInfo};

pub mod offline;

#[cfg(test)]
pub(crate) mod testing;

pub use offline::{OfflineMaps, OfflineScraper, OfflineSearch, OfflineWeather, UnavailableGenerator};

/// Generative text model
pub trait TextGenerator {
    fn generate(&self, system_prompt: &str, user_prompt: &str, history: &[Turn]) -> Result<String>;
}

/// Web search returning candidate links
pub trait SearchProvider {
    fn search(&self, query: &str, num_results: usize) -> Result<Vec<String>>;
}

/// Page scraper returning structured place records
pub trait PageScraper {
    fn scrape(&self, url: &str) -> Result<Vec<PlaceInfo>>;
}

/// Weather forecast lookup
pub trait WeatherProvider {
    fn get_forecast(&self, location: &str) -> Result<WeatherInfo>;
}

/// Geocoding lookup
pub trait MapsProvider {
    fn get_location_info(&self, location: &str) -> Result<MapInfo>;
}

/// The full set of collaborators a pipeline runs against
pub struct Collaborators {
    pub llm: Box<dyn TextGenerator>,
    pub search: Box<dyn SearchProvider>,
    pub scraper: Box<dyn PageScraper>,
    /// Weather is skipped entirely when not configured
    pub weather: Option<Box<dyn WeatherProvider>>,
    /// Maps is skipped entirely when not configured
    pub maps: Option<Box<dyn MapsProvider>>,
}

impl Collaborators {
    /// Offline collaborators around the given text generator
    pub fn offline(llm: Box<dyn TextGenerator>) -> Self {
        Self {
            llm,
            search: Box::new(OfflineSearch),
            scraper: Box::new(OfflineScraper),
            weather: Some(Box::new(OfflineWeather)),
            maps: Some(Box::new(OfflineMaps)),
        }
    }
}
