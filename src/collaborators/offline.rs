//! Deterministic collaborators that never touch the network
//!
//! These stand in for real providers when none are wired up. Search, scrape,
//! weather and maps answer with fixed data; the text generator always fails,
//! which drives every stage down its fallback path.

use anyhow::{Result, bail};
use tracing::debug;

use super::{MapsProvider, PageScraper, SearchProvider, TextGenerator, WeatherProvider};
use crate::models::{DailyForecast, MapInfo, PlaceInfo, Turn, WeatherInfo};

const OFFLINE_LINKS: [&str; 3] = [
    "https://travel.usnews.com/rankings/best-usa-vacations/",
    "https://www.alexinwanderland.com/best-usa-travel-destinations/",
    "https://www.businessinsider.com/most-beautiful-places-to-visit-in-us-2024-1",
];

/// Text generator that is never available
#[derive(Debug, Default)]
pub struct UnavailableGenerator;

impl TextGenerator for UnavailableGenerator {
    fn generate(
        &self,
        _system_prompt: &str,
        _user_prompt: &str,
        _history: &[Turn],
    ) -> Result<String> {
        bail!("no language model is configured")
    }
}

/// Search returning a fixed list of travel links
#[derive(Debug, Default)]
pub struct OfflineSearch;

impl SearchProvider for OfflineSearch {
    fn search(&self, query: &str, num_results: usize) -> Result<Vec<String>> {
        debug!(query, num_results, "Offline search");
        Ok(OFFLINE_LINKS
            .iter()
            .take(num_results)
            .map(|link| (*link).to_string())
            .collect())
    }
}

/// Scraper returning a fixed set of places for every page
#[derive(Debug, Default)]
pub struct OfflineScraper;

impl PageScraper for OfflineScraper {
    fn scrape(&self, url: &str) -> Result<Vec<PlaceInfo>> {
        debug!(url, "Offline scrape");
        Ok(vec![
            PlaceInfo::new(
                "Community Farmers Market",
                "A vibrant market featuring local produce and live performances.",
            ),
            PlaceInfo::new(
                "Antique Mall",
                "A quality antique store with three floors of treasures.",
            ),
            PlaceInfo::new(
                "Fountain Square",
                "A historical building turned into a mall with unique shops.",
            ),
        ])
    }
}

/// Weather provider returning a mild five-day forecast
#[derive(Debug, Default)]
pub struct OfflineWeather;

impl WeatherProvider for OfflineWeather {
    fn get_forecast(&self, location: &str) -> Result<WeatherInfo> {
        let days = [
            ("15°C", "16°C", "15°C", "few clouds", "1.4 m/s"),
            ("17°C", "17°C", "16°C", "clear sky", "1.8 m/s"),
            ("16°C", "16°C", "15°C", "few clouds", "1.6 m/s"),
            ("19°C", "19°C", "18°C", "scattered clouds", "2.1 m/s"),
            ("14°C", "15°C", "14°C", "overcast clouds", "3.0 m/s"),
        ];

        let forecast = days
            .iter()
            .zip(1..)
            .map(|(&(min, max, feels, description, wind), day)| DailyForecast {
                day,
                min_temp: min.to_string(),
                max_temp: max.to_string(),
                feels_like: feels.to_string(),
                description: description.to_string(),
                wind_speed: wind.to_string(),
            })
            .collect();

        Ok(WeatherInfo {
            location: location.to_string(),
            forecast,
        })
    }
}

/// Maps provider synthesizing an address from the location name
#[derive(Debug, Default)]
pub struct OfflineMaps;

impl MapsProvider for OfflineMaps {
    fn get_location_info(&self, location: &str) -> Result<MapInfo> {
        let mut info = MapInfo::new(format!("{location}, Country"), 40.7128, -74.0060);
        info.place_id = "offline-place-id".to_string();
        Ok(info)
    }
}
