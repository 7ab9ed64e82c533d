//! Context collected from external collaborators before generation

use serde::{Deserialize, Serialize};

use super::{MapInfo, SearchQuery, WeatherInfo};

/// A place record extracted from a scraped page
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlaceInfo {
    pub name: String,
    #[serde(default)]
    pub description: String,
}

impl PlaceInfo {
    #[must_use]
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
        }
    }
}

/// Results gathered for one search query
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueryResults {
    pub feature_type: String,
    pub feature_value: String,
    pub query: String,
    /// Empty when the search or a scrape for this query failed
    pub results: Vec<PlaceInfo>,
}

impl QueryResults {
    /// Result set for a query, starting empty
    #[must_use]
    pub fn empty(query: &SearchQuery) -> Self {
        Self {
            feature_type: query.feature_type.clone(),
            feature_value: query.feature_value.clone(),
            query: query.query.clone(),
            results: Vec::new(),
        }
    }
}

/// Aggregated external data. Always fully shaped, sub-fields may be empty.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Context {
    pub search_results: Vec<QueryResults>,
    pub weather_info: Option<WeatherInfo>,
    pub map_info: Option<MapInfo>,
}

impl Context {
    /// Number of place records across all queries
    #[must_use]
    pub fn place_count(&self) -> usize {
        self.search_results.iter().map(|r| r.results.len()).sum()
    }
}
