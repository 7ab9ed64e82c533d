//! Data models for the Tripsmith pipeline
//!
//! This module contains the records passed between pipeline stages:
//! - Features: normalized request attributes
//! - SearchQuery: per-feature searches
//! - Context: search, weather and location data
//! - Output: generated artifacts and the trip window
//! - Conversation: session history

pub mod context;
pub mod conversation;
pub mod features;
pub mod location;
pub mod output;
pub mod query;
pub mod weather;

// Re-export all public types for convenient access
pub use context::{Context, PlaceInfo, QueryResults};
pub use conversation::{ConversationHistory, Role, Turn};
pub use features::{Features, UNKNOWN_DESTINATION};
pub use location::{Coordinates, MapInfo};
pub use output::{Output, TripDetails};
pub use query::SearchQuery;
pub use weather::{DailyForecast, WeatherInfo};
