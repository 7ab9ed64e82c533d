//! `Tripsmith` - travel itinerary generation with deterministic fallbacks
//!
//! A request flows through four stages: feature extraction, search query
//! generation, context collection and output generation. Each stage leans on
//! an unreliable external collaborator and falls back to deterministic rules
//! or templates when that collaborator fails, so planning always produces an
//! itinerary, a packing list and a budget.

pub mod agent;
pub mod boundary;
pub mod collaborators;
pub mod config;
pub mod context_collector;
pub mod error;
pub mod extraction;
pub mod fallback;
pub mod guardrail;
pub mod logging;
pub mod models;
pub mod output;
pub mod prompts;
pub mod queries;
pub mod reply;
pub mod stage;

// Re-export core types for public API
pub use agent::{Agent, PlanReport};
pub use boundary::{HistoryResponse, PlanResponse, handle_history, handle_plan};
pub use collaborators::{
    Collaborators, MapsProvider, PageScraper, SearchProvider, TextGenerator, WeatherProvider,
};
pub use config::{PlannerSettings, TripsmithConfig};
pub use error::PlannerError;
pub use models::{Context, ConversationHistory, Features, Output, SearchQuery, TripDetails, Turn};
pub use stage::{PipelineState, StageOutcome, StageReport};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Core result type used throughout the library
pub type Result<T> = std::result::Result<T, PlannerError>;
