//! Context collection from the search, scrape, weather and maps collaborators
//!
//! Every collaborator call is isolated. A failure empties the part of the
//! context it would have filled and is recorded as a degradation reason;
//! it never stops the remaining calls.

use tracing::{debug, info, warn};

use crate::collaborators::Collaborators;
use crate::config::PlannerSettings;
use crate::models::{Context, Features, PlaceInfo, QueryResults, SearchQuery};
use crate::stage::StageOutcome;

pub struct ContextCollector<'a> {
    collaborators: &'a Collaborators,
    settings: &'a PlannerSettings,
}

impl<'a> ContextCollector<'a> {
    pub fn new(collaborators: &'a Collaborators, settings: &'a PlannerSettings) -> Self {
        Self {
            collaborators,
            settings,
        }
    }

    /// Gather context for the queries and destination. Always fully shaped.
    pub fn collect_context(
        &self,
        queries: &[SearchQuery],
        features: &Features,
    ) -> StageOutcome<Context> {
        info!(queries = queries.len(), "Collecting context");

        let mut failures = Vec::new();
        let mut context = Context::default();

        for query in queries {
            if query.query.trim().is_empty() {
                debug!(feature_type = %query.feature_type, "Skipping blank query");
                continue;
            }

            let mut query_results = QueryResults::empty(query);
            match self.search_and_scrape(&query.query) {
                Ok(places) => query_results.results = places,
                Err(reason) => {
                    warn!(query = %query.query, %reason, "Search for query failed");
                    failures.push(format!("{}: {reason}", query.query));
                }
            }
            context.search_results.push(query_results);
        }

        if features.has_known_destination() {
            let destination = features.destination.as_str();

            if let Some(weather) = &self.collaborators.weather {
                match weather.get_forecast(destination) {
                    Ok(info) => context.weather_info = Some(info),
                    Err(e) => {
                        warn!(destination, error = %e, "Weather lookup failed");
                        failures.push(format!("weather: {e}"));
                    }
                }
            }

            if let Some(maps) = &self.collaborators.maps {
                match maps.get_location_info(destination) {
                    Ok(info) => context.map_info = Some(info),
                    Err(e) => {
                        warn!(destination, error = %e, "Location lookup failed");
                        failures.push(format!("maps: {e}"));
                    }
                }
            }
        } else {
            debug!("No destination, skipping weather and location lookups");
        }

        info!(
            places = context.place_count(),
            weather = context.weather_info.is_some(),
            location = context.map_info.is_some(),
            "Context collected"
        );

        if failures.is_empty() {
            StageOutcome::Ready(context)
        } else {
            StageOutcome::degraded(context, failures.join("; "))
        }
    }

    /// Search one query and scrape every link. Any failure discards the query's results.
    fn search_and_scrape(&self, query: &str) -> Result<Vec<PlaceInfo>, String> {
        let links = self
            .collaborators
            .search
            .search(query, self.settings.search_results_per_query as usize)
            .map_err(|e| format!("search failed: {e}"))?;
        debug!(query, links = links.len(), "Search returned links");

        let mut places = Vec::new();
        for link in &links {
            let scraped = self
                .collaborators
                .scraper
                .scrape(link)
                .map_err(|e| format!("scrape of {link} failed: {e}"))?;
            places.extend(scraped);
        }
        Ok(places)
    }
}
