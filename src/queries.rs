//! Search query generation

use tracing::{debug, info, warn};

use crate::collaborators::TextGenerator;
use crate::config::PlannerSettings;
use crate::models::{Features, SearchQuery};
use crate::prompts;
use crate::reply::{ReplyShape, parse_json_reply};
use crate::stage::StageOutcome;
use crate::{PlannerError, Result};

/// Queries used when there is no destination to search around
const GENERIC_QUERIES: [&str; 3] = [
    "popular tourist destinations",
    "travel planning tips",
    "best vacation spots this year",
];

/// Turns features into search queries
pub struct QueryGenerator<'a> {
    llm: &'a dyn TextGenerator,
    settings: &'a PlannerSettings,
}

impl<'a> QueryGenerator<'a> {
    pub fn new(llm: &'a dyn TextGenerator, settings: &'a PlannerSettings) -> Self {
        Self { llm, settings }
    }

    /// Generate queries. Never empty.
    pub fn generate_queries(&self, features: &Features) -> StageOutcome<Vec<SearchQuery>> {
        info!(destination = %features.destination, "Generating search queries");

        if !features.has_known_destination() {
            debug!("No destination, using generic queries");
            return StageOutcome::degraded(generic_queries(), "no destination to search for");
        }

        match self.ask_model(features) {
            Ok(queries) => {
                debug!(count = queries.len(), "Model produced search queries");
                StageOutcome::Ready(queries)
            }
            Err(e) => {
                warn!(error = %e, "Falling back to template queries");
                StageOutcome::degraded(self.fallback_queries(features), e.to_string())
            }
        }
    }

    fn ask_model(&self, features: &Features) -> Result<Vec<SearchQuery>> {
        let user_prompt = format!(
            "Write search queries for this trip:\n{}",
            prompts::render_features(features)
        );
        let reply = self
            .llm
            .generate(prompts::QUERY_GENERATION, &user_prompt, &[])
            .map_err(|e| PlannerError::collaborator("text generator", e.to_string()))?;

        let value = parse_json_reply(&reply, ReplyShape::Array)?;
        let queries: Vec<SearchQuery> = serde_json::from_value(value)
            .map_err(|e| PlannerError::format(format!("query records: {e}")))?;

        if queries.is_empty() {
            return Err(PlannerError::format("empty query list"));
        }
        if let Some(bad) = queries.iter().find(|q| !q.is_well_formed()) {
            return Err(PlannerError::format(format!("incomplete query record: {bad:?}")));
        }
        Ok(queries)
    }

    /// Template queries, one per present feature
    #[must_use]
    pub fn fallback_queries(&self, features: &Features) -> Vec<SearchQuery> {
        if !features.has_known_destination() {
            return generic_queries();
        }

        let destination = features.destination.as_str();
        let per_kind = self.settings.max_preference_queries as usize;
        let mut queries = vec![SearchQuery::new(
            "destination",
            destination,
            format!("top attractions in {destination}"),
        )];

        if let Some(days) = features.duration_days {
            queries.push(SearchQuery::new(
                "duration",
                days.to_string(),
                format!("{days} day itinerary for {destination}"),
            ));
        }

        for place in features.places().iter().take(per_kind) {
            queries.push(SearchQuery::new(
                "place",
                place,
                format!("best {place} in {destination}"),
            ));
        }

        for cuisine in features.cuisines().iter().take(per_kind) {
            queries.push(SearchQuery::new(
                "cuisine",
                cuisine,
                format!("best {cuisine} in {destination}"),
            ));
        }

        if let Some(transport) = &features.transport_preferences {
            queries.push(SearchQuery::new(
                "transport",
                transport,
                format!("{transport} options in {destination}"),
            ));
        }

        queries.truncate(self.settings.max_fallback_queries as usize);
        queries
    }
}

fn generic_queries() -> Vec<SearchQuery> {
    GENERIC_QUERIES
        .iter()
        .map(|query| SearchQuery::new("general", "travel", *query))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collaborators::testing::ScriptedGenerator;
    use crate::models::UNKNOWN_DESTINATION;

    fn paris() -> Features {
        let mut features = Features::for_destination("Paris");
        features.duration_days = Some(5);
        features.place_preferences = Some(vec![
            "museum".to_string(),
            "art".to_string(),
            "history".to_string(),
        ]);
        features.cuisine_preferences = Some(vec!["food".to_string(), "local food".to_string()]);
        features.transport_preferences = Some("metro".to_string());
        features
    }

    #[test]
    fn test_model_queries_are_used() {
        let llm = ScriptedGenerator::new(vec![Ok(r#"[
            {"feature_type": "destination", "feature_value": "Paris", "query": "top sights Paris"},
            {"feature_type": "cuisine", "feature_value": "food", "search_query": "bistros Paris"}
        ]"#)]);
        let settings = PlannerSettings::default();

        let outcome = QueryGenerator::new(&llm, &settings).generate_queries(&paris());
        assert!(!outcome.is_degraded());
        let queries = outcome.into_value();
        assert_eq!(queries.len(), 2);
        assert_eq!(queries[1].query, "bistros Paris");
    }

    #[test]
    fn test_fallback_order_and_truncation() {
        let llm = ScriptedGenerator::new(vec![Err("rate limited")]);
        let settings = PlannerSettings::default();

        let outcome = QueryGenerator::new(&llm, &settings).generate_queries(&paris());
        assert!(outcome.is_degraded());

        let queries: Vec<String> = outcome.into_value().into_iter().map(|q| q.query).collect();
        assert_eq!(
            queries,
            vec![
                "top attractions in Paris",
                "5 day itinerary for Paris",
                "best museum in Paris",
                "best art in Paris",
                "best food in Paris",
                "best local food in Paris",
            ]
        );
    }

    #[test]
    fn test_malformed_records_trigger_fallback() {
        let llm = ScriptedGenerator::new(vec![Ok(
            r#"[{"feature_type": "", "feature_value": "x", "query": "q"}]"#,
        )]);
        let settings = PlannerSettings::default();

        let outcome = QueryGenerator::new(&llm, &settings).generate_queries(&paris());
        assert!(outcome.is_degraded());
        assert_eq!(outcome.value()[0].query, "top attractions in Paris");
    }

    #[test]
    fn test_empty_array_triggers_fallback() {
        let llm = ScriptedGenerator::new(vec![Ok("[]")]);
        let settings = PlannerSettings::default();

        let outcome = QueryGenerator::new(&llm, &settings)
            .generate_queries(&Features::for_destination("Oslo"));
        assert_eq!(outcome.value().len(), 1);
    }

    #[test]
    fn test_unknown_destination_skips_model() {
        let llm = ScriptedGenerator::new(vec![]);
        let settings = PlannerSettings::default();

        let outcome = QueryGenerator::new(&llm, &settings)
            .generate_queries(&Features::for_destination(UNKNOWN_DESTINATION));
        assert_eq!(llm.call_count(), 0);
        assert_eq!(outcome.value().len(), GENERIC_QUERIES.len());
    }

    #[test]
    fn test_destination_only_yields_one_query() {
        let llm = ScriptedGenerator::new(vec![]);
        let settings = PlannerSettings::default();
        let queries = QueryGenerator::new(&llm, &settings)
            .fallback_queries(&Features::for_destination("Oslo"));
        assert_eq!(
            queries,
            vec![SearchQuery::new("destination", "Oslo", "top attractions in Oslo")]
        );
    }
}
