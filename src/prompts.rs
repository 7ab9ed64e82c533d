//! System prompts and rendering of collected context into prompt text

use std::fmt::Write;

use crate::models::{Context, Features, MapInfo, WeatherInfo};

pub const FEATURE_EXTRACTION: &str = r#"You extract travel planning features from a user's request.
Reply with a single JSON object and nothing else, using exactly these keys:
{
  "destination": "main destination of the trip",
  "duration_days": number of days as an integer, or null,
  "cuisine_preferences": ["food or drink interests"] or null,
  "place_preferences": ["activities or kinds of places"] or null,
  "transport_preferences": "preferred way of getting around" or null
}
Use null for anything the request does not mention."#;

pub const QUERY_GENERATION: &str = r#"You write web search queries that help plan a trip.
Reply with a JSON array and nothing else. Each element is an object:
{"feature_type": "...", "feature_value": "...", "query": "..."}
Write one query per feature that is present: destination attractions, trip duration,
each place preference, each cuisine preference and transport options.
Every query must name the destination."#;

pub const ITINERARY: &str = r"You are an experienced travel planner writing a detailed day-by-day itinerary.
Structure the itinerary in this order:
1. Trip overview
2. One section per day, each with Morning, Afternoon and Evening activities
3. Accommodation suggestions in budget, mid-range and luxury tiers
4. Transportation between and within destinations
5. Dining recommendations
6. Estimated costs
7. Practical tips

Start each day with a heading of exactly the form `## Day N`, for example `## Day 1`.
Do not put dates in day headings and do not add any other styling to them.
Write exactly one day section for every day of the trip.
Name real attractions, restaurants and neighbourhoods. Never use placeholders
such as [Restaurant Name] or generic descriptions in their place.";

pub const PACKING_LIST: &str = r"You write practical packing lists for trips.
Group items under Essentials, Clothing, Toiletries, Electronics and Destination-Specific Items.
Take the destination, trip length, planned activities and the weather forecast into account.";

pub const BUDGET: &str = r"You estimate travel budgets.
Begin with the title `### Budget Estimate for <destination>`.
Give low and high estimates for Accommodation, Food, Transportation, Activities and Miscellaneous,
then a total range. State the currency you use.";

pub const GUARDRAIL: &str = r#"You screen requests sent to a travel planning assistant.
Decide whether the request is a genuine travel planning request that is safe to answer.
Reply with a single JSON object and nothing else:
{"is_valid": true or false, "reason": "short explanation"}"#;

/// Search results as prompt text, one block per query
#[must_use]
pub fn render_search_context(context: &Context) -> String {
    if context.place_count() == 0 {
        return "No search results available.".to_string();
    }

    let mut rendered = String::new();
    for query_results in context.search_results.iter().filter(|r| !r.results.is_empty()) {
        let _ = writeln!(
            rendered,
            "Results for {} ({}):",
            query_results.feature_value, query_results.feature_type
        );
        for place in &query_results.results {
            if place.description.is_empty() {
                let _ = writeln!(rendered, "- {}", place.name);
            } else {
                let _ = writeln!(rendered, "- {}: {}", place.name, place.description);
            }
        }
        rendered.push('\n');
    }
    rendered.trim_end().to_string()
}

#[must_use]
pub fn render_weather_context(weather: Option<&WeatherInfo>) -> String {
    match weather {
        Some(weather) if !weather.forecast.is_empty() => {
            let mut rendered = format!("Weather forecast for {}:\n", weather.location);
            for day in &weather.forecast {
                let _ = writeln!(rendered, "{}", day.summary());
            }
            rendered.trim_end().to_string()
        }
        _ => "No weather information available.".to_string(),
    }
}

#[must_use]
pub fn render_location_context(map_info: Option<&MapInfo>) -> String {
    match map_info {
        Some(info) => format!(
            "Location: {} ({})",
            info.formatted_address,
            info.location.format()
        ),
        None => "No location information available.".to_string(),
    }
}

/// Features as a short bullet list
#[must_use]
pub fn render_features(features: &Features) -> String {
    let mut rendered = format!("- Destination: {}\n", features.destination);
    if let Some(days) = features.duration_days {
        let _ = writeln!(rendered, "- Duration: {days} days");
    }
    if !features.places().is_empty() {
        let _ = writeln!(rendered, "- Interests: {}", features.places().join(", "));
    }
    if !features.cuisines().is_empty() {
        let _ = writeln!(rendered, "- Food: {}", features.cuisines().join(", "));
    }
    if let Some(transport) = &features.transport_preferences {
        let _ = writeln!(rendered, "- Transport: {transport}");
    }
    rendered.trim_end().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{DailyForecast, PlaceInfo, QueryResults, SearchQuery};

    #[test]
    fn test_empty_context_renders_placeholders() {
        let context = Context::default();
        assert_eq!(render_search_context(&context), "No search results available.");
        assert_eq!(render_weather_context(None), "No weather information available.");
        assert_eq!(render_location_context(None), "No location information available.");
    }

    #[test]
    fn test_search_context_skips_empty_queries() {
        let failed =
            QueryResults::empty(&SearchQuery::new("place", "museum", "best museum in Rome"));
        let mut found =
            QueryResults::empty(&SearchQuery::new("cuisine", "food", "best food in Rome"));
        found.results.push(PlaceInfo::new("Roscioli", "Deli and wine bar"));
        found.results.push(PlaceInfo::new("Trapizzino", ""));

        let context = Context {
            search_results: vec![failed, found],
            ..Context::default()
        };

        let rendered = render_search_context(&context);
        assert!(rendered.starts_with("Results for food (cuisine):"));
        assert!(rendered.contains("- Roscioli: Deli and wine bar"));
        assert!(rendered.contains("- Trapizzino"));
        assert!(!rendered.contains("museum"));
    }

    #[test]
    fn test_weather_with_empty_forecast_is_unavailable() {
        let weather = WeatherInfo {
            location: "Rome".to_string(),
            forecast: Vec::new(),
        };
        assert_eq!(
            render_weather_context(Some(&weather)),
            "No weather information available."
        );

        let weather = WeatherInfo {
            location: "Rome".to_string(),
            forecast: vec![DailyForecast {
                day: 1,
                min_temp: "12°C".to_string(),
                max_temp: "19°C".to_string(),
                feels_like: "18°C".to_string(),
                description: "clear sky".to_string(),
                wind_speed: "2.0 m/s".to_string(),
            }],
        };
        let rendered = render_weather_context(Some(&weather));
        assert!(rendered.starts_with("Weather forecast for Rome:"));
        assert!(rendered.contains("Day 1"));
    }

    #[test]
    fn test_features_rendering_omits_absent_fields() {
        let mut features = Features::for_destination("Rome");
        features.duration_days = Some(4);
        let rendered = render_features(&features);
        assert_eq!(rendered, "- Destination: Rome\n- Duration: 4 days");
    }
}
