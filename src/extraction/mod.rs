//! Feature extraction
//!
//! Turns free text into [`Features`]. A generative call is tried first; when
//! it fails or its reply cannot be read, the rule-based strategies in
//! [`rules`] take over. Normalization runs on whichever path produced the
//! data, so every returned `Features` has a usable destination.

pub mod rules;

use serde_json::Value;
use tracing::{debug, info, warn};

use crate::collaborators::TextGenerator;
use crate::config::PlannerSettings;
use crate::models::Features;
use crate::prompts;
use crate::reply::{ReplyShape, parse_json_reply};
use crate::stage::StageOutcome;

/// Extracts features from request text
pub struct FeatureExtractor<'a> {
    llm: &'a dyn TextGenerator,
    settings: &'a PlannerSettings,
}

impl<'a> FeatureExtractor<'a> {
    pub fn new(llm: &'a dyn TextGenerator, settings: &'a PlannerSettings) -> Self {
        Self { llm, settings }
    }

    /// Extract features, falling back to rules when the model is unusable
    pub fn extract_features(&self, text: &str) -> StageOutcome<Features> {
        info!("Extracting travel features");
        let max_days = self.settings.max_duration_days;

        let reply = match self.llm.generate(prompts::FEATURE_EXTRACTION, text, &[]) {
            Ok(reply) => reply,
            Err(e) => {
                warn!(error = %e, "Feature extraction call failed, using rule-based extraction");
                return StageOutcome::degraded(
                    rules::extract(text, max_days),
                    format!("text generator failed: {e}"),
                );
            }
        };
        debug!(preview = %preview(&reply), "Feature extraction reply");

        match parse_json_reply(&reply, ReplyShape::Object) {
            Ok(value) => {
                let features = normalize(&value, text, max_days);
                debug!(
                    destination = %features.destination,
                    duration = ?features.duration_days,
                    "Extracted features"
                );
                StageOutcome::Ready(features)
            }
            Err(e) => {
                warn!(error = %e, "Unreadable feature reply, using rule-based extraction");
                StageOutcome::degraded(rules::extract(text, max_days), e.to_string())
            }
        }
    }
}

/// Build `Features` from a model reply, backfilling from the request text
fn normalize(value: &Value, text: &str, max_days: u32) -> Features {
    let destination = ["destination", "place_to_visit"]
        .iter()
        .find_map(|key| non_empty_string(value.get(*key)))
        .or_else(|| rules::extract_destination(text))
        .unwrap_or_default();

    let mut features = Features::for_destination(destination);
    features.duration_days = value
        .get("duration_days")
        .and_then(|days| trip_days(days, max_days))
        .or_else(|| rules::extract_duration(text, max_days));
    features.cuisine_preferences = string_list(value.get("cuisine_preferences"));
    features.place_preferences = string_list(value.get("place_preferences"));
    features.transport_preferences = match value.get("transport_preferences") {
        Some(Value::Array(items)) => items.iter().find_map(|item| non_empty_string(Some(item))),
        other => non_empty_string(other),
    };
    features
}

fn non_empty_string(value: Option<&Value>) -> Option<String> {
    value
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

/// A day count in `1..=max_days` from a number or a numeric string
fn trip_days(value: &Value, max_days: u32) -> Option<u32> {
    let days = match value {
        Value::Number(n) => n.as_u64().or_else(|| {
            n.as_f64()
                .filter(|f| f.fract() == 0.0 && *f >= 0.0)
                .map(|f| f as u64)
        })?,
        Value::String(s) => s.trim().parse::<u64>().ok()?,
        _ => return None,
    };
    let days = u32::try_from(days).ok()?;
    if days > max_days {
        warn!(days, max_days, "Ignoring requested trip length beyond the maximum");
        return None;
    }
    Some(days).filter(|d| *d > 0)
}

/// A non-empty list of strings. A lone string becomes a one-element list.
fn string_list(value: Option<&Value>) -> Option<Vec<String>> {
    let items: Vec<String> = match value? {
        Value::String(_) => non_empty_string(value).into_iter().collect(),
        Value::Array(items) => items
            .iter()
            .filter_map(|item| non_empty_string(Some(item)))
            .collect(),
        _ => Vec::new(),
    };
    Some(items).filter(|items| !items.is_empty())
}

fn preview(reply: &str) -> String {
    reply.chars().take(120).collect()
}
