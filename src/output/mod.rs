//! Itinerary, packing list and budget generation
//!
//! The three texts are generated by independent calls. A failed call only
//! replaces its own field with the destination template; the other fields
//! and the trip window are unaffected.

pub mod trip_window;
pub mod validation;

use chrono::{Local, NaiveDate};
use tracing::{debug, info, warn};

use crate::collaborators::TextGenerator;
use crate::config::PlannerSettings;
use crate::fallback;
use crate::models::{Context, Features, Output, TripDetails, Turn};
use crate::prompts;
use crate::stage::StageOutcome;

pub use trip_window::trip_window;
pub use validation::{DayCoverage, check_day_coverage, count_day_headers, ensure_budget_title};

/// Output together with what the soft checks found
#[derive(Debug, Clone, PartialEq)]
pub struct GeneratedPlan {
    pub output: Output,
    /// Absent when the itinerary came from the template
    pub day_coverage: Option<DayCoverage>,
}

pub struct OutputGenerator<'a> {
    llm: &'a dyn TextGenerator,
    settings: &'a PlannerSettings,
    today: NaiveDate,
}

impl<'a> OutputGenerator<'a> {
    pub fn new(llm: &'a dyn TextGenerator, settings: &'a PlannerSettings) -> Self {
        Self {
            llm,
            settings,
            today: Local::now().date_naive(),
        }
    }

    /// Fix the date the trip window is computed from
    #[must_use]
    pub fn with_today(mut self, today: NaiveDate) -> Self {
        self.today = today;
        self
    }

    /// Generate every artifact of the plan
    pub fn generate_itinerary(
        &self,
        features: &Features,
        context: &Context,
        history: &[Turn],
    ) -> StageOutcome<GeneratedPlan> {
        let destination = features.destination.as_str();
        let duration = features
            .duration_days
            .unwrap_or(self.settings.default_duration_days)
            .min(self.settings.max_duration_days);
        info!(destination, duration, "Generating travel plan");

        let details = trip_window(
            destination,
            self.today,
            self.settings.trip_start_offset_days,
            duration,
        );
        let briefing = briefing(features, context, &details);
        let mut failures = Vec::new();

        let itinerary_prompt = format!(
            "{briefing}\n\nWrite a {duration}-day itinerary with exactly {duration} day sections, \
             `## Day 1` through `## Day {duration}`."
        );
        let (itinerary, day_coverage) =
            match self.llm.generate(prompts::ITINERARY, &itinerary_prompt, history) {
                Ok(text) => {
                    debug!(chars = text.len(), "Itinerary generated");
                    let coverage = check_day_coverage(&text, duration);
                    (text, Some(coverage))
                }
                Err(e) => {
                    warn!(error = %e, "Itinerary generation failed, using template");
                    failures.push(format!("itinerary: {e}"));
                    (fallback::itinerary(destination), None)
                }
            };

        let packing_prompt = format!("{briefing}\n\nWrite a packing list for this trip.");
        let packing_list = match self.llm.generate(prompts::PACKING_LIST, &packing_prompt, &[]) {
            Ok(text) => text,
            Err(e) => {
                warn!(error = %e, "Packing list generation failed, using template");
                failures.push(format!("packing list: {e}"));
                fallback::packing_list(destination)
            }
        };

        let budget_prompt = format!("{briefing}\n\nEstimate the budget for this trip.");
        let estimated_budget = match self.llm.generate(prompts::BUDGET, &budget_prompt, &[]) {
            Ok(text) => ensure_budget_title(text, destination),
            Err(e) => {
                warn!(error = %e, "Budget generation failed, using template");
                failures.push(format!("budget: {e}"));
                fallback::budget(destination)
            }
        };

        let plan = GeneratedPlan {
            output: Output {
                itinerary,
                packing_list,
                estimated_budget,
                trip_details: Some(details),
            },
            day_coverage,
        };

        if failures.is_empty() {
            StageOutcome::Ready(plan)
        } else {
            StageOutcome::degraded(plan, failures.join("; "))
        }
    }
}

/// Shared user-prompt preamble: request features, dates and collected context
fn briefing(features: &Features, context: &Context, details: &TripDetails) -> String {
    let dates = details
        .daily_dates
        .iter()
        .map(|(day, date)| format!("Day {day}: {}", date.format("%A, %B %-d, %Y")))
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        "Trip request:\n{}\n\nTravel dates:\n{dates}\n\n{}\n\n{}\n\n{}",
        prompts::render_features(features),
        prompts::render_search_context(context),
        prompts::render_weather_context(context.weather_info.as_ref()),
        prompts::render_location_context(context.map_info.as_ref()),
    )
}
