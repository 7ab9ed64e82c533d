//! Planning session: runs the pipeline stages in order and owns the history
//!
//! Stage-level failures resolve inside each stage. Anything that still
//! escapes (a panic in a collaborator or stage) is caught once here and
//! turns the whole request into the fixed failure output.

use chrono::NaiveDate;
use serde::Serialize;
use std::any::Any;
use std::panic::{AssertUnwindSafe, catch_unwind};
use tracing::{error, info, warn};

use crate::collaborators::Collaborators;
use crate::config::PlannerSettings;
use crate::context_collector::ContextCollector;
use crate::extraction::FeatureExtractor;
use crate::fallback;
use crate::guardrail::{Guardrail, GuardrailVerdict};
use crate::models::{ConversationHistory, Features, Output, Turn};
use crate::output::{DayCoverage, OutputGenerator};
use crate::queries::QueryGenerator;
use crate::stage::{PipelineState, StageReport};
use crate::{PlannerError, Result};

/// Everything a successful run produced
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlanReport {
    pub output: Output,
    pub features: Features,
    /// One entry per stage, in run order
    pub stages: Vec<StageReport>,
    pub day_coverage: Option<DayCoverage>,
    pub final_state: PipelineState,
}

impl PlanReport {
    /// Whether any stage fell back
    #[must_use]
    pub fn is_degraded(&self) -> bool {
        self.stages.iter().any(|stage| stage.degraded.is_some())
    }
}

/// The stages wired to one set of collaborators
pub(crate) struct Pipeline {
    collaborators: Collaborators,
    settings: PlannerSettings,
    today: Option<NaiveDate>,
}

impl Pipeline {
    pub fn new(collaborators: Collaborators, settings: PlannerSettings) -> Self {
        Self {
            collaborators,
            settings,
            today: None,
        }
    }

    #[must_use]
    pub fn settings(&self) -> &PlannerSettings {
        &self.settings
    }

    /// Run every stage, advancing `state` as each one starts
    fn run(&self, text: &str, history: &[Turn], state: &mut PipelineState) -> PlanReport {
        let llm = self.collaborators.llm.as_ref();
        let mut stages = Vec::with_capacity(4);

        advance(state);
        let (features, report) = FeatureExtractor::new(llm, &self.settings)
            .extract_features(text)
            .into_report(*state);
        stages.push(report);

        advance(state);
        let (queries, report) = QueryGenerator::new(llm, &self.settings)
            .generate_queries(&features)
            .into_report(*state);
        stages.push(report);

        advance(state);
        let (context, report) = ContextCollector::new(&self.collaborators, &self.settings)
            .collect_context(&queries, &features)
            .into_report(*state);
        stages.push(report);

        advance(state);
        let mut generator = OutputGenerator::new(llm, &self.settings);
        if let Some(today) = self.today {
            generator = generator.with_today(today);
        }
        let (plan, report) = generator
            .generate_itinerary(&features, &context, history)
            .into_report(*state);
        stages.push(report);

        let output = fill_empty_fields(plan.output, &features.destination);

        advance(state);
        PlanReport {
            output,
            features,
            stages,
            day_coverage: plan.day_coverage,
            final_state: *state,
        }
    }
}

fn advance(state: &mut PipelineState) {
    *state = state.next();
    info!(state = %state, "Pipeline stage");
}

/// Replace blank text fields with the destination templates
fn fill_empty_fields(mut output: Output, destination: &str) -> Output {
    if output.itinerary.trim().is_empty() {
        warn!("Empty itinerary, using template");
        output.itinerary = fallback::itinerary(destination);
    }
    if output.packing_list.trim().is_empty() {
        warn!("Empty packing list, using template");
        output.packing_list = fallback::packing_list(destination);
    }
    if output.estimated_budget.trim().is_empty() {
        warn!("Empty budget, using template");
        output.estimated_budget = fallback::budget(destination);
    }
    output
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    payload
        .downcast_ref::<&str>()
        .map(|s| (*s).to_string())
        .or_else(|| payload.downcast_ref::<String>().cloned())
        .unwrap_or_else(|| "unknown failure".to_string())
}

/// One planning session. Requests through the same agent share its history.
pub struct Agent {
    pipeline: Pipeline,
    history: ConversationHistory,
    state: PipelineState,
    last_features: Option<Features>,
    last_itinerary: Option<String>,
}

impl Agent {
    pub fn new(collaborators: Collaborators, settings: PlannerSettings) -> Self {
        Self {
            pipeline: Pipeline::new(collaborators, settings),
            history: ConversationHistory::new(),
            state: PipelineState::Idle,
            last_features: None,
            last_itinerary: None,
        }
    }

    /// Fix the date trip windows are computed from
    #[must_use]
    pub fn with_today(mut self, today: NaiveDate) -> Self {
        self.pipeline.today = Some(today);
        self
    }

    #[must_use]
    pub fn settings(&self) -> &PlannerSettings {
        self.pipeline.settings()
    }

    /// State reached by the most recent request
    #[must_use]
    pub fn state(&self) -> PipelineState {
        self.state
    }

    /// Reject input that must not reach the pipeline
    pub fn check_input(&self, text: &str) -> Result<()> {
        if text.trim().is_empty() {
            return Err(PlannerError::validation("Input text cannot be empty"));
        }

        if self.settings().guardrail_enabled {
            let GuardrailVerdict { is_valid, reason } =
                Guardrail::new(self.pipeline.collaborators.llm.as_ref()).validate_input(text);
            if !is_valid {
                info!(%reason, "Guardrail rejected input");
                return Err(PlannerError::validation(reason));
            }
        }
        Ok(())
    }

    /// Run the pipeline for one request
    ///
    /// Returns `PlannerError::Pipeline` only when a failure escaped every
    /// stage fallback. History is recorded only for successful runs.
    pub fn plan(&mut self, text: &str) -> Result<PlanReport> {
        self.state = PipelineState::Idle;

        let pipeline = &self.pipeline;
        let history = self.history.turns();
        let state = &mut self.state;
        let run = catch_unwind(AssertUnwindSafe(|| pipeline.run(text, history, state)));

        match run {
            Ok(report) => {
                info!(
                    destination = %report.features.destination,
                    degraded = report.is_degraded(),
                    "Travel plan generated"
                );
                self.history.record_exchange(text, &report.output.itinerary);
                self.last_features = Some(report.features.clone());
                self.last_itinerary = Some(report.output.itinerary.clone());
                Ok(report)
            }
            Err(payload) => {
                let message = panic_message(payload.as_ref());
                error!(failed_in = %self.state, %message, "Travel planning failed");
                self.state = PipelineState::Done;
                Err(PlannerError::pipeline(message))
            }
        }
    }

    /// Plan a request. Always returns an output, the fixed failure texts at worst.
    pub fn process_input(&mut self, text: &str) -> Output {
        self.plan(text)
            .map(|report| report.output)
            .unwrap_or_else(|_| fallback::failure_output())
    }

    #[must_use]
    pub fn conversation_history(&self) -> &[Turn] {
        self.history.turns()
    }

    #[must_use]
    pub fn last_features(&self) -> Option<&Features> {
        self.last_features.as_ref()
    }

    #[must_use]
    pub fn last_itinerary(&self) -> Option<&str> {
        self.last_itinerary.as_deref()
    }
}
