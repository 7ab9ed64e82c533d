//! Request handling for an HTTP layer
//!
//! Maps planning requests to a status code and a JSON-serializable body.
//! No server lives here; a web framework only has to forward the text and
//! write the response out.

use serde::Serialize;
use tracing::{error, info};

use crate::PlannerError;
use crate::agent::Agent;
use crate::models::{Output, Turn};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ErrorBody {
    pub error: String,
}

/// Response to a planning request
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum PlanResponse {
    Planned(Output),
    Rejected(ErrorBody),
    Failed(ErrorBody),
}

impl PlanResponse {
    #[must_use]
    pub fn status_code(&self) -> u16 {
        match self {
            PlanResponse::Planned(_) => 200,
            PlanResponse::Rejected(_) => 400,
            PlanResponse::Failed(_) => 500,
        }
    }

    fn from_error(error: &PlannerError) -> Self {
        let body = ErrorBody {
            error: error.user_message(),
        };
        match error {
            PlannerError::Validation { .. } => PlanResponse::Rejected(body),
            _ => PlanResponse::Failed(body),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HistoryResponse {
    pub history: Vec<Turn>,
}

/// Validate and plan one request
pub fn handle_plan(agent: &mut Agent, text: &str) -> PlanResponse {
    if let Err(e) = agent.check_input(text) {
        info!(error = %e, "Rejected planning request");
        return PlanResponse::from_error(&e);
    }

    match agent.plan(text) {
        Ok(report) => PlanResponse::Planned(report.output),
        Err(e) => {
            error!(error = %e, "Planning request failed");
            PlanResponse::from_error(&e)
        }
    }
}

#[must_use]
pub fn handle_history(agent: &Agent) -> HistoryResponse {
    HistoryResponse {
        history: agent.conversation_history().to_vec(),
    }
}
