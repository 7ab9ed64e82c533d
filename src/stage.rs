//! Per-stage outcomes and the pipeline state machine

use serde::Serialize;
use std::fmt;

/// What a stage produced. Both variants carry a usable value.
#[derive(Debug, Clone, PartialEq)]
pub enum StageOutcome<T> {
    /// The stage's primary path succeeded
    Ready(T),
    /// A fallback value was substituted
    Degraded { value: T, reason: String },
}

impl<T> StageOutcome<T> {
    pub fn degraded(value: T, reason: impl Into<String>) -> Self {
        Self::Degraded {
            value,
            reason: reason.into(),
        }
    }

    #[must_use]
    pub fn value(&self) -> &T {
        match self {
            Self::Ready(value) | Self::Degraded { value, .. } => value,
        }
    }

    #[must_use]
    pub fn into_value(self) -> T {
        match self {
            Self::Ready(value) | Self::Degraded { value, .. } => value,
        }
    }

    #[must_use]
    pub fn is_degraded(&self) -> bool {
        matches!(self, Self::Degraded { .. })
    }

    #[must_use]
    pub fn reason(&self) -> Option<&str> {
        match self {
            Self::Ready(_) => None,
            Self::Degraded { reason, .. } => Some(reason),
        }
    }

    /// Split into the value and a report for the given stage
    pub fn into_report(self, stage: PipelineState) -> (T, StageReport) {
        let report = StageReport {
            stage,
            degraded: self.reason().map(str::to_string),
        };
        (self.into_value(), report)
    }
}

/// States a planning request moves through, strictly forward
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum PipelineState {
    Idle,
    Extracting,
    QueryGenerating,
    ContextCollecting,
    Generating,
    Done,
}

impl PipelineState {
    /// The next state. `Done` is terminal.
    #[must_use]
    pub fn next(self) -> Self {
        match self {
            Self::Idle => Self::Extracting,
            Self::Extracting => Self::QueryGenerating,
            Self::QueryGenerating => Self::ContextCollecting,
            Self::ContextCollecting => Self::Generating,
            Self::Generating | Self::Done => Self::Done,
        }
    }
}

impl fmt::Display for PipelineState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Idle => "idle",
            Self::Extracting => "extracting",
            Self::QueryGenerating => "query-generating",
            Self::ContextCollecting => "context-collecting",
            Self::Generating => "generating",
            Self::Done => "done",
        };
        f.write_str(name)
    }
}

/// How one stage of a run resolved
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StageReport {
    pub stage: PipelineState,
    /// Why the stage fell back, if it did
    pub degraded: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_states_only_move_forward() {
        let mut state = PipelineState::Idle;
        let mut visited = vec![state];
        while state != PipelineState::Done {
            state = state.next();
            visited.push(state);
        }
        assert_eq!(
            visited,
            vec![
                PipelineState::Idle,
                PipelineState::Extracting,
                PipelineState::QueryGenerating,
                PipelineState::ContextCollecting,
                PipelineState::Generating,
                PipelineState::Done,
            ]
        );
        assert_eq!(PipelineState::Done.next(), PipelineState::Done);
    }

    #[test]
    fn test_outcome_report() {
        let (value, report) =
            StageOutcome::degraded(3, "llm down").into_report(PipelineState::Extracting);
        assert_eq!(value, 3);
        assert_eq!(report.degraded.as_deref(), Some("llm down"));

        let (_, report) = StageOutcome::Ready("ok").into_report(PipelineState::Generating);
        assert!(report.degraded.is_none());
    }
}
