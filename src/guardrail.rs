//! Optional screening of request text before planning

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::collaborators::TextGenerator;
use crate::prompts;
use crate::reply::{ReplyShape, parse_json_reply};

const VALIDATION_FAILED: &str = "Failed to validate input";

/// Whether a request may be planned, and why not
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GuardrailVerdict {
    pub is_valid: bool,
    #[serde(default)]
    pub reason: String,
}

impl GuardrailVerdict {
    fn rejected(reason: impl Into<String>) -> Self {
        Self {
            is_valid: false,
            reason: reason.into(),
        }
    }
}

pub struct Guardrail<'a> {
    llm: &'a dyn TextGenerator,
}

impl<'a> Guardrail<'a> {
    pub fn new(llm: &'a dyn TextGenerator) -> Self {
        Self { llm }
    }

    /// Screen a request. Unreadable or failed replies reject it.
    pub fn validate_input(&self, text: &str) -> GuardrailVerdict {
        let reply = match self.llm.generate(prompts::GUARDRAIL, text, &[]) {
            Ok(reply) => reply,
            Err(e) => {
                warn!(error = %e, "Guardrail call failed");
                return GuardrailVerdict::rejected(VALIDATION_FAILED);
            }
        };

        let verdict = parse_json_reply(&reply, ReplyShape::Object).and_then(|value| {
            serde_json::from_value::<GuardrailVerdict>(value)
                .map_err(|e| crate::PlannerError::format(e.to_string()))
        });

        match verdict {
            Ok(verdict) => {
                debug!(is_valid = verdict.is_valid, reason = %verdict.reason, "Guardrail verdict");
                verdict
            }
            Err(e) => {
                warn!(error = %e, "Unreadable guardrail reply");
                GuardrailVerdict::rejected(VALIDATION_FAILED)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collaborators::testing::ScriptedGenerator;

    #[test]
    fn test_accepts_valid_request() {
        let llm = ScriptedGenerator::new(vec![Ok(
            r#"{"is_valid": true, "reason": "travel request"}"#,
        )]);
        let verdict = Guardrail::new(&llm).validate_input("3 days in Rome");
        assert!(verdict.is_valid);
    }

    #[test]
    fn test_rejection_keeps_reason() {
        let llm = ScriptedGenerator::new(vec![Ok(
            r#"Result: {"is_valid": false, "reason": "Not a travel request"}"#,
        )]);
        let verdict = Guardrail::new(&llm).validate_input("write my homework");
        assert_eq!(verdict, GuardrailVerdict::rejected("Not a travel request"));
    }

    #[test]
    fn test_unusable_replies_reject() {
        let llm = ScriptedGenerator::new(vec![Ok("yes"), Ok(r#"{"reason": "ok"}"#), Err("down")]);
        let guardrail = Guardrail::new(&llm);
        for _ in 0..3 {
            assert_eq!(
                guardrail.validate_input("Rome"),
                GuardrailVerdict::rejected(VALIDATION_FAILED)
            );
        }
    }
}
