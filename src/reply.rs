//! Tolerant parsing of JSON carried in generative replies
//!
//! Models often wrap the JSON they were asked for in prose or code fences.
//! A reply is read by trying a direct parse first and then the largest
//! delimited substring (first opening delimiter to last closing one).

use serde_json::Value;
use tracing::debug;

use crate::{PlannerError, Result};

/// The JSON shape a caller expects
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReplyShape {
    Object,
    Array,
}

impl ReplyShape {
    fn delimiters(self) -> (char, char) {
        match self {
            ReplyShape::Object => ('{', '}'),
            ReplyShape::Array => ('[', ']'),
        }
    }

    fn matches(self, value: &Value) -> bool {
        match self {
            ReplyShape::Object => value.is_object(),
            ReplyShape::Array => value.is_array(),
        }
    }
}

/// Parse a reply into a JSON value of the requested shape
pub fn parse_json_reply(reply: &str, shape: ReplyShape) -> Result<Value> {
    if let Ok(value) = serde_json::from_str::<Value>(reply.trim()) {
        if shape.matches(&value) {
            return Ok(value);
        }
        debug!(?shape, "Reply parsed but has the wrong shape");
    }

    let candidate = largest_delimited(reply, shape).ok_or_else(|| {
        PlannerError::format(format!("no {shape:?} found in reply"))
    })?;

    debug!(?shape, "Retrying parse on delimited substring");
    let value: Value = serde_json::from_str(candidate)
        .map_err(|e| PlannerError::format(format!("delimited substring is not JSON: {e}")))?;

    if shape.matches(&value) {
        Ok(value)
    } else {
        Err(PlannerError::format(format!("reply is not a JSON {shape:?}")))
    }
}

/// Slice from the first opening delimiter to the last closing one
fn largest_delimited(reply: &str, shape: ReplyShape) -> Option<&str> {
    let (open, close) = shape.delimiters();
    let start = reply.find(open)?;
    let end = reply.rfind(close)?;
    (end > start).then(|| &reply[start..=end])
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case::bare(r#"{"destination":"Rome"}"#)]
    #[case::padded("  \n{\"destination\":\"Rome\"}\n")]
    #[case::prose("Sure! Here you go: {\"destination\":\"Rome\"} Enjoy.")]
    #[case::fenced("```json\n{\"destination\":\"Rome\"}\n```")]
    fn test_object_replies(#[case] reply: &str) {
        let value = parse_json_reply(reply, ReplyShape::Object).unwrap();
        assert_eq!(value["destination"], "Rome");
    }

    #[test]
    fn test_array_inside_prose() {
        let reply = "Queries:\n[{\"query\":\"a\"},{\"query\":\"b\"}]\nDone";
        let value = parse_json_reply(reply, ReplyShape::Array).unwrap();
        assert_eq!(value.as_array().unwrap().len(), 2);
    }

    #[test]
    fn test_wrong_shape_falls_back_to_substring() {
        let reply = r#"[{"destination":"Rome"}]"#;
        let value = parse_json_reply(reply, ReplyShape::Object).unwrap();
        assert_eq!(value["destination"], "Rome");
    }

    #[rstest]
    #[case::no_json("I could not understand the request")]
    #[case::broken("{\"destination\": \"Rome\"")]
    #[case::reversed("} nothing here {")]
    fn test_unreadable_replies(#[case] reply: &str) {
        let err = parse_json_reply(reply, ReplyShape::Object).unwrap_err();
        assert!(matches!(err, PlannerError::Format { .. }));
    }
}
