//! Answer Array Form
//!
//! The registration form submits answers as an array of
//! `{questionId, question, answer}` items rather than a keyed object.
//! This module folds that form into the keyed shape before strict parsing,
//! and decides what counts as an empty submission.

use super::response::{AssessmentResponse, CapabilityAxis, KnowledgeAxis};
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::warn;

/// One answered question
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnswerItem {
    /// Field name of the question, e.g. `golangKnowledge`
    pub question_id: String,
    /// Question text as shown to the candidate
    #[serde(default)]
    pub question: String,
    /// Experience level string or yes/no answer
    pub answer: Value,
}

impl AnswerItem {
    pub fn new(question_id: impl Into<String>, answer: impl Into<Value>) -> Self {
        Self {
            question_id: question_id.into(),
            question: String::new(),
            answer: answer.into(),
        }
    }
}

/// Fold an answer array into the keyed object shape.
///
/// Unknown question ids are skipped. Capability answers count as yes only
/// for `true` or the string `"true"`.
pub fn answers_to_object(items: &[AnswerItem]) -> Map<String, Value> {
    let mut object = Map::new();

    for item in items {
        let id = item.question_id.as_str();

        if KnowledgeAxis::from_field_name(id).is_some() {
            object.insert(id.to_string(), item.answer.clone());
        } else if CapabilityAxis::from_field_name(id).is_some() {
            let yes = match &item.answer {
                Value::Bool(value) => *value,
                Value::String(text) => text == "true",
                _ => false,
            };
            object.insert(id.to_string(), Value::Bool(yes));
        } else {
            warn!("Unknown assessment question ID: {}", id);
        }
    }

    object
}

impl AssessmentResponse {
    /// Parse the answer array form
    pub fn from_answers(items: &[AnswerItem]) -> Result<Self> {
        Self::from_value(&Value::Object(answers_to_object(items)))
    }
}

/// Parse the `assessmentResponses` field of a registration.
///
/// Absent, `null`, `{}` and `[]` are an empty submission and yield `None`.
/// Anything else must be a complete, valid set of answers.
pub fn parse_responses(value: Option<&Value>) -> Result<Option<AssessmentResponse>> {
    match value {
        None | Some(Value::Null) => Ok(None),
        Some(Value::Object(object)) if object.is_empty() => Ok(None),
        Some(Value::Array(items)) if items.is_empty() => Ok(None),
        Some(object @ Value::Object(_)) => AssessmentResponse::from_value(object).map(Some),
        Some(Value::Array(items)) => {
            let answers = items
                .iter()
                .map(|item| serde_json::from_value::<AnswerItem>(item.clone()))
                .collect::<std::result::Result<Vec<_>, _>>()
                .map_err(|e| {
                    Error::validation("assessmentResponses", format!("malformed answer item: {}", e))
                })?;
            AssessmentResponse::from_answers(&answers).map(Some)
        }
        Some(other) => Err(Error::validation(
            "assessmentResponses",
            format!("expected an object or an array of answers, got {}", other),
        )),
    }
}
