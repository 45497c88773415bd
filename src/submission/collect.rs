use std::collections::HashMap;

use tracing::debug;

use crate::error::FormError;
use crate::form::types::FieldDefinition;

use super::types::{ResponseItem, ResponseValue, SubmissionPayload};

/// Answers a respondent has entered so far, keyed by field id.
#[derive(Debug, Clone, Default)]
pub struct ResponseDraft {
    answers: HashMap<String, ResponseValue>,
}

impl ResponseDraft {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn value(&self, field_id: &str) -> Option<&ResponseValue> {
        self.answers.get(field_id)
    }

    pub fn set_value(&mut self, field_id: &str, value: impl Into<ResponseValue>) {
        self.answers.insert(field_id.to_string(), value.into());
    }

    /// Checkbox semantics: tick adds the option once, untick removes it.
    pub fn toggle_option(&mut self, field_id: &str, option: &str, checked: bool) {
        let entry = self
            .answers
            .entry(field_id.to_string())
            .or_insert_with(|| ResponseValue::Many(Vec::new()));
        if !matches!(*entry, ResponseValue::Many(_)) {
            *entry = ResponseValue::Many(Vec::new());
        }
        if let ResponseValue::Many(selected) = entry {
            if checked {
                if !selected.iter().any(|s| s == option) {
                    selected.push(option.to_string());
                }
            } else {
                selected.retain(|s| s != option);
            }
        }
    }

    pub fn clear(&mut self) {
        self.answers.clear();
    }

    /// Labels of required fields without an answer, in form order.
    pub fn missing_required<'a>(&self, fields: &'a [FieldDefinition]) -> Vec<&'a str> {
        fields
            .iter()
            .filter(|f| f.required)
            .filter(|f| !self.answers.get(&f.id).is_some_and(ResponseValue::is_present))
            .map(|f| f.label.as_str())
            .collect()
    }

    pub fn validate(&self, fields: &[FieldDefinition]) -> Result<(), FormError> {
        let missing = self.missing_required(fields);
        if missing.is_empty() {
            return Ok(());
        }
        debug!(count = missing.len(), "required fields missing");
        Err(FormError::MissingRequired(
            missing.into_iter().map(str::to_string).collect(),
        ))
    }

    /// One response per field in form order; unanswered fields go out as "".
    pub fn to_payload(&self, fields: &[FieldDefinition]) -> SubmissionPayload {
        let responses = fields
            .iter()
            .map(|f| ResponseItem {
                field_id: f.id.clone(),
                field_label: f.label.clone(),
                value: self.answers.get(&f.id).cloned().unwrap_or_default(),
            })
            .collect();
        SubmissionPayload { responses }
    }
}
