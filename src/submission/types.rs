use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One answer: a single string, or the ticked options of a checkbox group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ResponseValue {
    One(String),
    Many(Vec<String>),
}

impl ResponseValue {
    pub fn empty() -> Self {
        Self::One(String::new())
    }

    /// Blank strings and empty selections count as no answer.
    pub fn is_present(&self) -> bool {
        match self {
            Self::One(v) => !v.trim().is_empty(),
            Self::Many(v) => !v.is_empty(),
        }
    }
}

impl Default for ResponseValue {
    fn default() -> Self {
        Self::empty()
    }
}

impl From<&str> for ResponseValue {
    fn from(value: &str) -> Self {
        Self::One(value.to_string())
    }
}

impl From<String> for ResponseValue {
    fn from(value: String) -> Self {
        Self::One(value)
    }
}

impl From<Vec<String>> for ResponseValue {
    fn from(value: Vec<String>) -> Self {
        Self::Many(value)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponseItem {
    #[serde(default)]
    pub field_id: String,
    pub field_label: String,
    #[serde(default)]
    pub value: ResponseValue,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionPayload {
    pub responses: Vec<ResponseItem>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Submission {
    #[serde(rename = "_id", alias = "id")]
    pub id: String,
    pub responses: Vec<ResponseItem>,
    pub submitted_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn values_read_both_shapes() {
        let one: ResponseValue = serde_json::from_str("\"red\"").unwrap();
        let many: ResponseValue = serde_json::from_str("[\"a\",\"b\"]").unwrap();
        assert_eq!(one, ResponseValue::from("red"));
        assert_eq!(many, ResponseValue::Many(vec!["a".into(), "b".into()]));
    }

    #[test]
    fn presence_ignores_blank_answers() {
        assert!(!ResponseValue::from("   ").is_present());
        assert!(!ResponseValue::Many(Vec::new()).is_present());
        assert!(ResponseValue::from("2024-05-01").is_present());
    }
}
