use crate::submission::types::ResponseValue;

pub const NO_RESPONSE: &str = "(No response)";

/// How an answer reads in the submissions view.
pub fn display_value(value: &ResponseValue) -> String {
    match value {
        ResponseValue::Many(items) if !items.is_empty() => items.join(", "),
        ResponseValue::One(text) if !text.trim().is_empty() => text.clone(),
        _ => NO_RESPONSE.to_string(),
    }
}
