use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

pub const DEFAULT_LABEL: &str = "Untitled Question";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FieldType {
    #[serde(rename = "text", alias = "short-text")]
    ShortText,
    #[serde(rename = "textarea", alias = "long-text")]
    LongText,
    #[serde(rename = "dropdown")]
    Dropdown,
    #[serde(rename = "checkbox", alias = "checkbox-group")]
    CheckboxGroup,
    #[serde(rename = "radio", alias = "multiple-choice")]
    MultipleChoice,
    #[serde(rename = "date")]
    Date,
}

impl FieldType {
    pub const ALL: [FieldType; 6] = [
        Self::ShortText,
        Self::LongText,
        Self::Dropdown,
        Self::CheckboxGroup,
        Self::MultipleChoice,
        Self::Date,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ShortText => "text",
            Self::LongText => "textarea",
            Self::Dropdown => "dropdown",
            Self::CheckboxGroup => "checkbox",
            Self::MultipleChoice => "radio",
            Self::Date => "date",
        }
    }

    /// Palette label shown next to the add button.
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::ShortText => "Short Text",
            Self::LongText => "Long Text",
            Self::Dropdown => "Dropdown",
            Self::CheckboxGroup => "Checkboxes",
            Self::MultipleChoice => "Multiple Choice",
            Self::Date => "Date Picker",
        }
    }

    pub fn is_choice(&self) -> bool {
        matches!(
            self,
            Self::Dropdown | Self::CheckboxGroup | Self::MultipleChoice
        )
    }

    /// Checkbox groups answer with a list, every other type with one string.
    pub fn is_multi_valued(&self) -> bool {
        matches!(self, Self::CheckboxGroup)
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FieldType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "text" | "short-text" => Ok(Self::ShortText),
            "textarea" | "long-text" => Ok(Self::LongText),
            "dropdown" => Ok(Self::Dropdown),
            "checkbox" | "checkbox-group" => Ok(Self::CheckboxGroup),
            "radio" | "multiple-choice" => Ok(Self::MultipleChoice),
            "date" => Ok(Self::Date),
            other => Err(format!("Unknown field type '{other}'.")),
        }
    }
}

/// Options a freshly added choice field starts with.
pub fn default_options() -> Vec<String> {
    vec![option_label(1), option_label(2)]
}

pub fn option_label(n: usize) -> String {
    format!("Option {n}")
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldDefinition {
    pub id: String,
    #[serde(rename = "type")]
    pub field_type: FieldType,
    pub label: String,
    #[serde(default)]
    pub required: bool,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<String>,
}

impl FieldDefinition {
    pub fn new(id: String, field_type: FieldType) -> Self {
        let options = if field_type.is_choice() {
            default_options()
        } else {
            Vec::new()
        };
        Self {
            id,
            field_type,
            label: DEFAULT_LABEL.to_string(),
            required: false,
            options,
        }
    }
}

/// Attribute changes merged into one field. `None` leaves the attribute as is.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldPatch {
    #[serde(default, rename = "type")]
    pub field_type: Option<FieldType>,
    #[serde(default)]
    pub label: Option<String>,
    #[serde(default)]
    pub required: Option<bool>,
    #[serde(default)]
    pub options: Option<Vec<String>>,
}

impl FieldPatch {
    pub fn label(label: impl Into<String>) -> Self {
        Self {
            label: Some(label.into()),
            ..Self::default()
        }
    }

    pub fn required(required: bool) -> Self {
        Self {
            required: Some(required),
            ..Self::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        self.field_type.is_none()
            && self.label.is_none()
            && self.required.is_none()
            && self.options.is_none()
    }
}

/// A field as persisted: the definition plus its position at save time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderedField {
    #[serde(flatten)]
    pub field: FieldDefinition,
    #[serde(default)]
    pub order: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormPayload {
    pub title: String,
    pub fields: Vec<OrderedField>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Form {
    #[serde(rename = "_id", alias = "id")]
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub unique_url: String,
    #[serde(default)]
    pub fields: Vec<OrderedField>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

impl Form {
    /// Fields in persisted order, without their order stamps.
    pub fn ordered_fields(&self) -> Vec<FieldDefinition> {
        let mut stamped = self.fields.clone();
        stamped.sort_by_key(|f| f.order);
        stamped.into_iter().map(|f| f.field).collect()
    }
}
