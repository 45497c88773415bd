use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::{Map, Value};

use crate::form::types::Form;
use crate::session::User;
use crate::submission::types::Submission;

fn default_success() -> bool {
    true
}

/// `{success, message, ...data}` wrapper every endpoint answers with.
///
/// The data keys stay raw until `success` has been checked; a failed reply
/// carries no data keys at all.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Envelope {
    #[serde(default = "default_success")]
    pub success: bool,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(flatten)]
    pub data: Map<String, Value>,
}

impl Envelope {
    pub fn into_data<T: DeserializeOwned>(self) -> Result<T, serde_json::Error> {
        serde_json::from_value(Value::Object(self.data))
    }
}

#[derive(Debug, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub message: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct Empty {}

#[derive(Debug, Deserialize)]
pub struct AuthBody {
    pub token: String,
    pub user: User,
}

#[derive(Debug, Deserialize)]
pub struct UserBody {
    pub user: User,
}

#[derive(Debug, Deserialize)]
pub struct FormBody {
    pub form: Form,
}

#[derive(Debug, Deserialize)]
pub struct FormsBody {
    pub forms: Vec<Form>,
}

#[derive(Debug, Deserialize)]
pub struct SubmissionsBody {
    pub submissions: Vec<Submission>,
}
