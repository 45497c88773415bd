//! Signed-in state, passed explicitly to every call that needs it.

use serde::{Deserialize, Serialize};

use crate::error::FormError;
use crate::util::text::looks_like_email;

pub const MIN_PASSWORD_LEN: usize = 6;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    #[serde(alias = "_id")]
    pub id: String,
    pub name: String,
    pub email: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    pub token: String,
    pub user: User,
}

impl Session {
    pub fn bearer(&self) -> String {
        format!("Bearer {}", self.token)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Registration {
    pub name: String,
    pub email: String,
    pub password: String,
}

impl Registration {
    pub fn validate(&self) -> Result<(), FormError> {
        if self.name.trim().is_empty() {
            return Err(FormError::Validation("Please enter your name".to_string()));
        }
        if !looks_like_email(&self.email)? {
            return Err(FormError::Validation(
                "Please enter a valid email address".to_string(),
            ));
        }
        if self.password.chars().count() < MIN_PASSWORD_LEN {
            return Err(FormError::Validation(format!(
                "Password must be at least {MIN_PASSWORD_LEN} characters"
            )));
        }
        Ok(())
    }
}

/// Identity provider behind register/login.
pub trait AuthBackend {
    fn register(&self, registration: &Registration) -> Result<Session, FormError>;
    fn login(&self, credentials: &Credentials) -> Result<Session, FormError>;
    /// Resolves the user a stored token belongs to.
    fn current_user(&self, token: &str) -> Result<User, FormError>;
}
