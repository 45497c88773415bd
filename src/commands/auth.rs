use tracing::warn;

use crate::error::FormError;
use crate::session::{AuthBackend, Credentials, Registration, Session};

/// Commands that need a signed-in user call this first.
pub fn require_session(session: Option<&Session>) -> Result<&Session, String> {
    session.ok_or_else(|| FormError::Unauthorized.to_string())
}

pub fn register<A: AuthBackend>(
    auth: &A,
    name: String,
    email: String,
    password: String,
) -> Result<Session, String> {
    let registration = Registration {
        name: name.trim().to_string(),
        email: email.trim().to_string(),
        password,
    };
    registration.validate().map_err(|e| e.to_string())?;
    auth.register(&registration).map_err(|e| e.to_string())
}

pub fn login<A: AuthBackend>(auth: &A, email: String, password: String) -> Result<Session, String> {
    let credentials = Credentials {
        email: email.trim().to_string(),
        password,
    };
    auth.login(&credentials).map_err(|e| e.to_string())
}

/// Turns a stored token back into a session; a rejected token yields `None`.
pub fn restore_session<A: AuthBackend>(auth: &A, token: Option<String>) -> Option<Session> {
    let token = token.filter(|t| !t.trim().is_empty())?;
    match auth.current_user(&token) {
        Ok(user) => Some(Session { token, user }),
        Err(err) => {
            warn!(error = %err, "stored session rejected");
            None
        }
    }
}

pub fn logout(session: &mut Option<Session>) {
    session.take();
}
