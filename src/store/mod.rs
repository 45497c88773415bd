//! Persistence seam for forms and submissions.

pub mod sqlite;

use crate::error::FormError;
use crate::form::types::{Form, FormPayload};
use crate::session::Session;
use crate::submission::types::{Submission, SubmissionPayload};

pub use sqlite::SqliteBackend;

pub trait FormBackend {
    /// Forms owned by the signed-in user, newest first.
    fn list_forms(&self, session: &Session) -> Result<Vec<Form>, FormError>;
    fn create_form(&self, session: &Session, payload: &FormPayload) -> Result<Form, FormError>;
    fn get_form(&self, session: &Session, form_id: &str) -> Result<Form, FormError>;
    fn update_form(
        &self,
        session: &Session,
        form_id: &str,
        payload: &FormPayload,
    ) -> Result<(), FormError>;
    fn delete_form(&self, session: &Session, form_id: &str) -> Result<(), FormError>;
    /// Anonymous lookup through the share link.
    fn get_public_form(&self, unique_url: &str) -> Result<Form, FormError>;
    fn submit(&self, form_id: &str, payload: &SubmissionPayload) -> Result<(), FormError>;
    fn list_submissions(
        &self,
        session: &Session,
        form_id: &str,
    ) -> Result<Vec<Submission>, FormError>;
}
