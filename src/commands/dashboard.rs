use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::warn;

use crate::api::settings::ClientSettings;
use crate::form::types::Form;
use crate::render::report::render_submissions_report;
use crate::session::Session;
use crate::store::FormBackend;
use crate::submission::types::Submission;
use crate::util::text::join_url;

use super::auth::require_session;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FormSummary {
    pub id: String,
    pub title: String,
    pub field_count: usize,
    pub created_at: Option<DateTime<Utc>>,
    pub share_url: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionsView {
    pub form_title: String,
    pub submissions: Vec<Submission>,
}

/// Public address respondents open to fill in a form.
pub fn share_link(settings: &ClientSettings, unique_url: &str) -> String {
    join_url(
        &settings.public_base_url,
        &format!("forms/public/{unique_url}"),
    )
}

fn summarize(settings: &ClientSettings, form: Form) -> FormSummary {
    FormSummary {
        share_url: share_link(settings, &form.unique_url),
        field_count: form.fields.len(),
        id: form.id,
        title: form.title,
        created_at: form.created_at,
    }
}

pub fn dashboard_list<B: FormBackend>(
    backend: &B,
    settings: &ClientSettings,
    session: Option<&Session>,
) -> Result<Vec<FormSummary>, String> {
    let session = require_session(session)?;
    let forms = backend
        .list_forms(session)
        .map_err(|e| {
            warn!(user_id = %session.user.id, error = %e, "listing forms failed");
            "Failed to fetch forms".to_string()
        })?;
    Ok(forms.into_iter().map(|f| summarize(settings, f)).collect())
}

pub fn dashboard_delete<B: FormBackend>(
    backend: &B,
    session: Option<&Session>,
    form_id: &str,
) -> Result<(), String> {
    let session = require_session(session)?;
    backend
        .delete_form(session, form_id)
        .map_err(|e| {
            warn!(%form_id, error = %e, "deleting form failed");
            "Failed to delete form".to_string()
        })
}

pub fn submissions_view<B: FormBackend>(
    backend: &B,
    session: Option<&Session>,
    form_id: &str,
) -> Result<SubmissionsView, String> {
    let session = require_session(session)?;
    let form = backend.get_form(session, form_id).map_err(|e| e.to_string())?;
    let submissions = backend
        .list_submissions(session, form_id)
        .map_err(|e| e.to_string())?;
    Ok(SubmissionsView {
        form_title: form.title,
        submissions,
    })
}

pub fn submissions_report<B: FormBackend>(
    backend: &B,
    session: Option<&Session>,
    form_id: &str,
) -> Result<String, String> {
    let view = submissions_view(backend, session, form_id)?;
    render_submissions_report(&view.form_title, &view.submissions).map_err(|e| e.to_string())
}
