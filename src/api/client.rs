use std::time::Duration;

use reqwest::blocking::{Client, RequestBuilder};
use reqwest::header::{ACCEPT, AUTHORIZATION};
use serde::de::DeserializeOwned;
use tracing::{debug, info, warn};

use crate::error::FormError;
use crate::form::types::{Form, FormPayload};
use crate::session::{AuthBackend, Credentials, Registration, Session, User};
use crate::store::FormBackend;
use crate::submission::types::{Submission, SubmissionPayload};
use crate::util::text::join_url;

use super::settings::ClientSettings;
use super::types::{AuthBody, Empty, Envelope, ErrorBody, FormBody, FormsBody, SubmissionsBody, UserBody};

/// Blocking client for the form API.
pub struct ApiClient {
    http: Client,
    settings: ClientSettings,
}

impl ApiClient {
    pub fn new(settings: ClientSettings) -> Result<Self, FormError> {
        let http = Client::builder()
            .timeout(Duration::from_secs(settings.request_timeout_secs.max(1)))
            .user_agent(settings.user_agent.clone())
            .build()?;
        Ok(Self { http, settings })
    }

    pub fn settings(&self) -> &ClientSettings {
        &self.settings
    }

    fn url(&self, path: &str) -> String {
        join_url(&self.settings.api_base_url, path)
    }

    fn authed(&self, request: RequestBuilder, session: &Session) -> RequestBuilder {
        request.header(AUTHORIZATION, session.bearer())
    }

    fn send<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T, FormError> {
        let response = request.header(ACCEPT, "application/json").send()?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            let message = serde_json::from_str::<ErrorBody>(&body)
                .ok()
                .and_then(|b| b.message)
                .unwrap_or_else(|| status.canonical_reason().unwrap_or("Request failed").to_string());
            warn!(status = status.as_u16(), %message, "API request failed");
            return Err(FormError::Status {
                status: status.as_u16(),
                message,
            });
        }
        let envelope = response.json::<Envelope>()?;
        if !envelope.success {
            let message = envelope
                .message
                .unwrap_or_else(|| "Request was not successful".to_string());
            warn!(%message, "API reported failure");
            return Err(FormError::Api(message));
        }
        Ok(envelope.into_data()?)
    }
}

impl AuthBackend for ApiClient {
    fn register(&self, registration: &Registration) -> Result<Session, FormError> {
        let body: AuthBody = self.send(self.http.post(self.url("/auth/register")).json(registration))?;
        info!(user_id = %body.user.id, "registered");
        Ok(Session {
            token: body.token,
            user: body.user,
        })
    }

    fn login(&self, credentials: &Credentials) -> Result<Session, FormError> {
        let body: AuthBody = self.send(self.http.post(self.url("/auth/login")).json(credentials))?;
        info!(user_id = %body.user.id, "signed in");
        Ok(Session {
            token: body.token,
            user: body.user,
        })
    }

    fn current_user(&self, token: &str) -> Result<User, FormError> {
        let request = self
            .http
            .get(self.url("/auth/me"))
            .header(AUTHORIZATION, format!("Bearer {token}"));
        let body: UserBody = self.send(request)?;
        Ok(body.user)
    }
}

impl FormBackend for ApiClient {
    fn list_forms(&self, session: &Session) -> Result<Vec<Form>, FormError> {
        let body: FormsBody = self.send(self.authed(self.http.get(self.url("/forms")), session))?;
        debug!(count = body.forms.len(), "listed forms");
        Ok(body.forms)
    }

    fn create_form(&self, session: &Session, payload: &FormPayload) -> Result<Form, FormError> {
        let request = self.authed(self.http.post(self.url("/forms")), session).json(payload);
        let body: FormBody = self.send(request)?;
        info!(form_id = %body.form.id, "created form");
        Ok(body.form)
    }

    fn get_form(&self, session: &Session, form_id: &str) -> Result<Form, FormError> {
        let request = self.authed(self.http.get(self.url(&format!("/forms/{form_id}"))), session);
        let body: FormBody = self.send(request)?;
        Ok(body.form)
    }

    fn update_form(
        &self,
        session: &Session,
        form_id: &str,
        payload: &FormPayload,
    ) -> Result<(), FormError> {
        let request = self
            .authed(self.http.put(self.url(&format!("/forms/{form_id}"))), session)
            .json(payload);
        let _: Empty = self.send(request)?;
        info!(%form_id, fields = payload.fields.len(), "saved form");
        Ok(())
    }

    fn delete_form(&self, session: &Session, form_id: &str) -> Result<(), FormError> {
        let request = self.authed(self.http.delete(self.url(&format!("/forms/{form_id}"))), session);
        let _: Empty = self.send(request)?;
        info!(%form_id, "deleted form");
        Ok(())
    }

    fn get_public_form(&self, unique_url: &str) -> Result<Form, FormError> {
        let body: FormBody = self.send(self.http.get(self.url(&format!("/forms/public/{unique_url}"))))?;
        Ok(body.form)
    }

    fn submit(&self, form_id: &str, payload: &SubmissionPayload) -> Result<(), FormError> {
        let request = self
            .http
            .post(self.url(&format!("/submissions/{form_id}")))
            .json(payload);
        let _: Empty = self.send(request)?;
        info!(%form_id, answers = payload.responses.len(), "submitted responses");
        Ok(())
    }

    fn list_submissions(
        &self,
        session: &Session,
        form_id: &str,
    ) -> Result<Vec<Submission>, FormError> {
        let request = self.authed(
            self.http.get(self.url(&format!("/submissions/form/{form_id}"))),
            session,
        );
        let body: SubmissionsBody = self.send(request)?;
        Ok(body.submissions)
    }
}
