use tracing::warn;

use crate::form::types::{FieldDefinition, Form};
use crate::store::FormBackend;
use crate::submission::collect::ResponseDraft;
use crate::submission::types::ResponseValue;

/// A respondent filling in a shared form.
#[derive(Debug, Clone)]
pub struct PublicFormState {
    pub form: Form,
    pub fields: Vec<FieldDefinition>,
    pub draft: ResponseDraft,
    pub submitted: bool,
}

pub fn public_open<B: FormBackend>(backend: &B, unique_url: &str) -> Result<PublicFormState, String> {
    let form = backend.get_public_form(unique_url).map_err(|e| e.to_string())?;
    let fields = form.ordered_fields();
    Ok(PublicFormState {
        form,
        fields,
        draft: ResponseDraft::new(),
        submitted: false,
    })
}

pub fn public_answer(state: &mut PublicFormState, field_id: &str, value: String) {
    state.draft.set_value(field_id, value);
}

pub fn public_toggle(state: &mut PublicFormState, field_id: &str, option: &str, checked: bool) {
    state.draft.toggle_option(field_id, option, checked);
}

pub fn public_value<'a>(state: &'a PublicFormState, field_id: &str) -> Option<&'a ResponseValue> {
    state.draft.value(field_id)
}

/// Checks required answers, hands the responses over and clears the draft.
pub fn public_submit<B: FormBackend>(backend: &B, state: &mut PublicFormState) -> Result<(), String> {
    state.draft.validate(&state.fields).map_err(|e| e.to_string())?;
    let payload = state.draft.to_payload(&state.fields);
    backend.submit(&state.form.id, &payload).map_err(|e| {
        warn!(form_id = %state.form.id, error = %e, "submission failed");
        e.to_string()
    })?;
    state.draft.clear();
    state.submitted = true;
    Ok(())
}

/// Back to an empty form after a successful submit.
pub fn public_reset(state: &mut PublicFormState) {
    state.draft.clear();
    state.submitted = false;
}
