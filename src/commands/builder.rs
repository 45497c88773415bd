use serde::Serialize;
use tracing::info;

use crate::form::editor::FieldEditor;
use crate::form::reorder::{DragEnd, KeyboardStep};
use crate::form::types::{FieldDefinition, FieldPatch, FieldType, FormPayload};
use crate::form::validate::validate_for_save;
use crate::session::Session;
use crate::store::FormBackend;

use super::auth::require_session;

/// Form being edited: `form_id` is `None` until the first save.
#[derive(Debug, Clone, Default)]
pub struct BuilderState {
    pub form_id: Option<String>,
    pub title: String,
    pub editor: FieldEditor,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaletteEntry {
    #[serde(rename = "type")]
    pub field_type: FieldType,
    pub label: &'static str,
}

pub fn field_palette() -> Vec<PaletteEntry> {
    FieldType::ALL
        .iter()
        .map(|t| PaletteEntry {
            field_type: *t,
            label: t.display_name(),
        })
        .collect()
}

pub fn builder_new() -> BuilderState {
    BuilderState::default()
}

pub fn builder_open<B: FormBackend>(
    backend: &B,
    session: Option<&Session>,
    form_id: &str,
) -> Result<BuilderState, String> {
    let session = require_session(session)?;
    let form = backend.get_form(session, form_id).map_err(|e| e.to_string())?;
    let editor = FieldEditor::hydrate(form.fields).map_err(|e| e.to_string())?;
    Ok(BuilderState {
        form_id: Some(form.id),
        title: form.title,
        editor,
    })
}

pub fn builder_set_title(state: &mut BuilderState, title: String) {
    state.title = title;
}

pub fn builder_add_field(state: &mut BuilderState, field_type: &str) -> Result<FieldDefinition, String> {
    let field_type = field_type.parse::<FieldType>()?;
    state
        .editor
        .append(field_type)
        .cloned()
        .map_err(|e| e.to_string())
}

pub fn builder_update_field(state: &mut BuilderState, field_id: &str, patch: FieldPatch) -> Result<(), String> {
    state.editor.update(field_id, patch).map_err(|e| e.to_string())
}

pub fn builder_remove_field(state: &mut BuilderState, field_id: &str) -> Result<(), String> {
    state
        .editor
        .remove(field_id)
        .map(|_| ())
        .map_err(|e| e.to_string())
}

pub fn builder_drop(state: &mut BuilderState, event: &DragEnd) -> Result<bool, String> {
    state.editor.apply_gesture(event).map_err(|e| e.to_string())
}

pub fn builder_keyboard_step(state: &mut BuilderState, step: &KeyboardStep) -> Result<bool, String> {
    state.editor.apply_gesture(step).map_err(|e| e.to_string())
}

pub fn builder_set_option(
    state: &mut BuilderState,
    field_id: &str,
    index: usize,
    value: String,
) -> Result<(), String> {
    state
        .editor
        .set_option(field_id, index, value)
        .map_err(|e| e.to_string())
}

pub fn builder_add_option(state: &mut BuilderState, field_id: &str) -> Result<String, String> {
    state.editor.add_option(field_id).map_err(|e| e.to_string())
}

pub fn builder_remove_option(state: &mut BuilderState, field_id: &str, index: usize) -> Result<(), String> {
    state
        .editor
        .remove_option(field_id, index)
        .map(|_| ())
        .map_err(|e| e.to_string())
}

/// Validates and persists; creates the form on first save. Returns its id.
pub fn builder_save<B: FormBackend>(
    backend: &B,
    session: Option<&Session>,
    state: &mut BuilderState,
) -> Result<String, String> {
    let session = require_session(session)?;
    validate_for_save(&state.title, &state.editor).map_err(|e| e.to_string())?;

    let payload = FormPayload {
        title: state.title.trim().to_string(),
        fields: state.editor.serialize(),
    };
    let form_id = if let Some(id) = state.form_id.clone() {
        backend
            .update_form(session, &id, &payload)
            .map_err(|e| e.to_string())?;
        id
    } else {
        let form = backend
            .create_form(session, &payload)
            .map_err(|e| e.to_string())?;
        state.form_id = Some(form.id.clone());
        form.id
    };
    info!(%form_id, fields = payload.fields.len(), "form saved");
    Ok(form_id)
}
