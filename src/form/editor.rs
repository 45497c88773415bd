use std::collections::HashSet;

use thiserror::Error;
use tracing::debug;
use uuid::Uuid;

use super::reorder::ReorderGesture;
use super::types::{default_options, option_label, FieldDefinition, FieldPatch, FieldType, OrderedField};

/// Consecutive colliding ids tolerated before `append` gives up.
const MAX_ID_ATTEMPTS: usize = 16;

/// Source of fresh field identifiers.
pub trait IdGenerator {
    fn next_id(&mut self) -> String;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct UuidIds;

impl IdGenerator for UuidIds {
    fn next_id(&mut self) -> String {
        Uuid::new_v4().simple().to_string()
    }
}

impl<F> IdGenerator for F
where
    F: FnMut() -> String,
{
    fn next_id(&mut self) -> String {
        self()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EditorError {
    #[error("Field '{0}' not found.")]
    NotFound(String),
    #[error("Option index {index} is out of range for field '{field_id}' ({len} options).")]
    InvalidOptionIndex {
        field_id: String,
        index: usize,
        len: usize,
    },
    #[error("Field '{0}' does not take options.")]
    NotChoiceField(String),
    #[error("Duplicate field id '{0}'.")]
    DuplicateFieldId(String),
    #[error("Id generator produced {0} colliding ids in a row.")]
    IdCollision(usize),
}

/// Ordered, mutable list of field definitions behind the form builder.
///
/// Position in the list is the only order there is; `order` stamps exist
/// only in the output of [`FieldEditor::serialize`]. Every id the editor has
/// held is remembered, so removed ids are never handed out again.
#[derive(Debug, Clone)]
pub struct FieldEditor<G = UuidIds> {
    fields: Vec<FieldDefinition>,
    known_ids: HashSet<String>,
    ids: G,
}

impl FieldEditor<UuidIds> {
    pub fn new() -> Self {
        Self::with_generator(UuidIds)
    }

    pub fn hydrate(fields: Vec<OrderedField>) -> Result<Self, EditorError> {
        Self::hydrate_with(fields, UuidIds)
    }
}

impl Default for FieldEditor<UuidIds> {
    fn default() -> Self {
        Self::new()
    }
}

impl<G: IdGenerator> FieldEditor<G> {
    pub fn with_generator(ids: G) -> Self {
        Self {
            fields: Vec::new(),
            known_ids: HashSet::new(),
            ids,
        }
    }

    /// Rebuilds the list from a persisted form, honouring its order stamps.
    pub fn hydrate_with(mut stamped: Vec<OrderedField>, ids: G) -> Result<Self, EditorError> {
        stamped.sort_by_key(|f| f.order);
        let mut editor = Self::with_generator(ids);
        for OrderedField { mut field, .. } in stamped {
            if !editor.known_ids.insert(field.id.clone()) {
                return Err(EditorError::DuplicateFieldId(field.id));
            }
            if !field.field_type.is_choice() {
                field.options.clear();
            }
            editor.fields.push(field);
        }
        debug!(count = editor.fields.len(), "hydrated field list");
        Ok(editor)
    }

    pub fn fields(&self) -> &[FieldDefinition] {
        &self.fields
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&FieldDefinition> {
        self.fields.iter().find(|f| f.id == id)
    }

    pub fn position(&self, id: &str) -> Option<usize> {
        self.fields.iter().position(|f| f.id == id)
    }

    pub fn append(&mut self, field_type: FieldType) -> Result<&FieldDefinition, EditorError> {
        let id = self.fresh_id()?;
        debug!(%id, %field_type, "append field");
        self.fields.push(FieldDefinition::new(id, field_type));
        let index = self.fields.len() - 1;
        Ok(&self.fields[index])
    }

    pub fn update(&mut self, id: &str, patch: FieldPatch) -> Result<(), EditorError> {
        let field = self.field_mut(id)?;
        if let Some(field_type) = patch.field_type {
            field.field_type = field_type;
            if !field_type.is_choice() {
                field.options.clear();
            } else if field.options.is_empty() {
                field.options = default_options();
            }
        }
        if let Some(label) = patch.label {
            field.label = label;
        }
        if let Some(required) = patch.required {
            field.required = required;
        }
        if let Some(options) = patch.options {
            if field.field_type.is_choice() {
                field.options = options;
            }
        }
        debug!(%id, "update field");
        Ok(())
    }

    pub fn remove(&mut self, id: &str) -> Result<FieldDefinition, EditorError> {
        let index = self
            .position(id)
            .ok_or_else(|| EditorError::NotFound(id.to_string()))?;
        debug!(%id, index, "remove field");
        Ok(self.fields.remove(index))
    }

    /// Relocates a field, shifting the ones in between by one slot.
    ///
    /// Targets past the end land on the last slot. Returns `false` when the
    /// field already sits at the target.
    pub fn move_field(&mut self, id: &str, target_index: usize) -> Result<bool, EditorError> {
        let from = self
            .position(id)
            .ok_or_else(|| EditorError::NotFound(id.to_string()))?;
        let to = target_index.min(self.fields.len() - 1);
        if from == to {
            return Ok(false);
        }
        let field = self.fields.remove(from);
        self.fields.insert(to, field);
        debug!(%id, from, to, "move field");
        Ok(true)
    }

    pub fn apply_gesture<R>(&mut self, gesture: &R) -> Result<bool, EditorError>
    where
        R: ReorderGesture + ?Sized,
    {
        match gesture.resolve(&self.fields) {
            Some(request) => self.move_field(&request.id, request.target_index),
            None => Ok(false),
        }
    }

    pub fn set_option(
        &mut self,
        field_id: &str,
        index: usize,
        value: impl Into<String>,
    ) -> Result<(), EditorError> {
        let field = self.choice_field_mut(field_id)?;
        let len = field.options.len();
        let slot = field
            .options
            .get_mut(index)
            .ok_or_else(|| EditorError::InvalidOptionIndex {
                field_id: field_id.to_string(),
                index,
                len,
            })?;
        *slot = value.into();
        Ok(())
    }

    /// Appends "Option N", N being the new option count, and returns that label.
    pub fn add_option(&mut self, field_id: &str) -> Result<String, EditorError> {
        let field = self.choice_field_mut(field_id)?;
        let label = option_label(field.options.len() + 1);
        field.options.push(label.clone());
        Ok(label)
    }

    pub fn remove_option(&mut self, field_id: &str, index: usize) -> Result<String, EditorError> {
        let field = self.choice_field_mut(field_id)?;
        if index >= field.options.len() {
            return Err(EditorError::InvalidOptionIndex {
                field_id: field_id.to_string(),
                index,
                len: field.options.len(),
            });
        }
        Ok(field.options.remove(index))
    }

    /// Persistence view: every field stamped with its current index.
    pub fn serialize(&self) -> Vec<OrderedField> {
        self.fields
            .iter()
            .enumerate()
            .map(|(order, field)| OrderedField {
                field: field.clone(),
                order,
            })
            .collect()
    }

    fn fresh_id(&mut self) -> Result<String, EditorError> {
        for _ in 0..MAX_ID_ATTEMPTS {
            let id = self.ids.next_id();
            if self.known_ids.insert(id.clone()) {
                return Ok(id);
            }
        }
        Err(EditorError::IdCollision(MAX_ID_ATTEMPTS))
    }

    fn field_mut(&mut self, id: &str) -> Result<&mut FieldDefinition, EditorError> {
        self.fields
            .iter_mut()
            .find(|f| f.id == id)
            .ok_or_else(|| EditorError::NotFound(id.to_string()))
    }

    fn choice_field_mut(&mut self, id: &str) -> Result<&mut FieldDefinition, EditorError> {
        let field = self.field_mut(id)?;
        if !field.field_type.is_choice() {
            return Err(EditorError::NotChoiceField(id.to_string()));
        }
        Ok(field)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::form::reorder::DragEnd;
    use crate::form::types::DEFAULT_LABEL;

    fn sequential() -> impl FnMut() -> String {
        let mut n = 0;
        move || {
            n += 1;
            format!("f{n}")
        }
    }

    fn ids<G: IdGenerator>(editor: &FieldEditor<G>) -> Vec<String> {
        editor.fields().iter().map(|f| f.id.clone()).collect()
    }

    #[test]
    fn builds_reorders_and_serializes() {
        let mut editor = FieldEditor::with_generator(sequential());
        let first = editor.append(FieldType::ShortText).unwrap().clone();
        assert_eq!(first.label, DEFAULT_LABEL);
        assert!(!first.required);
        assert!(first.options.is_empty());

        let second = editor.append(FieldType::Dropdown).unwrap().clone();
        assert_eq!(second.options, vec!["Option 1", "Option 2"]);

        assert!(editor.move_field(&first.id, 1).unwrap());
        assert_eq!(ids(&editor), vec![second.id.clone(), first.id.clone()]);

        let out = editor.serialize();
        assert_eq!(out[0].field.id, second.id);
        assert_eq!(out[0].order, 0);
        assert_eq!(out[1].field.id, first.id);
        assert_eq!(out[1].order, 1);
    }

    #[test]
    fn add_option_numbers_by_new_length() {
        let mut editor = FieldEditor::with_generator(sequential());
        let id = editor.append(FieldType::CheckboxGroup).unwrap().id.clone();
        for _ in 0..3 {
            editor.add_option(&id).unwrap();
        }
        let options = &editor.get(&id).unwrap().options;
        assert_eq!(options.len(), 5);
        assert_eq!(options.last().unwrap(), "Option 5");
    }

    #[test]
    fn unknown_ids_leave_list_untouched() {
        let mut editor = FieldEditor::with_generator(sequential());
        editor.append(FieldType::Date).unwrap();
        let before = editor.fields().to_vec();

        assert_eq!(
            editor.remove("missing").unwrap_err(),
            EditorError::NotFound("missing".to_string())
        );
        assert!(editor.update("missing", FieldPatch::label("x")).is_err());
        assert!(editor.move_field("missing", 0).is_err());
        assert_eq!(editor.fields(), before.as_slice());
    }

    #[test]
    fn option_edits_reject_non_choice_fields() {
        let mut editor = FieldEditor::with_generator(sequential());
        let id = editor.append(FieldType::LongText).unwrap().id.clone();
        let before = editor.fields().to_vec();

        assert_eq!(
            editor.add_option(&id).unwrap_err(),
            EditorError::NotChoiceField(id.clone())
        );
        assert!(editor.set_option(&id, 0, "x").is_err());
        assert!(editor.remove_option(&id, 0).is_err());
        assert_eq!(editor.fields(), before.as_slice());
    }

    #[test]
    fn option_index_is_checked() {
        let mut editor = FieldEditor::with_generator(sequential());
        let id = editor.append(FieldType::MultipleChoice).unwrap().id.clone();

        editor.set_option(&id, 1, "Blue").unwrap();
        assert!(matches!(
            editor.set_option(&id, 2, "Green"),
            Err(EditorError::InvalidOptionIndex { index: 2, len: 2, .. })
        ));
        assert_eq!(editor.remove_option(&id, 0).unwrap(), "Option 1");
        assert_eq!(editor.get(&id).unwrap().options, vec!["Blue"]);
        assert!(editor.remove_option(&id, 1).is_err());
    }

    #[test]
    fn type_change_seeds_or_clears_options() {
        let mut editor = FieldEditor::with_generator(sequential());
        let id = editor.append(FieldType::ShortText).unwrap().id.clone();

        editor
            .update(
                &id,
                FieldPatch {
                    field_type: Some(FieldType::MultipleChoice),
                    ..FieldPatch::default()
                },
            )
            .unwrap();
        assert_eq!(editor.get(&id).unwrap().options.len(), 2);

        editor
            .update(
                &id,
                FieldPatch {
                    field_type: Some(FieldType::Date),
                    options: Some(vec!["ignored".to_string()]),
                    ..FieldPatch::default()
                },
            )
            .unwrap();
        assert!(editor.get(&id).unwrap().options.is_empty());
    }

    #[test]
    fn update_touches_only_target() {
        let mut editor = FieldEditor::with_generator(sequential());
        let a = editor.append(FieldType::ShortText).unwrap().id.clone();
        let b = editor.append(FieldType::ShortText).unwrap().id.clone();

        editor.update(&b, FieldPatch::required(true)).unwrap();
        editor.update(&b, FieldPatch::label("Email")).unwrap();

        assert_eq!(ids(&editor), vec![a.clone(), b.clone()]);
        assert!(!editor.get(&a).unwrap().required);
        assert_eq!(editor.get(&a).unwrap().label, DEFAULT_LABEL);
        assert!(editor.get(&b).unwrap().required);
        assert_eq!(editor.get(&b).unwrap().label, "Email");
    }

    #[test]
    fn removed_ids_are_never_reissued() {
        let mut repeat = vec!["x".to_string(), "x".to_string(), "y".to_string()];
        repeat.reverse();
        let mut editor = FieldEditor::with_generator(move || repeat.pop().unwrap_or_default());

        let x = editor.append(FieldType::Date).unwrap().id.clone();
        editor.remove(&x).unwrap();
        let next = editor.append(FieldType::Date).unwrap().id.clone();
        assert_eq!(next, "y");
    }

    #[test]
    fn stuck_generator_is_reported() {
        let mut editor = FieldEditor::with_generator(|| "same".to_string());
        editor.append(FieldType::Date).unwrap();
        assert_eq!(
            editor.append(FieldType::Date).unwrap_err(),
            EditorError::IdCollision(MAX_ID_ATTEMPTS)
        );
        assert_eq!(editor.len(), 1);
    }

    #[test]
    fn move_clamps_and_reports_noop() {
        let mut editor = FieldEditor::with_generator(sequential());
        for _ in 0..3 {
            editor.append(FieldType::ShortText).unwrap();
        }
        assert!(!editor.move_field("f2", 1).unwrap());
        assert!(editor.move_field("f1", 99).unwrap());
        assert_eq!(ids(&editor), vec!["f2", "f3", "f1"]);
    }

    #[test]
    fn drag_end_moves_onto_target_slot() {
        let mut editor = FieldEditor::with_generator(sequential());
        for _ in 0..4 {
            editor.append(FieldType::ShortText).unwrap();
        }
        let drop = DragEnd::new("f4", Some("f2"));
        assert!(editor.apply_gesture(&drop).unwrap());
        assert_eq!(ids(&editor), vec!["f1", "f4", "f2", "f3"]);

        assert!(!editor.apply_gesture(&DragEnd::new("f1", None)).unwrap());
        assert!(!editor.apply_gesture(&DragEnd::new("f1", Some("f1"))).unwrap());
    }

    #[test]
    fn hydrate_sorts_and_normalizes() {
        let raw = r#"[
            {"id": "b", "type": "text", "label": "B", "options": ["Option 1", "Option 2"], "order": 1},
            {"id": "a", "type": "radio", "label": "A", "options": ["Yes", "No"], "order": 0}
        ]"#;
        let stamped: Vec<OrderedField> = serde_json::from_str(raw).unwrap();
        let editor = FieldEditor::hydrate(stamped).unwrap();
        assert_eq!(ids(&editor), vec!["a", "b"]);
        assert!(editor.get("b").unwrap().options.is_empty());
        assert_eq!(editor.get("a").unwrap().options, vec!["Yes", "No"]);
    }

    #[test]
    fn hydrate_rejects_duplicates() {
        let field = FieldDefinition::new("dup".to_string(), FieldType::Date);
        let stamped = vec![
            OrderedField { field: field.clone(), order: 0 },
            OrderedField { field, order: 1 },
        ];
        assert_eq!(
            FieldEditor::hydrate(stamped).unwrap_err(),
            EditorError::DuplicateFieldId("dup".to_string())
        );
    }
}
