use crate::error::FormError;

use super::editor::{FieldEditor, IdGenerator};

/// Checks run before a form is persisted.
pub fn validate_for_save<G: IdGenerator>(title: &str, editor: &FieldEditor<G>) -> Result<(), FormError> {
    if title.trim().is_empty() {
        return Err(FormError::Validation("Please enter a form title".to_string()));
    }
    if editor.is_empty() {
        return Err(FormError::Validation("Please add at least one field".to_string()));
    }
    Ok(())
}
