//! Translation of reorder gestures into discrete moves.
//!
//! Gesture recognition itself lives in the host UI. Whatever it recognises
//! ends up here as a value that can be resolved against the current list.

use serde::{Deserialize, Serialize};

use super::types::FieldDefinition;

/// A resolved move: put field `id` at `target_index`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MoveRequest {
    pub id: String,
    pub target_index: usize,
}

pub trait ReorderGesture {
    /// `None` means the gesture does not reorder anything.
    fn resolve(&self, fields: &[FieldDefinition]) -> Option<MoveRequest>;
}

impl ReorderGesture for MoveRequest {
    fn resolve(&self, _fields: &[FieldDefinition]) -> Option<MoveRequest> {
        Some(self.clone())
    }
}

/// Pointer drop: `active` was released over `over`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DragEnd {
    pub active: String,
    #[serde(default)]
    pub over: Option<String>,
}

impl DragEnd {
    pub fn new(active: impl Into<String>, over: Option<&str>) -> Self {
        Self {
            active: active.into(),
            over: over.map(str::to_string),
        }
    }
}

impl ReorderGesture for DragEnd {
    fn resolve(&self, fields: &[FieldDefinition]) -> Option<MoveRequest> {
        let over = self.over.as_deref()?;
        if over == self.active {
            return None;
        }
        let target_index = fields.iter().position(|f| f.id == over)?;
        Some(MoveRequest {
            id: self.active.clone(),
            target_index,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Up,
    Down,
}

/// Keyboard sensor: nudge one slot up or down.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KeyboardStep {
    pub id: String,
    pub direction: Direction,
}

impl ReorderGesture for KeyboardStep {
    fn resolve(&self, fields: &[FieldDefinition]) -> Option<MoveRequest> {
        let from = fields.iter().position(|f| f.id == self.id)?;
        let target_index = match self.direction {
            Direction::Up => from.checked_sub(1)?,
            Direction::Down if from + 1 < fields.len() => from + 1,
            Direction::Down => return None,
        };
        Some(MoveRequest {
            id: self.id.clone(),
            target_index,
        })
    }
}
