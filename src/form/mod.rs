pub mod editor;
pub mod reorder;
pub mod types;
pub mod validate;

pub use editor::{EditorError, FieldEditor, IdGenerator, UuidIds};
pub use reorder::{Direction, DragEnd, KeyboardStep, MoveRequest, ReorderGesture};
pub use types::{FieldDefinition, FieldPatch, FieldType, Form, FormPayload, OrderedField};
