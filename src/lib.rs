//! Non-visual core of the form builder.
//!
//! The host UI drives an [`form::editor::FieldEditor`] while a form is being
//! built, persists it through a [`store::FormBackend`] and collects public
//! answers with a [`submission::collect::ResponseDraft`].

pub mod api;
pub mod commands;
pub mod error;
pub mod form;
pub mod render;
pub mod session;
pub mod store;
pub mod submission;
pub mod util;

pub use error::FormError;
