//! Entry points the host UI calls. Errors cross this boundary as plain strings.

pub mod auth;
pub mod builder;
pub mod dashboard;
pub mod public;
