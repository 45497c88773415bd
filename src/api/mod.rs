pub mod client;
pub mod settings;
pub mod types;

pub use client::ApiClient;
pub use settings::{load_settings, save_settings, settings_path, ClientSettings};
