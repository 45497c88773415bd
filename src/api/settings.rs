use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::FormError;

/// Overrides `apiBaseUrl` when set and non-blank.
pub const API_URL_ENV: &str = "FORM_BUILDER_API_URL";

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ClientSettings {
    pub api_base_url: String,
    /// Origin the public form pages are served from; share links hang off it.
    pub public_base_url: String,
    pub request_timeout_secs: u64,
    pub user_agent: String,
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self {
            api_base_url: "http://localhost:5000/api".to_string(),
            public_base_url: "http://localhost:3000".to_string(),
            request_timeout_secs: 30,
            user_agent: "form-builder/0.1".to_string(),
        }
    }
}

impl ClientSettings {
    pub fn with_api_url_override(mut self, value: Option<String>) -> Self {
        if let Some(url) = value.filter(|v| !v.trim().is_empty()) {
            self.api_base_url = url.trim().to_string();
        }
        self
    }
}

pub fn settings_path(root: &Path) -> PathBuf {
    root.join("settings").join("client.json")
}

/// Reads the settings file, writing the defaults first if it is missing or blank.
pub fn load_settings(path: &Path) -> Result<ClientSettings, FormError> {
    let settings = if !path.exists() {
        let defaults = ClientSettings::default();
        save_settings(path, &defaults)?;
        defaults
    } else {
        let raw = fs::read_to_string(path)?;
        if raw.trim().is_empty() {
            let defaults = ClientSettings::default();
            save_settings(path, &defaults)?;
            defaults
        } else {
            serde_json::from_str(&raw)?
        }
    };
    Ok(settings.with_api_url_override(std::env::var(API_URL_ENV).ok()))
}

pub fn save_settings(path: &Path, settings: &ClientSettings) -> Result<(), FormError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let payload = serde_json::to_string_pretty(settings)?;
    fs::write(path, payload)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_load_writes_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = settings_path(dir.path());
        let loaded = load_settings(&path).unwrap();
        assert!(path.exists());
        assert_eq!(loaded.request_timeout_secs, 30);

        let mut changed = loaded.clone();
        changed.public_base_url = "https://forms.example.com".to_string();
        save_settings(&path, &changed).unwrap();
        let reread = load_settings(&path).unwrap();
        assert_eq!(reread.public_base_url, "https://forms.example.com");
    }

    #[test]
    fn blank_file_falls_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("client.json");
        fs::write(&path, "  \n").unwrap();
        let loaded = load_settings(&path).unwrap();
        assert_eq!(loaded.public_base_url, ClientSettings::default().public_base_url);
    }

    #[test]
    fn env_override_ignores_blank() {
        let base = ClientSettings::default();
        let kept = base.clone().with_api_url_override(Some("  ".to_string()));
        assert_eq!(kept.api_base_url, base.api_base_url);
        let swapped = base.with_api_url_override(Some("https://api.example.com".to_string()));
        assert_eq!(swapped.api_base_url, "https://api.example.com");
    }
}
