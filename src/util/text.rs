use regex::Regex;

use crate::error::FormError;

/// Collapses whitespace and caps very long labels for listings.
pub fn clean_label(text: &str) -> String {
    let compact = text.split_whitespace().collect::<Vec<&str>>().join(" ");
    if compact.chars().count() > 200 {
        let head = compact.chars().take(197).collect::<String>();
        format!("{head}...")
    } else {
        compact
    }
}

/// Joins a base URL and a path without doubling or dropping the slash.
pub fn join_url(base: &str, path: &str) -> String {
    format!(
        "{}/{}",
        base.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}

pub fn looks_like_email(value: &str) -> Result<bool, FormError> {
    let re = Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$")
        .map_err(|e| FormError::Validation(format!("Email pattern failed to compile: {e}")))?;
    Ok(re.is_match(value.trim()))
}
