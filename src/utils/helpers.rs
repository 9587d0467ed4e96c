//! Helper functions and utilities
//!
//! This module contains common helper functions used throughout the application.

use uuid::Uuid;

/// Values a checkbox or select field may submit to mean "yes"
const TRUTHY_VALUES: [&str; 6] = ["1", "true", "t", "yes", "y", "on"];

/// Generate a new request id
pub fn generate_request_id() -> String {
    Uuid::new_v4().to_string()
}

/// Normalize a submitted form value into a boolean.
///
/// Matching is case-insensitive and ignores surrounding whitespace. Anything
/// that is not a known truthy spelling, including an empty value, is `false`.
pub fn parse_bool(raw: &str) -> bool {
    let value = raw.trim().to_ascii_lowercase();
    TRUTHY_VALUES.contains(&value.as_str())
}

/// Render a boolean the way the edit form displays it
pub fn display_bool(value: bool) -> &'static str {
    if value {
        "True"
    } else {
        "False"
    }
}

/// Truncate text to a maximum number of characters with ellipsis
pub fn truncate_text(text: &str, max_length: usize) -> String {
    if text.chars().count() <= max_length {
        text.to_string()
    } else {
        let kept: String = text.chars().take(max_length.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}
