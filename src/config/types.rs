use serde::{
    Deserialize,
    Serialize,
};
use thiserror::Error;

use crate::dates;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Configuration error in '{field_path}': {message}")]
pub struct ValidationError {
    /// JSON path to the field (e.g., "dates.timeZone")
    pub field_path: String,
    /// What is wrong and how to fix it
    pub message: String,
}

impl ValidationError {
    #[must_use]
    pub fn new(field_path: impl Into<String>, message: impl Into<String>) -> Self {
        Self { field_path: field_path.into(), message: message.into() }
    }
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Configuration validation failed:\n{}", format_validation_errors(.0))]
    ValidationErrors(Vec<ValidationError>),

    #[error("Failed to load configuration file: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Failed to parse configuration: {0}")]
    ParseError(#[from] serde_json::Error),
}

/// Numbered list, one error per line.
fn format_validation_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .enumerate()
        .map(|(i, err)| format!("  {}. {} - {}", i + 1, err.field_path, err.message))
        .collect::<Vec<_>>()
        .join("\n")
}

#[derive(Debug, Clone, PartialEq, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Settings {
    pub dates: DateSettings,
    pub similarity: SimilaritySettings,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DateSettings {
    /// strftime-style pattern used to render and parse dates.
    pub format: String,

    /// Fixed UTC offset such as `+01:00`, or `Z`.
    /// If unset, dates are rendered in the local time zone.
    pub time_zone: Option<String>,
}

impl Default for DateSettings {
    fn default() -> Self {
        Self { format: dates::FORMAT_DATE_ISO.to_string(), time_zone: None }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SimilaritySettings {
    /// Minimum score (inclusive) for two strings to be considered similar.
    pub threshold: f64,
}

impl Default for SimilaritySettings {
    fn default() -> Self {
        Self { threshold: 0.5 }
    }
}

impl Settings {
    /// # Errors
    /// - Empty or invalid date format
    /// - Unparseable time zone
    /// - Similarity threshold outside `[0, 1]`
    pub fn validate(&self) -> Result<(), Vec<ValidationError>> {
        let mut errors = Vec::new();

        if self.dates.format.is_empty() {
            errors.push(ValidationError::new(
                "dates.format",
                "The format cannot be empty. Example: \"%Y-%m-%dT%H:%M:%S%z\"",
            ));
        } else if let Err(e) = dates::validate_format(&self.dates.format) {
            errors.push(ValidationError::new("dates.format", e.to_string()));
        }

        if let Some(zone) = &self.dates.time_zone
            && let Err(e) = dates::parse_time_zone(zone)
        {
            errors.push(ValidationError::new(
                "dates.timeZone",
                format!("{e}. Use an offset such as \"+01:00\", or remove this field"),
            ));
        }

        if !(0.0..=1.0).contains(&self.similarity.threshold) {
            errors.push(ValidationError::new(
                "similarity.threshold",
                format!(
                    "The threshold must be between 0 and 1, got {}",
                    self.similarity.threshold
                ),
            ));
        }

        if errors.is_empty() { Ok(()) } else { Err(errors) }
    }
}
