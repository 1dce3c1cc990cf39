//! Holds the current settings and swaps them after validation

use std::path::{
    Path,
    PathBuf,
};

use super::{
    ConfigError,
    Settings,
    loader,
};
use crate::dates::{
    DateError,
    DateFormatter,
};
use crate::similarity::StringMatcher;

/// Keeps validated settings
#[derive(Default, Debug, Clone)]
pub struct ConfigManager {
    current_settings: Settings,

    /// Workspace the settings were loaded from
    workspace_root: Option<PathBuf>,
}

impl ConfigManager {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads the settings file of a workspace
    ///
    /// Defaults are used when `workspace_root` is `None` or has no settings file.
    /// Settings that fail validation leave the current ones untouched.
    ///
    /// # Errors
    /// - File read error
    /// - JSON parse error
    /// - Validation errors
    pub fn load_settings(&mut self, workspace_root: Option<PathBuf>) -> Result<(), ConfigError> {
        tracing::debug!(?workspace_root, "Loading settings");

        let settings = match &workspace_root {
            Some(root) => loader::load_from_workspace(root)?.unwrap_or_default(),
            None => Settings::default(),
        };

        settings.validate().map_err(ConfigError::ValidationErrors)?;

        self.current_settings = settings;
        self.workspace_root = workspace_root;
        tracing::debug!(settings = ?self.current_settings, "Settings loaded");

        Ok(())
    }

    /// Replaces the current settings
    ///
    /// # Errors
    /// Validation errors; the current settings are kept
    pub fn update_settings(&mut self, new_settings: Settings) -> Result<(), ConfigError> {
        new_settings.validate().map_err(ConfigError::ValidationErrors)?;

        self.current_settings = new_settings;
        tracing::debug!(settings = ?self.current_settings, "Settings updated");

        Ok(())
    }

    #[must_use]
    pub const fn get_settings(&self) -> &Settings {
        &self.current_settings
    }

    #[must_use]
    pub fn workspace_root(&self) -> Option<&Path> {
        self.workspace_root.as_deref()
    }

    /// Builds a `DateFormatter` from the current date settings
    ///
    /// # Errors
    /// Invalid date settings, which validated settings never are
    pub fn date_formatter(&self) -> Result<DateFormatter, DateError> {
        DateFormatter::from_settings(&self.current_settings.dates)
    }

    /// Builds a `StringMatcher` from the current similarity settings
    #[must_use]
    pub fn string_matcher(&self) -> StringMatcher {
        StringMatcher::from_settings(&self.current_settings.similarity)
    }
}
