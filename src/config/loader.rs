//! Loading settings from a workspace

use std::path::Path;

use super::{
    ConfigError,
    Settings,
};

/// Settings file expected at the workspace root
pub const CONFIG_FILE_NAME: &str = ".termkit.json";

/// Reads the settings file of a workspace
///
/// # Returns
/// - `Ok(Some(settings))`: the file was found and parsed
/// - `Ok(None)`: there is no settings file
///
/// # Errors
/// - File read error
/// - JSON parse error
pub(super) fn load_from_workspace(workspace_root: &Path) -> Result<Option<Settings>, ConfigError> {
    let config_path = workspace_root.join(CONFIG_FILE_NAME);

    if !config_path.is_file() {
        tracing::debug!(path = %config_path.display(), "Configuration file not found");
        return Ok(None);
    }

    tracing::debug!(path = %config_path.display(), "Loading configuration");

    let content = std::fs::read_to_string(&config_path)?;
    let settings = serde_json::from_str(&content)?;

    Ok(Some(settings))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::fs;

    use googletest::prelude::*;
    use rstest::*;
    use tempfile::TempDir;

    use super::*;
    use crate::config::DateSettings;

    #[fixture]
    fn workspace() -> TempDir {
        TempDir::new().unwrap()
    }

    /// An existing file is parsed
    #[rstest]
    fn load_existing_config(workspace: TempDir) {
        let content = r#"{"similarity": {"threshold": 0.8}}"#;
        fs::write(workspace.path().join(CONFIG_FILE_NAME), content).unwrap();

        let settings = load_from_workspace(workspace.path()).unwrap().unwrap();

        assert_that!(settings.similarity.threshold, eq(0.8));
        assert_eq!(settings.dates, DateSettings::default());
    }

    /// No file gives None
    #[rstest]
    fn load_missing_config(workspace: TempDir) {
        let result = load_from_workspace(workspace.path()).unwrap();

        assert_that!(result, none());
    }

    /// A directory with the file's name is not a settings file
    #[rstest]
    fn load_ignores_directory(workspace: TempDir) {
        fs::create_dir(workspace.path().join(CONFIG_FILE_NAME)).unwrap();

        assert_that!(load_from_workspace(workspace.path()).unwrap(), none());
    }

    /// Malformed JSON is a parse error
    #[rstest]
    fn load_invalid_json(workspace: TempDir) {
        fs::write(workspace.path().join(CONFIG_FILE_NAME), "{ not json").unwrap();

        let result = load_from_workspace(workspace.path());

        assert!(matches!(result, Err(ConfigError::ParseError(_))));
    }
}
