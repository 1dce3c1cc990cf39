//! Workspace settings: date defaults and the similarity threshold.
mod loader;
mod manager;
mod types;

pub use loader::CONFIG_FILE_NAME;
pub use manager::ConfigManager;
pub use types::{
    ConfigError,
    DateSettings,
    Settings,
    SimilaritySettings,
    ValidationError,
};
