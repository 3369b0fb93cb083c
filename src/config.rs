//! Project settings.
/// Config file loader
mod loader;
/// Configuration manager
mod manager;
/// Configuration types and settings
mod types;

pub use loader::{
    CONFIG_FILE_NAME,
    load_from_project,
};
pub use manager::ConfigManager;
pub use types::{
    ConfigError,
    ProjectSettings,
    PseudoLocaleSetting,
    ValidationError,
};
