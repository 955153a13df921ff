//! Utility modules for error handling, configuration and tool discovery

pub mod bundle_paths;
pub mod config;
pub mod error;
pub mod toolchain;

// Re-export for convenience
pub use bundle_paths::{get_app_config_dir, get_downloads_dir, get_settings_path};
pub use config::AppSettings;
pub use error::{TubefetchError, ValidationError};
pub use toolchain::Toolchain;
