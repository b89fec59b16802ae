// Configuration module
// Public interface for settings loading

pub mod constants;
mod loader;
mod settings;

pub use loader::{load_settings, settings_file_path};
pub use settings::{FileSettings, Settings};
