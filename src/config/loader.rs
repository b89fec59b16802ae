// Settings loader
// Reads ~/.hinglish/config.toml (optional) and the process environment

use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

use super::settings::{FileSettings, Settings};

/// Location of the optional settings file
pub fn settings_file_path() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(".hinglish").join("config.toml"))
}

/// Load settings from the settings file (if present) and the environment
pub fn load_settings() -> Result<Settings> {
    let file = match settings_file_path() {
        Some(path) => read_file_settings(&path)?,
        None => None,
    };

    Ok(Settings::from_lookup(file, |key| std::env::var(key).ok()))
}

fn read_file_settings(path: &Path) -> Result<Option<FileSettings>> {
    if !path.exists() {
        return Ok(None);
    }

    let contents = fs::read_to_string(path)
        .with_context(|| format!("Failed to read settings file: {}", path.display()))?;

    let file: FileSettings = toml::from_str(&contents)
        .with_context(|| format!("Failed to parse settings file: {}", path.display()))?;

    tracing::debug!("Loaded settings from {}", path.display());
    Ok(Some(file))
}
