// Settings structs

use anyhow::{bail, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use super::constants::{
    API_KEY_ENV, BASE_URL_ENV, DEFAULT_DATASET_PATH, DEFAULT_RESULTS_DIR, MODEL_CONFIG_ENV,
};

/// Contents of `~/.hinglish/config.toml`; every field is optional
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FileSettings {
    #[serde(default)]
    pub api_key: Option<String>,

    #[serde(default)]
    pub model_config: Option<PathBuf>,

    #[serde(default)]
    pub dataset: Option<PathBuf>,

    #[serde(default)]
    pub base_url: Option<String>,

    #[serde(default)]
    pub results_dir: Option<PathBuf>,
}

/// Resolved runtime settings
///
/// Built once at startup and passed down explicitly; library code never
/// reads the process environment itself.
#[derive(Debug, Clone)]
pub struct Settings {
    /// Gemini API key (required only by commands that call the API)
    pub api_key: Option<String>,

    /// Tuning configuration produced by an earlier `tune` run
    pub model_config: Option<PathBuf>,

    /// JSONL example file
    pub dataset: PathBuf,

    /// Gemini API root override
    pub base_url: Option<String>,

    /// Where inference result files go
    pub results_dir: PathBuf,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api_key: None,
            model_config: None,
            dataset: PathBuf::from(DEFAULT_DATASET_PATH),
            base_url: None,
            results_dir: PathBuf::from(DEFAULT_RESULTS_DIR),
        }
    }
}

impl Settings {
    /// Layer file settings and then environment values over the defaults
    ///
    /// `lookup` stands in for `std::env::var`; empty values count as unset.
    pub fn from_lookup<F>(file: Option<FileSettings>, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut settings = Self::default();

        if let Some(file) = file {
            settings.api_key = file.api_key.filter(|k| !k.is_empty());
            settings.model_config = file.model_config;
            if let Some(dataset) = file.dataset {
                settings.dataset = dataset;
            }
            settings.base_url = file.base_url;
            if let Some(dir) = file.results_dir {
                settings.results_dir = dir;
            }
        }

        let env = |key: &str| lookup(key).filter(|v| !v.is_empty());

        if let Some(key) = env(API_KEY_ENV) {
            settings.api_key = Some(key);
        }
        if let Some(path) = env(MODEL_CONFIG_ENV) {
            settings.model_config = Some(PathBuf::from(path));
        }
        if let Some(url) = env(BASE_URL_ENV) {
            settings.base_url = Some(url);
        }

        settings
    }

    /// API key, or a user-facing error explaining how to set it
    pub fn require_api_key(&self) -> Result<&str> {
        match self.api_key.as_deref() {
            Some(key) => Ok(key),
            None => bail!(
                "{} environment variable not set.\n\
                Please set it using: export {}=your_key_here",
                API_KEY_ENV,
                API_KEY_ENV
            ),
        }
    }
}
