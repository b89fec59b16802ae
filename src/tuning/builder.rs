// Tuning configuration builder and persistence

use anyhow::{Context, Result};
use chrono::{DateTime, Local};
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};
use std::fs;
use std::path::Path;
use tracing::{info, warn};

use crate::config::constants::{DEFAULT_MODEL, DEFAULT_TEMPERATURE, DEFAULT_TOP_K, DEFAULT_TOP_P};
use crate::dataset::Example;
use crate::errors::{DataError, QueryError};

/// Value written to `tuning_type`
pub const TUNING_TYPE: &str = "few-shot-examples";

/// Sampling parameters forwarded to the generation API
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GenerationParameters {
    #[serde(default = "default_temperature")]
    pub temperature: f64,

    #[serde(default = "default_top_p")]
    pub top_p: f64,

    #[serde(default = "default_top_k", deserialize_with = "whole_number")]
    pub top_k: u32,
}

impl Default for GenerationParameters {
    fn default() -> Self {
        Self {
            temperature: DEFAULT_TEMPERATURE,
            top_p: DEFAULT_TOP_P,
            top_k: DEFAULT_TOP_K,
        }
    }
}

impl GenerationParameters {
    pub fn new(temperature: f64, top_p: f64, top_k: u32) -> Self {
        Self {
            temperature,
            top_p,
            top_k,
        }
    }
}

fn default_temperature() -> f64 {
    DEFAULT_TEMPERATURE
}

fn default_top_p() -> f64 {
    DEFAULT_TOP_P
}

fn default_top_k() -> u32 {
    DEFAULT_TOP_K
}

// Hand-edited configurations may write `40.0`
fn whole_number<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    let value = f64::deserialize(deserializer)?;
    if value.fract() == 0.0 && (0.0..=f64::from(u32::MAX)).contains(&value) {
        Ok(value as u32)
    } else {
        Err(D::Error::custom(format!(
            "expected a non-negative whole number, got {}",
            value
        )))
    }
}

fn default_model() -> String {
    DEFAULT_MODEL.to_string()
}

fn default_tuning_type() -> String {
    TUNING_TYPE.to_string()
}

/// Persisted few-shot configuration
///
/// Written once by `hinglish tune` and only read afterwards. Examples are
/// kept as raw JSON and only checked when used as demonstrations, so one
/// bad entry can only affect the queries that use it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TuningConfig {
    #[serde(default = "default_model")]
    pub model: String,

    #[serde(default = "default_tuning_type")]
    pub tuning_type: String,

    pub examples: Vec<serde_json::Value>,

    #[serde(default)]
    pub created_at: String,

    #[serde(default)]
    pub parameters: GenerationParameters,
}

impl TuningConfig {
    /// Bundle examples and parameters, stamped with the current local time
    pub fn build(
        examples: Vec<Example>,
        model: impl Into<String>,
        parameters: GenerationParameters,
    ) -> Self {
        Self::build_at(examples, model, parameters, Local::now())
    }

    /// Same as [`TuningConfig::build`] with an explicit creation time
    pub fn build_at(
        examples: Vec<Example>,
        model: impl Into<String>,
        parameters: GenerationParameters,
        created_at: DateTime<Local>,
    ) -> Self {
        if examples.is_empty() {
            warn!("Building tuning configuration with no examples; prompts will have no demonstrations");
        }

        Self {
            model: model.into(),
            tuning_type: TUNING_TYPE.to_string(),
            examples: examples.into_iter().map(serde_json::Value::from).collect(),
            created_at: created_at.format("%Y-%m-%dT%H:%M:%S%.6f").to_string(),
            parameters,
        }
    }

    /// Write as indented UTF-8 JSON, replacing any existing file
    pub fn persist(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).with_context(|| {
                    format!("Failed to create directory: {}", parent.display())
                })?;
            }
        }

        let json =
            serde_json::to_string_pretty(self).context("Failed to serialize tuning configuration")?;
        fs::write(path, json)
            .with_context(|| format!("Failed to write tuning configuration: {}", path.display()))?;

        info!(
            "Saved tuning configuration with {} examples to {}",
            self.examples.len(),
            path.display()
        );
        Ok(())
    }

    /// Read a configuration previously written by [`TuningConfig::persist`]
    pub fn load(path: impl AsRef<Path>) -> Result<Self, DataError> {
        let path = path.as_ref();

        if !path.exists() {
            return Err(DataError::NotFound {
                kind: "Model configuration",
                path: path.to_path_buf(),
            });
        }

        let contents = fs::read_to_string(path).map_err(|source| DataError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        serde_json::from_str(&contents).map_err(|source| DataError::InvalidDocument {
            path: path.to_path_buf(),
            source,
        })
    }

    /// First `count` examples (or all of them, if there are fewer)
    ///
    /// Fails on the first entry that lacks the required text fields.
    pub fn demonstrations(&self, count: usize) -> Result<Vec<Example>, QueryError> {
        self.examples
            .iter()
            .take(count)
            .enumerate()
            .map(|(idx, value)| {
                Example::deserialize(value).map_err(|source| QueryError::InvalidDemonstration {
                    index: idx + 1,
                    source,
                })
            })
            .collect()
    }
}
