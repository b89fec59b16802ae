// JSONL example loader

use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use tracing::debug;

use crate::errors::DataError;

/// A single demonstration pair
///
/// Any fields besides `input_text` and `output_text` are carried along
/// untouched so they survive into the tuning configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Example {
    pub input_text: String,
    pub output_text: String,

    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl Example {
    pub fn new(input_text: impl Into<String>, output_text: impl Into<String>) -> Self {
        Self {
            input_text: input_text.into(),
            output_text: output_text.into(),
            extra: serde_json::Map::new(),
        }
    }
}

impl From<Example> for serde_json::Value {
    fn from(example: Example) -> Self {
        let mut object = example.extra;
        object.insert("input_text".to_string(), example.input_text.into());
        object.insert("output_text".to_string(), example.output_text.into());
        serde_json::Value::Object(object)
    }
}

/// Load every example from a JSONL file, preserving file order
///
/// Every line must hold one JSON object, so a blank line is malformed too.
/// A single malformed line fails the whole load.
pub fn load_examples(path: impl AsRef<Path>) -> Result<Vec<Example>, DataError> {
    let path = path.as_ref();

    if !path.exists() {
        return Err(DataError::NotFound {
            kind: "Dataset file",
            path: path.to_path_buf(),
        });
    }

    let file = File::open(path).map_err(|source| DataError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let mut examples = Vec::new();
    for (idx, line) in BufReader::new(file).lines().enumerate() {
        let line = line.map_err(|source| DataError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let example: Example =
            serde_json::from_str(&line).map_err(|source| DataError::InvalidLine {
                path: path.to_path_buf(),
                line: idx + 1,
                source,
            })?;
        examples.push(example);
    }

    debug!("Loaded {} examples from {}", examples.len(), path.display());
    Ok(examples)
}
