// Project-wide constants
//
// Default file names, environment variable names and generation
// parameters. Import via `use crate::config::constants::*;`.

/// Environment variable holding the Gemini API key.
pub const API_KEY_ENV: &str = "GOOGLE_API_KEY";

/// Environment variable pointing at a tuning configuration built earlier.
pub const MODEL_CONFIG_ENV: &str = "GEMINI_MODEL_CONFIG";

/// Environment variable overriding the Gemini API root.
pub const BASE_URL_ENV: &str = "GEMINI_BASE_URL";

/// Default JSONL dataset read by `hinglish tune`.
pub const DEFAULT_DATASET_PATH: &str = "dataset.jsonl";

/// Default tuning configuration written by `hinglish tune`.
pub const DEFAULT_MODEL_CONFIG_PATH: &str = "gemini_model_config.json";

/// Directory that receives inference result files.
pub const DEFAULT_RESULTS_DIR: &str = "test_results";

/// Model used when neither the CLI nor the configuration names one.
pub const DEFAULT_MODEL: &str = "models/gemini-2.0-flash";

pub const DEFAULT_TEMPERATURE: f64 = 0.2;
pub const DEFAULT_TOP_P: f64 = 0.95;
pub const DEFAULT_TOP_K: u32 = 40;

/// Demonstrations prepended to each inference prompt.
pub const DEFAULT_FEW_SHOT_COUNT: usize = 3;

/// Query used to sanity-test a freshly built configuration.
pub const TUNE_TEST_PROMPT: &str = "Kaisa feel kar rahe ho aaj kal?";
