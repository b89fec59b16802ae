// Results file writer

use anyhow::{Context, Result};
use chrono::{DateTime, Local};
use std::fs;
use std::path::{Path, PathBuf};

use super::runner::InferenceResult;

/// `inference_results_<YYYYMMDD_HHMMSS>.json`
pub fn results_file_name(when: DateTime<Local>) -> String {
    format!("inference_results_{}.json", when.format("%Y%m%d_%H%M%S"))
}

/// Write all results to a freshly named file in `dir`, creating `dir` if needed
pub fn save_results(results: &[InferenceResult], dir: impl AsRef<Path>) -> Result<PathBuf> {
    save_results_at(results, dir, Local::now())
}

/// [`save_results`] with an explicit timestamp for the file name
pub fn save_results_at(
    results: &[InferenceResult],
    dir: impl AsRef<Path>,
    when: DateTime<Local>,
) -> Result<PathBuf> {
    let dir = dir.as_ref();
    fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create results directory: {}", dir.display()))?;

    let path = dir.join(results_file_name(when));
    let json = serde_json::to_string_pretty(results).context("Failed to serialize results")?;
    fs::write(&path, json)
        .with_context(|| format!("Failed to write results: {}", path.display()))?;

    tracing::info!("Saved {} results to {}", results.len(), path.display());
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use tempfile::TempDir;

    #[test]
    fn test_file_name_embeds_timestamp() {
        let when = Local.with_ymd_and_hms(2025, 1, 2, 3, 4, 5).unwrap();
        assert_eq!(results_file_name(when), "inference_results_20250102_030405.json");
    }

    #[test]
    fn test_empty_results_still_written() {
        let dir = TempDir::new().unwrap();
        let out = dir.path().join("test_results");

        let path = save_results(&[], &out).unwrap();

        assert!(out.is_dir());
        assert_eq!(fs::read_to_string(path).unwrap(), "[]");
    }

    #[test]
    fn test_non_ascii_written_verbatim() {
        let dir = TempDir::new().unwrap();
        let results = vec![InferenceResult {
            prompt: "चाय?".to_string(),
            response: "हाँ, ज़रूर!".to_string(),
            temperature: 0.2,
            few_shot_examples: 3,
        }];

        let path = save_results(&results, dir.path()).unwrap();
        let contents = fs::read_to_string(path).unwrap();
        assert!(contents.contains("हाँ, ज़रूर!"));
        assert!(!contents.contains("\\u"));
    }
}
