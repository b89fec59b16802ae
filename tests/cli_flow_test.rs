// End-to-end tests for the tune and infer commands with a scripted generator

use anyhow::Result;
use async_trait::async_trait;
use hinglish::cli::{run_infer, run_tune, InferOptions, TuneOptions};
use hinglish::errors::GenerationError;
use hinglish::inference::InferenceResult;
use hinglish::providers::{GenerationRequest, GenerationResponse, TextGenerator};
use hinglish::tuning::{GenerationParameters, TuningConfig};
use std::fs;
use std::sync::Mutex;
use tempfile::TempDir;

/// Records prompts; fails any prompt containing `fail_marker`
struct ScriptedGenerator {
    fail_marker: Option<&'static str>,
    prompts: Mutex<Vec<String>>,
}

impl ScriptedGenerator {
    fn new(fail_marker: Option<&'static str>) -> Self {
        Self {
            fail_marker,
            prompts: Mutex::new(Vec::new()),
        }
    }
}

#[async_trait]
impl TextGenerator for ScriptedGenerator {
    async fn generate(
        &self,
        request: &GenerationRequest,
    ) -> Result<GenerationResponse, GenerationError> {
        self.prompts.lock().unwrap().push(request.prompt.clone());
        if let Some(marker) = self.fail_marker {
            if request.prompt.ends_with(&format!("{}\nAssistant:", marker)) {
                return Err(GenerationError::EmptyResponse {
                    model: request.model.clone(),
                });
            }
        }
        Ok(GenerationResponse::new("Haan bilkul!", &request.model))
    }

    fn name(&self) -> &str {
        "scripted"
    }
}

fn write_dataset(dir: &TempDir, lines: usize) -> Result<std::path::PathBuf> {
    let path = dir.path().join("dataset.jsonl");
    let body: String = (0..lines)
        .map(|i| format!("{{\"input_text\":\"Q{}\",\"output_text\":\"A{}\"}}\n", i, i))
        .collect();
    fs::write(&path, body)?;
    Ok(path)
}

fn tune_options(dir: &TempDir, dataset: std::path::PathBuf, skip_test: bool) -> TuneOptions {
    TuneOptions {
        dataset,
        output: dir.path().join("gemini_model_config.json"),
        model: "models/gemini-2.0-flash".to_string(),
        parameters: GenerationParameters::new(0.2, 0.95, 40),
        skip_test,
    }
}

#[tokio::test]
async fn test_tune_without_test_writes_config() -> Result<()> {
    let dir = TempDir::new()?;
    let dataset = write_dataset(&dir, 4)?;
    let options = tune_options(&dir, dataset, true);

    let config = run_tune(&options, None).await?;

    let loaded = TuningConfig::load(&options.output)?;
    assert_eq!(loaded.examples.len(), 4);
    assert_eq!(loaded, config);
    Ok(())
}

#[tokio::test]
async fn test_tune_sanity_test_uses_all_examples() -> Result<()> {
    let dir = TempDir::new()?;
    let dataset = write_dataset(&dir, 5)?;
    let options = tune_options(&dir, dataset, false);
    let generator = ScriptedGenerator::new(None);

    run_tune(&options, Some(&generator)).await?;

    let prompts = generator.prompts.lock().unwrap();
    assert_eq!(prompts.len(), 1);
    assert!(prompts[0].contains("User: Q4\nAssistant: A4\n"));
    assert!(prompts[0].ends_with("User: Kaisa feel kar rahe ho aaj kal?\nAssistant:"));
    Ok(())
}

#[tokio::test]
async fn test_tune_sanity_failure_is_not_fatal() -> Result<()> {
    let dir = TempDir::new()?;
    let dataset = write_dataset(&dir, 2)?;
    let options = tune_options(&dir, dataset, false);
    let generator = ScriptedGenerator::new(Some("Kaisa feel kar rahe ho aaj kal?"));

    let result = run_tune(&options, Some(&generator)).await;

    assert!(result.is_ok());
    assert!(options.output.exists());
    Ok(())
}

#[tokio::test]
async fn test_tune_with_missing_dataset_fails() -> Result<()> {
    let dir = TempDir::new()?;
    let options = tune_options(&dir, dir.path().join("missing.jsonl"), true);

    let err = run_tune(&options, None).await.unwrap_err();

    assert!(format!("{:#}", err).contains("not found"));
    assert!(!options.output.exists());
    Ok(())
}

#[tokio::test]
async fn test_infer_saves_successful_results() -> Result<()> {
    let dir = TempDir::new()?;
    let dataset = write_dataset(&dir, 5)?;
    let tune = tune_options(&dir, dataset, true);
    run_tune(&tune, None).await?;

    let generator = ScriptedGenerator::new(Some("Mujhe ek chai pilao."));
    let options = InferOptions {
        results_dir: dir.path().join("test_results"),
        shots: 3,
        instruction: None,
    };

    let path = run_infer(&options, &tune.output, &generator).await?;

    let saved: Vec<InferenceResult> = serde_json::from_str(&fs::read_to_string(&path)?)?;
    assert_eq!(saved.len(), 9);
    assert!(saved.iter().all(|r| r.prompt != "Mujhe ek chai pilao."));
    assert!(saved.iter().all(|r| r.few_shot_examples == 3));
    assert_eq!(generator.prompts.lock().unwrap().len(), 10);
    Ok(())
}

#[tokio::test]
async fn test_infer_custom_instruction_and_shots() -> Result<()> {
    let dir = TempDir::new()?;
    let dataset = write_dataset(&dir, 5)?;
    let tune = tune_options(&dir, dataset, true);
    run_tune(&tune, None).await?;

    let generator = ScriptedGenerator::new(None);
    let options = InferOptions {
        results_dir: dir.path().join("out"),
        shots: 1,
        instruction: Some("Sirf Hinglish mein jawab do.\n".to_string()),
    };

    run_infer(&options, &tune.output, &generator).await?;

    let prompts = generator.prompts.lock().unwrap();
    assert!(prompts[0].starts_with("Sirf Hinglish mein jawab do.\nUser: Q0\n"));
    assert!(!prompts[0].contains("User: Q1"));
    Ok(())
}

#[tokio::test]
async fn test_infer_with_bad_config_is_fatal() -> Result<()> {
    let dir = TempDir::new()?;
    let config = dir.path().join("config.json");
    fs::write(&config, "{}")?;

    let generator = ScriptedGenerator::new(None);
    let options = InferOptions {
        results_dir: dir.path().join("test_results"),
        shots: 3,
        instruction: None,
    };

    assert!(run_infer(&options, &config, &generator).await.is_err());
    assert!(!options.results_dir.exists());
    Ok(())
}
