// Subcommand handlers

use anyhow::{bail, Context, Result};
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};

use super::shell_hint::env_export_hint;
use crate::config::constants::{MODEL_CONFIG_ENV, TUNE_TEST_PROMPT};
use crate::config::Settings;
use crate::dataset::load_examples;
use crate::inference::{save_results, InferenceRunner, QueryOutcome, DEFAULT_TEST_PROMPTS};
use crate::prompt::PromptComposer;
use crate::providers::{GeminiProvider, ModelInfo, TextGenerator};
use crate::tuning::{GenerationParameters, TuningConfig};

const RULE_WIDTH: usize = 60;

#[derive(Debug, Clone)]
pub struct TuneOptions {
    pub dataset: PathBuf,
    pub output: PathBuf,
    pub model: String,
    pub parameters: GenerationParameters,
    pub skip_test: bool,
}

#[derive(Debug, Clone)]
pub struct InferOptions {
    pub results_dir: PathBuf,
    pub shots: usize,
    pub instruction: Option<String>,
}

/// Build a Gemini provider from resolved settings
pub fn gemini_from_settings(settings: &Settings) -> Result<GeminiProvider> {
    let api_key = settings.require_api_key()?;
    let mut provider =
        GeminiProvider::new(api_key.to_string()).context("Failed to create Gemini client")?;
    if let Some(url) = &settings.base_url {
        provider = provider.with_base_url(url.clone());
    }
    Ok(provider)
}

/// Build and persist a tuning configuration, then optionally sanity-test it
///
/// `generator` is only needed for the sanity test.
pub async fn run_tune(
    options: &TuneOptions,
    generator: Option<&dyn TextGenerator>,
) -> Result<TuningConfig> {
    println!("Step 1: Loading dataset file {}...", options.dataset.display());
    let examples = load_examples(&options.dataset).context("Error loading dataset")?;
    println!("✓ Loaded {} examples from dataset", examples.len());

    println!("\nStep 2: Creating tuning configuration for {}...", options.model);
    let config = TuningConfig::build(examples, options.model.clone(), options.parameters);
    config.persist(&options.output)?;

    let output = options.output.display().to_string();
    println!("✓ Tuning configuration created and saved to {}", output);
    println!("\n{}", env_export_hint(&output));

    if options.skip_test {
        println!("\nSkipping model test (--skip-test)");
    } else if let Some(generator) = generator {
        println!("\nStep 3: Testing the model with few-shot learning...");
        sanity_test(generator, &config).await;
    }

    println!("\nNext steps:");
    println!(
        "1. Run inference: {}=\"{}\" hinglish infer",
        MODEL_CONFIG_ENV, output
    );
    println!("2. Inference uses the examples from your dataset for few-shot learning");

    Ok(config)
}

/// One query with every example as a demonstration; failures are reported only
async fn sanity_test(generator: &dyn TextGenerator, config: &TuningConfig) {
    let runner = InferenceRunner::new(generator, config).with_shots(config.examples.len());

    match runner.run_query(TUNE_TEST_PROMPT).await {
        Ok(result) => {
            println!("\nTest Result:");
            println!("Prompt: {}", result.prompt);
            println!("Response: {}", result.response);
            println!("\n✓ Test completed successfully!");
        }
        Err(e) => {
            tracing::warn!("Sanity test failed: {}", e);
            println!("Error testing model: {}", e);
        }
    }
}

/// Pick the configuration path: explicit flag, then settings, then `ask`
///
/// `ask` runs only when no existing file was found; a path it returns must
/// exist too.
pub fn resolve_config_path<F>(explicit: Option<&Path>, settings: &Settings, ask: F) -> Result<PathBuf>
where
    F: FnOnce() -> Result<String>,
{
    if let Some(path) = explicit {
        if path.exists() {
            return Ok(path.to_path_buf());
        }
        bail!("File not found: {}", path.display());
    }

    if let Some(path) = &settings.model_config {
        if path.exists() {
            return Ok(path.clone());
        }
    }

    println!(
        "Error: {} environment variable not set or file not found.",
        MODEL_CONFIG_ENV
    );
    let answer = ask()?;
    let path = PathBuf::from(answer.trim());
    if !path.exists() {
        bail!("File not found: {}", path.display());
    }
    Ok(path)
}

/// Interactive fallback used by `hinglish infer`
pub fn read_config_path_from_stdin() -> Result<String> {
    print!("Enter the path to your Gemini model configuration file: ");
    io::stdout().flush().context("Failed to flush stdout")?;

    let mut line = String::new();
    io::stdin()
        .lock()
        .read_line(&mut line)
        .context("Failed to read configuration path")?;
    Ok(line)
}

/// Run the fixed test prompts and save the results file
pub async fn run_infer(
    options: &InferOptions,
    config_path: &Path,
    generator: &dyn TextGenerator,
) -> Result<PathBuf> {
    let config = TuningConfig::load(config_path).context("Error loading model configuration")?;
    println!("Using model configuration from: {}", config_path.display());
    println!(
        "Loaded {} examples for few-shot learning",
        config.examples.len()
    );

    let composer = match &options.instruction {
        Some(instruction) => PromptComposer::new(instruction.clone()),
        None => PromptComposer::default(),
    };
    let runner = InferenceRunner::new(generator, &config)
        .with_shots(options.shots)
        .with_composer(composer);

    let total = DEFAULT_TEST_PROMPTS.len();
    println!(
        "\nTesting {} with {} Hinglish prompts...\n",
        config.model, total
    );
    println!("{}", "=".repeat(RULE_WIDTH));

    let run = runner
        .run_with_progress(&DEFAULT_TEST_PROMPTS, |idx, query, outcome| {
            println!("\nTest {}/{}", idx, total);
            println!("Prompt: {}", query);
            match outcome {
                QueryOutcome::Succeeded(result) => println!("Response: {}", result.response),
                QueryOutcome::Failed(e) => println!("Error generating response: {}", e),
            }
            println!("{}", "-".repeat(RULE_WIDTH));
        })
        .await;

    let path = save_results(&run.results, &options.results_dir)?;
    println!("\nAll test results saved to {}", path.display());

    println!("\nQuick Analysis:");
    println!("- Tested prompts: {}", run.summary.attempted);
    println!("- Successful responses: {}", run.summary.succeeded);
    println!("- Check the output file for detailed results");

    Ok(path)
}

/// Print the models available to the configured API key
pub async fn run_models(provider: &GeminiProvider) -> Result<()> {
    let models = provider
        .list_models()
        .await
        .context("Failed to list Gemini models")?;

    println!("Available models ({}):", models.len());
    for model in &models {
        println!("{}", model_line(model));
    }
    println!("\n* supports generateContent (usable with `hinglish tune --model`)");
    Ok(())
}

fn model_line(model: &ModelInfo) -> String {
    let marker = if model.supports_generate_content() {
        '*'
    } else {
        ' '
    };
    match &model.display_name {
        Some(display) => format!("{} {}  ({})", marker, model.name, display),
        None => format!("{} {}", marker, model.name),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn settings_with(model_config: Option<PathBuf>) -> Settings {
        Settings {
            model_config,
            ..Settings::default()
        }
    }

    #[test]
    fn test_model_line_marks_generation_support() {
        let chat = ModelInfo {
            name: "models/gemini-2.0-flash".to_string(),
            display_name: Some("Gemini 2.0 Flash".to_string()),
            supported_generation_methods: vec!["generateContent".to_string()],
        };
        let embed = ModelInfo {
            name: "models/text-embedding-004".to_string(),
            display_name: None,
            supported_generation_methods: vec!["embedContent".to_string()],
        };

        assert_eq!(
            model_line(&chat),
            "* models/gemini-2.0-flash  (Gemini 2.0 Flash)"
        );
        assert_eq!(model_line(&embed), "  models/text-embedding-004");
    }

    #[test]
    fn test_explicit_path_wins() {
        let dir = TempDir::new().unwrap();
        let explicit = dir.path().join("a.json");
        std::fs::write(&explicit, "{}").unwrap();

        let path = resolve_config_path(
            Some(&explicit),
            &settings_with(Some(PathBuf::from("other.json"))),
            || panic!("should not ask"),
        )
        .unwrap();
        assert_eq!(path, explicit);
    }

    #[test]
    fn test_missing_explicit_path_is_fatal() {
        let result = resolve_config_path(
            Some(Path::new("/nonexistent/config.json")),
            &Settings::default(),
            || panic!("should not ask"),
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_settings_path_used_when_present() {
        let dir = TempDir::new().unwrap();
        let from_env = dir.path().join("env.json");
        std::fs::write(&from_env, "{}").unwrap();

        let path = resolve_config_path(None, &settings_with(Some(from_env.clone())), || {
            panic!("should not ask")
        })
        .unwrap();
        assert_eq!(path, from_env);
    }

    #[test]
    fn test_asks_when_settings_path_missing() {
        let dir = TempDir::new().unwrap();
        let answered = dir.path().join("typed.json");
        std::fs::write(&answered, "{}").unwrap();
        let answer = format!("{}\n", answered.display());

        let path = resolve_config_path(
            None,
            &settings_with(Some(PathBuf::from("/nonexistent/env.json"))),
            || Ok(answer),
        )
        .unwrap();
        assert_eq!(path, answered);
    }

    #[test]
    fn test_answered_path_must_exist() {
        let result = resolve_config_path(None, &Settings::default(), || {
            Ok("/nonexistent/typed.json".to_string())
        });
        assert!(result.is_err());
    }
}
