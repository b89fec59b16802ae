// hinglish - few-shot Hinglish generation on Gemini
// Main entry point

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use hinglish::cli::{
    gemini_from_settings, read_config_path_from_stdin, resolve_config_path, run_infer, run_models,
    run_tune, InferOptions, TuneOptions,
};
use hinglish::config::constants::{
    DEFAULT_FEW_SHOT_COUNT, DEFAULT_MODEL, DEFAULT_MODEL_CONFIG_PATH, DEFAULT_TEMPERATURE,
    DEFAULT_TOP_K, DEFAULT_TOP_P,
};
use hinglish::config::load_settings;
use hinglish::providers::TextGenerator;
use hinglish::tuning::GenerationParameters;

#[derive(Parser)]
#[command(name = "hinglish")]
#[command(about = "Few-shot Hinglish responses from Gemini", long_about = None)]
#[command(arg_required_else_help = true)]
struct Cli {
    #[arg(long, short, global = true, help = "Show verbose debug output")]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    #[command(about = "Build a few-shot tuning configuration from a JSONL dataset")]
    Tune {
        #[arg(long, help = "JSONL dataset (default: dataset.jsonl)")]
        dataset: Option<PathBuf>,

        #[arg(long, default_value = DEFAULT_MODEL_CONFIG_PATH, help = "Where to write the configuration")]
        output: PathBuf,

        #[arg(long, default_value = DEFAULT_MODEL, help = "Model identifier")]
        model: String,

        #[arg(long, default_value_t = DEFAULT_TEMPERATURE)]
        temperature: f64,

        #[arg(long, default_value_t = DEFAULT_TOP_P)]
        top_p: f64,

        #[arg(long, default_value_t = DEFAULT_TOP_K)]
        top_k: u32,

        #[arg(long, help = "Do not call the API to test the configuration")]
        skip_test: bool,
    },

    #[command(about = "Run the Hinglish test prompts against a tuning configuration")]
    Infer {
        #[arg(long, help = "Tuning configuration (default: $GEMINI_MODEL_CONFIG)")]
        config: Option<PathBuf>,

        #[arg(long, help = "Directory for result files (default: test_results)")]
        results_dir: Option<PathBuf>,

        #[arg(long, default_value_t = DEFAULT_FEW_SHOT_COUNT, help = "Examples prepended to each prompt")]
        shots: usize,

        #[arg(long, help = "Replace the default persona instruction")]
        instruction: Option<String>,
    },

    #[command(about = "List models available to the API key")]
    Models,
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let settings = load_settings()?;

    match cli.command {
        Commands::Tune {
            dataset,
            output,
            model,
            temperature,
            top_p,
            top_k,
            skip_test,
        } => {
            let options = TuneOptions {
                dataset: dataset.unwrap_or_else(|| settings.dataset.clone()),
                output,
                model,
                parameters: GenerationParameters::new(temperature, top_p, top_k),
                skip_test,
            };

            if skip_test {
                run_tune(&options, None).await?;
            } else {
                let provider = gemini_from_settings(&settings)?;
                run_tune(&options, Some(&provider as &dyn TextGenerator)).await?;
            }
        }
        Commands::Infer {
            config,
            results_dir,
            shots,
            instruction,
        } => {
            let provider = gemini_from_settings(&settings)?;
            let config_path =
                resolve_config_path(config.as_deref(), &settings, read_config_path_from_stdin)?;
            let options = InferOptions {
                results_dir: results_dir.unwrap_or_else(|| settings.results_dir.clone()),
                shots,
                instruction,
            };

            run_infer(&options, &config_path, &provider).await?;
        }
        Commands::Models => {
            let provider = gemini_from_settings(&settings)?;
            run_models(&provider).await?;
        }
    }

    Ok(())
}
