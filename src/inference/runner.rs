// Inference runner

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::config::constants::DEFAULT_FEW_SHOT_COUNT;
use crate::errors::QueryError;
use crate::prompt::PromptComposer;
use crate::providers::{GenerationRequest, TextGenerator};
use crate::tuning::TuningConfig;

/// Fixed Hinglish test prompts, varied in domain and complexity
pub const DEFAULT_TEST_PROMPTS: [&str; 10] = [
    "Aaj weather kaisa hai?",
    "Mujhe ek chai pilao.",
    "Weekend plan kya hai tumhara?",
    "Mera phone battery low ho raha hai, kya karoon?",
    "Movie recommendation do, thriller type ki",
    "Train ka time kya hai Delhi to Mumbai?",
    "Alexa, lights on kardo bedroom mein",
    "Calculator open karke 245 aur 378 add karo",
    "Kya tum mujhse Hindi-English mixed language mein baat kar sakte ho?",
    "Office ke liye kaunsa route best rahega aaj rush hour mein?",
];

/// One successful query, as written to the results file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InferenceResult {
    pub prompt: String,
    pub response: String,
    pub temperature: f64,
    pub few_shot_examples: usize,
}

/// What happened to a single query, reported as the run progresses
#[derive(Debug)]
pub enum QueryOutcome<'a> {
    Succeeded(&'a InferenceResult),
    Failed(&'a QueryError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunSummary {
    pub attempted: usize,
    pub succeeded: usize,
}

impl RunSummary {
    pub fn failed(&self) -> usize {
        self.attempted - self.succeeded
    }
}

/// Results of a run, in query order, failed queries omitted
#[derive(Debug, Clone)]
pub struct InferenceRun {
    pub results: Vec<InferenceResult>,
    pub summary: RunSummary,
}

/// Runs queries one at a time against a generator using a tuning configuration
pub struct InferenceRunner<'a> {
    generator: &'a dyn TextGenerator,
    config: &'a TuningConfig,
    composer: PromptComposer,
    shots: usize,
}

impl<'a> InferenceRunner<'a> {
    pub fn new(generator: &'a dyn TextGenerator, config: &'a TuningConfig) -> Self {
        Self {
            generator,
            config,
            composer: PromptComposer::default(),
            shots: DEFAULT_FEW_SHOT_COUNT,
        }
    }

    /// Number of leading examples used as demonstrations
    pub fn with_shots(mut self, shots: usize) -> Self {
        self.shots = shots;
        self
    }

    pub fn with_composer(mut self, composer: PromptComposer) -> Self {
        self.composer = composer;
        self
    }

    /// Compose and generate for a single query
    pub async fn run_query(&self, query: &str) -> Result<InferenceResult, QueryError> {
        let demonstrations = self.config.demonstrations(self.shots)?;
        let prompt = self.composer.compose(&demonstrations, query);

        debug!(
            "Composed prompt with {} demonstrations ({} chars)",
            demonstrations.len(),
            prompt.len()
        );

        let request = GenerationRequest::new(self.config.model.clone(), prompt)
            .with_parameters(self.config.parameters);
        let response = self.generator.generate(&request).await?;

        Ok(InferenceResult {
            prompt: query.to_string(),
            response: response.text.trim().to_string(),
            temperature: self.config.parameters.temperature,
            few_shot_examples: demonstrations.len(),
        })
    }

    /// Run every query in order, skipping the ones that fail
    pub async fn run<S: AsRef<str>>(&self, queries: &[S]) -> InferenceRun {
        self.run_with_progress(queries, |_, _, _| {}).await
    }

    /// Like [`InferenceRunner::run`], calling `progress(index, query, outcome)`
    /// after each query (index is 1-based)
    pub async fn run_with_progress<S, F>(&self, queries: &[S], mut progress: F) -> InferenceRun
    where
        S: AsRef<str>,
        F: FnMut(usize, &str, QueryOutcome<'_>),
    {
        info!(
            "Running {} queries with {} via {}",
            queries.len(),
            self.config.model,
            self.generator.name()
        );

        let mut results = Vec::with_capacity(queries.len());

        for (idx, query) in queries.iter().enumerate() {
            let query = query.as_ref();
            match self.run_query(query).await {
                Ok(result) => {
                    progress(idx + 1, query, QueryOutcome::Succeeded(&result));
                    results.push(result);
                }
                Err(e) => {
                    warn!("Skipping query {}/{}: {}", idx + 1, queries.len(), e);
                    progress(idx + 1, query, QueryOutcome::Failed(&e));
                }
            }
        }

        let summary = RunSummary {
            attempted: queries.len(),
            succeeded: results.len(),
        };
        InferenceRun { results, summary }
    }
}
