// Provider-agnostic request/response types

use serde::{Deserialize, Serialize};

use crate::tuning::GenerationParameters;

/// One text-in, text-out generation call
#[derive(Debug, Clone, Serialize)]
pub struct GenerationRequest {
    /// Model identifier, e.g. "models/gemini-2.0-flash"
    pub model: String,

    /// Complete prompt text
    pub prompt: String,

    /// Sampling parameters
    pub parameters: GenerationParameters,
}

impl GenerationRequest {
    pub fn new(model: impl Into<String>, prompt: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            prompt: prompt.into(),
            parameters: GenerationParameters::default(),
        }
    }

    pub fn with_parameters(mut self, parameters: GenerationParameters) -> Self {
        self.parameters = parameters;
        self
    }
}

/// Generated text plus what the backend reported about it
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct GenerationResponse {
    pub text: String,

    /// Model that served the request
    pub model: String,

    /// Why the model stopped generating
    pub finish_reason: Option<String>,
}

impl GenerationResponse {
    pub fn new(text: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            model: model.into(),
            finish_reason: None,
        }
    }
}

/// Entry returned by a model listing
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ModelInfo {
    pub name: String,

    #[serde(default, rename = "displayName")]
    pub display_name: Option<String>,

    #[serde(default, rename = "supportedGenerationMethods")]
    pub supported_generation_methods: Vec<String>,
}

impl ModelInfo {
    /// Whether the model can serve `generateContent` calls
    pub fn supports_generate_content(&self) -> bool {
        self.supported_generation_methods
            .iter()
            .any(|method| method == "generateContent")
    }
}
