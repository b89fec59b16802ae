// Google Gemini API provider
//
// Single-turn text generation over the REST `generateContent` endpoint,
// plus model listing. No retries: a failed call is reported to the caller.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use super::types::{GenerationRequest, GenerationResponse, ModelInfo};
use super::TextGenerator;
use crate::errors::GenerationError;

const REQUEST_TIMEOUT_SECS: u64 = 60;
pub const GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Google Gemini API provider
#[derive(Clone)]
pub struct GeminiProvider {
    client: Client,
    api_key: String,
    base_url: String,
}

impl GeminiProvider {
    /// Create a new Gemini provider
    pub fn new(api_key: String) -> Result<Self, GenerationError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()?;

        Ok(Self {
            client,
            api_key,
            base_url: GEMINI_BASE_URL.to_string(),
        })
    }

    /// Point the provider at a different API root (proxies, tests)
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Endpoint for a model, accepting both "gemini-x" and "models/gemini-x"
    fn generate_url(&self, model: &str) -> String {
        format!("{}/{}:generateContent", self.base_url, model_path(model))
    }

    fn to_gemini_request(request: &GenerationRequest) -> GeminiRequest {
        GeminiRequest {
            contents: vec![GeminiContent {
                role: Some("user".to_string()),
                parts: vec![GeminiPart {
                    text: Some(request.prompt.clone()),
                }],
            }],
            generation_config: GeminiGenerationConfig {
                temperature: request.parameters.temperature,
                top_p: request.parameters.top_p,
                top_k: request.parameters.top_k,
            },
        }
    }

    fn from_gemini_response(
        response: GeminiResponse,
        model: &str,
    ) -> Result<GenerationResponse, GenerationError> {
        let candidate = response
            .candidates
            .into_iter()
            .next()
            .ok_or_else(|| GenerationError::EmptyResponse {
                model: model.to_string(),
            })?;

        let text: String = candidate
            .content
            .map(|content| {
                content
                    .parts
                    .into_iter()
                    .filter_map(|part| part.text)
                    .collect()
            })
            .unwrap_or_default();

        if text.is_empty() {
            return Err(GenerationError::EmptyResponse {
                model: model.to_string(),
            });
        }

        Ok(GenerationResponse {
            text,
            model: response.model_version.unwrap_or_else(|| model.to_string()),
            finish_reason: candidate.finish_reason,
        })
    }

    /// List models available to this API key, following pagination
    pub async fn list_models(&self) -> Result<Vec<ModelInfo>, GenerationError> {
        let url = format!("{}/models", self.base_url);
        let mut models = Vec::new();
        let mut page_token: Option<String> = None;

        loop {
            let mut query = vec![("key", self.api_key.clone())];
            if let Some(token) = &page_token {
                query.push(("pageToken", token.clone()));
            }

            let response = self.client.get(&url).query(&query).send().await?;
            let body = read_success_body(response).await?;

            let page: ModelListResponse = serde_json::from_str(&body)
                .map_err(|e| GenerationError::Decode(e.to_string()))?;
            models.extend(page.models);

            match page.next_page_token {
                Some(token) if !token.is_empty() => page_token = Some(token),
                _ => break,
            }
        }

        tracing::debug!("Gemini listed {} models", models.len());
        Ok(models)
    }
}

#[async_trait]
impl TextGenerator for GeminiProvider {
    async fn generate(
        &self,
        request: &GenerationRequest,
    ) -> Result<GenerationResponse, GenerationError> {
        let gemini_request = Self::to_gemini_request(request);
        let url = self.generate_url(&request.model);

        tracing::debug!("Sending request to Gemini API: {}", url);

        let response = self
            .client
            .post(&url)
            .query(&[("key", self.api_key.as_str())])
            .header("content-type", "application/json")
            .json(&gemini_request)
            .send()
            .await?;

        let body = read_success_body(response).await?;

        let gemini_response: GeminiResponse =
            serde_json::from_str(&body).map_err(|e| GenerationError::Decode(e.to_string()))?;

        tracing::debug!("Received response: {:?}", gemini_response);

        Self::from_gemini_response(gemini_response, &request.model)
    }

    fn name(&self) -> &str {
        "gemini"
    }
}

/// Strip an optional leading "models/" and re-add it
fn model_path(model: &str) -> String {
    format!("models/{}", model.trim_start_matches("models/"))
}

async fn read_success_body(response: reqwest::Response) -> Result<String, GenerationError> {
    let status = response.status();

    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(GenerationError::Api {
            status: status.as_u16(),
            body,
        });
    }

    Ok(response.text().await?)
}

// Gemini API types

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
struct GeminiRequest {
    contents: Vec<GeminiContent>,
    generation_config: GeminiGenerationConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct GeminiContent {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    role: Option<String>,
    #[serde(default)]
    parts: Vec<GeminiPart>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct GeminiPart {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    text: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
struct GeminiGenerationConfig {
    temperature: f64,
    top_p: f64,
    top_k: u32,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GeminiResponse {
    #[serde(default)]
    candidates: Vec<GeminiCandidate>,
    model_version: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GeminiCandidate {
    content: Option<GeminiContent>,
    finish_reason: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ModelListResponse {
    #[serde(default)]
    models: Vec<ModelInfo>,
    next_page_token: Option<String>,
}
