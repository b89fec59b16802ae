// Remote text generation
//
// The inference runner only sees the `TextGenerator` trait, so tests can
// swap in scripted generators and the Gemini client stays at the edge.

use async_trait::async_trait;

pub mod gemini;
pub mod types;

pub use gemini::GeminiProvider;
pub use types::{GenerationRequest, GenerationResponse, ModelInfo};

use crate::errors::GenerationError;

/// Trait for remote text generation backends
#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Generate a completion for a single text prompt
    async fn generate(
        &self,
        request: &GenerationRequest,
    ) -> Result<GenerationResponse, GenerationError>;

    /// Backend name (e.g. "gemini")
    fn name(&self) -> &str;
}
