//! Abstractions for turning prompts into free text via an external generative backend.
//!
//! The pipeline talks to the backend through the [`GenerationClient`] trait so tests can
//! substitute scripted doubles. The production adapter speaks the Gemini `generateContent`
//! REST contract; [`retry`] holds the reusable retry and race-against-timeout helpers that
//! wrap every invocation.

mod gemini;
pub mod retry;

use async_trait::async_trait;
use thiserror::Error;

pub use gemini::GeminiClient;

/// Errors surfaced while attempting text generation.
#[derive(Debug, Error)]
pub enum GenerationError {
    /// Backend was unreachable at the transport level.
    #[error("Generation backend unavailable: {0}")]
    Unavailable(String),
    /// Backend returned an error response.
    #[error("Failed to generate text: {0}")]
    Failed(String),
    /// Backend response could not be parsed.
    #[error("Malformed generation response: {0}")]
    InvalidResponse(String),
    /// Invocation lost the race against its deadline.
    #[error("Generation call did not complete within {0} seconds")]
    Timeout(u64),
}

/// Interface implemented by generative text backends.
#[async_trait]
pub trait GenerationClient: Send + Sync {
    /// Produce free text for a single prompt.
    async fn generate(&self, prompt: String) -> Result<String, GenerationError>;
}
