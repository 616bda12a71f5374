//! The remote image generation boundary.
//!
//! - [`ImageGenerator`]: the seam the session talks to
//! - [`GeminiClient`]: the production implementation
//! - [`GeminiConfig`]: environment-driven client settings

mod config;
mod gemini;

use async_trait::async_trait;
use crate::utils::GenerationResult;

pub use config::{DEFAULT_API_BASE, DEFAULT_MODEL, GeminiConfig};
pub use gemini::GeminiClient;

/// Produces one styled image from a destination (hand) and source (design) image.
///
/// Both inputs and the output are data URLs. One call is one attempt: no
/// retries happen behind this trait.
#[async_trait]
pub trait ImageGenerator: Send + Sync {
    async fn generate(&self, destination: &str, source: &str) -> GenerationResult<String>;
}
