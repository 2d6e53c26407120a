//! Creative brief generation.
//!
//! A [`BriefGenerator`] turns a prospective client's inquiry into a
//! structured [`CreativeBrief`]. The production implementation calls
//! Google's Gemini `generateContent` API.

mod config;
mod gemini;
mod prompts;

use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;

use crate::models::{BriefRequest, CreativeBrief};

pub use config::LlmConfig;
pub use gemini::GeminiClient;
pub use prompts::brief_prompt;

/// Errors that can occur during brief generation.
#[derive(Error, Debug)]
pub enum LlmError {
    /// Brief generation is disabled
    #[error("Brief generation is disabled")]
    Disabled,
    /// No API key configured
    #[error("Brief generation is not configured")]
    NotConfigured,
    /// Failed to reach the model API
    #[error("Connection error: {0}")]
    Connection(String),
    /// API returned an error
    #[error("API error: {0}")]
    Api(String),
    /// The model returned no text
    #[error("No response from model")]
    EmptyResponse,
    /// Failed to parse response
    #[error("Parse error: {0}")]
    Parse(String),
}

impl LlmError {
    /// Whether the error means the generator is unavailable rather than failing.
    pub fn is_unavailable(&self) -> bool {
        matches!(self, LlmError::Disabled | LlmError::NotConfigured)
    }
}

/// Something that can write a creative brief.
#[async_trait]
pub trait BriefGenerator: Send + Sync {
    async fn generate_brief(&self, request: &BriefRequest) -> Result<CreativeBrief, LlmError>;
}

/// Build the configured generator, or `None` when generation is off or has
/// no API key.
pub fn generator_from_config(
    config: &LlmConfig,
) -> Result<Option<Arc<dyn BriefGenerator>>, LlmError> {
    match GeminiClient::new(config.clone()) {
        Ok(client) => Ok(Some(Arc::new(client))),
        Err(e) if e.is_unavailable() => {
            tracing::info!("Brief generation unavailable: {}", e);
            Ok(None)
        }
        Err(e) => Err(e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generator_from_unconfigured() {
        let config = LlmConfig::default();
        assert!(generator_from_config(&config).unwrap().is_none());

        let mut disabled = LlmConfig::default();
        disabled.api_key = Some("key".to_string());
        disabled.enabled = false;
        assert!(generator_from_config(&disabled).unwrap().is_none());
    }

    #[test]
    fn test_generator_from_configured() {
        let mut config = LlmConfig::default();
        config.api_key = Some("key".to_string());
        assert!(generator_from_config(&config).unwrap().is_some());
    }
}
