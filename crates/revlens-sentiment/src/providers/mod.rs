//! Provider adapters.
//!
//! Each network provider knows how to turn a prompt into an HTTP request and
//! how to dig the model's text out of its response envelope. The mock
//! provider has no adapter: it short-circuits to [`mock_result`].

mod gemini;
mod mock;
mod openai;

pub use gemini::GeminiAdapter;
pub use mock::mock_result;
pub use openai::OpenAiAdapter;

use reqwest::Url;
use revlens_core::{LlmConfig, ProviderKind};
use serde_json::Value;

use crate::error::SentimentError;

/// Text substituted when a response envelope has no model output.
pub(crate) const EMPTY_OBJECT: &str = "{}";

/// A fully-formed outbound call, ready for the HTTP client.
#[derive(Debug, Clone)]
pub struct ProviderRequest {
    pub url: Url,
    /// Sent as `Authorization: Bearer <token>` when present.
    pub bearer_token: Option<String>,
    pub body: Value,
}

/// Request/response translation for one network provider.
pub trait ProviderAdapter: Send + Sync {
    /// Short provider name used in logs and errors.
    fn name(&self) -> &'static str;

    /// Build the outbound request for a prompt.
    fn build_request(&self, prompt: &str) -> ProviderRequest;

    /// Pull the model's raw text out of a decoded response envelope.
    ///
    /// Returns `"{}"` when the expected field is missing or empty.
    fn extract_text(&self, response: &Value) -> String;
}

/// The provider chosen for this process.
#[derive(Debug)]
pub enum Provider {
    Mock,
    OpenAi(OpenAiAdapter),
    Gemini(GeminiAdapter),
}

impl Provider {
    /// Build the provider selected by `config.provider`.
    ///
    /// # Errors
    ///
    /// Returns [`SentimentError::InvalidEndpoint`] if the configured base URL
    /// for the selected provider cannot be parsed.
    pub fn from_config(config: &LlmConfig) -> Result<Self, SentimentError> {
        Ok(match config.provider {
            ProviderKind::Mock => Self::Mock,
            ProviderKind::OpenAi => Self::OpenAi(OpenAiAdapter::new(
                &config.openai_base_url,
                &config.openai_model,
                config.openai_api_key.as_deref(),
            )?),
            ProviderKind::Gemini => Self::Gemini(GeminiAdapter::new(
                &config.gemini_base_url,
                &config.gemini_model,
                config.gemini_api_key.as_deref(),
            )?),
        })
    }

    #[must_use]
    pub fn kind(&self) -> ProviderKind {
        match self {
            Self::Mock => ProviderKind::Mock,
            Self::OpenAi(_) => ProviderKind::OpenAi,
            Self::Gemini(_) => ProviderKind::Gemini,
        }
    }

    /// The network adapter, or `None` for the mock provider.
    #[must_use]
    pub fn adapter(&self) -> Option<&dyn ProviderAdapter> {
        match self {
            Self::Mock => None,
            Self::OpenAi(adapter) => Some(adapter),
            Self::Gemini(adapter) => Some(adapter),
        }
    }
}

/// Parse a configured base URL, dropping trailing slashes so paths can be appended.
pub(crate) fn parse_base_url(provider: &'static str, raw: &str) -> Result<String, SentimentError> {
    let trimmed = raw.trim().trim_end_matches('/');
    Url::parse(trimmed).map_err(|e| SentimentError::InvalidEndpoint {
        provider,
        url: raw.to_string(),
        reason: e.to_string(),
    })?;
    Ok(trimmed.to_string())
}

/// Read a string at `pointer`, treating absent or empty values as `"{}"`.
pub(crate) fn text_at(response: &Value, pointer: &str) -> String {
    response
        .pointer(pointer)
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
        .unwrap_or(EMPTY_OBJECT)
        .to_string()
}
