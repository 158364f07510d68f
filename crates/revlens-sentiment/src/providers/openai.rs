//! OpenAI-style chat completions.

use reqwest::Url;
use serde_json::{json, Value};

use super::{parse_base_url, text_at, ProviderAdapter, ProviderRequest};
use crate::error::SentimentError;

const NAME: &str = "openai";
const SYSTEM_PROMPT: &str = "You analyze customer reviews and return strict JSON.";

pub struct OpenAiAdapter {
    endpoint: Url,
    model: String,
    api_key: Option<String>,
}

impl OpenAiAdapter {
    /// `base_url` is the API root including the version segment, e.g.
    /// `https://api.openai.com/v1`; requests go to `<base_url>/chat/completions`.
    ///
    /// # Errors
    ///
    /// Returns [`SentimentError::InvalidEndpoint`] if `base_url` is not a valid URL.
    pub fn new(base_url: &str, model: &str, api_key: Option<&str>) -> Result<Self, SentimentError> {
        let base = parse_base_url(NAME, base_url)?;
        let endpoint_raw = format!("{base}/chat/completions");
        let endpoint = Url::parse(&endpoint_raw).map_err(|e| SentimentError::InvalidEndpoint {
            provider: NAME,
            url: endpoint_raw.clone(),
            reason: e.to_string(),
        })?;

        if api_key.is_none() {
            tracing::warn!("OPENAI_API_KEY is not set; OpenAI requests will be unauthenticated");
        }

        Ok(Self {
            endpoint,
            model: model.to_string(),
            api_key: api_key.map(ToOwned::to_owned),
        })
    }
}

impl std::fmt::Debug for OpenAiAdapter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OpenAiAdapter")
            .field("endpoint", &self.endpoint.as_str())
            .field("model", &self.model)
            .field("api_key", &self.api_key.as_ref().map(|_| "[redacted]"))
            .finish()
    }
}

impl ProviderAdapter for OpenAiAdapter {
    fn name(&self) -> &'static str {
        NAME
    }

    fn build_request(&self, prompt: &str) -> ProviderRequest {
        ProviderRequest {
            url: self.endpoint.clone(),
            bearer_token: self.api_key.clone(),
            body: json!({
                "model": self.model,
                "messages": [
                    { "role": "system", "content": SYSTEM_PROMPT },
                    { "role": "user", "content": prompt },
                ],
                "temperature": 0.2,
                "response_format": { "type": "json_object" },
            }),
        }
    }

    fn extract_text(&self, response: &Value) -> String {
        text_at(response, "/choices/0/message/content")
    }
}
