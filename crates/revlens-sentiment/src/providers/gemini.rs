//! Gemini `generateContent`.

use reqwest::Url;
use serde_json::{json, Value};

use super::{parse_base_url, text_at, ProviderAdapter, ProviderRequest};
use crate::error::SentimentError;

const NAME: &str = "gemini";

pub struct GeminiAdapter {
    endpoint: Url,
    api_key: Option<String>,
}

impl GeminiAdapter {
    /// Requests go to `<base_url>/v1beta/models/<model>:generateContent?key=<api_key>`.
    ///
    /// # Errors
    ///
    /// Returns [`SentimentError::InvalidEndpoint`] if the resulting URL is invalid.
    pub fn new(base_url: &str, model: &str, api_key: Option<&str>) -> Result<Self, SentimentError> {
        let base = parse_base_url(NAME, base_url)?;
        let endpoint_raw = format!("{base}/v1beta/models/{model}:generateContent");
        let endpoint = Url::parse(&endpoint_raw).map_err(|e| SentimentError::InvalidEndpoint {
            provider: NAME,
            url: endpoint_raw.clone(),
            reason: e.to_string(),
        })?;

        if api_key.is_none() {
            tracing::warn!("GEMINI_API_KEY is not set; Gemini requests will be sent with an empty key");
        }

        Ok(Self {
            endpoint,
            api_key: api_key.map(ToOwned::to_owned),
        })
    }
}

impl std::fmt::Debug for GeminiAdapter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeminiAdapter")
            .field("endpoint", &self.endpoint.as_str())
            .field("api_key", &self.api_key.as_ref().map(|_| "[redacted]"))
            .finish()
    }
}

impl ProviderAdapter for GeminiAdapter {
    fn name(&self) -> &'static str {
        NAME
    }

    fn build_request(&self, prompt: &str) -> ProviderRequest {
        let mut url = self.endpoint.clone();
        url.query_pairs_mut()
            .append_pair("key", self.api_key.as_deref().unwrap_or_default());

        ProviderRequest {
            url,
            bearer_token: None,
            body: json!({
                "contents": [{ "parts": [{ "text": prompt }] }],
                "generationConfig": { "temperature": 0.2 },
            }),
        }
    }

    fn extract_text(&self, response: &Value) -> String {
        text_at(response, "/candidates/0/content/parts/0/text")
    }
}
