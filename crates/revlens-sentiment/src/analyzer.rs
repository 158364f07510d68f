//! Sentiment orchestration.

use std::time::Duration;

use reqwest::Client;
use revlens_core::{LlmConfig, ProviderKind};
use serde_json::Value;

use crate::error::SentimentError;
use crate::normalize::normalize;
use crate::prompt::build_prompt;
use crate::providers::{mock_result, Provider, ProviderAdapter, ProviderRequest};
use crate::types::SentimentResult;

const USER_AGENT: &str = "revlens/0.1 (review-sentiment)";

/// Runs sentiment analysis against the provider chosen at construction.
///
/// Holds no per-request state; one instance can serve concurrent requests.
#[derive(Debug)]
pub struct SentimentAnalyzer {
    provider: Provider,
    client: Client,
}

impl SentimentAnalyzer {
    /// Select the provider from `config` and build the outbound HTTP client.
    ///
    /// # Errors
    ///
    /// Returns [`SentimentError::InvalidEndpoint`] for an unparseable provider
    /// base URL, or [`SentimentError::Http`] if the client cannot be built.
    pub fn new(config: &LlmConfig) -> Result<Self, SentimentError> {
        let provider = Provider::from_config(config)?;
        let client = Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(USER_AGENT)
            .build()?;

        tracing::info!(provider = %provider.kind(), "sentiment provider selected");

        Ok(Self { provider, client })
    }

    #[must_use]
    pub fn provider_kind(&self) -> ProviderKind {
        self.provider.kind()
    }

    /// Analyze the reviews of one product.
    ///
    /// The mock provider returns [`mock_result`] without any I/O. Network
    /// providers make exactly one request; whatever text comes back goes
    /// through [`normalize`], so malformed model output never surfaces as an
    /// error. Empty `product_name` and empty `review_texts` are accepted.
    ///
    /// # Errors
    ///
    /// Returns [`SentimentError::Http`] on transport failure,
    /// [`SentimentError::UnexpectedStatus`] on a non-2xx response, and
    /// [`SentimentError::Decode`] if the response envelope is not JSON.
    pub async fn analyze<S: AsRef<str>>(
        &self,
        product_name: &str,
        review_texts: &[S],
    ) -> Result<SentimentResult, SentimentError> {
        let Some(adapter) = self.provider.adapter() else {
            return Ok(mock_result());
        };

        let prompt = build_prompt(product_name, review_texts);
        let request = adapter.build_request(&prompt);
        let response = self.send(adapter, request).await?;
        let text = adapter.extract_text(&response);

        Ok(normalize(&text, product_name))
    }

    async fn send(
        &self,
        adapter: &dyn ProviderAdapter,
        request: ProviderRequest,
    ) -> Result<Value, SentimentError> {
        let provider = adapter.name();
        // The URL may carry an API key in its query string; log the host only.
        tracing::debug!(
            provider,
            host = request.url.host_str().unwrap_or_default(),
            "sending sentiment request"
        );

        let mut builder = self.client.post(request.url).json(&request.body);
        if let Some(token) = request.bearer_token.as_deref() {
            builder = builder.bearer_auth(token);
        }

        let response = builder.send().await.map_err(reqwest::Error::without_url)?;
        let status = response.status();
        if !status.is_success() {
            return Err(SentimentError::UnexpectedStatus {
                provider,
                status: status.as_u16(),
            });
        }

        let bytes = response.bytes().await.map_err(reqwest::Error::without_url)?;
        serde_json::from_slice(&bytes).map_err(|source| SentimentError::Decode { provider, source })
    }
}

/// One-shot analysis with a freshly built [`SentimentAnalyzer`].
///
/// Long-running hosts should build the analyzer once and call
/// [`SentimentAnalyzer::analyze`] instead.
///
/// # Errors
///
/// See [`SentimentAnalyzer::new`] and [`SentimentAnalyzer::analyze`].
pub async fn analyze_sentiment<S: AsRef<str>>(
    config: &LlmConfig,
    product_name: &str,
    review_texts: &[S],
) -> Result<SentimentResult, SentimentError> {
    SentimentAnalyzer::new(config)?
        .analyze(product_name, review_texts)
        .await
}
