use std::net::SocketAddr;

use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    Development,
    Test,
    Production,
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Test => write!(f, "test"),
            Environment::Production => write!(f, "production"),
        }
    }
}

/// Which sentiment backend the analyzer talks to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderKind {
    Mock,
    OpenAi,
    Gemini,
}

impl ProviderKind {
    /// Parse an `LLM_PROVIDER` value.
    ///
    /// Matching is case-insensitive and ignores surrounding whitespace.
    /// Anything other than `openai` or `gemini` selects [`ProviderKind::Mock`].
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        match raw.trim().to_ascii_lowercase().as_str() {
            "openai" => Self::OpenAi,
            "gemini" => Self::Gemini,
            _ => Self::Mock,
        }
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Mock => "mock",
            Self::OpenAi => "openai",
            Self::Gemini => "gemini",
        }
    }
}

impl std::fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Settings for the sentiment provider, resolved once at startup.
#[derive(Clone)]
pub struct LlmConfig {
    pub provider: ProviderKind,
    pub openai_api_key: Option<String>,
    pub openai_model: String,
    /// Base URL up to and including the API version, e.g. `https://api.openai.com/v1`.
    pub openai_base_url: String,
    pub gemini_api_key: Option<String>,
    pub gemini_model: String,
    pub gemini_base_url: String,
    /// Applied to the outbound HTTP client; the analyzer adds no timeout of its own.
    pub request_timeout_secs: u64,
}

impl LlmConfig {
    pub const DEFAULT_OPENAI_MODEL: &'static str = "gpt-4o-mini";
    pub const DEFAULT_OPENAI_BASE_URL: &'static str = "https://api.openai.com/v1";
    pub const DEFAULT_GEMINI_MODEL: &'static str = "gemini-1.5-flash";
    pub const DEFAULT_GEMINI_BASE_URL: &'static str = "https://generativelanguage.googleapis.com";
    pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 60;

    /// A config that selects the mock provider with default models.
    #[must_use]
    pub fn mock() -> Self {
        Self {
            provider: ProviderKind::Mock,
            openai_api_key: None,
            openai_model: Self::DEFAULT_OPENAI_MODEL.to_string(),
            openai_base_url: Self::DEFAULT_OPENAI_BASE_URL.to_string(),
            gemini_api_key: None,
            gemini_model: Self::DEFAULT_GEMINI_MODEL.to_string(),
            gemini_base_url: Self::DEFAULT_GEMINI_BASE_URL.to_string(),
            request_timeout_secs: Self::DEFAULT_REQUEST_TIMEOUT_SECS,
        }
    }
}

impl std::fmt::Debug for LlmConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LlmConfig")
            .field("provider", &self.provider)
            .field(
                "openai_api_key",
                &self.openai_api_key.as_ref().map(|_| "[redacted]"),
            )
            .field("openai_model", &self.openai_model)
            .field("openai_base_url", &self.openai_base_url)
            .field(
                "gemini_api_key",
                &self.gemini_api_key.as_ref().map(|_| "[redacted]"),
            )
            .field("gemini_model", &self.gemini_model)
            .field("gemini_base_url", &self.gemini_base_url)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .finish()
    }
}

#[derive(Clone)]
pub struct AppConfig {
    pub database_url: String,
    pub env: Environment,
    pub bind_addr: SocketAddr,
    pub log_level: String,
    pub db_max_connections: u32,
    pub db_min_connections: u32,
    pub db_acquire_timeout_secs: u64,
    /// `None` only when `JWT_SECRET` is unset; the server decides whether that is fatal.
    pub jwt_secret: Option<String>,
    pub jwt_expires_in_secs: u64,
    pub llm: LlmConfig,
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("env", &self.env)
            .field("bind_addr", &self.bind_addr)
            .field("log_level", &self.log_level)
            .field("database_url", &"[redacted]")
            .field("db_max_connections", &self.db_max_connections)
            .field("db_min_connections", &self.db_min_connections)
            .field("db_acquire_timeout_secs", &self.db_acquire_timeout_secs)
            .field("jwt_secret", &self.jwt_secret.as_ref().map(|_| "[redacted]"))
            .field("jwt_expires_in_secs", &self.jwt_expires_in_secs)
            .field("llm", &self.llm)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn provider_kind_parse_is_case_insensitive() {
        assert_eq!(ProviderKind::parse("OpenAI"), ProviderKind::OpenAi);
        assert_eq!(ProviderKind::parse(" GEMINI "), ProviderKind::Gemini);
        assert_eq!(ProviderKind::parse("mock"), ProviderKind::Mock);
    }

    #[test]
    fn provider_kind_parse_unknown_falls_back_to_mock() {
        assert_eq!(ProviderKind::parse("foo"), ProviderKind::Mock);
        assert_eq!(ProviderKind::parse(""), ProviderKind::Mock);
    }

    #[test]
    fn llm_config_debug_redacts_keys() {
        let mut cfg = LlmConfig::mock();
        cfg.openai_api_key = Some("sk-secret".to_string());
        let rendered = format!("{cfg:?}");
        assert!(!rendered.contains("sk-secret"));
        assert!(rendered.contains("[redacted]"));
    }
}
