use crate::app_config::{AppConfig, Environment, LlmConfig, ProviderKind};
use crate::ConfigError;

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if required env vars are missing or values are invalid.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files.
///
/// # Errors
///
/// Returns `ConfigError` if required env vars are missing or values are invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// Decoupled from the process environment so tests can drive it from a
/// `HashMap` without `set_var`/`remove_var`.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::net::SocketAddr;

    let require = |var: &str| -> Result<String, ConfigError> {
        lookup(var).map_err(|_| ConfigError::MissingEnvVar(var.to_string()))
    };

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    // Empty values count as unset; `.env` templates often carry `KEY=`.
    let optional = |var: &str| -> Option<String> {
        lookup(var)
            .ok()
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
    };

    let parse_u32 = |var: &str, default: &str| -> Result<u32, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u32>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u64>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let database_url = require("DATABASE_URL")?;
    let env = parse_environment(&or_default("REVLENS_ENV", "development"))?;

    let bind_addr = or_default("REVLENS_BIND_ADDR", "0.0.0.0:4000")
        .parse::<SocketAddr>()
        .map_err(|e| ConfigError::InvalidEnvVar {
            var: "REVLENS_BIND_ADDR".to_string(),
            reason: e.to_string(),
        })?;
    let log_level = or_default("REVLENS_LOG_LEVEL", "info");

    let db_max_connections = parse_u32("REVLENS_DB_MAX_CONNECTIONS", "10")?;
    let db_min_connections = parse_u32("REVLENS_DB_MIN_CONNECTIONS", "1")?;
    if db_min_connections > db_max_connections {
        return Err(ConfigError::InvalidEnvVar {
            var: "REVLENS_DB_MIN_CONNECTIONS".to_string(),
            reason: format!(
                "min connections ({db_min_connections}) exceeds max connections ({db_max_connections})"
            ),
        });
    }
    let db_acquire_timeout_secs = parse_u64("REVLENS_DB_ACQUIRE_TIMEOUT_SECS", "10")?;

    let jwt_secret = optional("JWT_SECRET");
    let jwt_expires_in_secs = parse_u64("JWT_EXPIRES_IN_SECS", "86400")?;

    let llm = LlmConfig {
        provider: ProviderKind::parse(&or_default("LLM_PROVIDER", "mock")),
        openai_api_key: optional("OPENAI_API_KEY"),
        openai_model: optional("OPENAI_MODEL")
            .unwrap_or_else(|| LlmConfig::DEFAULT_OPENAI_MODEL.to_string()),
        openai_base_url: optional("OPENAI_BASE_URL")
            .unwrap_or_else(|| LlmConfig::DEFAULT_OPENAI_BASE_URL.to_string()),
        gemini_api_key: optional("GEMINI_API_KEY"),
        gemini_model: optional("GEMINI_MODEL")
            .unwrap_or_else(|| LlmConfig::DEFAULT_GEMINI_MODEL.to_string()),
        gemini_base_url: optional("GEMINI_BASE_URL")
            .unwrap_or_else(|| LlmConfig::DEFAULT_GEMINI_BASE_URL.to_string()),
        request_timeout_secs: parse_u64(
            "LLM_REQUEST_TIMEOUT_SECS",
            &LlmConfig::DEFAULT_REQUEST_TIMEOUT_SECS.to_string(),
        )?,
    };

    Ok(AppConfig {
        database_url,
        env,
        bind_addr,
        log_level,
        db_max_connections,
        db_min_connections,
        db_acquire_timeout_secs,
        jwt_secret,
        jwt_expires_in_secs,
        llm,
    })
}

/// Parse a string into an `Environment` variant.
fn parse_environment(s: &str) -> Result<Environment, ConfigError> {
    match s {
        "development" => Ok(Environment::Development),
        "test" => Ok(Environment::Test),
        "production" => Ok(Environment::Production),
        other => Err(ConfigError::InvalidEnvVar {
            var: "REVLENS_ENV".to_string(),
            reason: format!("expected development, test, or production; got {other:?}"),
        }),
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
