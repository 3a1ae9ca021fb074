use std::path::PathBuf;

use crate::app_config::{AppConfig, Environment};
use crate::ConfigError;

const DEFAULT_API_BASE_URL: &str = "http://127.0.0.1:8000/api";

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if a value is present but invalid, or if
/// `MELO_API_BASE_URL` is unset in production.
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
/// Returns `ConfigError` if a value is present but invalid, or if
/// `MELO_API_BASE_URL` is unset in production.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// Decoupled from the real environment so tests can feed a plain `HashMap`.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let optional = |var: &str| -> Option<String> {
        lookup(var)
            .ok()
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u64>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let env = parse_environment(&or_default("MELO_ENV", "development"))?;

    // Required in production; defaults to the local backend otherwise.
    let api_base_url = match (lookup("MELO_API_BASE_URL"), &env) {
        (Ok(url), _) => url,
        (Err(_), Environment::Production) => {
            return Err(ConfigError::MissingEnvVar("MELO_API_BASE_URL".to_string()));
        }
        (Err(_), _) => DEFAULT_API_BASE_URL.to_string(),
    };
    if !(api_base_url.starts_with("http://") || api_base_url.starts_with("https://")) {
        return Err(ConfigError::InvalidEnvVar {
            var: "MELO_API_BASE_URL".to_string(),
            reason: format!("expected an http(s) URL, got \"{api_base_url}\""),
        });
    }

    let log_level = or_default("MELO_LOG_LEVEL", "info");
    let request_timeout_secs = parse_u64("MELO_REQUEST_TIMEOUT_SECS", "15")?;
    let user_agent = or_default("MELO_USER_AGENT", "melo-storefront/0.1");
    let token_path = PathBuf::from(or_default("MELO_TOKEN_PATH", "./.melo/tokens.json"));
    let slides_path = optional("MELO_SLIDES_PATH").map(PathBuf::from);
    let autocomplete_debounce_ms = parse_u64("MELO_AUTOCOMPLETE_DEBOUNCE_MS", "300")?;
    let whatsapp_phone = optional("MELO_WHATSAPP_PHONE");

    Ok(AppConfig {
        env,
        api_base_url,
        log_level,
        request_timeout_secs,
        user_agent,
        token_path,
        slides_path,
        autocomplete_debounce_ms,
        whatsapp_phone,
    })
}

/// Parse a string into an `Environment` variant.
fn parse_environment(s: &str) -> Result<Environment, ConfigError> {
    match s {
        "development" => Ok(Environment::Development),
        "test" => Ok(Environment::Test),
        "production" => Ok(Environment::Production),
        other => Err(ConfigError::InvalidEnvVar {
            var: "MELO_ENV".to_string(),
            reason: format!("unknown environment \"{other}\""),
        }),
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
