use crate::app_config::AppConfig;
use crate::ConfigError;

pub const DEFAULT_API_BASE_URL: &str = "http://localhost:3000";
pub const DEFAULT_USER_AGENT: &str = "partsfinder/0.1 (multi-store-search)";

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if a value is present but invalid.
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
/// Returns `ConfigError` if a value is present but invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Load configuration from the process environment, with `api_url` (when
/// set) taking the place of `PARTSFINDER_API_URL`.
///
/// The override is validated like the variable it replaces.
///
/// # Errors
///
/// Returns `ConfigError` if a value is present but invalid.
pub fn load_app_config_with_api_url(api_url: Option<&str>) -> Result<AppConfig, ConfigError> {
    build_app_config(with_api_url(|key| std::env::var(key), api_url))
}

/// Wraps `lookup` so that `PARTSFINDER_API_URL` reads `api_url` when set.
fn with_api_url<'a, F>(
    lookup: F,
    api_url: Option<&'a str>,
) -> impl Fn(&str) -> Result<String, std::env::VarError> + 'a
where
    F: Fn(&str) -> Result<String, std::env::VarError> + 'a,
{
    move |key| match api_url {
        Some(url) if key == "PARTSFINDER_API_URL" => Ok(url.to_owned()),
        _ => lookup(key),
    }
}

/// Build application configuration using the provided env-var lookup function.
///
/// Decoupled from the real environment so it can be tested with a plain
/// `HashMap` lookup.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::path::PathBuf;

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
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

    let api_base_url = parse_base_url(
        "PARTSFINDER_API_URL",
        &or_default("PARTSFINDER_API_URL", DEFAULT_API_BASE_URL),
    )?;
    let log_level = or_default("PARTSFINDER_LOG_LEVEL", "info");
    let stores_path = lookup("PARTSFINDER_STORES_PATH")
        .ok()
        .filter(|s| !s.trim().is_empty())
        .map(PathBuf::from);

    let request_timeout_secs = parse_u64("PARTSFINDER_REQUEST_TIMEOUT_SECS", "30")?;
    if request_timeout_secs == 0 {
        return Err(ConfigError::InvalidEnvVar {
            var: "PARTSFINDER_REQUEST_TIMEOUT_SECS".to_string(),
            reason: "timeout must be at least 1 second".to_string(),
        });
    }
    let user_agent = or_default("PARTSFINDER_USER_AGENT", DEFAULT_USER_AGENT);
    let max_retries = parse_u32("PARTSFINDER_MAX_RETRIES", "1")?;
    let retry_backoff_base_secs = parse_u64("PARTSFINDER_RETRY_BACKOFF_BASE_SECS", "1")?;

    Ok(AppConfig {
        api_base_url,
        log_level,
        stores_path,
        request_timeout_secs,
        user_agent,
        max_retries,
        retry_backoff_base_secs,
    })
}

/// Checks that `raw` looks like an absolute http(s) URL and strips any
/// trailing slashes.
fn parse_base_url(var: &str, raw: &str) -> Result<String, ConfigError> {
    let trimmed = raw.trim().trim_end_matches('/');
    let rest = trimmed
        .strip_prefix("http://")
        .or_else(|| trimmed.strip_prefix("https://"));
    match rest {
        Some(host) if !host.is_empty() && !host.starts_with('/') => Ok(trimmed.to_string()),
        _ => Err(ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: format!("\"{raw}\" is not an http(s) URL"),
        }),
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
