use std::collections::HashMap;
use std::env::VarError;

use super::*;

fn lookup_from_map<'a>(
    map: &'a HashMap<&'a str, &'a str>,
) -> impl Fn(&str) -> Result<String, VarError> + 'a {
    move |key| {
        map.get(key)
            .map(|v| (*v).to_string())
            .ok_or(VarError::NotPresent)
    }
}

#[test]
fn build_app_config_defaults_with_empty_env() {
    let map: HashMap<&str, &str> = HashMap::new();
    let cfg = build_app_config(lookup_from_map(&map)).expect("defaults should be valid");
    assert_eq!(cfg.api_base_url, "http://localhost:3000");
    assert_eq!(cfg.log_level, "info");
    assert!(cfg.stores_path.is_none());
    assert_eq!(cfg.request_timeout_secs, 30);
    assert_eq!(cfg.user_agent, "partsfinder/0.1 (multi-store-search)");
    assert_eq!(cfg.max_retries, 1);
    assert_eq!(cfg.retry_backoff_base_secs, 1);
}

#[test]
fn api_url_override_strips_trailing_slash() {
    let mut map = HashMap::new();
    map.insert("PARTSFINDER_API_URL", "https://search.example.com/api/");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.api_base_url, "https://search.example.com/api");
}

#[test]
fn api_url_invalid() {
    let mut map = HashMap::new();
    map.insert("PARTSFINDER_API_URL", "localhost:3000");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "PARTSFINDER_API_URL"),
        "expected InvalidEnvVar(PARTSFINDER_API_URL), got: {result:?}"
    );
}

#[test]
fn api_url_flag_replaces_env_value() {
    let map: HashMap<&str, &str> = HashMap::from([("PARTSFINDER_API_URL", "not a url")]);
    let cfg = build_app_config(with_api_url(
        lookup_from_map(&map),
        Some("https://parts.example.com/api/"),
    ))
    .expect("flag should replace the invalid env value");
    assert_eq!(cfg.api_base_url, "https://parts.example.com/api");
}

#[test]
fn api_url_flag_is_validated() {
    let map: HashMap<&str, &str> = HashMap::new();
    let result = build_app_config(with_api_url(lookup_from_map(&map), Some("ftp://files")));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "PARTSFINDER_API_URL"),
        "expected InvalidEnvVar for PARTSFINDER_API_URL, got: {result:?}"
    );
}

#[test]
fn api_url_flag_absent_keeps_env_value() {
    let map: HashMap<&str, &str> = HashMap::from([("PARTSFINDER_API_URL", "http://search.internal:8080")]);
    let cfg = build_app_config(with_api_url(lookup_from_map(&map), None)).unwrap();
    assert_eq!(cfg.api_base_url, "http://search.internal:8080");
}

#[test]
fn api_url_without_host_is_invalid() {
    let mut map = HashMap::new();
    map.insert("PARTSFINDER_API_URL", "http://");
    let result = build_app_config(lookup_from_map(&map));
    assert!(matches!(result, Err(ConfigError::InvalidEnvVar { .. })));
}

#[test]
fn stores_path_override() {
    let mut map = HashMap::new();
    map.insert("PARTSFINDER_STORES_PATH", "./config/stores.yaml");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(
        cfg.stores_path.as_deref(),
        Some(std::path::Path::new("./config/stores.yaml"))
    );
}

#[test]
fn stores_path_blank_is_ignored() {
    let mut map = HashMap::new();
    map.insert("PARTSFINDER_STORES_PATH", "  ");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert!(cfg.stores_path.is_none());
}

#[test]
fn store_registry_defaults_to_builtin() {
    let map: HashMap<&str, &str> = HashMap::new();
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(
        cfg.store_registry().unwrap(),
        crate::StoreRegistry::builtin()
    );
}

#[test]
fn store_registry_reports_missing_file() {
    let mut map = HashMap::new();
    map.insert("PARTSFINDER_STORES_PATH", "/definitely/not/here.yaml");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert!(matches!(
        cfg.store_registry(),
        Err(ConfigError::StoresFileIo { .. })
    ));
}

#[test]
fn request_timeout_override() {
    let mut map = HashMap::new();
    map.insert("PARTSFINDER_REQUEST_TIMEOUT_SECS", "5");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.request_timeout_secs, 5);
}

#[test]
fn request_timeout_invalid() {
    let mut map = HashMap::new();
    map.insert("PARTSFINDER_REQUEST_TIMEOUT_SECS", "not-a-number");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "PARTSFINDER_REQUEST_TIMEOUT_SECS"),
        "expected InvalidEnvVar(PARTSFINDER_REQUEST_TIMEOUT_SECS), got: {result:?}"
    );
}

#[test]
fn request_timeout_zero_is_rejected() {
    let mut map = HashMap::new();
    map.insert("PARTSFINDER_REQUEST_TIMEOUT_SECS", "0");
    let result = build_app_config(lookup_from_map(&map));
    assert!(matches!(result, Err(ConfigError::InvalidEnvVar { .. })));
}

#[test]
fn user_agent_override() {
    let mut map = HashMap::new();
    map.insert("PARTSFINDER_USER_AGENT", "custom-agent/2.0");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.user_agent, "custom-agent/2.0");
}

#[test]
fn max_retries_override() {
    let mut map = HashMap::new();
    map.insert("PARTSFINDER_MAX_RETRIES", "0");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.max_retries, 0);
}

#[test]
fn max_retries_invalid() {
    let mut map = HashMap::new();
    map.insert("PARTSFINDER_MAX_RETRIES", "-1");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "PARTSFINDER_MAX_RETRIES"),
        "expected InvalidEnvVar(PARTSFINDER_MAX_RETRIES), got: {result:?}"
    );
}

#[test]
fn retry_backoff_base_secs_invalid() {
    let mut map = HashMap::new();
    map.insert("PARTSFINDER_RETRY_BACKOFF_BASE_SECS", "soon");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "PARTSFINDER_RETRY_BACKOFF_BASE_SECS"),
        "expected InvalidEnvVar(PARTSFINDER_RETRY_BACKOFF_BASE_SECS), got: {result:?}"
    );
}
