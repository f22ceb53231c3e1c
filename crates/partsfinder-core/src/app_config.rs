use std::path::PathBuf;

use crate::stores::{load_store_registry, StoreRegistry};
use crate::ConfigError;

#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Base URL of the aggregated search backend; `/search` is joined onto it.
    pub api_base_url: String,
    pub log_level: String,
    /// Optional YAML file replacing the built-in store registry.
    pub stores_path: Option<PathBuf>,
    pub request_timeout_secs: u64,
    pub user_agent: String,
    pub max_retries: u32,
    pub retry_backoff_base_secs: u64,
}

impl AppConfig {
    /// Returns the store registry this configuration selects: the file at
    /// `stores_path` when set, the built-in registry otherwise.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the stores file cannot be read, parsed, or
    /// fails validation.
    pub fn store_registry(&self) -> Result<StoreRegistry, ConfigError> {
        match &self.stores_path {
            Some(path) => load_store_registry(path),
            None => Ok(StoreRegistry::builtin()),
        }
    }
}
