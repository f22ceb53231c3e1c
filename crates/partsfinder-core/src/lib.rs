pub mod app_config;
pub mod config;
pub mod products;
pub mod stores;

pub use app_config::AppConfig;
pub use config::{load_app_config, load_app_config_from_env, load_app_config_with_api_url};
pub use products::{Price, Product};
pub use stores::{load_store_registry, StoreDescriptor, StoreRegistry, DEFAULT_PRESENTATION_TAG};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },

    #[error("failed to read stores file {path}: {source}")]
    StoresFileIo {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse stores file: {0}")]
    StoresFileParse(#[source] serde_yaml::Error),

    #[error("stores validation failed: {0}")]
    Validation(String),
}
