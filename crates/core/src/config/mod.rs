mod loader;
mod types;
mod validate;

pub use loader::{
    load_config, load_config_from_str, load_config_or_defaults, CATALOG_KEY_ENV, LLM_KEY_ENV,
};
pub use types::*;
pub use validate::validate_config;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration file not found: {0}")]
    FileNotFound(String),

    #[error("Failed to parse configuration: {0}")]
    ParseError(String),

    #[error("Configuration validation failed: {0}")]
    ValidationError(String),
}
