use figment::{
    providers::{Env, Format, Toml},
    Figment,
};
use std::path::Path;

use super::{types::Config, ConfigError};

/// Environment variable holding the catalog API key.
pub const CATALOG_KEY_ENV: &str = "GOOGLE_KEY";

/// Environment variable holding the language model API key.
pub const LLM_KEY_ENV: &str = "OPENAI_KEY";

/// Load configuration from file with environment variable overrides
///
/// Precedence, lowest first: the TOML file, the provider key variables
/// (`GOOGLE_KEY`, `OPENAI_KEY`), then `BOOKBLURB_`-prefixed variables
/// nested with `__` (e.g. `BOOKBLURB_SERVER__PORT`).
pub fn load_config(path: &Path) -> Result<Config, ConfigError> {
    if !path.exists() {
        return Err(ConfigError::FileNotFound(path.display().to_string()));
    }

    extract(with_env(Figment::new().merge(Toml::file(path))))
}

/// Like [`load_config`], but a missing file means built-in defaults.
///
/// Used for the implicit `config.toml`, so a deployment can be configured
/// through the environment alone.
pub fn load_config_or_defaults(path: &Path) -> Result<Config, ConfigError> {
    if path.exists() {
        return load_config(path);
    }

    extract(with_env(Figment::new()))
}

/// Load configuration from TOML string (useful for testing)
pub fn load_config_from_str(toml_str: &str) -> Result<Config, ConfigError> {
    toml::from_str(toml_str).map_err(|e| ConfigError::ParseError(e.to_string()))
}

fn with_env(figment: Figment) -> Figment {
    figment
        .merge(
            Env::raw()
                .only(&[CATALOG_KEY_ENV])
                .map(|_| "catalog.api_key".into()),
        )
        .merge(
            Env::raw()
                .only(&[LLM_KEY_ENV])
                .map(|_| "llm.api_key".into()),
        )
        .merge(Env::prefixed("BOOKBLURB_").split("__"))
}

fn extract(figment: Figment) -> Result<Config, ConfigError> {
    figment
        .extract()
        .map_err(|e| ConfigError::ParseError(e.to_string()))
}
