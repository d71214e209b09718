use super::{types::Config, ConfigError};

/// Upper bound Google Books accepts for `maxResults`.
const MAX_CATALOG_RESULTS: u32 = 40;

/// Validate configuration
/// Currently validates:
/// - Server port is not 0
/// - Catalog page size is within what the API accepts
/// - LLM sampling parameters are usable
pub fn validate_config(config: &Config) -> Result<(), ConfigError> {
    if config.server.port == 0 {
        return Err(ConfigError::ValidationError(
            "server.port cannot be 0".to_string(),
        ));
    }

    if !(1..=MAX_CATALOG_RESULTS).contains(&config.catalog.max_results) {
        return Err(ConfigError::ValidationError(format!(
            "catalog.max_results must be between 1 and {}, got {}",
            MAX_CATALOG_RESULTS, config.catalog.max_results
        )));
    }

    if !(0.0..=2.0).contains(&config.llm.temperature) {
        return Err(ConfigError::ValidationError(format!(
            "llm.temperature must be between 0.0 and 2.0, got {}",
            config.llm.temperature
        )));
    }

    if config.llm.max_tokens == 0 {
        return Err(ConfigError::ValidationError(
            "llm.max_tokens cannot be 0".to_string(),
        ));
    }

    Ok(())
}
