use bookblurb_core::{Config, Discovery, SanitizedConfig};

/// Shared application state
pub struct AppState {
    config: Config,
    discovery: Discovery,
}

impl AppState {
    pub fn new(config: Config, discovery: Discovery) -> Self {
        Self { config, discovery }
    }

    pub fn discovery(&self) -> &Discovery {
        &self.discovery
    }

    pub fn sanitized_config(&self) -> SanitizedConfig {
        SanitizedConfig::from(&self.config)
    }
}
