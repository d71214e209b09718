use serde::{Deserialize, Serialize};
use std::net::IpAddr;
use std::path::PathBuf;

/// Root configuration
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub catalog: CatalogConfig,
    #[serde(default)]
    pub llm: LlmConfig,
    #[serde(default)]
    pub labels: LabelsConfig,
    #[serde(default)]
    pub cache: CacheConfig,
}

/// Server configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: IpAddr,
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

fn default_host() -> IpAddr {
    IpAddr::from([0, 0, 0, 0])
}

fn default_port() -> u16 {
    8000
}

/// Book catalog (Google Books) configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CatalogConfig {
    /// API key. Optional for Google Books, also read from `GOOGLE_KEY`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
    /// Base URL (default: https://www.googleapis.com/books/v1)
    #[serde(default = "default_catalog_base_url")]
    pub base_url: String,
    /// Results requested per search (first page only)
    #[serde(default = "default_max_results")]
    pub max_results: u32,
    /// Request timeout in seconds (default: 30)
    #[serde(default = "default_timeout")]
    pub timeout_secs: u32,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: default_catalog_base_url(),
            max_results: default_max_results(),
            timeout_secs: default_timeout(),
        }
    }
}

fn default_catalog_base_url() -> String {
    "https://www.googleapis.com/books/v1".to_string()
}

fn default_max_results() -> u32 {
    10
}

fn default_timeout() -> u32 {
    30
}

/// Language model configuration (OpenAI-compatible chat completions)
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LlmConfig {
    /// API key, also read from `OPENAI_KEY`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
    /// API base URL (for proxies or self-hosted compatible servers)
    #[serde(default = "default_llm_api_base")]
    pub api_base: String,
    /// Model name
    #[serde(default = "default_llm_model")]
    pub model: String,
    /// Sampling temperature for teasers
    #[serde(default = "default_temperature")]
    pub temperature: f32,
    /// Maximum output tokens for teasers
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,
    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_secs: u32,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            api_base: default_llm_api_base(),
            model: default_llm_model(),
            temperature: default_temperature(),
            max_tokens: default_max_tokens(),
            timeout_secs: default_timeout(),
        }
    }
}

fn default_llm_api_base() -> String {
    "https://api.openai.com".to_string()
}

fn default_llm_model() -> String {
    "gpt-3.5-turbo".to_string()
}

fn default_temperature() -> f32 {
    0.7
}

fn default_max_tokens() -> u32 {
    60
}

/// Label dictionary sources
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LabelsConfig {
    #[serde(default = "default_triggers_path")]
    pub triggers_path: PathBuf,
    #[serde(default = "default_themes_path")]
    pub themes_path: PathBuf,
}

impl Default for LabelsConfig {
    fn default() -> Self {
        Self {
            triggers_path: default_triggers_path(),
            themes_path: default_themes_path(),
        }
    }
}

fn default_triggers_path() -> PathBuf {
    PathBuf::from("static/triggers.json")
}

fn default_themes_path() -> PathBuf {
    PathBuf::from("static/themes.json")
}

/// Summary cache configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CacheConfig {
    #[serde(default = "default_cache_path")]
    pub path: PathBuf,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            path: default_cache_path(),
        }
    }
}

fn default_cache_path() -> PathBuf {
    PathBuf::from("summary_cache.json")
}

/// Sanitized config for logging and API responses (secrets redacted)
#[derive(Debug, Clone, Serialize)]
pub struct SanitizedConfig {
    pub server: ServerConfig,
    pub catalog: SanitizedCatalogConfig,
    pub llm: SanitizedLlmConfig,
    pub labels: LabelsConfig,
    pub cache: CacheConfig,
}

#[derive(Debug, Clone, Serialize)]
pub struct SanitizedCatalogConfig {
    pub base_url: String,
    pub api_key_configured: bool,
    pub max_results: u32,
    pub timeout_secs: u32,
}

#[derive(Debug, Clone, Serialize)]
pub struct SanitizedLlmConfig {
    pub api_base: String,
    pub model: String,
    pub api_key_configured: bool,
    pub temperature: f32,
    pub max_tokens: u32,
    pub timeout_secs: u32,
}

fn has_key(key: &Option<String>) -> bool {
    key.as_deref().is_some_and(|k| !k.is_empty())
}

impl From<&Config> for SanitizedConfig {
    fn from(config: &Config) -> Self {
        Self {
            server: config.server.clone(),
            catalog: SanitizedCatalogConfig {
                base_url: config.catalog.base_url.clone(),
                api_key_configured: has_key(&config.catalog.api_key),
                max_results: config.catalog.max_results,
                timeout_secs: config.catalog.timeout_secs,
            },
            llm: SanitizedLlmConfig {
                api_base: config.llm.api_base.clone(),
                model: config.llm.model.clone(),
                api_key_configured: has_key(&config.llm.api_key),
                temperature: config.llm.temperature,
                max_tokens: config.llm.max_tokens,
                timeout_secs: config.llm.timeout_secs,
            },
            labels: config.labels.clone(),
            cache: config.cache.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_empty_config_uses_defaults() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.server.port, 8000);
        assert_eq!(config.server.host.to_string(), "0.0.0.0");
        assert_eq!(config.catalog.max_results, 10);
        assert_eq!(config.llm.model, "gpt-3.5-turbo");
        assert_eq!(config.llm.max_tokens, 60);
        assert!((config.llm.temperature - 0.7).abs() < f32::EPSILON);
        assert_eq!(config.cache.path, PathBuf::from("summary_cache.json"));
        assert_eq!(
            config.labels.triggers_path,
            PathBuf::from("static/triggers.json")
        );
    }

    #[test]
    fn test_deserialize_overrides() {
        let toml = r#"
[server]
host = "127.0.0.1"
port = 9000

[catalog]
api_key = "g-key"
max_results = 5

[llm]
model = "gpt-4o-mini"
api_base = "http://localhost:11434"

[cache]
path = "/tmp/teasers.json"
"#;
        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.server.port, 9000);
        assert_eq!(config.catalog.api_key.as_deref(), Some("g-key"));
        assert_eq!(config.catalog.max_results, 5);
        assert_eq!(config.llm.model, "gpt-4o-mini");
        assert_eq!(config.llm.api_base, "http://localhost:11434");
        assert_eq!(config.cache.path, PathBuf::from("/tmp/teasers.json"));
    }

    #[test]
    fn test_sanitized_config_hides_keys() {
        let mut config = Config::default();
        config.catalog.api_key = Some("secret-google".to_string());
        config.llm.api_key = Some(String::new());

        let sanitized = SanitizedConfig::from(&config);
        assert!(sanitized.catalog.api_key_configured);
        assert!(!sanitized.llm.api_key_configured);

        let json = serde_json::to_string(&sanitized).unwrap();
        assert!(!json.contains("secret-google"));
    }
}
