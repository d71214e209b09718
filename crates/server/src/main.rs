use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use tokio::signal;
use tracing::{error, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use bookblurb_core::{
    load_config, load_config_or_defaults, validate_config, BookCatalog, Discovery,
    GoogleBooksClient, JsonFileCache, LabelDictionaries, LlmClient, OpenAiClient,
    SanitizedConfig, SummaryCache, TeaserGenerator,
};
use bookblurb_server::{api::create_router, state::AppState};

/// Environment variable naming the config file.
const CONFIG_PATH_ENV: &str = "BOOKBLURB_CONFIG";

/// Config file read when `BOOKBLURB_CONFIG` is unset.
const DEFAULT_CONFIG_PATH: &str = "config.toml";

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        error!("Fatal error: {:#}", e);
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // An explicit config path must exist; the implicit one is optional
    let config = match std::env::var(CONFIG_PATH_ENV) {
        Ok(path) => {
            let config_path = PathBuf::from(path);
            info!("Loading configuration from {:?}", config_path);
            load_config(&config_path)
                .with_context(|| format!("Failed to load config from {:?}", config_path))?
        }
        Err(_) => {
            let config_path = Path::new(DEFAULT_CONFIG_PATH);
            if config_path.exists() {
                info!("Loading configuration from {:?}", config_path);
            } else {
                info!(
                    "No {} found, using defaults and environment",
                    DEFAULT_CONFIG_PATH
                );
            }
            load_config_or_defaults(config_path)
                .with_context(|| format!("Failed to load config from {:?}", config_path))?
        }
    };

    // Validate configuration
    validate_config(&config).context("Configuration validation failed")?;

    let sanitized = SanitizedConfig::from(&config);
    info!("Configuration loaded successfully");
    info!(
        "Catalog: {} (key configured: {})",
        sanitized.catalog.base_url, sanitized.catalog.api_key_configured
    );
    info!("LLM: {} via {}", sanitized.llm.model, sanitized.llm.api_base);
    info!("Summary cache: {:?}", config.cache.path);

    if !sanitized.llm.api_key_configured {
        warn!("No language model API key configured, /summarize misses will fail");
    }

    // Label dictionaries are required at startup
    let labels = Arc::new(
        LabelDictionaries::from_config(&config.labels)
            .context("Failed to load label dictionaries")?,
    );

    // Create book catalog client
    let catalog: Arc<dyn BookCatalog> = Arc::new(
        GoogleBooksClient::new(config.catalog.clone())
            .context("Failed to create book catalog client")?,
    );

    // Create LLM client and teaser generator
    let llm: Arc<dyn LlmClient> = Arc::new(
        OpenAiClient::from_config(&config.llm).context("Failed to create LLM client")?,
    );
    info!("Using LLM provider: {} ({})", llm.provider(), llm.model());
    let teasers = TeaserGenerator::from_config(llm, &config.llm);

    // Create summary cache
    let cache: Arc<dyn SummaryCache> = Arc::new(JsonFileCache::new(config.cache.path.clone()));

    let discovery = Discovery::new(catalog, labels, teasers, cache);

    let addr = SocketAddr::new(config.server.host, config.server.port);

    // Create app state and router
    let state = Arc::new(AppState::new(config, discovery));
    let app = create_router(state);

    // Start server
    info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind to {}", addr))?;

    // Run server with graceful shutdown
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("Server shut down");

    Ok(())
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM)
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
