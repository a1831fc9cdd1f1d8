//! Falco Rule Studio HTTP Server
//!
//! Provides a REST API for generating, explaining, validating and optimizing
//! Falco rules with an LLM.

use anyhow::Result;
use falco_studio_llm::{AnthropicProvider, LLMProvider, RuleStudio};
use falco_studio_server::api;
use falco_studio_server::config::ServerConfig;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first so the log level can come from it
    let config = ServerConfig::load()?;

    init_tracing(&config.log_level)?;
    info!("Loaded configuration: {:?}", config);

    // Initialize the LLM provider once; every request shares it
    let mut provider = AnthropicProvider::new(config.llm.api_key.clone());
    if let Some(base_url) = &config.llm.base_url {
        provider = provider.with_base_url(base_url.clone());
    }
    if !provider.has_api_key() {
        warn!("ANTHROPIC_API_KEY is not set; LLM endpoints will answer 401 until it is configured");
    }
    info!(
        "Using {} provider with model {}",
        provider.provider_name(),
        config.llm.model
    );

    let studio = RuleStudio::new(Arc::new(provider), config.llm.studio_config());
    let app = api::create_router(Arc::new(studio), config.static_dir.as_deref());

    // Start server
    let addr = config.bind_address();
    info!("Starting server on {}", addr);

    let listener = TcpListener::bind(&addr).await?;
    info!("✓ Server listening on http://{}", addr);
    info!("  Health check: http://{}/api/health", addr);
    info!("  Rule API: http://{}/api/{{generate,explain,validate,optimize}}", addr);
    info!("  Chat: http://{}/api/chat", addr);
    if let Some(dir) = &config.static_dir {
        info!("  UI: http://{}/ (serving {})", addr, dir.display());
    }

    axum::serve(listener, app).await?;

    Ok(())
}

/// Initialize tracing subscriber
fn init_tracing(log_level: &str) -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                format!(
                    "falco_studio_server={level},falco_studio_llm={level},tower_http=debug",
                    level = log_level
                )
                .into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to initialize tracing: {}", e))?;

    Ok(())
}
