//! Server configuration

use falco_studio_llm::RuleStudioConfig;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Environment variable consulted when no API key is configured explicitly
pub const API_KEY_ENV: &str = "ANTHROPIC_API_KEY";

/// LLM provider configuration
#[derive(Clone, Serialize, Deserialize)]
pub struct LlmConfig {
    /// Anthropic API key (falls back to `ANTHROPIC_API_KEY`)
    #[serde(default)]
    pub api_key: Option<String>,

    /// Override for the Anthropic API root
    #[serde(default)]
    pub base_url: Option<String>,

    /// Model identifier
    #[serde(default = "default_model")]
    pub model: String,

    /// Max tokens for generate / explain / optimize / chat
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,

    /// Max tokens for the validation verdict
    #[serde(default = "default_validate_max_tokens")]
    pub validate_max_tokens: u32,

    /// Sampling temperature (provider default when unset)
    #[serde(default)]
    pub temperature: Option<f32>,
}

fn default_model() -> String {
    RuleStudioConfig::default().model
}

fn default_max_tokens() -> u32 {
    RuleStudioConfig::default().max_tokens
}

fn default_validate_max_tokens() -> u32 {
    RuleStudioConfig::default().validate_max_tokens
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: None,
            model: default_model(),
            max_tokens: default_max_tokens(),
            validate_max_tokens: default_validate_max_tokens(),
            temperature: None,
        }
    }
}

// Hand-written so the key never ends up in logs
impl std::fmt::Debug for LlmConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LlmConfig")
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("base_url", &self.base_url)
            .field("model", &self.model)
            .field("max_tokens", &self.max_tokens)
            .field("validate_max_tokens", &self.validate_max_tokens)
            .field("temperature", &self.temperature)
            .finish()
    }
}

impl LlmConfig {
    /// Settings for the rule studio
    pub fn studio_config(&self) -> RuleStudioConfig {
        let config = RuleStudioConfig::new(self.model.clone())
            .with_max_tokens(self.max_tokens)
            .with_validate_max_tokens(self.validate_max_tokens);
        match self.temperature {
            Some(temperature) => config.with_temperature(temperature),
            None => config,
        }
    }

    /// Fill a missing key from the environment
    fn resolve_api_key(&mut self, env_key: Option<String>) {
        let configured = self
            .api_key
            .as_deref()
            .map(|key| !key.trim().is_empty())
            .unwrap_or(false);
        if !configured {
            self.api_key = env_key.filter(|key| !key.trim().is_empty());
        }
    }
}

/// Server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Server host
    #[serde(default = "default_host")]
    pub host: String,

    /// Server port (HTTP)
    #[serde(default = "default_port")]
    pub port: u16,

    /// Log level
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Directory holding the web UI (`index.html` and assets); the UI routes
    /// are only mounted when this is set
    #[serde(default)]
    pub static_dir: Option<PathBuf>,

    /// LLM provider settings
    #[serde(default)]
    pub llm: LlmConfig,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8000
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            log_level: default_log_level(),
            static_dir: None,
            llm: LlmConfig::default(),
        }
    }
}

impl ServerConfig {
    /// Load configuration from environment variables and config file
    ///
    /// Sources, lowest priority first: built-in defaults, `config/server.*`,
    /// `RULE_STUDIO__*` environment variables (e.g. `RULE_STUDIO__LLM__MODEL`).
    pub fn load() -> anyhow::Result<Self> {
        // Load .env file if exists
        dotenvy::dotenv().ok();
        Self::load_from("config/server")
    }

    /// Load with an explicit config file base name (extension optional)
    pub fn load_from(config_file: &str) -> anyhow::Result<Self> {
        let config_result = config::Config::builder()
            .add_source(config::File::with_name(config_file).required(false))
            .add_source(
                config::Environment::with_prefix("RULE_STUDIO")
                    .prefix_separator("__")
                    .separator("__"),
            )
            .build();

        let mut server_config: ServerConfig = match config_result {
            Ok(cfg) => cfg
                .try_deserialize()
                .map_err(|e| anyhow::anyhow!("Failed to deserialize config: {}", e))?,
            Err(e) => {
                tracing::info!("No usable config source ({}), using default configuration", e);
                Self::default()
            }
        };

        server_config
            .llm
            .resolve_api_key(std::env::var(API_KEY_ENV).ok());
        Ok(server_config)
    }

    /// Socket address to bind
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
