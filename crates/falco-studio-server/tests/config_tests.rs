//! Tests for loading ServerConfig from files

use falco_studio_server::config::ServerConfig;
use std::fs;
use tempfile::TempDir;

#[test]
fn test_load_from_toml_file() {
    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join("server.toml"),
        r#"
host = "0.0.0.0"
port = 9000
static_dir = "web"

[llm]
model = "claude-haiku-4-5"
validate_max_tokens = 600
temperature = 0.2
"#,
    )
    .unwrap();

    let base = dir.path().join("server");
    let config = ServerConfig::load_from(base.to_str().unwrap()).unwrap();

    assert_eq!(config.host, "0.0.0.0");
    assert_eq!(config.port, 9000);
    assert_eq!(config.static_dir.as_deref(), Some(std::path::Path::new("web")));
    assert_eq!(config.llm.model, "claude-haiku-4-5");
    assert_eq!(config.llm.max_tokens, 2048);
    assert_eq!(config.llm.validate_max_tokens, 600);

    let studio = config.llm.studio_config();
    assert_eq!(studio.model, "claude-haiku-4-5");
    assert_eq!(studio.temperature, Some(0.2));
}

#[test]
fn test_missing_file_uses_defaults() {
    let dir = TempDir::new().unwrap();
    let base = dir.path().join("does-not-exist");

    let config = ServerConfig::load_from(base.to_str().unwrap()).unwrap();
    assert_eq!(config.port, 8000);
    assert!(config.static_dir.is_none());
}

#[test]
fn test_invalid_value_is_an_error() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("server.toml"), "port = \"not-a-port\"\n").unwrap();

    let base = dir.path().join("server");
    assert!(ServerConfig::load_from(base.to_str().unwrap()).is_err());
}
