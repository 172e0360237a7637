//! Configuration model loaded from external sources.

use std::path::Path;

use config::{Config, Environment, File};
use serde::Deserialize;
use thiserror::Error;

use crate::pagination::DEFAULT_ITEMS_PER_PAGE;

/// Minimum secret length accepted for cookie signing keys.
pub const MIN_SECRET_BYTES: usize = 64;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Error loading settings: {0}")]
    Load(#[from] config::ConfigError),

    #[error("Invalid settings: {0}")]
    Invalid(String),
}

#[derive(Clone, Copy, Debug, Default, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum DataSourceKind {
    #[default]
    Synthetic,
    Remote,
}

#[derive(Clone, Debug, Deserialize)]
pub struct DataSourceConfig {
    #[serde(default)]
    pub kind: DataSourceKind,
    #[serde(default)]
    pub api_base_url: Option<String>,
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
    /// Seed of the synthetic dataset.
    #[serde(default = "default_seed")]
    pub seed: u64,
}

impl Default for DataSourceConfig {
    fn default() -> Self {
        Self {
            kind: DataSourceKind::default(),
            api_base_url: None,
            request_timeout_secs: default_request_timeout_secs(),
            seed: default_seed(),
        }
    }
}

#[derive(Clone, Copy, Debug, Default, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum AuthKind {
    #[default]
    Demo,
    Remote,
}

#[derive(Clone, Debug, Deserialize)]
pub struct AuthConfig {
    #[serde(default)]
    pub kind: AuthKind,
    /// Demo mode only: let unknown non-empty credentials sign in.
    #[serde(default)]
    pub accept_any_credentials: bool,
    #[serde(default = "default_token_ttl_secs")]
    pub token_ttl_secs: i64,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            kind: AuthKind::default(),
            accept_any_credentials: false,
            token_ttl_secs: default_token_ttl_secs(),
        }
    }
}

#[derive(Clone, Debug, Deserialize)]
/// Basic configuration shared across handlers.
pub struct ServerConfig {
    pub domain: String,
    pub address: String,
    pub port: u16,
    pub templates_dir: String,
    pub secret: String,
    #[serde(default = "default_page_size")]
    pub page_size: usize,
    #[serde(default)]
    pub data_source: DataSourceConfig,
    #[serde(default)]
    pub auth: AuthConfig,
}

fn default_page_size() -> usize {
    DEFAULT_ITEMS_PER_PAGE
}

fn default_request_timeout_secs() -> u64 {
    10
}

fn default_seed() -> u64 {
    2024
}

fn default_token_ttl_secs() -> i64 {
    8 * 60 * 60
}

impl ServerConfig {
    /// Loads `config/default.yaml`, the optional `config/{app_env}.yaml` and
    /// `APP_*` environment overrides (nested keys separated by `__`).
    pub fn load(config_dir: &Path, app_env: &str) -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .add_source(File::from(config_dir.join("default")))
            .add_source(File::from(config_dir.join(app_env)).required(false))
            .add_source(
                Environment::with_prefix("APP")
                    .prefix_separator("_")
                    .separator("__"),
            )
            .build()?;

        let server_config = settings.try_deserialize::<ServerConfig>()?;
        server_config.validate()?;
        Ok(server_config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.secret.len() < MIN_SECRET_BYTES {
            return Err(ConfigError::Invalid(format!(
                "secret must be at least {MIN_SECRET_BYTES} bytes"
            )));
        }

        if self.page_size == 0 {
            return Err(ConfigError::Invalid(
                "page_size must be positive".to_string(),
            ));
        }

        let needs_api = self.data_source.kind == DataSourceKind::Remote
            || self.auth.kind == AuthKind::Remote;
        let has_api = self
            .data_source
            .api_base_url
            .as_deref()
            .is_some_and(|url| !url.trim().is_empty());
        if needs_api && !has_api {
            return Err(ConfigError::Invalid(
                "data_source.api_base_url is required for remote data or authentication"
                    .to_string(),
            ));
        }

        if self.data_source.request_timeout_secs == 0 {
            return Err(ConfigError::Invalid(
                "data_source.request_timeout_secs must be positive".to_string(),
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use super::*;

    const SECRET: &str = "0123456789abcdef0123456789abcdef0123456789abcdef0123456789abcdef";

    fn write_default(dir: &Path, extra: &str) {
        let contents = format!(
            "domain: localhost\naddress: 127.0.0.1\nport: 8080\ntemplates_dir: templates/**/*\nsecret: {SECRET}\n{extra}"
        );
        fs::write(dir.join("default.yaml"), contents).unwrap();
    }

    #[test]
    fn defaults_fill_optional_sections() {
        let dir = tempfile::tempdir().unwrap();
        write_default(dir.path(), "");

        let config = ServerConfig::load(dir.path(), "missing").unwrap();
        assert_eq!(config.page_size, 10);
        assert_eq!(config.data_source.kind, DataSourceKind::Synthetic);
        assert_eq!(config.data_source.request_timeout_secs, 10);
        assert_eq!(config.auth.kind, AuthKind::Demo);
        assert!(!config.auth.accept_any_credentials);
    }

    #[test]
    fn environment_file_overrides_defaults() {
        let dir = tempfile::tempdir().unwrap();
        write_default(dir.path(), "page_size: 25\n");
        fs::write(
            dir.path().join("prod.yaml"),
            "data_source:\n  kind: remote\n  api_base_url: http://backend/api\n",
        )
        .unwrap();

        let config = ServerConfig::load(dir.path(), "prod").unwrap();
        assert_eq!(config.page_size, 25);
        assert_eq!(config.data_source.kind, DataSourceKind::Remote);
        assert_eq!(
            config.data_source.api_base_url.as_deref(),
            Some("http://backend/api")
        );
    }

    #[test]
    fn remote_mode_requires_a_base_url() {
        let dir = tempfile::tempdir().unwrap();
        write_default(dir.path(), "auth:\n  kind: remote\n");

        assert!(matches!(
            ServerConfig::load(dir.path(), "missing"),
            Err(ConfigError::Invalid(_))
        ));
    }

    #[test]
    fn short_secret_is_rejected() {
        let mut config = {
            let dir = tempfile::tempdir().unwrap();
            write_default(dir.path(), "");
            ServerConfig::load(dir.path(), "missing").unwrap()
        };
        config.secret = "short".to_string();
        assert!(config.validate().is_err());
    }
}
