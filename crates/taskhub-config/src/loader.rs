//! Configuration loader with layered sources.

use crate::{AppConfig, DEFAULT_JWT_SECRET};
use config::{Config, ConfigError, Environment, File};
use std::path::Path;
use std::sync::Arc;
use taskhub_core::TaskhubError;
use tokio::sync::RwLock;
use tracing::{debug, info, warn};

/// Prefix for environment overrides, e.g. `TASKHUB_DATABASE__URL`.
pub const ENV_PREFIX: &str = "TASKHUB";

/// Configuration loader shared across tasks.
#[derive(Clone)]
pub struct ConfigLoader {
    config: Arc<RwLock<AppConfig>>,
}

impl ConfigLoader {
    /// Creates a new configuration loader.
    ///
    /// Configuration is loaded from multiple sources in order:
    /// 1. `config/default.toml` - Default values
    /// 2. `config/{environment}.toml` - Environment-specific overrides
    /// 3. `config/local.toml` - Untracked local overrides
    /// 4. Environment variables with `TASKHUB_` prefix
    pub fn new(config_dir: impl Into<String>) -> Result<Self, TaskhubError> {
        let config_dir = config_dir.into();
        let config = Self::load_config(&config_dir)?;

        Ok(Self {
            config: Arc::new(RwLock::new(config)),
        })
    }

    /// Loads configuration from the default location (`./config`).
    pub fn from_default_location() -> Result<Self, TaskhubError> {
        Self::new("./config")
    }

    /// Returns the current configuration.
    pub async fn get(&self) -> AppConfig {
        self.config.read().await.clone()
    }

    fn load_config(config_dir: &str) -> Result<AppConfig, TaskhubError> {
        if let Err(e) = dotenvy::dotenv() {
            debug!("No .env file found or error loading it: {}", e);
        }

        let environment =
            std::env::var("TASKHUB_ENVIRONMENT").unwrap_or_else(|_| "development".to_string());

        info!("Loading configuration for environment: {}", environment);

        let mut builder = Config::builder();

        for name in ["default", environment.as_str(), "local"] {
            let path = format!("{}/{}.toml", config_dir, name);
            if Path::new(&path).exists() {
                debug!("Loading config from: {}", path);
                builder = builder.add_source(File::with_name(&path).required(false));
            }
        }

        builder = builder
            .set_override("app.environment", environment.clone())
            .map_err(config_error_to_taskhub_error)?
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .separator("__")
                    .try_parsing(true),
            );

        let app_config: AppConfig = builder
            .build()
            .map_err(config_error_to_taskhub_error)?
            .try_deserialize()
            .map_err(config_error_to_taskhub_error)?;

        validate_config(&app_config)?;

        Ok(app_config)
    }
}

/// Rejects configurations the server cannot start with.
pub fn validate_config(config: &AppConfig) -> Result<(), TaskhubError> {
    if config.app.environment == "production" && config.security.jwt_secret == DEFAULT_JWT_SECRET {
        warn!("Using default JWT secret in production! This is a security risk.");
    }

    if config.database.url.is_empty() {
        return Err(TaskhubError::Configuration("Database URL is required".to_string()));
    }

    if config.security.jwt_secret.is_empty() {
        return Err(TaskhubError::Configuration("JWT secret is required".to_string()));
    }

    if config.database.min_connections > config.database.max_connections {
        return Err(TaskhubError::Configuration(format!(
            "Invalid pool size: min ({}) cannot be greater than max ({})",
            config.database.min_connections, config.database.max_connections
        )));
    }

    if config.redis.enabled && config.redis.url.is_empty() {
        return Err(TaskhubError::Configuration(
            "Redis URL is required when Redis is enabled".to_string(),
        ));
    }

    Ok(())
}

fn config_error_to_taskhub_error(err: ConfigError) -> TaskhubError {
    TaskhubError::Configuration(err.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[tokio::test]
    async fn test_loads_default_toml() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join("default.toml"),
            r#"
[server]
port = 9000

[redis]
enabled = false
"#,
        )
        .unwrap();

        let loader = ConfigLoader::new(dir.path().to_string_lossy().to_string()).unwrap();
        let config = loader.get().await;

        assert_eq!(config.server.port, 9000);
        assert!(!config.redis.enabled);
        assert_eq!(config.security.jwt_issuer, "taskhub");
    }

    #[tokio::test]
    async fn test_local_overrides_default() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("default.toml"), "[server]\nport = 9000\n").unwrap();
        fs::write(dir.path().join("local.toml"), "[server]\nport = 9100\n").unwrap();

        let loader = ConfigLoader::new(dir.path().to_string_lossy().to_string()).unwrap();
        assert_eq!(loader.get().await.server.port, 9100);
    }

    #[tokio::test]
    async fn test_missing_directory_falls_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope");

        let loader = ConfigLoader::new(missing.to_string_lossy().to_string()).unwrap();
        assert_eq!(loader.get().await.server.port, 8080);
    }

    #[test]
    fn test_validate_rejects_empty_database_url() {
        let mut config = AppConfig::default();
        config.database.url = String::new();
        assert!(matches!(validate_config(&config), Err(TaskhubError::Configuration(_))));
    }

    #[test]
    fn test_validate_rejects_inverted_pool_bounds() {
        let mut config = AppConfig::default();
        config.database.min_connections = 20;
        config.database.max_connections = 5;
        assert!(validate_config(&config).is_err());
    }
}
