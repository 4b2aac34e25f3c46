use std::env;
use std::time::Duration;

use config::Config as ConfigBuilder;
use config::ConfigError;
use config::Environment;
use config::File;
use serde::Deserialize;

/// Application configuration for sso-service.
///
/// Loaded from configuration files with environment variable overrides.
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub env: DeploymentEnv,
    pub storage: StorageConfig,
    pub server: ServerConfig,
    pub token: TokenConfig,
    pub password: PasswordConfig,
}

/// Deployment environment; selects log verbosity and format.
#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum DeploymentEnv {
    Local,
    Dev,
    Prod,
}

/// Storage backend selection.
#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    Postgres,
    Sqlite,
}

/// Credential store and application registry configuration.
#[derive(Debug, Deserialize, Clone)]
pub struct StorageConfig {
    pub backend: StorageBackend,
    pub url: String,
    pub max_connections: u32,
}

/// gRPC and HTTP server configuration.
#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub http_port: u16,
    pub grpc_port: u16,
    /// Deadline applied to requests that do not carry their own
    pub request_timeout_ms: u64,
}

impl ServerConfig {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms)
    }
}

/// Session token configuration.
#[derive(Debug, Deserialize, Clone)]
pub struct TokenConfig {
    pub ttl_seconds: i64,
}

impl TokenConfig {
    pub fn ttl(&self) -> chrono::Duration {
        chrono::Duration::seconds(self.ttl_seconds)
    }
}

/// Argon2id work factor.
#[derive(Debug, Deserialize, Clone)]
pub struct PasswordConfig {
    pub memory_kib: u32,
    pub iterations: u32,
    pub parallelism: u32,
}

impl Config {
    /// Load configuration from files with environment variable overrides.
    ///
    /// # Configuration Priority (highest to lowest)
    /// 1. Environment variables (STORAGE__URL, SERVER__GRPC_PORT, etc.)
    /// 2. Environment-specific config file (config/{RUN_MODE}.toml)
    /// 3. Default config file (config/default.toml)
    ///
    /// # Errors
    /// Returns error if required configuration values are missing or invalid,
    /// or if a duration is not positive
    pub fn load() -> Result<Self, ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let configuration = ConfigBuilder::builder()
            // Start with default configuration
            .add_source(File::with_name("config/default").required(false))
            // Layer on environment-specific configuration
            .add_source(File::with_name(&format!("config/{}", run_mode)).required(false))
            // Layer on environment variables (with __ as separator)
            // Example: STORAGE__URL=postgres://... overrides storage.url
            .add_source(Environment::default().separator("__"))
            .build()?;

        let config: Config = configuration.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values that would make every call fail.
    ///
    /// # Errors
    /// * `ConfigError::Message` - Non-positive token TTL or request timeout
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.token.ttl_seconds <= 0 {
            return Err(ConfigError::Message(format!(
                "token.ttl_seconds must be positive, got {}",
                self.token.ttl_seconds
            )));
        }
        if self.server.request_timeout_ms == 0 {
            return Err(ConfigError::Message(
                "server.request_timeout_ms must be positive".to_string(),
            ));
        }
        Ok(())
    }
}
