use serde::Deserialize;

use crate::domain::user::DEFAULT_CHANNEL_PREFIX;

/// Application configuration
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub logging: LoggingConfig,
    pub storage: StorageSettings,
    pub messaging: MessagingSettings,
    pub metrics: MetricsConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Requests running longer than this are cancelled
    pub request_timeout_secs: u64,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub format: LogFormat,
}

#[derive(Debug, Clone, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

/// Persistence backend settings
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct StorageSettings {
    /// `memory` or `postgres`
    pub backend: String,
    /// Falls back to the `DATABASE_URL` environment variable
    pub database_url: Option<String>,
    pub max_connections: u32,
    /// Apply pending migrations when the server starts
    pub run_migrations: bool,
}

/// Message bus settings
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct MessagingSettings {
    /// `memory` or `redis`
    pub backend: String,
    /// Falls back to the `REDIS_URL` environment variable
    pub redis_url: Option<String>,
    /// Events go to `<prefix>.create` and `<prefix>.update`
    pub channel_prefix: String,
}

/// Prometheus metrics configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct MetricsConfig {
    pub enabled: bool,
    pub path: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            request_timeout_secs: 30,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::default(),
        }
    }
}

impl Default for StorageSettings {
    fn default() -> Self {
        Self {
            backend: "memory".to_string(),
            database_url: None,
            max_connections: 10,
            run_migrations: true,
        }
    }
}

impl StorageSettings {
    /// Configured database URL, or `DATABASE_URL` from the environment
    pub fn resolved_database_url(&self) -> Option<String> {
        self.database_url
            .clone()
            .or_else(|| std::env::var("DATABASE_URL").ok())
    }
}

impl Default for MessagingSettings {
    fn default() -> Self {
        Self {
            backend: "memory".to_string(),
            redis_url: None,
            channel_prefix: DEFAULT_CHANNEL_PREFIX.to_string(),
        }
    }
}

impl MessagingSettings {
    /// Configured Redis URL, or `REDIS_URL` from the environment
    pub fn resolved_redis_url(&self) -> Option<String> {
        self.redis_url
            .clone()
            .or_else(|| std::env::var("REDIS_URL").ok())
    }
}

impl Default for MetricsConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            path: "/metrics".to_string(),
        }
    }
}

impl AppConfig {
    pub fn load() -> Result<Self, config::ConfigError> {
        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name("config/local").required(false))
            .add_source(
                config::Environment::with_prefix("APP")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        config.try_deserialize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();

        assert_eq!(config.server.port, 8080);
        assert_eq!(config.server.request_timeout_secs, 30);
        assert_eq!(config.logging.format, LogFormat::Pretty);
        assert_eq!(config.storage.backend, "memory");
        assert_eq!(config.messaging.backend, "memory");
        assert_eq!(config.messaging.channel_prefix, "user");
        assert!(config.metrics.enabled);
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let config: AppConfig = config::Config::builder()
            .add_source(config::File::from_str(
                r#"
                [server]
                host = "127.0.0.1"
                port = 9000

                [messaging]
                backend = "redis"
                redis_url = "redis://bus:6379"
                "#,
                config::FileFormat::Toml,
            ))
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap();

        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 9000);
        assert_eq!(config.server.request_timeout_secs, 30);
        assert_eq!(config.messaging.backend, "redis");
        assert_eq!(
            config.messaging.resolved_redis_url().as_deref(),
            Some("redis://bus:6379")
        );
        assert_eq!(config.messaging.channel_prefix, "user");
        assert_eq!(config.storage.backend, "memory");
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_log_format_parsing() {
        let config: AppConfig = config::Config::builder()
            .add_source(config::File::from_str(
                r#"
                [logging]
                level = "debug"
                format = "json"
                "#,
                config::FileFormat::Toml,
            ))
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap();

        assert_eq!(config.logging.level, "debug");
        assert_eq!(config.logging.format, LogFormat::Json);
    }
}
