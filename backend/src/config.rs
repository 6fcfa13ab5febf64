//! Service configuration.
//!
//! Loaded once at startup from, in increasing priority: built-in defaults,
//! `config/default.toml`, `config/local.toml`, `INVITATIONS__*` environment
//! variables (`__` separates sections) and finally `DATABASE_URL`.

use std::time::Duration;
use config::builder::DefaultState;
use config::{ConfigBuilder, Environment, File};
use serde::Deserialize;
use crate::infrastructure::driven::SmtpSettings;

pub const ENV_PREFIX: &str = "INVITATIONS";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error(transparent)]
    Load(#[from] config::ConfigError),
    #[error("invalid configuration: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub store: StoreConfig,
    pub notifier: NotifierConfig,
    pub identifiers: IdentifierConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StoreBackend {
    Postgres,
    Memory,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    pub backend: StoreBackend,
    pub url: Option<String>,
    pub max_connections: u32,
    /// Upper bound for every store call, pool acquisition included.
    pub timeout_ms: u64,
    pub run_migrations: bool,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            backend: StoreBackend::Postgres,
            url: None,
            max_connections: 5,
            timeout_ms: 5_000,
            run_migrations: true,
        }
    }
}

impl StoreConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct NotifierConfig {
    /// No host means emails are logged instead of sent.
    pub smtp_host: Option<String>,
    pub smtp_port: u16,
    pub smtp_username: Option<String>,
    pub smtp_password: Option<String>,
    pub from_address: String,
    pub from_name: String,
    pub accept_url: String,
    pub product_name: String,
    pub timeout_ms: u64,
}

impl Default for NotifierConfig {
    fn default() -> Self {
        Self {
            smtp_host: None,
            smtp_port: 587,
            smtp_username: None,
            smtp_password: None,
            from_address: "noreply@peerbridge.ai".to_string(),
            from_name: "PeerBridge".to_string(),
            accept_url: "https://peerbridge.ai/accept-invitation".to_string(),
            product_name: "PeerBridge".to_string(),
            timeout_ms: 10_000,
        }
    }
}

impl NotifierConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    pub fn smtp_settings(&self) -> Option<SmtpSettings> {
        let host = self.smtp_host.as_ref().filter(|h| !h.trim().is_empty())?;
        Some(SmtpSettings {
            host: host.clone(),
            port: self.smtp_port,
            username: self.smtp_username.clone(),
            password: self.smtp_password.clone(),
            from_address: self.from_address.clone(),
            from_name: self.from_name.clone(),
            accept_url: self.accept_url.clone(),
            product_name: self.product_name.clone(),
            timeout: self.timeout(),
        })
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct IdentifierConfig {
    /// Insert attempts before an identifier collision is reported.
    pub max_attempts: u32,
}

impl Default for IdentifierConfig {
    fn default() -> Self {
        Self { max_attempts: 3 }
    }
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        let _ = dotenvy::dotenv();

        let builder = config::Config::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name("config/local").required(false))
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .separator("__")
                    .try_parsing(true),
            )
            .set_override_option("store.url", std::env::var("DATABASE_URL").ok())?;

        Self::from_builder(builder)
    }

    fn from_builder(builder: ConfigBuilder<DefaultState>) -> Result<Self, ConfigError> {
        let config: AppConfig = builder.build()?.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.store.backend == StoreBackend::Postgres
            && self.store.url.as_deref().map_or(true, |u| u.trim().is_empty())
        {
            return Err(ConfigError::Invalid(
                "store.url (or DATABASE_URL) is required for the postgres backend".to_string(),
            ));
        }
        if self.store.timeout_ms == 0 || self.notifier.timeout_ms == 0 {
            return Err(ConfigError::Invalid("timeouts must be greater than zero".to_string()));
        }
        if self.identifiers.max_attempts == 0 {
            return Err(ConfigError::Invalid("identifiers.max_attempts must be at least 1".to_string()));
        }
        Ok(())
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}
