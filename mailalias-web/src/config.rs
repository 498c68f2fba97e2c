//! Server configuration
//!
//! Loaded from TOML, then overridden by environment variables.

use std::path::{Path, PathBuf};

use mailalias_core::services::DEFAULT_APEX_DOMAIN;
use mailalias_core::types::DnsSyncConfig;
use serde::{Deserialize, Serialize};

/// 默认配置文件名
pub const DEFAULT_CONFIG_FILE: &str = "mailalias.toml";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {0}: {1}")]
    FileRead(String, String),

    #[error("Failed to parse config: {0}")]
    Parse(String),

    #[error("Invalid value for {0}: {1}")]
    Env(&'static str, String),

    #[error("Configuration validation error: {0}")]
    Validation(String),
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub logging: LoggingConfig,
    pub mail: MailConfig,
    /// DNS provider 凭证，缺失时不同步 DNS
    pub dns: DnsSyncConfig,
    pub relay: RelayConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ServerConfig {
    pub bind_address: String,
    pub port: u16,
    /// 未设置时按 CPU 数
    pub workers: Option<usize>,
    /// webhook 自测使用的对外地址，未设置时取请求的 scheme + host
    pub public_url: Option<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0".to_string(),
            port: 3000,
            workers: None,
            public_url: None,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct DatabaseConfig {
    pub url: String,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: "sqlite://mailalias.db?mode=rwc".to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// `EnvFilter` directive, e.g. `info` or `mailalias_core=debug,info`
    pub level: String,
    pub format: LogFormat,
    /// 设置后额外按天写入该目录
    pub directory: Option<PathBuf>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::Text,
            directory: None,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct MailConfig {
    pub apex_domain: String,
}

impl Default for MailConfig {
    fn default() -> Self {
        Self {
            apex_domain: DEFAULT_APEX_DOMAIN.to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct RelayConfig {
    pub api_key: Option<String>,
}

impl Config {
    /// Load configuration.
    ///
    /// Priority order:
    /// 1. Explicitly provided path
    /// 2. `mailalias.toml` in current directory
    /// 3. Default configuration
    ///
    /// Environment overrides are applied last.
    pub fn load(path: Option<&str>) -> Result<Self, ConfigError> {
        let mut config = match path {
            Some(path) => Self::from_file(Path::new(path))?,
            None if Path::new(DEFAULT_CONFIG_FILE).exists() => {
                Self::from_file(Path::new(DEFAULT_CONFIG_FILE))?
            }
            None => Self::default(),
        };

        config.apply_env_overrides(|key| std::env::var(key).ok())?;
        Ok(config)
    }

    fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::FileRead(path.display().to_string(), e.to_string()))?;
        Self::from_toml(&contents)
    }

    pub fn from_toml(contents: &str) -> Result<Self, ConfigError> {
        toml::from_str(contents).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// 环境变量覆盖，空值忽略
    pub fn apply_env_overrides<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(key) = get("CLOUDFLARE_API_KEY") {
            self.dns.provider_api_key = Some(key);
        }
        if let Some(zone) = get("CLOUDFLARE_ZONE_ID") {
            self.dns.provider_zone_id = Some(zone);
        }
        if let Some(key) = get("SMTP2GO_API_KEY") {
            self.relay.api_key = Some(key);
        }
        if let Some(domain) = get("APEX_DOMAIN") {
            self.mail.apex_domain = domain;
        }
        if let Some(url) = get("DATABASE_URL") {
            self.database.url = url;
        }
        if let Some(bind) = get("BIND_ADDRESS") {
            self.server.bind_address = bind;
        }
        if let Some(port) = get("PORT") {
            self.server.port = port
                .trim()
                .parse()
                .map_err(|_| ConfigError::Env("PORT", port))?;
        }
        if let Some(level) = get("LOG_LEVEL") {
            self.logging.level = level;
        }
        Ok(())
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.server.port == 0 {
            return Err(ConfigError::Validation("Port cannot be 0".to_string()));
        }
        if self.server.workers == Some(0) {
            return Err(ConfigError::Validation("Workers cannot be 0".to_string()));
        }

        let domain = self.mail.apex_domain.trim();
        if !domain.contains('.') || domain.starts_with('.') || domain.ends_with('.') {
            return Err(ConfigError::Validation(format!(
                "Invalid apex domain: {domain}"
            )));
        }
        Ok(())
    }
}
