use crate::error::{CoinPulseError, Result};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CoinPulseConfig {
    pub server: ServerConfig,
    pub provider: ProviderConfig,
    #[serde(default)]
    pub cache: CacheConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub port: u16,
    pub log_level: String,
    pub transport: String, // "stdio", "http"
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderConfig {
    pub base_url: String,
    pub api_key: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheConfig {
    pub max_entries: usize,
}

fn default_timeout_secs() -> u64 {
    10
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: 8080,
            log_level: "info".to_string(),
            transport: "stdio".to_string(),
        }
    }
}

impl ServerConfig {
    pub fn log_filter(&self) -> String {
        format!("coinpulse={}", self.log_level.trim())
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self { max_entries: 1000 }
    }
}

impl ProviderConfig {
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            api_key: api_key.into(),
            timeout_secs: default_timeout_secs(),
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.base_url.trim().is_empty() || self.api_key.trim().is_empty() {
            return Err(CoinPulseError::config_error(
                "Missing COINGECKO_BASE_URL or COINGECKO_API_KEY",
            ));
        }
        if !self.base_url.starts_with("http://") && !self.base_url.starts_with("https://") {
            return Err(CoinPulseError::config_error(format!(
                "COINGECKO_BASE_URL must be an http(s) URL, got {}",
                self.base_url
            )));
        }
        if self.timeout_secs == 0 {
            return Err(CoinPulseError::config_error(
                "HTTP timeout must be at least one second",
            ));
        }
        Ok(())
    }
}

impl CoinPulseConfig {
    pub fn new(provider: ProviderConfig) -> Self {
        Self {
            server: ServerConfig::default(),
            provider,
            cache: CacheConfig::default(),
        }
    }

    // COINPULSE_CONFIG (TOML) wins over the environment.
    pub fn load() -> Result<Self> {
        match std::env::var("COINPULSE_CONFIG") {
            Ok(path) if !path.trim().is_empty() => Self::from_file(&path),
            _ => Self::from_env(),
        }
    }

    pub fn from_env() -> Result<Self> {
        Self::from_vars(|key| std::env::var(key).ok())
    }

    pub fn from_vars<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let base_url = lookup("COINGECKO_BASE_URL").unwrap_or_default();
        let api_key = lookup("COINGECKO_API_KEY").unwrap_or_default();
        let mut config = Self::new(ProviderConfig::new(base_url.trim(), api_key.trim()));

        if let Some(port) = lookup("COINPULSE_PORT") {
            config.server.port = port
                .parse()
                .map_err(|_| CoinPulseError::config_error("Invalid COINPULSE_PORT"))?;
        }

        if let Some(log_level) = lookup("COINPULSE_LOG_LEVEL") {
            config.server.log_level = log_level;
        }

        if let Some(transport) = lookup("COINPULSE_TRANSPORT") {
            config.server.transport = transport;
        }

        if let Some(timeout) = lookup("COINPULSE_HTTP_TIMEOUT_SECS") {
            config.provider.timeout_secs = timeout
                .parse()
                .map_err(|_| CoinPulseError::config_error("Invalid COINPULSE_HTTP_TIMEOUT_SECS"))?;
        }

        if let Some(max_entries) = lookup("COINPULSE_CACHE_MAX_ENTRIES") {
            config.cache.max_entries = max_entries
                .parse()
                .map_err(|_| CoinPulseError::config_error("Invalid COINPULSE_CACHE_MAX_ENTRIES"))?;
        }

        config.provider.validate()?;
        Ok(config)
    }

    pub fn from_file(path: &str) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            CoinPulseError::config_error(format!("Failed to read config file: {}", e))
        })?;

        let config: CoinPulseConfig = toml::from_str(&content).map_err(|e| {
            CoinPulseError::config_error(format!("Failed to parse config file: {}", e))
        })?;

        config.provider.validate()?;
        Ok(config)
    }
}
