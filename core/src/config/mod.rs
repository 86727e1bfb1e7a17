//! Configuration management for the Wellness Companion core
//!
//! Configuration is loaded hierarchically:
//! 1. Default values (in code)
//! 2. TOML config files (config/development.toml or config/production.toml)
//! 3. Environment variables (prefix: WELLNESS__)

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::env;
use validator::Validate;

/// Application configuration
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct AppConfig {
    #[validate(nested)]
    pub storage: StorageConfig,
    #[validate(nested)]
    #[serde(default)]
    pub ai: AiConfig,
    #[validate(nested)]
    #[serde(default)]
    pub auth: AuthConfig,
    #[validate(nested)]
    #[serde(default)]
    pub watch: WatchConfig,
}

/// Local storage configuration
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct StorageConfig {
    /// Path to the SQLite database file
    pub path: String,
    #[validate(range(min = 1, max = 64))]
    pub max_connections: u32,
}

/// Completion endpoint configuration
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct AiConfig {
    #[validate(url)]
    pub endpoint: String,
}

/// Sign-in provider configuration
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct AuthConfig {
    /// Simulated provider round-trip in milliseconds
    #[validate(range(max = 60_000))]
    pub mock_delay_ms: u64,
}

/// Smartwatch simulation configuration
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct WatchConfig {
    /// Simulated pairing handshake in milliseconds
    #[validate(range(max = 60_000))]
    pub connect_delay_ms: u64,
}

impl Default for AiConfig {
    fn default() -> Self {
        Self {
            endpoint: "https://toolkit.rork.com/text/llm/".to_string(),
        }
    }
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            mock_delay_ms: 1500,
        }
    }
}

impl Default for WatchConfig {
    fn default() -> Self {
        Self {
            connect_delay_ms: 2000,
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            storage: StorageConfig {
                path: "wellness.db".to_string(),
                max_connections: 5,
            },
            ai: AiConfig::default(),
            auth: AuthConfig::default(),
            watch: WatchConfig::default(),
        }
    }
}

impl AppConfig {
    /// Load configuration from files and environment
    ///
    /// Loading order (later sources override earlier):
    /// 1. Default values
    /// 2. Config file based on RUST_ENV (development.toml or production.toml)
    /// 3. Environment variables with WELLNESS__ prefix
    pub fn load() -> Result<Self> {
        let env = env::var("RUST_ENV").unwrap_or_else(|_| "development".to_string());
        let config_file = format!("config/{}.toml", env);

        let config = config::Config::builder()
            // Start with defaults
            .add_source(config::Config::try_from(&AppConfig::default())?)
            // Load from environment-specific config file
            .add_source(config::File::with_name(&config_file).required(false))
            // Override with environment variables (WELLNESS__ prefix)
            // e.g., WELLNESS__STORAGE__PATH=/tmp/test.db sets storage.path
            .add_source(config::Environment::with_prefix("WELLNESS").separator("__"))
            .build()?;

        let config: AppConfig = config.try_deserialize()?;
        config
            .validate()
            .map_err(|e| anyhow::anyhow!("Invalid configuration: {e}"))?;
        Ok(config)
    }

    /// Check if running in production mode
    pub fn is_production() -> bool {
        env::var("RUST_ENV")
            .map(|v| v == "production")
            .unwrap_or(false)
    }
}
