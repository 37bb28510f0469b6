use config::{Config as ConfigBuilder, ConfigError, Environment, File};
use serde::Deserialize;
use std::env;
use std::path::PathBuf;
use std::time::Duration;
use tajine_import::{ClientSettings, DEFAULT_API_URL};

#[derive(Debug, Deserialize, Clone, Default)]
pub struct Config {
    #[serde(default)]
    pub fetcher: FetcherConfig,
    #[serde(default)]
    pub observability: ObservabilityConfig,
    #[serde(default)]
    pub catalog: CatalogConfig,
}

/// External recipe lookup used to fill recipes that have no steps yet
#[derive(Debug, Deserialize, Clone)]
pub struct FetcherConfig {
    #[serde(default = "default_api_url")]
    pub api_url: String,
    #[serde(default)]
    pub api_key: Option<String>,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    #[serde(default = "default_limit")]
    pub limit: u32,
    #[serde(default = "default_enabled")]
    pub enabled: bool,
}

impl Default for FetcherConfig {
    fn default() -> Self {
        Self {
            api_url: default_api_url(),
            api_key: None,
            timeout_secs: default_timeout_secs(),
            limit: default_limit(),
            enabled: default_enabled(),
        }
    }
}

impl FetcherConfig {
    pub fn client_settings(&self) -> ClientSettings {
        ClientSettings {
            api_url: self.api_url.clone(),
            api_key: self.api_key.clone().filter(|key| !key.is_empty()),
            timeout: Duration::from_secs(self.timeout_secs),
            limit: self.limit,
        }
    }
}

fn default_api_url() -> String {
    DEFAULT_API_URL.to_string()
}

fn default_timeout_secs() -> u64 {
    10
}

fn default_limit() -> u32 {
    1
}

fn default_enabled() -> bool {
    true
}

#[derive(Debug, Deserialize, Clone)]
pub struct ObservabilityConfig {
    #[serde(default = "default_log_level")]
    pub log_level: String,
    /// Emit JSON log lines instead of the console format
    #[serde(default)]
    pub json: bool,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            json: false,
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Ingredient types preloaded before normalization
#[derive(Debug, Deserialize, Clone, Default)]
pub struct CatalogConfig {
    /// JSON file holding a list of ingredient types
    #[serde(default)]
    pub path: Option<PathBuf>,
}

impl Config {
    /// Load configuration from file and environment variables
    ///
    /// Priority (highest to lowest):
    /// 1. Legacy NINJA_API_KEY
    /// 2. Environment variables (TAJINE__FETCHER__API_KEY, etc.)
    /// 3. Config file specified by path
    /// 4. Hardcoded defaults
    pub fn load(config_path: Option<String>) -> Result<Self, ConfigError> {
        let mut builder = ConfigBuilder::builder();

        builder = builder
            .set_default("fetcher.api_url", DEFAULT_API_URL)?
            .set_default("fetcher.timeout_secs", 10)?
            .set_default("fetcher.limit", 1)?
            .set_default("fetcher.enabled", true)?
            .set_default("observability.log_level", "info")?
            .set_default("observability.json", false)?;

        let config_file_path = config_path
            .or_else(|| env::var("CONFIG_PATH").ok())
            .unwrap_or_else(|| "config/default.toml".to_string());

        // Optional: ignored when the file does not exist
        if std::path::Path::new(&config_file_path).exists() {
            builder = builder.add_source(File::with_name(&config_file_path));
        }

        builder = builder.add_source(
            Environment::with_prefix("TAJINE")
                .separator("__")
                .try_parsing(true),
        );

        if let Ok(api_key) = env::var("NINJA_API_KEY") {
            builder = builder.set_override("fetcher.api_key", api_key)?;
        }

        builder.build()?.try_deserialize()
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.fetcher.api_url.trim().is_empty() {
            return Err("Fetcher api_url must not be empty".to_string());
        }
        if self.fetcher.timeout_secs == 0 {
            return Err("Fetcher timeout_secs must be greater than 0".to_string());
        }
        if self.fetcher.limit < 1 {
            return Err("Fetcher limit must be at least 1".to_string());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_valid_config() {
        assert!(Config::default().validate().is_ok());
    }

    #[test]
    fn test_validation_zero_timeout() {
        let config = Config {
            fetcher: FetcherConfig {
                timeout_secs: 0,
                ..Default::default()
            },
            ..Default::default()
        };

        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_zero_limit() {
        let config = Config {
            fetcher: FetcherConfig {
                limit: 0,
                ..Default::default()
            },
            ..Default::default()
        };

        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_empty_url() {
        let config = Config {
            fetcher: FetcherConfig {
                api_url: "  ".to_string(),
                ..Default::default()
            },
            ..Default::default()
        };

        assert!(config.validate().is_err());
    }

    #[test]
    fn test_client_settings_drop_empty_key() {
        let fetcher = FetcherConfig {
            api_key: Some(String::new()),
            timeout_secs: 3,
            ..Default::default()
        };

        let settings = fetcher.client_settings();
        assert!(settings.api_key.is_none());
        assert_eq!(settings.timeout, Duration::from_secs(3));
        assert_eq!(settings.api_url, DEFAULT_API_URL);
    }
}
