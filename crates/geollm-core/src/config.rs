use crate::error::{GeollmError, Result};
use crate::models::INDIA_REGION_MARGIN;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::env;
use std::fs;
use std::path::Path;
use std::time::Duration;

/// Environment variable holding the text-generation API key
pub const API_KEY_ENV: &str = "GOOGLE_API_KEY";

/// Public OpenStreetMap Nominatim instance
pub const DEFAULT_GEOCODER_URL: &str = "https://nominatim.openstreetmap.org";

/// Public Generative Language API
pub const DEFAULT_LLM_URL: &str = "https://generativelanguage.googleapis.com";

/// Nominatim usage policy: at most one request per second
pub const MIN_GEOCODER_DELAY_MS: u64 = 1000;

/// Configuration source for tracking where values come from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConfigSource {
    /// Default value
    Default,
    /// Loaded from config file
    File,
    /// Loaded from environment variable
    Environment,
    /// Provided via CLI argument
    Cli,
}

impl ConfigSource {
    /// Returns the precedence level (higher = higher priority)
    pub fn precedence(&self) -> u8 {
        match self {
            ConfigSource::Default => 0,
            ConfigSource::File => 1,
            ConfigSource::Environment => 2,
            ConfigSource::Cli => 3,
        }
    }
}

/// A configuration value with its source
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfigValue<T> {
    pub value: T,
    pub source: ConfigSource,
}

impl<T> ConfigValue<T> {
    pub fn new(value: T, source: ConfigSource) -> Self {
        Self { value, source }
    }

    /// Update the value if the new source has higher precedence
    pub fn update(&mut self, value: T, source: ConfigSource) {
        if source.precedence() > self.source.precedence() {
            self.value = value;
            self.source = source;
        }
    }
}

/// Layered configuration for GeoLLM
#[derive(Debug, Clone)]
pub struct GeollmConfig {
    pub geocoder_url: ConfigValue<String>,
    pub user_agent: ConfigValue<String>,
    pub geocoder_min_delay_ms: ConfigValue<u64>,
    pub llm_url: ConfigValue<String>,
    pub llm_model: ConfigValue<String>,
    pub region_margin: ConfigValue<f64>,
}

impl GeollmConfig {
    /// Create a new configuration with default values
    pub fn with_defaults() -> Self {
        Self {
            geocoder_url: ConfigValue::new(DEFAULT_GEOCODER_URL.to_string(), ConfigSource::Default),
            user_agent: ConfigValue::new(
                "isro-geollm-assistant".to_string(),
                ConfigSource::Default,
            ),
            geocoder_min_delay_ms: ConfigValue::new(1000, ConfigSource::Default),
            llm_url: ConfigValue::new(DEFAULT_LLM_URL.to_string(), ConfigSource::Default),
            llm_model: ConfigValue::new("gemini-2.0-flash-exp".to_string(), ConfigSource::Default),
            region_margin: ConfigValue::new(INDIA_REGION_MARGIN, ConfigSource::Default),
        }
    }

    /// Load configuration from a TOML file
    pub fn load_from_file<P: AsRef<Path>>(mut self, path: P) -> Result<Self> {
        let content =
            fs::read_to_string(path.as_ref()).map_err(|e| GeollmError::ConfigInvalid {
                key: "file".to_string(),
                reason: format!("Failed to read config file: {}", e),
            })?;

        let file_config: FileConfig =
            toml::from_str(&content).map_err(|e| GeollmError::ConfigInvalid {
                key: "file".to_string(),
                reason: format!("Failed to parse TOML: {}", e),
            })?;

        if let Some(url) = file_config.geocoder_url {
            self.geocoder_url.update(url, ConfigSource::File);
        }

        if let Some(user_agent) = file_config.user_agent {
            self.user_agent.update(user_agent, ConfigSource::File);
        }

        if let Some(delay) = file_config.geocoder_min_delay_ms {
            let delay = parse_geocoder_delay(&delay.to_string())?;
            self.geocoder_min_delay_ms.update(delay, ConfigSource::File);
        }

        if let Some(url) = file_config.llm_url {
            self.llm_url.update(url, ConfigSource::File);
        }

        if let Some(model) = file_config.llm_model {
            self.llm_model.update(model, ConfigSource::File);
        }

        if let Some(margin) = file_config.region_margin {
            let margin = parse_region_margin(&margin.to_string())?;
            self.region_margin.update(margin, ConfigSource::File);
        }

        Ok(self)
    }

    /// Load configuration from environment variables
    pub fn load_from_env(mut self) -> Self {
        // GEOLLM_GEOCODER_URL
        if let Ok(url) = env::var("GEOLLM_GEOCODER_URL") {
            self.geocoder_url.update(url, ConfigSource::Environment);
        }

        // GEOLLM_USER_AGENT
        if let Ok(user_agent) = env::var("GEOLLM_USER_AGENT") {
            self.user_agent.update(user_agent, ConfigSource::Environment);
        }

        // GEOLLM_GEOCODER_MIN_DELAY_MS
        if let Ok(delay_str) = env::var("GEOLLM_GEOCODER_MIN_DELAY_MS") {
            match parse_geocoder_delay(&delay_str) {
                Ok(delay) => self.geocoder_min_delay_ms.update(delay, ConfigSource::Environment),
                Err(_) => tracing::warn!(
                    "Invalid GEOLLM_GEOCODER_MIN_DELAY_MS value '{}': expected at least {} milliseconds",
                    delay_str,
                    MIN_GEOCODER_DELAY_MS
                ),
            }
        }

        // GEOLLM_LLM_URL
        if let Ok(url) = env::var("GEOLLM_LLM_URL") {
            self.llm_url.update(url, ConfigSource::Environment);
        }

        // GEOLLM_LLM_MODEL
        if let Ok(model) = env::var("GEOLLM_LLM_MODEL") {
            self.llm_model.update(model, ConfigSource::Environment);
        }

        // GEOLLM_REGION_MARGIN
        if let Ok(margin_str) = env::var("GEOLLM_REGION_MARGIN") {
            match parse_region_margin(&margin_str) {
                Ok(margin) => self.region_margin.update(margin, ConfigSource::Environment),
                Err(_) => tracing::warn!(
                    "Invalid GEOLLM_REGION_MARGIN value '{}': expected non-negative degrees",
                    margin_str
                ),
            }
        }

        self
    }

    /// Update configuration from CLI arguments
    pub fn update_from_cli(&mut self, overrides: CliConfigOverrides) {
        if let Some(url) = overrides.geocoder_url {
            self.geocoder_url.update(url, ConfigSource::Cli);
        }

        if let Some(delay) = overrides.geocoder_min_delay_ms {
            self.geocoder_min_delay_ms
                .update(delay.max(MIN_GEOCODER_DELAY_MS), ConfigSource::Cli);
        }

        if let Some(model) = overrides.llm_model {
            self.llm_model.update(model, ConfigSource::Cli);
        }

        if let Some(margin) = overrides.region_margin {
            self.region_margin.update(margin, ConfigSource::Cli);
        }
    }

    /// Minimum gap between two geocoder requests, never below one second
    pub fn geocoder_min_delay(&self) -> Duration {
        Duration::from_millis(self.geocoder_min_delay_ms.value.max(MIN_GEOCODER_DELAY_MS))
    }

    /// Get all configuration values as a map for inspection
    pub fn to_inspection_map(&self) -> BTreeMap<String, (String, ConfigSource)> {
        let mut map = BTreeMap::new();

        map.insert(
            "geocoder_url".to_string(),
            (self.geocoder_url.value.clone(), self.geocoder_url.source),
        );
        map.insert(
            "user_agent".to_string(),
            (self.user_agent.value.clone(), self.user_agent.source),
        );
        map.insert(
            "geocoder_min_delay_ms".to_string(),
            (self.geocoder_min_delay_ms.value.to_string(), self.geocoder_min_delay_ms.source),
        );
        map.insert("llm_url".to_string(), (self.llm_url.value.clone(), self.llm_url.source));
        map.insert("llm_model".to_string(), (self.llm_model.value.clone(), self.llm_model.source));
        map.insert(
            "region_margin".to_string(),
            (format!("{}°", self.region_margin.value), self.region_margin.source),
        );

        map
    }
}

impl Default for GeollmConfig {
    fn default() -> Self {
        Self::with_defaults()
    }
}

/// Configuration loaded from TOML file
#[derive(Debug, Deserialize, Serialize)]
struct FileConfig {
    geocoder_url: Option<String>,
    user_agent: Option<String>,
    geocoder_min_delay_ms: Option<u64>,
    llm_url: Option<String>,
    llm_model: Option<String>,
    region_margin: Option<f64>,
}

/// CLI configuration overrides
#[derive(Debug, Default)]
pub struct CliConfigOverrides {
    pub geocoder_url: Option<String>,
    pub geocoder_min_delay_ms: Option<u64>,
    pub llm_model: Option<String>,
    pub region_margin: Option<f64>,
}

/// Parse a region margin in degrees
pub fn parse_region_margin(s: &str) -> Result<f64> {
    match s.trim().parse::<f64>() {
        Ok(margin) if margin.is_finite() && margin >= 0.0 => Ok(margin),
        _ => Err(GeollmError::ConfigInvalid {
            key: "region_margin".to_string(),
            reason: format!("Invalid region margin: {}. Use a non-negative number of degrees", s),
        }),
    }
}

/// Parse a geocoder request gap in milliseconds
pub fn parse_geocoder_delay(s: &str) -> Result<u64> {
    match s.trim().parse::<u64>() {
        Ok(delay) if delay >= MIN_GEOCODER_DELAY_MS => Ok(delay),
        _ => Err(GeollmError::ConfigInvalid {
            key: "geocoder_min_delay_ms".to_string(),
            reason: format!(
                "Invalid geocoder delay: {}. Use at least {} milliseconds",
                s, MIN_GEOCODER_DELAY_MS
            ),
        }),
    }
}

/// Read the text-generation API key from the environment
pub fn api_key_from_env() -> Result<String> {
    match env::var(API_KEY_ENV) {
        Ok(key) if !key.trim().is_empty() => Ok(key),
        _ => Err(GeollmError::ConfigMissing { key: API_KEY_ENV.to_string() }),
    }
}
