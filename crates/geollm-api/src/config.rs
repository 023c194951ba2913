use std::env;
use std::path::PathBuf;

use geollm_core::config::GeollmConfig;
use geollm_core::error::Result;

/// API server configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct ApiConfig {
    pub port: u16,
    pub cors_origin: String,
    /// Optional TOML file layered under the environment
    pub config_path: Option<PathBuf>,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self { port: 5000, cors_origin: "*".to_string(), config_path: None }
    }
}

impl ApiConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        let defaults = Self::default();

        let port = env::var("GEOLLM_PORT").ok().and_then(|p| p.parse().ok()).unwrap_or(defaults.port);

        let cors_origin = env::var("GEOLLM_CORS_ORIGIN").unwrap_or(defaults.cors_origin);

        let config_path = env::var("GEOLLM_CONFIG").ok().filter(|p| !p.is_empty()).map(PathBuf::from);

        Self { port, cors_origin, config_path }
    }

    /// Get the server bind address
    pub fn bind_address(&self) -> String {
        format!("0.0.0.0:{}", self.port)
    }

    /// Service settings: defaults, then the config file if any, then the environment
    pub fn service_config(&self) -> Result<GeollmConfig> {
        let mut config = GeollmConfig::with_defaults();
        if let Some(path) = &self.config_path {
            config = config.load_from_file(path)?;
        }
        Ok(config.load_from_env())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use geollm_core::config::ConfigSource;
    use serial_test::serial;
    use std::io::Write;

    fn clear_env() {
        for key in ["GEOLLM_PORT", "GEOLLM_CORS_ORIGIN", "GEOLLM_CONFIG", "GEOLLM_LLM_MODEL"] {
            env::remove_var(key);
        }
    }

    #[test]
    #[serial]
    fn test_defaults() {
        clear_env();
        let config = ApiConfig::from_env();
        assert_eq!(config.port, 5000);
        assert_eq!(config.cors_origin, "*");
        assert!(config.config_path.is_none());
        assert_eq!(config.bind_address(), "0.0.0.0:5000");
    }

    #[test]
    #[serial]
    fn test_env_overrides() {
        clear_env();
        env::set_var("GEOLLM_PORT", "8088");
        env::set_var("GEOLLM_CORS_ORIGIN", "http://localhost:3000");

        let config = ApiConfig::from_env();
        assert_eq!(config.port, 8088);
        assert_eq!(config.cors_origin, "http://localhost:3000");

        env::set_var("GEOLLM_PORT", "not-a-port");
        assert_eq!(ApiConfig::from_env().port, 5000);
        clear_env();
    }

    #[test]
    #[serial]
    fn test_service_config_layers_file_under_env() {
        clear_env();
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "llm_model = \"gemini-file\"\nregion_margin = 2.5").unwrap();

        env::set_var("GEOLLM_CONFIG", file.path());
        env::set_var("GEOLLM_LLM_MODEL", "gemini-env");

        let config = ApiConfig::from_env().service_config().unwrap();
        assert_eq!(config.llm_model.value, "gemini-env");
        assert_eq!(config.llm_model.source, ConfigSource::Environment);
        assert_eq!(config.region_margin.value, 2.5);
        assert_eq!(config.region_margin.source, ConfigSource::File);
        clear_env();
    }
}
