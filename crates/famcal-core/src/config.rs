//! Configuration management
//!
//! Settings are resolved in this order:
//! 1. Environment variables
//! 2. famcal.toml configuration file
//! 3. Defaults
//!
//! `${VAR_NAME}` inside the configuration file expands to the value of
//! that environment variable.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::{Error, Result};

/// Backend API configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Base URL of the household backend
    #[serde(default = "default_api_url")]
    pub base_url: String,

    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_api_url(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

/// Location search configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeocodeConfig {
    /// Nominatim-compatible search endpoint
    #[serde(default = "default_geocode_url")]
    pub base_url: String,

    /// Delay before a lookup is issued while the user is still typing
    #[serde(default = "default_debounce_ms")]
    pub debounce_ms: u64,

    /// Maximum suggestions per lookup
    #[serde(default = "default_geocode_limit")]
    pub limit: u32,
}

impl Default for GeocodeConfig {
    fn default() -> Self {
        Self {
            base_url: default_geocode_url(),
            debounce_ms: default_debounce_ms(),
            limit: default_geocode_limit(),
        }
    }
}

/// Session persistence configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Path of the saved session file
    #[serde(default = "default_session_path")]
    pub path: String,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            path: default_session_path(),
        }
    }
}

fn default_api_url() -> String {
    "http://localhost:8000".to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_geocode_url() -> String {
    "https://nominatim.openstreetmap.org".to_string()
}

fn default_debounce_ms() -> u64 {
    500
}

fn default_geocode_limit() -> u32 {
    5
}

fn default_session_path() -> String {
    "data/famcal-session.json".to_string()
}

/// Main configuration for famcal
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Backend API settings
    #[serde(default)]
    pub api: ApiConfig,

    /// Location search settings
    #[serde(default)]
    pub geocode: GeocodeConfig,

    /// Session persistence settings
    #[serde(default)]
    pub session: SessionConfig,
}

impl Config {
    /// Expand `${VAR_NAME}` references against the environment.
    ///
    /// Unset variables expand to the empty string.
    fn expand_env_vars(value: &str) -> String {
        let mut result = String::new();
        let mut chars = value.chars().peekable();

        while let Some(c) = chars.next() {
            if c == '$' && chars.peek() == Some(&'{') {
                chars.next(); // consume '{'

                let mut var_name = String::new();
                while let Some(&c) = chars.peek() {
                    if c == '}' {
                        chars.next(); // consume '}'
                        break;
                    }
                    var_name.push(chars.next().unwrap());
                }

                if let Ok(env_value) = std::env::var(&var_name) {
                    result.push_str(&env_value);
                }
            } else {
                result.push(c);
            }
        }

        result
    }

    /// Load configuration from a TOML file, then apply env overrides.
    pub fn from_toml_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        let toml_content = std::fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("Failed to read config file: {}", e)))?;

        let expanded_content = Self::expand_env_vars(&toml_content);

        let mut config: Config = toml::from_str(&expanded_content)
            .map_err(|e| Error::Config(format!("Failed to parse TOML: {}", e)))?;

        config.apply_env_overrides();

        Ok(config)
    }

    /// Load configuration from the default locations.
    ///
    /// Tries `./famcal.toml` first, otherwise falls back to environment
    /// variables over the defaults.
    pub fn load() -> Result<Self> {
        if Path::new("famcal.toml").exists() {
            return Self::from_toml_file("famcal.toml");
        }

        Self::from_env()
    }

    /// Build a configuration from environment variables alone.
    pub fn from_env() -> Result<Self> {
        let mut config = Config::default();
        config.apply_env_overrides();
        Ok(config)
    }

    /// Environment variables win over file values.
    fn apply_env_overrides(&mut self) {
        if let Ok(url) = std::env::var("FAMCAL_API_URL") {
            if !url.is_empty() {
                self.api.base_url = url;
            }
        }
        if let Ok(timeout) = std::env::var("FAMCAL_API_TIMEOUT_SECS") {
            if let Ok(t) = timeout.parse() {
                self.api.timeout_secs = t;
            }
        }

        if let Ok(url) = std::env::var("FAMCAL_GEOCODE_URL") {
            if !url.is_empty() {
                self.geocode.base_url = url;
            }
        }
        if let Ok(ms) = std::env::var("FAMCAL_GEOCODE_DEBOUNCE_MS") {
            if let Ok(ms) = ms.parse() {
                self.geocode.debounce_ms = ms;
            }
        }
        if let Ok(limit) = std::env::var("FAMCAL_GEOCODE_LIMIT") {
            if let Ok(l) = limit.parse() {
                self.geocode.limit = l;
            }
        }

        if let Ok(path) = std::env::var("FAMCAL_SESSION_PATH") {
            if !path.is_empty() {
                self.session.path = path;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_config_default() {
        let config = ApiConfig::default();
        assert_eq!(config.base_url, "http://localhost:8000");
        assert_eq!(config.timeout_secs, 30);
    }

    #[test]
    fn test_geocode_config_default() {
        let config = GeocodeConfig::default();
        assert_eq!(config.base_url, "https://nominatim.openstreetmap.org");
        assert_eq!(config.debounce_ms, 500);
        assert_eq!(config.limit, 5);
    }

    #[test]
    fn test_session_config_default() {
        let config = SessionConfig::default();
        assert_eq!(config.path, "data/famcal-session.json");
    }

    #[test]
    fn test_expand_env_vars() {
        unsafe {
            std::env::set_var("FAMCAL_TEST_VAR", "test_value");
        }

        let result = Config::expand_env_vars("prefix_${FAMCAL_TEST_VAR}_suffix");
        assert_eq!(result, "prefix_test_value_suffix");

        let result = Config::expand_env_vars("prefix_${FAMCAL_NONEXISTENT_VAR}_suffix");
        assert_eq!(result, "prefix__suffix");

        unsafe {
            std::env::remove_var("FAMCAL_TEST_VAR");
        }
    }

    #[test]
    fn test_expand_env_vars_no_braces() {
        let result = Config::expand_env_vars("no_vars_here");
        assert_eq!(result, "no_vars_here");
    }

    #[test]
    fn test_toml_parsing() {
        let toml_content = r#"
[api]
base_url = "https://famcal.example.com"
timeout_secs = 10

[geocode]
debounce_ms = 250

[session]
path = "/tmp/session.json"
"#;

        let config: Config = toml::from_str(toml_content).unwrap();
        assert_eq!(config.api.base_url, "https://famcal.example.com");
        assert_eq!(config.api.timeout_secs, 10);
        assert_eq!(config.geocode.debounce_ms, 250);
        // unset sections and fields keep their defaults
        assert_eq!(config.geocode.limit, 5);
        assert_eq!(config.session.path, "/tmp/session.json");
    }
}
