//! Registry configuration loaded from YAML

use crate::data_service::RetryConfig;
use crate::{CoreError, Result};
use serde::Deserialize;
use std::path::Path;
use std::time::Duration;

/// Logging configuration
#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct LoggingConfig {
    /// Default tracing filter, overridden by RUST_LOG
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_retry_interval_ms() -> u64 {
    10
}

fn default_max_connection_attempts() -> u32 {
    3
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Configuration {
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Delay between two store connection attempts
    #[serde(default = "default_retry_interval_ms")]
    pub rnib_retry_interval_ms: u64,

    /// Attempts per store call before the error is surfaced
    #[serde(default = "default_max_connection_attempts")]
    pub max_rnib_connection_attempts: u32,

    /// E2T addresses registered at startup
    #[serde(default)]
    pub e2t_instances: Vec<String>,
}

impl Default for Configuration {
    fn default() -> Self {
        Self {
            logging: LoggingConfig::default(),
            rnib_retry_interval_ms: default_retry_interval_ms(),
            max_rnib_connection_attempts: default_max_connection_attempts(),
            e2t_instances: Vec::new(),
        }
    }
}

impl Configuration {
    /// Read and validate a configuration file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    pub fn from_yaml(content: &str) -> Result<Self> {
        let config: Configuration = serde_yaml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.max_rnib_connection_attempts == 0 {
            return Err(CoreError::InvalidConfiguration(
                "maxRnibConnectionAttempts must be at least 1".to_string(),
            ));
        }

        for address in &self.e2t_instances {
            let valid = address
                .rsplit_once(':')
                .map(|(host, port)| !host.is_empty() && port.parse::<u16>().is_ok())
                .unwrap_or(false);
            if !valid {
                return Err(CoreError::InvalidConfiguration(format!(
                    "E2T address {:?} is not host:port",
                    address
                )));
            }
        }

        Ok(())
    }

    pub fn retry_config(&self) -> RetryConfig {
        RetryConfig {
            retry_interval: Duration::from_millis(self.rnib_retry_interval_ms),
            max_attempts: self.max_rnib_connection_attempts,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_from_empty_document() {
        let config = Configuration::from_yaml("{}").unwrap();
        assert_eq!(config, Configuration::default());
        assert_eq!(config.logging.level, "info");
        assert_eq!(config.retry_config(), RetryConfig::default());
    }

    #[test]
    fn test_full_document() {
        let yaml = r#"
logging:
  level: debug
rnibRetryIntervalMs: 250
maxRnibConnectionAttempts: 5
e2tInstances:
  - 10.10.2.15:9800
  - 10.10.2.16:9800
"#;
        let config = Configuration::from_yaml(yaml).unwrap();
        assert_eq!(config.logging.level, "debug");
        assert_eq!(config.e2t_instances.len(), 2);

        let retry = config.retry_config();
        assert_eq!(retry.retry_interval, Duration::from_millis(250));
        assert_eq!(retry.max_attempts, 5);
    }

    #[test]
    fn test_zero_attempts_rejected() {
        let err = Configuration::from_yaml("maxRnibConnectionAttempts: 0").unwrap_err();
        assert!(matches!(err, CoreError::InvalidConfiguration(_)));
    }

    #[test]
    fn test_bad_address_rejected() {
        let err = Configuration::from_yaml("e2tInstances: [\"10.10.2.15\"]").unwrap_err();
        assert!(matches!(err, CoreError::InvalidConfiguration(_)));

        let err = Configuration::from_yaml("e2tInstances: [\"10.10.2.15:http\"]").unwrap_err();
        assert!(matches!(err, CoreError::InvalidConfiguration(_)));
    }

    #[test]
    fn test_malformed_yaml() {
        let err = Configuration::from_yaml("rnibRetryIntervalMs: [").unwrap_err();
        assert!(matches!(err, CoreError::ConfigParse(_)));
    }
}
