//! Runtime settings for the monitor

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

/// How log lines are rendered on stdout
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Text,
    Json,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MonitorConfig {
    /// Path to the YAML endpoint list
    pub config_path: PathBuf,

    /// Delay between check cycles
    pub check_interval: Duration,

    /// Per-request timeout
    pub http_timeout: Duration,

    pub log_format: LogFormat,
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            config_path: PathBuf::from("endpoints.yaml"),
            check_interval: Duration::from_secs(15),
            http_timeout: Duration::from_secs(10),
            log_format: LogFormat::Text,
        }
    }
}

impl MonitorConfig {
    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.config_path.as_os_str().is_empty() {
            return Err("config_path cannot be empty".to_string());
        }

        if self.check_interval.is_zero() {
            return Err("check_interval must be greater than 0".to_string());
        }

        if self.http_timeout.is_zero() {
            return Err("http_timeout must be greater than 0".to_string());
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = MonitorConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.check_interval, Duration::from_secs(15));
    }

    #[test]
    fn test_zero_interval_rejected() {
        let config = MonitorConfig {
            check_interval: Duration::ZERO,
            ..MonitorConfig::default()
        };
        assert_eq!(
            config.validate().unwrap_err(),
            "check_interval must be greater than 0"
        );
    }

    #[test]
    fn test_zero_timeout_rejected() {
        let config = MonitorConfig {
            http_timeout: Duration::ZERO,
            ..MonitorConfig::default()
        };
        assert!(config.validate().is_err());
    }
}
