// src/config/models.rs
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;
use url::Url;

pub const DEFAULT_TIMEOUT_MS: u64 = 15_000;
pub const MAX_TIMEOUT_MS: u64 = 300_000;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("probe timeout must be greater than zero")]
    ZeroTimeout,

    #[error("probe timeout of {0}ms exceeds the {max}ms limit", max = MAX_TIMEOUT_MS)]
    TimeoutTooLong(u64),

    #[error("unsupported endpoint scheme '{0}', expected http or https")]
    UnsupportedScheme(String),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub probe: ProbeConfig,
    #[serde(default)]
    pub metrics: MetricsConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProbeConfig {
    pub endpoint: Url,
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MetricsConfig {
    #[serde(default)]
    pub enabled: bool,
    #[serde(default = "default_metrics_path")]
    pub path: PathBuf,
}

impl Default for MetricsConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            path: default_metrics_path(),
        }
    }
}

fn default_timeout_ms() -> u64 {
    DEFAULT_TIMEOUT_MS
}

fn default_metrics_path() -> PathBuf {
    PathBuf::from("status_probe.prom")
}

impl Config {
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.probe.validate()
    }
}

impl ProbeConfig {
    pub fn new(endpoint: Url) -> Self {
        Self {
            endpoint,
            timeout_ms: DEFAULT_TIMEOUT_MS,
        }
    }

    pub fn with_timeout_ms(mut self, timeout_ms: u64) -> Self {
        self.timeout_ms = timeout_ms;
        self
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.timeout_ms == 0 {
            return Err(ConfigError::ZeroTimeout);
        }
        if self.timeout_ms > MAX_TIMEOUT_MS {
            return Err(ConfigError::TimeoutTooLong(self.timeout_ms));
        }
        match self.endpoint.scheme() {
            "http" | "https" => Ok(()),
            other => Err(ConfigError::UnsupportedScheme(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn endpoint() -> Url {
        Url::parse("https://status.example.com/api/v2/status.json").unwrap()
    }

    #[test]
    fn test_defaults_from_yaml() {
        let yaml = "probe:\n  endpoint: https://status.example.com/api/v2/status.json\n";
        let config: Config = serde_yaml::from_str(yaml).unwrap();

        assert_eq!(config.probe.timeout_ms, DEFAULT_TIMEOUT_MS);
        assert_eq!(config.probe.timeout(), Duration::from_secs(15));
        assert!(!config.metrics.enabled);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_rejects_zero_timeout() {
        let probe = ProbeConfig::new(endpoint()).with_timeout_ms(0);
        assert_eq!(probe.validate(), Err(ConfigError::ZeroTimeout));
    }

    #[test]
    fn test_rejects_excessive_timeout() {
        let probe = ProbeConfig::new(endpoint()).with_timeout_ms(MAX_TIMEOUT_MS + 1);
        assert_eq!(
            probe.validate(),
            Err(ConfigError::TimeoutTooLong(MAX_TIMEOUT_MS + 1))
        );
    }

    #[test]
    fn test_rejects_non_http_scheme() {
        let probe = ProbeConfig::new(Url::parse("ftp://status.example.com/status.json").unwrap());
        assert_eq!(
            probe.validate(),
            Err(ConfigError::UnsupportedScheme("ftp".to_string()))
        );
    }
}
