//! Document store configuration

use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::errors::{StoreError, StoreResult};

/// Connection settings for the document store
#[derive(Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StoreConfig {
    /// Network address as `host:port` (default: "127.0.0.1:6379")
    #[serde(default = "default_address")]
    pub address: String,

    /// Credential used to authenticate every new connection.
    /// Never read from the config file.
    #[serde(skip)]
    pub password: Option<String>,

    /// Idle connections kept in the pool (default: 80)
    #[serde(default = "default_max_idle")]
    pub max_idle: usize,

    /// Upper bound on open connections (default: 12000)
    #[serde(default = "default_max_active")]
    pub max_active: usize,

    /// Deadline for checkout plus command, in milliseconds (default: 5000)
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
}

fn default_address() -> String {
    "127.0.0.1:6379".to_string()
}

fn default_max_idle() -> usize {
    80
}

fn default_max_active() -> usize {
    12000
}

fn default_timeout_ms() -> u64 {
    5000
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            address: default_address(),
            password: None,
            max_idle: default_max_idle(),
            max_active: default_max_active(),
            timeout_ms: default_timeout_ms(),
        }
    }
}

impl std::fmt::Debug for StoreConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StoreConfig")
            .field("address", &self.address)
            .field("password", &self.password.as_ref().map(|_| "<redacted>"))
            .field("max_idle", &self.max_idle)
            .field("max_active", &self.max_active)
            .field("timeout_ms", &self.timeout_ms)
            .finish()
    }
}

impl StoreConfig {
    /// Create a config for the given address
    pub fn with_address(address: impl Into<String>) -> Self {
        Self {
            address: address.into(),
            ..Default::default()
        }
    }

    /// Split the address into host and port
    pub fn host_port(&self) -> StoreResult<(String, u16)> {
        let (host, port) = self
            .address
            .rsplit_once(':')
            .ok_or_else(|| StoreError::InvalidAddress(self.address.clone()))?;

        if host.is_empty() {
            return Err(StoreError::InvalidAddress(self.address.clone()));
        }

        let port = port
            .parse::<u16>()
            .map_err(|_| StoreError::InvalidAddress(self.address.clone()))?;

        Ok((host.to_string(), port))
    }

    /// Operation deadline
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = StoreConfig::default();
        assert_eq!(config.address, "127.0.0.1:6379");
        assert_eq!(config.max_idle, 80);
        assert_eq!(config.max_active, 12000);
        assert!(config.password.is_none());
    }

    #[test]
    fn test_host_port() {
        let config = StoreConfig::with_address("redis.internal:13341");
        assert_eq!(
            config.host_port().unwrap(),
            ("redis.internal".to_string(), 13341)
        );
    }

    #[test]
    fn test_host_port_rejects_malformed() {
        for address in ["localhost", ":6379", "localhost:port", "localhost:70000"] {
            let config = StoreConfig::with_address(address);
            assert!(
                matches!(config.host_port(), Err(StoreError::InvalidAddress(_))),
                "{address} should be rejected"
            );
        }
    }

    #[test]
    fn test_debug_redacts_password() {
        let mut config = StoreConfig::default();
        config.password = Some("hunter2".to_string());
        let rendered = format!("{:?}", config);
        assert!(!rendered.contains("hunter2"));
        assert!(rendered.contains("<redacted>"));
    }

    #[test]
    fn test_password_not_read_from_json() {
        let config: StoreConfig =
            serde_json::from_str(r#"{"address": "10.0.0.5:6380", "max_idle": 4}"#).unwrap();
        assert_eq!(config.address, "10.0.0.5:6380");
        assert_eq!(config.max_idle, 4);
        assert_eq!(config.max_active, 12000);
        assert!(config.password.is_none());
    }
}
