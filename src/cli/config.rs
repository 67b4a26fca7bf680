//! Service configuration
//!
//! Layers, lowest first: built-in defaults, the optional JSON config file,
//! environment variables, command-line flags. The store credential only ever
//! comes from the environment.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use super::errors::{CliError, CliResult};
use crate::http_server::HttpServerConfig;
use crate::store::StoreConfig;

/// Overrides the store address
pub const STORE_ADDR_ENV: &str = "QUERYSTORE_STORE_ADDR";

/// Supplies the store credential
pub const STORE_PASSWORD_ENV: &str = "QUERYSTORE_STORE_PASSWORD";

/// Configuration file structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ServiceConfig {
    #[serde(default)]
    pub store: StoreConfig,

    #[serde(default)]
    pub http: HttpServerConfig,
}

/// Values given on the command line
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub store_address: Option<String>,
    pub port: Option<u16>,
}

impl ServiceConfig {
    /// Load configuration from file
    pub fn load(path: &Path) -> CliResult<Self> {
        let content = fs::read_to_string(path)
            .map_err(|e| CliError::config_error(format!("Failed to read config: {}", e)))?;

        serde_json::from_str(&content)
            .map_err(|e| CliError::config_error(format!("Invalid config JSON: {}", e)))
    }

    /// Build the effective configuration from every layer
    pub fn resolve(path: Option<&Path>, overrides: &Overrides) -> CliResult<Self> {
        Self::resolve_with(path, overrides, |name| std::env::var(name).ok())
    }

    /// [`resolve`](Self::resolve) with an explicit environment lookup
    pub fn resolve_with<F>(path: Option<&Path>, overrides: &Overrides, env: F) -> CliResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = match path {
            Some(path) => Self::load(path)?,
            None => Self::default(),
        };

        config.apply_env(env);
        config.apply_overrides(overrides);
        config.validate()?;

        Ok(config)
    }

    fn apply_env<F>(&mut self, env: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(address) = env(STORE_ADDR_ENV).filter(|v| !v.is_empty()) {
            self.store.address = address;
        }
        self.store.password = env(STORE_PASSWORD_ENV).filter(|v| !v.is_empty());
    }

    fn apply_overrides(&mut self, overrides: &Overrides) {
        if let Some(address) = &overrides.store_address {
            self.store.address = address.clone();
        }
        if let Some(port) = overrides.port {
            self.http.port = port;
        }
    }

    /// Validate configuration
    fn validate(&self) -> CliResult<()> {
        self.store
            .host_port()
            .map_err(|e| CliError::config_error(e.to_string()))?;

        if self.store.max_active == 0 {
            return Err(CliError::config_error("store.max_active must be > 0"));
        }

        if self.store.max_idle > self.store.max_active {
            return Err(CliError::config_error(format!(
                "store.max_idle ({}) must not exceed store.max_active ({})",
                self.store.max_idle, self.store.max_active
            )));
        }

        if self.store.timeout_ms == 0 {
            return Err(CliError::config_error("store.timeout_ms must be > 0"));
        }

        if self.http.host.is_empty() {
            return Err(CliError::config_error("http.host must not be empty"));
        }

        Ok(())
    }
}
