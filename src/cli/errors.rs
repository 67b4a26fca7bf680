//! CLI-specific error types
//!
//! All CLI errors are fatal: `main` prints them and exits non-zero.

use std::fmt;

use crate::store::StoreError;

/// CLI error codes
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CliErrorCode {
    /// Configuration file or environment error
    ConfigError,
    /// Store unreachable or refused the credential
    StoreUnavailable,
    /// Boot failed
    BootFailed,
}

impl CliErrorCode {
    /// Get the error code string
    pub fn code(&self) -> &'static str {
        match self {
            Self::ConfigError => "QUERYSTORE_CONFIG_ERROR",
            Self::StoreUnavailable => "QUERYSTORE_STORE_UNAVAILABLE",
            Self::BootFailed => "QUERYSTORE_BOOT_FAILED",
        }
    }
}

/// CLI error
#[derive(Debug)]
pub struct CliError {
    code: CliErrorCode,
    message: String,
}

impl CliError {
    /// Create a new CLI error
    pub fn new(code: CliErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    /// Config error
    pub fn config_error(msg: impl Into<String>) -> Self {
        Self::new(CliErrorCode::ConfigError, msg)
    }

    /// Store unavailable
    pub fn store_unavailable(msg: impl Into<String>) -> Self {
        Self::new(CliErrorCode::StoreUnavailable, msg)
    }

    /// Boot failed
    pub fn boot_failed(msg: impl Into<String>) -> Self {
        Self::new(CliErrorCode::BootFailed, msg)
    }

    /// Get the error code
    pub fn code(&self) -> &CliErrorCode {
        &self.code
    }

    /// Get the error code string
    pub fn code_str(&self) -> &'static str {
        self.code.code()
    }

    /// Get the error message
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code.code(), self.message)
    }
}

impl std::error::Error for CliError {}

impl From<StoreError> for CliError {
    fn from(e: StoreError) -> Self {
        match e {
            StoreError::InvalidAddress(_) => Self::config_error(e.to_string()),
            other => Self::store_unavailable(other.to_string()),
        }
    }
}

/// CLI result type
pub type CliResult<T> = Result<T, CliError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_includes_code() {
        let err = CliError::config_error("max_idle must be > 0");
        assert_eq!(
            err.to_string(),
            "QUERYSTORE_CONFIG_ERROR: max_idle must be > 0"
        );
        assert_eq!(err.message(), "max_idle must be > 0");
    }

    #[test]
    fn test_store_error_mapping() {
        let err = CliError::from(StoreError::InvalidAddress("x".to_string()));
        assert_eq!(err.code(), &CliErrorCode::ConfigError);

        let err = CliError::from(StoreError::Connection("refused".to_string()));
        assert_eq!(err.code_str(), "QUERYSTORE_STORE_UNAVAILABLE");

        let err = CliError::from(StoreError::Timeout(5000));
        assert_eq!(err.code(), &CliErrorCode::StoreUnavailable);
    }

    #[test]
    fn test_error_codes() {
        let codes = [
            CliErrorCode::ConfigError,
            CliErrorCode::StoreUnavailable,
            CliErrorCode::BootFailed,
        ]
        .map(|code| code.code());
        assert_eq!(
            codes,
            [
                "QUERYSTORE_CONFIG_ERROR",
                "QUERYSTORE_STORE_UNAVAILABLE",
                "QUERYSTORE_BOOT_FAILED"
            ]
        );
    }
}
