// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Error types for commitlint.
//!
//! Validation never fails: rule violations are returned as findings.
//! The errors defined here cover building a configuration.

use thiserror::Error;

/// The main error type for commitlint operations.
#[derive(Error, Debug)]
pub enum CommitlintError {
    // Configuration errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}

/// Configuration-related errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Failed to parse configuration: {message}")]
    ParseError { message: String },

    #[error("Invalid configuration value for '{key}': {message}")]
    InvalidValue { key: String, message: String },

    #[error("Unknown preset: '{name}' (expected 'strict' or 'relaxed')")]
    UnknownPreset { name: String },
}

/// Result type alias for commitlint operations.
pub type Result<T> = std::result::Result<T, CommitlintError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_value_display() {
        let err = ConfigError::InvalidValue {
            key: "header-max-length".to_string(),
            message: "expected a number".to_string(),
        };
        assert!(err.to_string().contains("header-max-length"));
        assert!(err.to_string().contains("expected a number"));
    }

    #[test]
    fn test_error_from_config_error() {
        let config_err = ConfigError::UnknownPreset {
            name: "lenient".to_string(),
        };
        let err: CommitlintError = config_err.into();
        assert!(err.to_string().starts_with("Configuration error"));
        assert!(err.to_string().contains("lenient"));
    }
}
