//! # Error Module
//!
//! Error types for the photo stacker.
//!
//! The stacking engine itself is total: every asset is either grouped or
//! silently dropped. Errors only come from the layers around it (walking
//! directories, parsing configuration, writing output).

use std::path::PathBuf;
use thiserror::Error;

/// Top-level application error
#[derive(Error, Debug)]
pub enum StackerError {
    #[error("Scanning error: {0}")]
    Scan(#[from] ScanError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Failed to write output: {0}")]
    Output(String),
}

/// Errors that occur while discovering media files
#[derive(Error, Debug)]
pub enum ScanError {
    #[error("Directory not found: {path}")]
    DirectoryNotFound { path: PathBuf },

    #[error("Permission denied accessing: {path}")]
    PermissionDenied { path: PathBuf },

    #[error("Failed to read {path}: {source}")]
    ReadEntry {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Errors in user-supplied configuration
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Invalid date range '{input}': {reason}")]
    InvalidDateRange { input: String, reason: String },

    #[error("Invalid value for {field}: {reason}")]
    InvalidValue { field: String, reason: String },
}

/// Convenience Result type alias
pub type Result<T> = std::result::Result<T, StackerError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scan_error_includes_path() {
        let error = ScanError::DirectoryNotFound {
            path: PathBuf::from("/photos/vacation"),
        };
        assert!(error.to_string().contains("/photos/vacation"));
    }

    #[test]
    fn date_range_error_echoes_input() {
        let error = ConfigError::InvalidDateRange {
            input: "2024-13".to_string(),
            reason: "month out of range".to_string(),
        };
        let message = error.to_string();
        assert!(message.contains("2024-13"));
        assert!(message.contains("month out of range"));
    }

    #[test]
    fn config_error_converts_to_top_level() {
        let error: StackerError = ConfigError::InvalidValue {
            field: "max_depth".to_string(),
            reason: "must be positive".to_string(),
        }
        .into();
        assert!(matches!(error, StackerError::Config(_)));
        assert!(error.to_string().starts_with("Configuration error"));
    }
}
