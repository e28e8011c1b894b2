//! Unified error handling for Hyperlux
//!
//! This crate provides the single error type shared by the core library and the daemon.
//! Device failures carry the offending sysfs path so the fatal log line says which
//! resource disappeared or became unreadable.

use std::io;
use std::path::PathBuf;

/// Result type alias using HyperluxError
pub type Result<T> = std::result::Result<T, HyperluxError>;

/// Unified error type for all Hyperlux operations
#[derive(thiserror::Error, Debug)]
pub enum HyperluxError {
    // ============================================================================
    // I/O and File System Errors
    // ============================================================================
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Failed to read file {path}: {source}")]
    FileRead {
        path: PathBuf,
        source: io::Error,
    },

    #[error("Failed to write file {path}: {source}")]
    FileWrite {
        path: PathBuf,
        source: io::Error,
    },

    // ============================================================================
    // Device Access Errors
    // ============================================================================
    #[error("Failed to read ambient light from {path}: {reason}")]
    SensorRead {
        path: PathBuf,
        reason: String,
    },

    #[error("Failed to read backlight from {path}: {reason}")]
    BacklightRead {
        path: PathBuf,
        reason: String,
    },

    #[error("Failed to write backlight to {path}: {reason}")]
    BacklightWrite {
        path: PathBuf,
        reason: String,
    },

    #[error("Device not found: {0}")]
    DeviceNotFound(String),

    #[error("Invalid device path {path}: {reason}")]
    InvalidPath {
        path: PathBuf,
        reason: String,
    },

    // ============================================================================
    // Configuration Errors
    // ============================================================================
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Failed to parse JSON: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("Invalid configuration value for {field}: {reason}")]
    InvalidConfig {
        field: String,
        reason: String,
    },
}

impl HyperluxError {
    /// Create a config error from a string
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create an invalid configuration value error
    pub fn invalid_config(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidConfig {
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// Create an invalid path error
    pub fn invalid_path(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        Self::InvalidPath {
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Whether this error came from the sensor or backlight resource itself
    pub fn is_device_error(&self) -> bool {
        matches!(
            self,
            Self::SensorRead { .. }
                | Self::BacklightRead { .. }
                | Self::BacklightWrite { .. }
                | Self::DeviceNotFound(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_device_error_display_includes_path() {
        let err = HyperluxError::BacklightWrite {
            path: PathBuf::from("/sys/class/backlight/intel_backlight/brightness"),
            reason: "Permission denied".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("intel_backlight/brightness"));
        assert!(msg.contains("Permission denied"));
        assert!(err.is_device_error());
    }

    #[test]
    fn test_config_errors_are_not_device_errors() {
        assert!(!HyperluxError::config("bad").is_device_error());
        assert!(!HyperluxError::invalid_config("probes", "must be at least 1").is_device_error());
    }
}
