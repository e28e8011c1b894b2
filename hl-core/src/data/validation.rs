//! Input validation for Hyperlux
//!
//! Checks the controller invariants before the control loop starts and makes
//! sure user-supplied device paths point at the attributes we expect.

use std::path::{Path, PathBuf};

use crate::constants::{backlight, limits, sensor};
use crate::data::config::{ControllerConfig, SensitivityUnit};
use crate::error::{HyperluxError, Result};

/// Validates a resolved controller configuration
///
/// Enforces `0 <= min <= max <= device_max`, `ratio > 0`, `probes >= 1` and
/// `ramp_step > 0`, plus sanity limits on intervals and window size.
pub fn validate_controller_config(config: &ControllerConfig, device_max: u32) -> Result<()> {
    if config.probes == 0 {
        return Err(HyperluxError::invalid_config("probes", "must be at least 1"));
    }

    if config.probes > limits::MAX_PROBES {
        return Err(HyperluxError::invalid_config(
            "probes",
            format!("must be at most {}", limits::MAX_PROBES),
        ));
    }

    if config.ratio == 0 {
        return Err(HyperluxError::invalid_config("ratio", "must be greater than 0"));
    }

    if config.ramp_step == 0 {
        return Err(HyperluxError::invalid_config("ramp_step", "must be greater than 0"));
    }

    if config.max > device_max {
        return Err(HyperluxError::invalid_config(
            "max",
            format!("{} exceeds device maximum {}", config.max, device_max),
        ));
    }

    if config.min > config.max {
        return Err(HyperluxError::invalid_config(
            "min",
            format!("{} exceeds maximum {}", config.min, config.max),
        ));
    }

    if config.sensitivity_unit == SensitivityUnit::Percent
        && config.sensitivity > limits::MAX_SENSITIVITY_PERCENT
    {
        return Err(HyperluxError::invalid_config(
            "sensitivity",
            format!("must be at most {}%", limits::MAX_SENSITIVITY_PERCENT),
        ));
    }

    if config.poll_interval.is_zero() || config.poll_interval > limits::MAX_POLL_INTERVAL {
        return Err(HyperluxError::invalid_config(
            "poll_interval",
            format!("must be between 1ms and {:?}", limits::MAX_POLL_INTERVAL),
        ));
    }

    if config.ramp_interval > limits::MAX_RAMP_INTERVAL {
        return Err(HyperluxError::invalid_config(
            "ramp_interval",
            format!("must be at most {:?}", limits::MAX_RAMP_INTERVAL),
        ));
    }

    Ok(())
}

/// Validates a backlight class directory
///
/// The directory must expose both `brightness` and `max_brightness`.
pub fn validate_backlight_dir(path: &Path) -> Result<PathBuf> {
    if !path.is_dir() {
        return Err(HyperluxError::invalid_path(path, "not a directory"));
    }

    for attribute in [backlight::BRIGHTNESS, backlight::MAX_BRIGHTNESS] {
        if !path.join(attribute).is_file() {
            return Err(HyperluxError::invalid_path(
                path,
                format!("missing {} attribute", attribute),
            ));
        }
    }

    Ok(path.to_path_buf())
}

/// Validates an illuminance channel file
pub fn validate_sensor_path(path: &Path) -> Result<PathBuf> {
    let filename = path
        .file_name()
        .and_then(|n| n.to_str())
        .ok_or_else(|| HyperluxError::invalid_path(path, "invalid filename"))?;

    if !filename.starts_with(sensor::CHANNEL_PREFIX) {
        return Err(HyperluxError::invalid_path(
            path,
            "not an illuminance channel file",
        ));
    }

    if !path.is_file() {
        return Err(HyperluxError::invalid_path(path, "file does not exist"));
    }

    Ok(path.to_path_buf())
}
