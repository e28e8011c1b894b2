//! Controller configuration
//!
//! `ControllerConfig` is the immutable record the control loop runs on. It is
//! resolved once at startup from [`Settings`](crate::settings::Settings) and the
//! device maximum, validated, and never mutated afterwards.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::constants::defaults;
use crate::data::validation::validate_controller_config;
use crate::error::Result;
use crate::settings::Settings;

/// Unit the hysteresis sensitivity is expressed in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SensitivityUnit {
    /// Brightness units
    #[default]
    Absolute,
    /// Percent of the brightness ceiling
    Percent,
}

/// Resolved controller configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ControllerConfig {
    /// Brightness floor; the controller never drives the display below it
    pub min: u32,
    /// Brightness ceiling, at most the device maximum
    pub max: u32,
    /// Sensor units equivalent to 1% of the ambient scale
    pub ratio: u32,
    /// Minimum change required before writing
    pub sensitivity: u32,
    pub sensitivity_unit: SensitivityUnit,
    /// Sample window capacity
    pub probes: usize,
    /// Brightness units per ramp step
    pub ramp_step: u32,
    /// When false, changes are written in a single step
    pub ramp_enabled: bool,
    /// When true, no decision is taken until the sample window has filled once
    pub warmup_required: bool,
    pub ramp_interval: Duration,
    pub poll_interval: Duration,
    /// Compute and report decisions without writing
    pub dry_run: bool,
    /// Emit a per-cycle diagnostic observation
    pub debug: bool,
}

impl ControllerConfig {
    /// Built-in defaults with the ceiling set to the device maximum
    pub fn with_device_max(device_max: u32) -> Self {
        Self {
            min: defaults::MIN_BRIGHTNESS.min(device_max),
            max: device_max,
            ratio: defaults::RATIO,
            sensitivity: defaults::SENSITIVITY,
            sensitivity_unit: SensitivityUnit::Absolute,
            probes: defaults::PROBES,
            ramp_step: defaults::RAMP_STEP,
            ramp_enabled: true,
            warmup_required: true,
            ramp_interval: defaults::RAMP_INTERVAL,
            poll_interval: defaults::POLL_INTERVAL,
            dry_run: false,
            debug: false,
        }
    }

    /// Resolve settings against the device maximum
    ///
    /// A `max` of 0 selects the device maximum. A `max` or `min` above the
    /// device maximum is clamped to it. The result is validated before it is
    /// returned.
    pub fn resolve(settings: &Settings, device_max: u32) -> Result<Self> {
        let max = match settings.max {
            0 => device_max,
            requested if requested > device_max => {
                warn!(
                    requested,
                    device_max, "Configured maximum exceeds device maximum, clamping"
                );
                device_max
            }
            requested => requested,
        };

        let min = if settings.min > device_max {
            warn!(
                requested = settings.min,
                device_max, "Configured minimum exceeds device maximum, clamping"
            );
            device_max
        } else {
            settings.min
        };

        let config = Self {
            min,
            max,
            ratio: settings.ratio,
            sensitivity: settings.sensitivity,
            sensitivity_unit: settings.sensitivity_unit,
            probes: settings.probes,
            ramp_step: settings.ramp_step,
            ramp_enabled: settings.ramp_enabled,
            warmup_required: settings.warmup_required,
            ramp_interval: Duration::from_millis(settings.ramp_interval_ms),
            poll_interval: Duration::from_millis(settings.poll_interval_ms),
            dry_run: settings.dry_run,
            debug: settings.debug,
        };

        validate_controller_config(&config, device_max)?;
        Ok(config)
    }

    /// Sensitivity converted to brightness units
    pub fn sensitivity_threshold(&self) -> u32 {
        match self.sensitivity_unit {
            SensitivityUnit::Absolute => self.sensitivity,
            SensitivityUnit::Percent => {
                (u64::from(self.sensitivity) * u64::from(self.max) / 100) as u32
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::HyperluxError;

    #[test]
    fn test_resolve_autodetects_max() {
        let settings = Settings::default();
        let config = ControllerConfig::resolve(&settings, 937).unwrap();
        assert_eq!(config.max, 937);
        assert_eq!(config.min, defaults::MIN_BRIGHTNESS);
        assert_eq!(config.poll_interval, defaults::POLL_INTERVAL);
        assert_eq!(config.ramp_interval, defaults::RAMP_INTERVAL);
    }

    #[test]
    fn test_resolve_clamps_max_to_device() {
        let settings = Settings { max: 5000, ..Settings::default() };
        let config = ControllerConfig::resolve(&settings, 937).unwrap();
        assert_eq!(config.max, 937);
    }

    #[test]
    fn test_resolve_keeps_lower_max() {
        let settings = Settings { max: 500, ..Settings::default() };
        let config = ControllerConfig::resolve(&settings, 937).unwrap();
        assert_eq!(config.max, 500);
    }

    #[test]
    fn test_resolve_rejects_min_above_max() {
        let settings = Settings { min: 600, max: 500, ..Settings::default() };
        let err = ControllerConfig::resolve(&settings, 937).unwrap_err();
        assert!(matches!(err, HyperluxError::InvalidConfig { ref field, .. } if field == "min"));
    }

    #[test]
    fn test_resolve_defaults_on_small_device() {
        let config = ControllerConfig::resolve(&Settings::default(), 15).unwrap();
        assert_eq!(config.min, 15);
        assert_eq!(config.max, 15);
        assert_eq!(config, ControllerConfig::with_device_max(15));
    }

    #[test]
    fn test_resolve_clamped_min_still_checked_against_max() {
        let settings = Settings { min: 200, max: 50, ..Settings::default() };
        let err = ControllerConfig::resolve(&settings, 100).unwrap_err();
        assert!(matches!(err, HyperluxError::InvalidConfig { ref field, .. } if field == "min"));
    }

    #[test]
    fn test_sensitivity_threshold_units() {
        let mut config = ControllerConfig::with_device_max(200);
        config.sensitivity = 10;
        assert_eq!(config.sensitivity_threshold(), 10);

        config.sensitivity_unit = SensitivityUnit::Percent;
        assert_eq!(config.sensitivity_threshold(), 20);
    }

    #[test]
    fn test_with_device_max_small_device() {
        let config = ControllerConfig::with_device_max(15);
        assert_eq!(config.min, 15);
        assert_eq!(config.max, 15);
    }
}
