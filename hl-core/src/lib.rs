//! Hyperlux Core Library
//!
//! Ambient-light driven backlight control for Linux systems.
//!
//! # Features
//!
//! - **Device Discovery**: Finds IIO illuminance sensors and sysfs backlight devices
//! - **Smoothing**: Fixed-size sample window with warm-up tracking
//! - **Mapping**: Linear, clamped illuminance to brightness mapping
//! - **Hysteresis**: Suppresses noise-driven writes near mapping boundaries
//! - **Ramping**: Bounded-step transitions between brightness levels
//! - **Configuration**: JSON settings file resolved into an immutable controller config
//!
//! # Module Structure
//!
//! - `hw/` - Hardware interaction (collaborator traits, sysfs access, discovery)
//! - `data/` - Controller configuration and validation
//! - `engine/` - Sample window, mapper, hysteresis gate and ramp planning
//!
//! # Example
//!
//! ```
//! use hl_core::{ControllerConfig, SampleWindow, target_brightness, should_apply};
//!
//! let config = ControllerConfig { min: 40, max: 100, ratio: 60, sensitivity: 2, ..ControllerConfig::with_device_max(100) };
//! let mut window = SampleWindow::new(1);
//! window.push(3000);
//!
//! let target = target_brightness(window.average().unwrap_or(0), &config);
//! assert_eq!(target, 70);
//! assert!(!should_apply(70, target, &config));
//! ```

// Grouped modules
pub mod data;
pub mod engine;
pub mod hw;

// Standalone modules
pub mod constants;
pub mod settings;

pub use hl_error as error;

// Re-export error types
pub use error::{HyperluxError, Result};

// Re-export configuration types from data/
pub use data::{
    validate_backlight_dir, validate_controller_config, validate_sensor_path, ControllerConfig,
    SensitivityUnit,
};

// Re-export engine types
pub use engine::{ambient_percent, ramp_levels, should_apply, target_brightness, RampSteps, SampleWindow};

// Re-export hardware collaborators and discovery
pub use hw::{
    discover_backlight, discover_illuminance_sensor, read_sysfs_value, write_sysfs_value,
    BacklightDevice, SensorSource, SysfsBacklight, SysfsSensor,
};

// Re-export settings functions
pub use settings::{default_settings_path, load_settings, load_settings_from, save_settings, Settings};
