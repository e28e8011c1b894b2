//! Configuration and validation modules
//!
//! Contains the resolved controller configuration and its invariant checks.

mod config;
mod validation;

pub use config::{ControllerConfig, SensitivityUnit};
pub use validation::{validate_backlight_dir, validate_controller_config, validate_sensor_path};
