//! Constants and configuration values for Hyperlux
//!
//! Centralizes sysfs paths, file names, option defaults and validation limits.
//! Other modules should reference these rather than repeating literals.

use std::time::Duration;

/// System paths
pub mod paths {
    use std::path::PathBuf;

    /// Base path for backlight class devices
    pub const BACKLIGHT_BASE: &str = "/sys/class/backlight";

    /// Base path for Industrial I/O devices (ambient light sensors live here)
    pub const IIO_BASE: &str = "/sys/bus/iio/devices";

    /// System-wide configuration directory
    pub const CONFIG_DIR: &str = "/etc/hyperlux";

    /// Configuration file name, used both system-wide and per user
    pub const CONFIG_FILE: &str = "config.json";

    /// System-wide configuration file
    pub fn system_config_file() -> PathBuf {
        PathBuf::from(CONFIG_DIR).join(CONFIG_FILE)
    }

    /// Per-user configuration directory (`$XDG_CONFIG_HOME/hyperlux`)
    pub fn user_config_dir() -> Option<PathBuf> {
        if let Ok(xdg) = std::env::var("XDG_CONFIG_HOME") {
            return Some(PathBuf::from(xdg).join("hyperlux"));
        }
        dirs::config_dir().map(|p| p.join("hyperlux"))
    }
}

/// Backlight class attributes
pub mod backlight {
    /// Current brightness attribute (read/write)
    pub const BRIGHTNESS: &str = "brightness";

    /// Maximum brightness attribute (read-only)
    pub const MAX_BRIGHTNESS: &str = "max_brightness";

    /// Backlight control type attribute
    pub const TYPE: &str = "type";

    /// Control types in order of preference.
    /// Firmware interfaces are the ones the kernel documentation recommends.
    pub const TYPE_PREFERENCE: &[&str] = &["firmware", "platform", "raw"];
}

/// IIO ambient light attributes
pub mod sensor {
    /// Raw illuminance channel, in sensor-native units
    pub const ILLUMINANCE_RAW: &str = "in_illuminance_raw";

    /// Processed illuminance channel, in lux
    pub const ILLUMINANCE_INPUT: &str = "in_illuminance_input";

    /// Channel files in order of preference
    pub const CHANNEL_PREFERENCE: &[&str] = &[ILLUMINANCE_RAW, ILLUMINANCE_INPUT];

    /// Prefix every accepted illuminance channel file name starts with
    pub const CHANNEL_PREFIX: &str = "in_illuminance";
}

/// Ambient scale used by the mapper
pub mod mapping {
    /// Granularity of the ambient percentage scale
    pub const PERCENT_SCALE: u64 = 100;
}

/// Option defaults
pub mod defaults {
    use super::*;

    /// Number of illuminance probes averaged by the sample window
    pub const PROBES: usize = 8;

    /// Brightness floor the controller never goes below
    pub const MIN_BRIGHTNESS: u32 = 40;

    /// Brightness ceiling (0 = use the device maximum)
    pub const MAX_BRIGHTNESS: u32 = 0;

    /// Minimum change required before writing a new level
    pub const SENSITIVITY: u32 = 18;

    /// Sensor units equivalent to 1% of the ambient scale
    pub const RATIO: u32 = 20;

    /// Brightness units changed per ramp step
    pub const RAMP_STEP: u32 = 5;

    /// Poll interval in milliseconds (settings file representation)
    pub const POLL_INTERVAL_MS: u64 = 4000;

    /// Ramp interval in milliseconds (settings file representation)
    pub const RAMP_INTERVAL_MS: u64 = 200;

    /// Interval between checks for changed light conditions
    pub const POLL_INTERVAL: Duration = Duration::from_millis(POLL_INTERVAL_MS);

    /// Interval between consecutive ramp writes
    pub const RAMP_INTERVAL: Duration = Duration::from_millis(RAMP_INTERVAL_MS);
}

/// Validation limits
pub mod limits {
    use super::*;

    /// Largest accepted sample window
    pub const MAX_PROBES: usize = 1024;

    /// Largest accepted percent sensitivity
    pub const MAX_SENSITIVITY_PERCENT: u32 = 100;

    /// Longest accepted poll interval
    pub const MAX_POLL_INTERVAL: Duration = Duration::from_secs(3600);

    /// Longest accepted ramp interval
    pub const MAX_RAMP_INTERVAL: Duration = Duration::from_secs(10);

    /// Maximum settings file size (64KB)
    pub const MAX_SETTINGS_SIZE: u64 = 64 * 1024;
}
