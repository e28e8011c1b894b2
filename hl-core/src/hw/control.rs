//! Sysfs sensor and backlight access
//!
//! Low-level read/write operations on single-integer sysfs attributes.
//!
//! # Value Format
//!
//! Attributes hold a decimal integer, usually followed by a newline. Reads trim
//! surrounding whitespace before parsing; writes always append a newline.

use std::fs;
use std::path::{Path, PathBuf};

use crate::constants::backlight;
use crate::error::{HyperluxError, Result};
use crate::hw::{BacklightDevice, SensorSource};

/// Read a non-negative decimal integer from a sysfs attribute
///
/// Returns the failure reason as a string so callers can wrap it in the error
/// variant matching the resource they were reading.
pub fn read_sysfs_value(path: &Path) -> std::result::Result<u32, String> {
    let content = fs::read_to_string(path).map_err(|e| format!("Failed to read: {}", e))?;

    content
        .trim()
        .parse::<u32>()
        .map_err(|e| format!("Failed to parse '{}': {}", content.trim(), e))
}

/// Write a decimal integer followed by a newline to a sysfs attribute
pub fn write_sysfs_value(path: &Path, value: u32) -> std::io::Result<()> {
    fs::write(path, format!("{}\n", value))
}

/// IIO illuminance channel (`in_illuminance_raw` or `in_illuminance_input`)
#[derive(Debug, Clone)]
pub struct SysfsSensor {
    path: PathBuf,
}

impl SysfsSensor {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SensorSource for SysfsSensor {
    fn read_illuminance(&self) -> Result<u32> {
        read_sysfs_value(&self.path).map_err(|reason| HyperluxError::SensorRead {
            path: self.path.clone(),
            reason,
        })
    }
}

/// Backlight class device (`/sys/class/backlight/<name>`)
#[derive(Debug, Clone)]
pub struct SysfsBacklight {
    brightness_path: PathBuf,
    max_brightness_path: PathBuf,
}

impl SysfsBacklight {
    /// Create from a backlight class directory
    pub fn new(dir: impl AsRef<Path>) -> Self {
        let dir = dir.as_ref();
        Self {
            brightness_path: dir.join(backlight::BRIGHTNESS),
            max_brightness_path: dir.join(backlight::MAX_BRIGHTNESS),
        }
    }

    pub fn brightness_path(&self) -> &Path {
        &self.brightness_path
    }
}

impl BacklightDevice for SysfsBacklight {
    fn read_brightness(&self) -> Result<u32> {
        read_sysfs_value(&self.brightness_path).map_err(|reason| HyperluxError::BacklightRead {
            path: self.brightness_path.clone(),
            reason,
        })
    }

    fn read_max_brightness(&self) -> Result<u32> {
        read_sysfs_value(&self.max_brightness_path).map_err(|reason| {
            HyperluxError::BacklightRead {
                path: self.max_brightness_path.clone(),
                reason,
            }
        })
    }

    fn write_brightness(&self, level: u32) -> Result<()> {
        write_sysfs_value(&self.brightness_path, level).map_err(|e| {
            HyperluxError::BacklightWrite {
                path: self.brightness_path.clone(),
                reason: format!("Failed to write brightness {}: {}", level, e),
            }
        })
    }
}
