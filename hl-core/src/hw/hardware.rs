//! Device discovery
//!
//! Finds the ambient light sensor and the backlight to drive when no explicit
//! paths are configured.
//!
//! # Devices
//!
//! - **Sensor**: IIO devices under `/sys/bus/iio/devices` exposing
//!   `in_illuminance_raw` (preferred) or `in_illuminance_input`
//! - **Backlight**: class devices under `/sys/class/backlight`, ranked by
//!   their `type` attribute (`firmware` > `platform` > `raw`)

use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info, trace};

use crate::constants::{backlight, sensor};
use crate::data::validate_backlight_dir;
use crate::error::{HyperluxError, Result};

/// Sorted entries of a sysfs class/bus directory
fn sorted_entries(base: &Path) -> Result<Vec<PathBuf>> {
    if !base.is_dir() {
        return Ok(Vec::new());
    }
    let mut entries = fs::read_dir(base)?
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .collect::<Vec<_>>();
    entries.sort();
    Ok(entries)
}

/// Find the first illuminance channel under an IIO devices directory
pub fn discover_illuminance_sensor(iio_base: &Path) -> Result<PathBuf> {
    debug!("Scanning IIO devices in {:?}", iio_base);

    let devices = sorted_entries(iio_base)?;
    for channel in sensor::CHANNEL_PREFERENCE {
        for device in &devices {
            let candidate = device.join(channel);
            trace!("Checking illuminance channel {:?}", candidate);
            if candidate.is_file() {
                info!(path = %candidate.display(), "Found ambient light sensor");
                return Ok(candidate);
            }
        }
    }

    Err(HyperluxError::DeviceNotFound(format!(
        "no illuminance channel under {}",
        iio_base.display()
    )))
}

/// Preference rank of a backlight device's control type (lower is better)
fn backlight_rank(dir: &Path) -> usize {
    let kind = fs::read_to_string(dir.join(backlight::TYPE)).unwrap_or_default();
    backlight::TYPE_PREFERENCE
        .iter()
        .position(|t| *t == kind.trim())
        .unwrap_or(backlight::TYPE_PREFERENCE.len())
}

/// Find the preferred backlight class directory
pub fn discover_backlight(backlight_base: &Path) -> Result<PathBuf> {
    debug!("Scanning backlight devices in {:?}", backlight_base);

    let best = sorted_entries(backlight_base)?
        .into_iter()
        .filter(|dir| validate_backlight_dir(dir).is_ok())
        .min_by_key(|dir| backlight_rank(dir));

    match best {
        Some(dir) => {
            info!(path = %dir.display(), "Found backlight device");
            Ok(dir)
        }
        None => Err(HyperluxError::DeviceNotFound(format!(
            "no backlight device under {}",
            backlight_base.display()
        ))),
    }
}
